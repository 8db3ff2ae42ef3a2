use web_time::Instant;

/// Elapsed-time source for the once-per-second clock notification.
///
/// Single threaded: the owner polls it with the current instant. Once stopped or reset it never
/// reports another tick.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct TickTimer {
    started_at: Option<Instant>,
    ended_at: Option<Instant>,
    last_tick: u32,
}

impl TickTimer {
    pub fn start(&mut self, now: Instant) {
        log::debug!("Timer started");
        *self = Self {
            started_at: Some(now),
            ended_at: None,
            last_tick: 0,
        };
    }

    /// Freezes the elapsed time.
    pub fn stop(&mut self, now: Instant) {
        if self.is_running() {
            self.ended_at = Some(now);
        }
    }

    pub fn is_running(&self) -> bool {
        self.started_at.is_some() && self.ended_at.is_none()
    }

    /// How many seconds have passed since the timer started, 0 if it hasn't started.
    pub fn elapsed_secs(&self, now: Instant) -> u32 {
        match self.started_at {
            Some(started_at) => {
                let until = self.ended_at.unwrap_or(now);
                let secs = until.saturating_duration_since(started_at).as_secs();
                u32::try_from(secs).unwrap_or(u32::MAX)
            }
            None => 0,
        }
    }

    /// The new whole-second count if it advanced since the last tick.
    pub fn poll(&mut self, now: Instant) -> Option<u32> {
        if !self.is_running() {
            return None;
        }

        let elapsed = self.elapsed_secs(now);
        if elapsed > self.last_tick {
            self.last_tick = elapsed;
            Some(elapsed)
        } else {
            None
        }
    }
}

/// Formats seconds as `MM:SS`, minutes keep growing past 99.
pub fn clock_label(secs: u32) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::time::Duration;

    #[test]
    fn idle_timer_never_ticks() {
        let mut timer = TickTimer::default();
        let now = Instant::now();

        assert!(!timer.is_running());
        assert_eq!(timer.elapsed_secs(now), 0);
        assert_eq!(timer.poll(now + Duration::from_secs(5)), None);
    }

    #[test]
    fn poll_reports_each_new_second_once() {
        let mut timer = TickTimer::default();
        let start = Instant::now();
        timer.start(start);

        assert_eq!(timer.poll(start + Duration::from_millis(400)), None);
        assert_eq!(timer.poll(start + Duration::from_millis(1100)), Some(1));
        assert_eq!(timer.poll(start + Duration::from_millis(1900)), None);
        assert_eq!(timer.poll(start + Duration::from_secs(4)), Some(4));
    }

    #[test]
    fn stopped_timer_freezes_and_stays_silent() {
        let mut timer = TickTimer::default();
        let start = Instant::now();
        timer.start(start);
        timer.stop(start + Duration::from_secs(3));

        assert_eq!(timer.elapsed_secs(start + Duration::from_secs(60)), 3);
        assert_eq!(timer.poll(start + Duration::from_secs(60)), None);
    }

    #[test]
    fn clock_label_pads_minutes_and_seconds() {
        assert_eq!(clock_label(0), "00:00");
        assert_eq!(clock_label(75), "01:15");
        assert_eq!(clock_label(6000), "100:00");
    }
}
