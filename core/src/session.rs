use serde::{Deserialize, Serialize};
use web_time::Instant;

use crate::*;

/// Valid transitions:
/// - NotStarted -> InProgress
/// - InProgress -> Won
/// - InProgress -> Lost
/// - any -> NotStarted, on reset or reconfigure
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    /// Board not generated yet
    #[default]
    NotStarted,
    /// Mines placed, timer running
    InProgress,
    /// Game ended and player won
    Won,
    /// Game ended and player lost
    Lost,
}

impl GameStatus {
    /// Indicates the game has not started yet
    pub const fn is_initial(self) -> bool {
        matches!(self, Self::NotStarted)
    }

    /// Indicates the game has ended and no moves can be made anymore
    pub const fn is_final(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Button {
    Left,
    Right,
}

/// One player's run of games on a configurable board, driven by [`Input`] events.
///
/// Mines are placed lazily around the first cell acted on, so the first action never loses.
#[derive(Debug)]
pub struct GameSession {
    config: GameConfig,
    generator: Box<dyn MinefieldGenerator>,
    engine: Option<PlayEngine>,
    status: GameStatus,
    timer: TickTimer,
}

impl GameSession {
    pub fn new(config: GameConfig) -> Self {
        Self::with_generator(config, SafeOpeningGenerator::from_entropy())
    }

    /// Every board of this session is reproducible from `seed`.
    pub fn with_seed(config: GameConfig, seed: u64) -> Self {
        Self::with_generator(config, SafeOpeningGenerator::new(seed))
    }

    pub fn with_generator(config: GameConfig, generator: impl MinefieldGenerator + 'static) -> Self {
        Self {
            config,
            generator: Box::new(generator),
            engine: None,
            status: GameStatus::NotStarted,
            timer: TickTimer::default(),
        }
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Whether the mines of the current board have been placed.
    pub fn is_generated(&self) -> bool {
        self.engine.is_some()
    }

    pub fn engine(&self) -> Option<&PlayEngine> {
        self.engine.as_ref()
    }

    pub fn flags_used(&self) -> CellCount {
        self.engine.as_ref().map_or(0, PlayEngine::flags_used)
    }

    /// Configured mines minus flags placed, not clamped.
    pub fn remaining_mines(&self) -> isize {
        mines_left(self.config.mines, self.flags_used())
    }

    pub fn elapsed_secs(&self, now: Instant) -> u32 {
        self.timer.elapsed_secs(now)
    }

    /// The cell at `coords`; hidden and mine-free until the board is generated.
    pub fn cell(&self, coords: Coord2) -> Result<Cell> {
        let coords = self.config.validate_coords(coords)?;
        Ok(self
            .engine
            .as_ref()
            .map_or_else(Cell::default, |engine| engine.cell(coords)))
    }

    pub fn handle(&mut self, input: Input) -> Result<Vec<Notification>> {
        self.handle_at(input, Instant::now())
    }

    /// Applies one input event. On error nothing changed.
    pub fn handle_at(&mut self, input: Input, now: Instant) -> Result<Vec<Notification>> {
        log::trace!("Handling {:?} in {:?}", input, self.status);
        match input {
            Input::LeftClick { row, col } => self.click((row, col), Button::Left, now),
            Input::RightClick { row, col } => self.click((row, col), Button::Right, now),
            Input::Reset => Ok(self.reset()),
            Input::Reconfigure {
                width,
                height,
                mines,
            } => self.reconfigure(width, height, mines),
        }
    }

    /// Emits the elapsed-time notification when a new second has passed in a running game.
    pub fn tick(&mut self, now: Instant) -> Vec<Notification> {
        if !matches!(self.status, GameStatus::InProgress) {
            return Vec::new();
        }

        self.timer
            .poll(now)
            .map(|seconds| Notification::ElapsedTimeTick { seconds })
            .into_iter()
            .collect()
    }

    /// Discards the board and starts over with the current configuration.
    pub fn reset(&mut self) -> Vec<Notification> {
        let mut out = vec![Notification::BoardCleared {
            width: self.config.width,
            height: self.config.height,
        }];

        self.engine = None;
        self.timer = TickTimer::default();
        self.set_status(GameStatus::NotStarted, &mut out);
        out.push(Notification::RemainingMineCount {
            remaining: mines_left(self.config.mines, 0),
        });
        log::debug!("Board reset to {:?}", self.config);
        out
    }

    /// Validates the new configuration, then resets. An invalid configuration leaves everything as is.
    pub fn reconfigure(&mut self, width: u32, height: u32, mines: u32) -> Result<Vec<Notification>> {
        self.config = GameConfig::new(width, height, mines)?;
        Ok(self.reset())
    }

    fn click(&mut self, coords: Coord2, button: Button, now: Instant) -> Result<Vec<Notification>> {
        let coords = self.config.validate_coords(coords)?;
        let mut out = Vec::new();

        match self.status {
            GameStatus::NotStarted => self.first_action(coords, button, now, &mut out)?,
            GameStatus::InProgress => self.act(coords, button, false, now, &mut out),
            GameStatus::Won | GameStatus::Lost => {}
        }

        Ok(out)
    }

    fn first_action(
        &mut self,
        coords: Coord2,
        button: Button,
        now: Instant,
        out: &mut Vec<Notification>,
    ) -> Result<()> {
        let layout = self.generator.generate(&self.config, coords);
        if layout.size() != self.config.size() {
            return Err(GameError::InvalidBoardShape);
        }

        self.engine = Some(PlayEngine::new(layout));
        self.set_status(GameStatus::InProgress, out);
        self.timer.start(now);
        out.push(Notification::ElapsedTimeTick { seconds: 0 });

        self.act(coords, button, true, now, out);
        Ok(())
    }

    fn act(
        &mut self,
        coords: Coord2,
        button: Button,
        opening: bool,
        now: Instant,
        out: &mut Vec<Notification>,
    ) {
        let Some(engine) = self.engine.as_mut() else {
            return;
        };

        let finished = match button {
            Button::Left => match engine.reveal(coords, opening, out) {
                RevealOutcome::HitMine => Some(GameStatus::Lost),
                RevealOutcome::Won => Some(GameStatus::Won),
                RevealOutcome::Revealed | RevealOutcome::NoChange => None,
            },
            Button::Right => {
                if engine.toggle_flag(coords, out).has_update() {
                    out.push(Notification::RemainingMineCount {
                        remaining: mines_left(self.config.mines, engine.flags_used()),
                    });
                    engine.is_victory().then_some(GameStatus::Won)
                } else {
                    None
                }
            }
        };

        if let Some(status) = finished {
            self.finish(status, now, out);
        }
    }

    fn finish(&mut self, status: GameStatus, now: Instant, out: &mut Vec<Notification>) {
        self.timer.stop(now);
        self.set_status(status, out);

        if let Some(engine) = &self.engine {
            out.push(Notification::AllMinesShown {
                mines: engine.shown_mines(),
            });
            let cells = engine.incorrect_flags();
            if !cells.is_empty() {
                out.push(Notification::IncorrectFlagsShown { cells });
            }
        }
    }

    fn set_status(&mut self, status: GameStatus, out: &mut Vec<Notification>) {
        if self.status != status {
            log::debug!("Game status {:?} -> {:?}", self.status, status);
            self.status = status;
            out.push(Notification::GameStatusChanged { status });
        }
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new(GameConfig::default())
    }
}

fn mines_left(mines: CellCount, flags_used: CellCount) -> isize {
    (mines as isize) - (flags_used as isize)
}
