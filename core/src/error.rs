use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error(
        "Invalid board {width}x{height} with {mines} mines, sides must be within {min}..={max} \
         and mines within 1..={cap}",
        min = crate::MIN_SIDE,
        max = crate::MAX_SIDE,
        cap = .width.saturating_mul(.height.to_owned()).saturating_sub(crate::OPENING_CELLS.into())
    )]
    InvalidConfig { width: u32, height: u32, mines: u32 },
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Board shape does not match declared size")]
    InvalidBoardShape,
}

pub type Result<T> = core::result::Result<T, GameError>;
