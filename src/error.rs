use thiserror::Error;


#[macro_export]
macro_rules! internal_error_message {
    () => {
        format!("Internal error at {}:{}.", file!(), line!())
    };
    ($($arg:tt)+) => {
        format!("Internal error at {}:{}: {}.", file!(), line!(), format!($($arg)*))
    };
}

// Rejection reasons for a move attempt. A rejected move never changes the board.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Error)]
pub enum TurnError {
    #[error("Out of board")]
    OutOfBounds,
    #[error("Empty start cell")]
    EmptySource,
    #[error("Restricted move")]
    IllegalMoveShape,
    #[error("That is not the first move for this piece")]
    NotFirstMove,
    #[error("Pieces of one color on start and end positions")]
    FriendlyFire,
    #[error("The king cannot be captured")]
    KingCapture,
    #[error("Cannot capture nothing")]
    NothingToCapture,
    #[error("Cannot capture in such way")]
    CannotCaptureThisWay,
    #[error("A piece is in the way")]
    BlockedPath,
    #[error("Wrong color of piece for this move")]
    WrongTurn,
    #[error("King is under attack")]
    CastlingWhileInCheck,
    #[error("A cell the king crosses is under attack or not empty")]
    CastlingPathUnsafe,
    #[error("King has already moved")]
    KingAlreadyMoved,
    #[error("Cell is empty or the piece is not a rook")]
    InvalidCastlingRook,
    #[error("Cannot castle with the enemy's rook")]
    EnemyRook,
    #[error("Rook has already moved")]
    RookAlreadyMoved,
    #[error("This move leaves the king under attack")]
    UnprotectedKing,
    #[error("The game is over")]
    GameOver,
}
