use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MathError {
    #[error("Math error - arithmetic overflow")]
    ArithmeticOverflow,
    #[error("Math error - division by zero")]
    DivisionByZero,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StateError {
    #[error("State error - lower sqrt ratio must be below upper sqrt ratio")]
    InvalidRange,
    #[error("State error - token0 must sort below token1")]
    InvalidTokenOrder,

    #[error("State error - tick out of bounds")]
    TickOutOfBounds,
    #[error("State error - sqrtPrice out of bounds")]
    SqrtPriceOutOfBounds,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Error {
    #[error(transparent)]
    MathError(#[from] crate::error::MathError),

    #[error(transparent)]
    StateError(#[from] crate::error::StateError),
}
