use thiserror::Error;

#[derive(Debug, Error)]
pub enum MathError {
    #[error("Math error - overflow")]
    Overflow,
    #[error("Math error - division by zero")]
    DivisionByZero,
}

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Domain error - reserve must be strictly positive")]
    EmptyReserve,
    #[error("Domain error - fee must be below 10000 bps")]
    FeeOutOfRange,
    #[error("Domain error - price ratio must be strictly positive")]
    NonPositivePrice,
    #[error("Domain error - requested amount must be strictly positive")]
    NonPositiveAmount,
}

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    MathError(#[from] MathError),

    #[error(transparent)]
    DomainError(#[from] DomainError),
}
