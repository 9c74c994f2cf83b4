use thiserror::Error;

/// Errors raised while configuring or serving the calculator.
///
/// The maturity computation itself never fails; see `core::compute_maturity`.
#[derive(Debug, Error)]
pub enum CalcError {
    #[error("Invalid locale: {0}")]
    InvalidLocale(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
