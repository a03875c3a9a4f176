use thiserror::Error;

#[derive(Error, Debug)]
pub enum OasisError {
    #[error("Invalid forecast policy rule '{rule}': {details}")]
    InvalidPolicy { rule: String, details: String },

    #[error("Invalid day of month {0}: must be between 1 and 31")]
    InvalidDayOfMonth(u32),

    #[error("Invalid ledger row #{index}: {details}")]
    InvalidLedgerRow { index: usize, details: String },

    #[error("Invalid benefit account: {0}")]
    InvalidBenefitAccount(String),

    #[error("Invalid noise factor {0}: must be between 0.0 and 1.0")]
    InvalidNoiseFactor(f64),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, OasisError>;
