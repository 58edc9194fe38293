//! Error handling for the fare calculator

use crate::pricing::tables::TableError;

/// Application error type
#[derive(Debug, thiserror::Error)]
pub enum FareError {
    #[error("Invalid distance: {distance} km (distances start at 1 km)")]
    InvalidDistance { distance: u32 },

    #[error("Distance {distance} km out of supported range: no {table} entry for km {km}")]
    DistanceOutOfRange {
        distance: u32,
        km: u32,
        table: &'static str,
    },

    #[error("Tariff table error: {0}")]
    Table(#[from] TableError),

    #[error("Configuration error for {key}: {message}")]
    Config { key: String, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl FareError {
    pub(crate) fn config(key: impl Into<String>, message: impl Into<String>) -> Self {
        FareError::Config {
            key: key.into(),
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, FareError>;
