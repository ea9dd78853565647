use sqlx::Error as SqlxError;
use std::time::Duration;
use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum WarehouseError {
    #[error("Configuration error: {0}")]
    Config(#[from] Box<figment::Error>),

    #[error("Connection error: {0}")]
    Connection(#[source] SqlxError),

    #[error("Connection timed out after {}s", .0.as_secs())]
    ConnectTimeout(Duration),

    #[error("Database error: {0}")]
    Database(#[from] SqlxError),

    #[error("Submission already exists for division {division}, {month}/{year}")]
    DuplicateSubmission {
        division: String,
        month: i32,
        year: i32,
    },

    #[error("Invalid submission: {0}")]
    InvalidSubmission(String),

    #[error("Connection already closed")]
    ConnectionClosed,
}

impl WarehouseError {
    /// True when the failure happened while establishing the connection.
    pub fn is_connection_error(&self) -> bool {
        matches!(
            self,
            WarehouseError::Connection(_) | WarehouseError::ConnectTimeout(_)
        )
    }

    /// Every failure is terminal for the setup routine.
    pub fn exit_code(&self) -> u8 {
        1
    }
}

impl From<figment::Error> for WarehouseError {
    fn from(e: figment::Error) -> Self {
        WarehouseError::Config(Box::new(e))
    }
}
