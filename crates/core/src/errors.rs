use thiserror::Error;

#[derive(Error, Debug)]
pub enum CampusError {
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Invalid status transition from {from} to {to}")]
    InvalidTransition { from: String, to: String },

    #[error("Feature disabled: {0}")]
    FeatureDisabled(String),

    #[error("Service unavailable: {0}")]
    Unavailable(String),

    #[error("Upstream service error: {0}")]
    Upstream(String),

    #[error("Database error: {0}")]
    Database(#[from] eyre::Report),

    #[error("Internal server error: {0}")]
    Internal(#[from] Box<dyn std::error::Error + Send + Sync>),
}

impl CampusError {
    pub fn not_found(entity: &str, id: impl std::fmt::Display) -> Self {
        CampusError::NotFound(format!("{} with ID {} not found", entity, id))
    }

    /// Message safe to show to API clients.
    pub fn public_message(&self) -> String {
        match self {
            CampusError::NotFound(msg)
            | CampusError::Validation(msg)
            | CampusError::Conflict(msg)
            | CampusError::FeatureDisabled(msg)
            | CampusError::Unavailable(msg)
            | CampusError::Upstream(msg) => msg.clone(),
            CampusError::InvalidTransition { .. } => self.to_string(),
            CampusError::Database(_) | CampusError::Internal(_) => {
                "Something went wrong, please try again later".to_string()
            }
        }
    }
}

pub type CampusResult<T> = Result<T, CampusError>;
