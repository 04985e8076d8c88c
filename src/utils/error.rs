use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Invalid identifier '{value}': {reason}")]
    InvalidIdentifier { value: String, reason: String },

    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    #[error("Store request failed: {0}")]
    DataAccess(#[from] reqwest::Error),

    #[error("Malformed document in '{collection}': {source}")]
    MalformedDocument {
        collection: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Report generation failed for '{id}': {message}")]
    Generation { id: String, message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid configuration value for {field} ('{value}'): {reason}")]
    InvalidConfigValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },
}

impl ServiceError {
    pub fn not_found(entity: &str, id: &str) -> Self {
        Self::NotFound {
            entity: entity.to_string(),
            id: id.to_string(),
        }
    }

    pub fn generation(id: &str, message: impl std::fmt::Display) -> Self {
        Self::Generation {
            id: id.to_string(),
            message: message.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ServiceError>;
