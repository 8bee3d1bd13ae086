use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Configuration parse error: {0}")]
    ConfigParse(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to load catalog '{path}': {reason}")]
    CatalogLoad { path: String, reason: String },

    #[error("Duplicate entity id(s) in catalog: {}", .0.join(", "))]
    DuplicateEntityId(Vec<String>),

    #[error("Invalid entity '{id}': {reason}")]
    InvalidEntity { id: String, reason: String },

    #[error("Unknown entity: {0}")]
    UnknownEntity(String),

    #[error("No comparison found for '{0}'")]
    NotFound(String),
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::ConfigParse(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
