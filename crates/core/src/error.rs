use thiserror::Error;

/// Precondition violations that abort a generation batch.
///
/// Identifier and import-alias collisions never show up here; the symbol
/// table and type resolver always resolve them.
#[derive(Debug, Error)]
pub enum GeneratorError {
    #[error("Failed to parse discovery document: {0}")]
    InvalidModel(#[source] serde_json::Error),
    #[error("Failed to parse generator config: {0}")]
    InvalidConfig(#[source] toml::de::Error),
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Method '{method}' has no resource identifier in path template '{path}'")]
    MissingResourceIdentifier { method: String, path: String },
    #[error("Interface '{interface}': {source}")]
    Interface {
        interface: String,
        #[source]
        source: Box<GeneratorError>,
    },
}

impl GeneratorError {
    /// Attach the interface being generated when the error surfaced.
    pub fn in_interface(self, interface: &str) -> Self {
        Self::Interface {
            interface: interface.to_string(),
            source: Box::new(self),
        }
    }
}
