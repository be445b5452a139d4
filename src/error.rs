use thiserror::Error;

/// Errors that can occur while loading or selecting stage datasets.
#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("Could not read stage file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse stage JSON: {0}")]
    JsonParseError(#[from] serde_json::Error),

    #[error("Stage JSON must be an array of stage records or an object keyed by stage, found {found}")]
    UnexpectedShape { found: String },

    #[error("Stage '{key}' is not an object: {found}")]
    MalformedStage { key: String, found: String },

    #[error("Dataset '{0}' is not one of the known presets")]
    UnknownDataset(String),

    #[error("Failed to parse graph options: {0}")]
    OptionsParseError(String),
}

/// Errors that can occur when persisting or restoring a built graph.
#[derive(Error, Debug)]
pub enum ArtifactError {
    #[error("Could not access artifact file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Serialization failed: {0}")]
    Encode(String),

    #[error("Deserialization failed: {0}")]
    Decode(String),
}

/// Errors that can occur when converting a custom caller format into a `StageSet`.
#[derive(Error, Debug, Clone)]
pub enum StageConversionError {
    #[error("Invalid custom stage data: {0}")]
    ValidationError(String),
}
