/// Errors produced by the provider contract and its adapters.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A customization has no value and its descriptor does not allow null.
    #[error("missing required value for '{key}'")]
    MissingValue { key: String },

    /// A customization value does not match its declared type.
    #[error("wrong type for '{key}': expected {expected}, got {actual}")]
    WrongType {
        key: String,
        expected: &'static str,
        actual: &'static str,
    },

    /// A customization value is not one of the declared options.
    #[error("value {value} for '{key}' is not an allowed option")]
    NotInOptions { key: String, value: String },

    /// A numeric customization value falls outside its inclusive bounds.
    #[error("value {value} for '{key}' is out of range {range}")]
    OutOfRange {
        key: String,
        value: String,
        range: String,
    },

    /// A customization key has no entry in the provider's schema.
    #[error("unknown customization option: {0}")]
    UnknownOption(String),

    /// The remote model-listing call failed.
    #[error("could not retrieve models: {0}")]
    ModelDiscovery(Box<dyn std::error::Error + Send + Sync>),

    /// The remote model-listing call produced no usable models.
    #[error("could not retrieve models: catalog is empty")]
    NoModels,

    /// A model identifier is not present in the capability catalog.
    #[error("unknown model: {0}")]
    UnknownModel(String),

    /// A symbolic harm category or threshold did not resolve.
    #[error("invalid harm category or threshold: {symbol}")]
    SafetyTranslation { symbol: String },

    /// The underlying client rejected the final argument set.
    #[error("client construction failed: {0}")]
    ClientConstruction(Box<dyn std::error::Error + Send + Sync>),

    /// No async runtime is current, so the client cannot be constructed.
    #[error("no async runtime available for client construction")]
    NoRuntime,
}
