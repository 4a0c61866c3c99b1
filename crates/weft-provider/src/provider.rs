//! The provider plugin contract consumed by the host framework.

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;

use crate::catalog::ModelCapability;
use crate::error::Error;
use crate::llm::ChatLlm;
use crate::schema::{CustomizationConfig, CustomizationMap};

/// What a provider supports, as reported to the host.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Capabilities {
    pub chat: bool,
    /// Whether configured models are checked against the catalog.
    pub validate_models: bool,
    /// The capability table, present only when it is known statically.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub models: Option<Vec<ModelCapability>>,
}

/// Arguments to [`ChatProviderBackend::make_llm`].
#[derive(Debug, Clone, Default)]
pub struct MakeLlmRequest {
    /// Caller overrides, highest-precedence customization layer.
    pub customizations: CustomizationMap,
    /// Tool declarations, passed to the client constructor untouched.
    pub tools: Option<Value>,
    pub tool_choice: Option<Value>,
    /// Start the merge from the provider's declared defaults.
    pub use_defaults: bool,
}

/// A concrete, type-erased chat model provider.
///
/// Wraps a [`ChatProviderBackend`] behind a `Box<dyn ...>` so the host
/// never needs generic parameters and can swap providers freely.
pub struct ChatProvider {
    inner: Box<dyn ChatProviderBackend>,
}

impl ChatProvider {
    /// Wrap any backend implementation into a provider.
    pub fn new(backend: impl ChatProviderBackend + 'static) -> Self {
        Self {
            inner: Box::new(backend),
        }
    }

    /// The provider name (e.g. `"chat_google_genai"`).
    pub fn name(&self) -> &str {
        self.inner.name()
    }

    pub fn capabilities(&self) -> Capabilities {
        self.inner.capabilities()
    }

    pub fn model_property_name(&self) -> &str {
        self.inner.model_property_name()
    }

    pub async fn default_model(&self) -> Result<String, Error> {
        self.inner.default_model().await
    }

    pub async fn available_models(&self) -> Result<Vec<String>, Error> {
        self.inner.available_models().await
    }

    pub async fn max_tokens(&self, model: &str) -> Result<u64, Error> {
        self.inner.max_tokens(model).await
    }

    pub async fn customization_config(&self) -> Result<CustomizationConfig, Error> {
        self.inner.customization_config().await
    }

    pub async fn make_llm(&self, request: MakeLlmRequest) -> Result<ChatLlm, Error> {
        self.inner.make_llm(request).await
    }
}

/// Trait that provider crates implement.
///
/// Catalog-backed operations are async because the first access may issue
/// the one-shot model-discovery call.
#[async_trait]
pub trait ChatProviderBackend: Send + Sync {
    fn name(&self) -> &str;

    fn capabilities(&self) -> Capabilities;

    /// Name of the client construction argument carrying the model id.
    fn model_property_name(&self) -> &str {
        "model"
    }

    async fn default_model(&self) -> Result<String, Error>;

    async fn available_models(&self) -> Result<Vec<String>, Error>;

    /// Token ceiling for one model; unknown identifiers are an error.
    async fn max_tokens(&self, model: &str) -> Result<u64, Error>;

    /// The option schema the host uses to render and validate settings.
    async fn customization_config(&self) -> Result<CustomizationConfig, Error>;

    /// Merge, validate, and translate customizations, then construct the
    /// underlying client.
    async fn make_llm(&self, request: MakeLlmRequest) -> Result<ChatLlm, Error>;
}

/// Host-side accessor for the provider's stored configuration.
pub trait ConfigStore: Send + Sync {
    fn current_customizations(&self) -> CustomizationMap;
}

/// Blanket impl: any `Fn() -> CustomizationMap` is a config store.
impl<F> ConfigStore for F
where
    F: Fn() -> CustomizationMap + Send + Sync,
{
    fn current_customizations(&self) -> CustomizationMap {
        (self)()
    }
}
