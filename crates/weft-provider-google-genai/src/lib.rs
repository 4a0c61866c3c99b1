//! Google GenAI (Gemini) chat provider for the weft plugin contract.
//!
//! Declares the provider's customization schema, resolves its model
//! catalog (a built-in table, or the live listing when discovery is
//! enabled), translates symbolic safety policies, and constructs the
//! underlying chat client from the merged configuration.

mod catalog;
mod client;
mod convert;
mod safety;

pub use catalog::{DEFAULT_BASE_URL, DEFAULT_MODEL, GenAiModelLister};
pub use client::{ClientParams, GenAiChatClient, LLM_TYPE, ensure_execution_context};
pub use safety::{HarmBlockThreshold, HarmCategory, SafetySetting, translate_safety_settings};

use std::sync::Arc;

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;

use weft_provider::{
    Capabilities, ChatLlm, ChatProvider, ChatProviderBackend, ConfigStore, CustomizationConfig,
    CustomizationMap, Error, FetchedCatalog, MakeLlmRequest, ModelCatalog, PresetValue,
    merge_customizations,
};

/// Configuration for the Google GenAI provider.
pub struct GoogleGenAiConfig {
    /// Provider-level credential, used when the customization layers do
    /// not carry one.
    pub api_key: SecretString,
    pub base_url: String,
    /// Discover models from the live API instead of the built-in table.
    pub discover_models: bool,
}

impl Default for GoogleGenAiConfig {
    fn default() -> Self {
        Self {
            api_key: SecretString::from(String::new()),
            base_url: DEFAULT_BASE_URL.to_string(),
            discover_models: false,
        }
    }
}

/// Create a Google GenAI provider with the given config and stored-config
/// accessor.
pub fn provider(config: GoogleGenAiConfig, store: Arc<dyn ConfigStore>) -> ChatProvider {
    ChatProvider::new(GoogleGenAiProvider::new(config, store))
}

/// Create a provider reading `GOOGLE_API_KEY` from the environment, with
/// no stored configuration.
pub fn from_env() -> ChatProvider {
    let config = GoogleGenAiConfig {
        api_key: SecretString::from(std::env::var("GOOGLE_API_KEY").unwrap_or_default()),
        ..Default::default()
    };
    provider(config, Arc::new(CustomizationMap::new))
}

// ---------------------------------------------------------------------------
// Internals
// ---------------------------------------------------------------------------

struct GoogleGenAiProvider {
    api_key: SecretString,
    catalog: Box<dyn ModelCatalog>,
    store: Arc<dyn ConfigStore>,
}

impl GoogleGenAiProvider {
    fn new(config: GoogleGenAiConfig, store: Arc<dyn ConfigStore>) -> Self {
        let catalog: Box<dyn ModelCatalog> = if config.discover_models {
            let lister = GenAiModelLister::new(config.base_url.clone(), config.api_key.clone());
            Box::new(FetchedCatalog::new(
                Arc::new(lister),
                catalog::MODEL_NAME_MARKERS,
            ))
        } else {
            Box::new(catalog::static_catalog())
        };

        Self {
            api_key: config.api_key,
            catalog,
            store,
        }
    }
}

#[async_trait]
impl ChatProviderBackend for GoogleGenAiProvider {
    fn name(&self) -> &str {
        LLM_TYPE
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities {
            chat: true,
            validate_models: true,
            models: self.catalog.static_entries().map(|entries| entries.to_vec()),
        }
    }

    async fn default_model(&self) -> Result<String, Error> {
        self.catalog.default_model().await
    }

    async fn available_models(&self) -> Result<Vec<String>, Error> {
        self.catalog.available_models().await
    }

    async fn max_tokens(&self, model: &str) -> Result<u64, Error> {
        self.catalog.max_tokens(model).await
    }

    async fn customization_config(&self) -> Result<CustomizationConfig, Error> {
        let models = self.catalog.available_models().await?;
        Ok(customization_config_for(models))
    }

    async fn make_llm(&self, request: MakeLlmRequest) -> Result<ChatLlm, Error> {
        let schema = self.customization_config().await?;
        let default_model = self.catalog.default_model().await?;
        let stored = self.store.current_customizations();

        let merged = merge_customizations(
            &schema,
            self.model_property_name(),
            &default_model,
            &stored,
            &request.customizations,
            request.use_defaults,
        )?;

        let mut params = convert::client_params(merged, request.tools, request.tool_choice)?;
        if params.google_api_key.is_none() && !self.api_key.expose_secret().is_empty() {
            params.google_api_key = Some(self.api_key.clone());
        }

        tracing::debug!("constructing {} client for model {}", LLM_TYPE, params.model);
        let client = GenAiChatClient::new(params)?;
        Ok(ChatLlm::new(client))
    }
}

/// The provider's option schema. The model option enumerates `models`;
/// each safety category takes one of the threshold symbols.
fn customization_config_for(models: Vec<String>) -> CustomizationConfig {
    let thresholds: Vec<Value> = HarmBlockThreshold::ALL
        .iter()
        .map(|threshold| Value::String(threshold.as_str().to_string()))
        .collect();

    CustomizationConfig::new()
        .option(
            "model",
            PresetValue::string().options(models.into_iter().map(Value::String)),
        )
        .option("google_api_key", PresetValue::string().private())
        .option("temperature", PresetValue::float().range(0.0, 1.0))
        .option(
            "max_output_tokens",
            PresetValue::integer().range(1.0, 2048.0).include_none(),
        )
        .option("top_k", PresetValue::integer().range(1.0, 40.0))
        .option("top_p", PresetValue::float().range(0.0, 1.0))
        .option("n", PresetValue::integer().range(1.0, 10.0))
        .group(
            convert::SAFETY_SETTINGS_KEY,
            HarmCategory::ADJUSTABLE.iter().map(|category| {
                (
                    category.as_str().to_string(),
                    PresetValue::string().options(thresholds.clone()),
                )
            }),
        )
}
