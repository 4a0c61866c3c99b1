//! Model catalogs for the Google GenAI provider.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use weft_provider::{Error, ModelCapability, ModelLister, ModelListing, StaticCatalog};

/// Model used when the caller configures none (static catalog).
pub const DEFAULT_MODEL: &str = "gemini-pro";

/// Base URL of the Generative Language API.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Name markers a fetched listing must contain to be retained. The live
/// listing mixes PaLM-era and Gemini-family names; only the latter are
/// chat models this provider can drive.
pub(crate) const MODEL_NAME_MARKERS: &[&str] = &["gemini"];

pub(crate) fn static_capabilities() -> Vec<ModelCapability> {
    vec![
        ModelCapability::new("chat-bison", 4096),
        ModelCapability::new("codechat-bison", 6144),
        ModelCapability::new("gemini-pro", 32768),
    ]
}

pub(crate) fn static_catalog() -> StaticCatalog {
    StaticCatalog::new(static_capabilities(), DEFAULT_MODEL)
}

/// Remote lister for the API's `models` endpoint.
///
/// The credential travels in the `x-goog-api-key` header, keeping it out of
/// URLs and therefore out of any error text reqwest attaches them to.
pub struct GenAiModelLister {
    http: reqwest::Client,
    base_url: String,
    api_key: SecretString,
}

impl GenAiModelLister {
    pub fn new(base_url: impl Into<String>, api_key: SecretString) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            api_key,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ListModelsResponse {
    #[serde(default)]
    models: Vec<ListedModel>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListedModel {
    name: String,
    #[serde(default)]
    input_token_limit: u64,
}

#[async_trait]
impl ModelLister for GenAiModelLister {
    async fn list_models(&self) -> Result<Vec<ModelListing>, Error> {
        let url = format!("{}/models", self.base_url);
        let response = self
            .http
            .get(&url)
            .header("x-goog-api-key", self.api_key.expose_secret())
            .send()
            .await
            .map_err(|err| Error::ModelDiscovery(Box::new(err)))?
            .error_for_status()
            .map_err(|err| Error::ModelDiscovery(Box::new(err)))?;

        let parsed: ListModelsResponse = response
            .json()
            .await
            .map_err(|err| Error::ModelDiscovery(Box::new(err)))?;
        tracing::debug!("listed {} models from {}", parsed.models.len(), url);

        Ok(parsed
            .models
            .into_iter()
            .map(|model| ModelListing {
                name: model.name,
                input_token_limit: model.input_token_limit,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use secrecy::SecretString;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::GenAiModelLister;
    use weft_provider::{Error, ModelLister};

    #[tokio::test]
    async fn lister_parses_the_models_response() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/models"))
            .and(header("x-goog-api-key", "test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "models": [
                    {"name": "models/gemini-1.5-pro", "inputTokenLimit": 1048576},
                    {"name": "models/text-bison", "inputTokenLimit": 8192},
                ],
            })))
            .mount(&server)
            .await;

        let lister =
            GenAiModelLister::new(server.uri(), SecretString::from("test-key".to_string()));
        let listings = lister.list_models().await.unwrap();
        assert_eq!(listings.len(), 2);
        assert_eq!(listings[0].name, "models/gemini-1.5-pro");
        assert_eq!(listings[0].input_token_limit, 1048576);
    }

    #[tokio::test]
    async fn lister_surfaces_http_failures() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/models"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let lister =
            GenAiModelLister::new(server.uri(), SecretString::from("test-key".to_string()));
        assert!(matches!(
            lister.list_models().await,
            Err(Error::ModelDiscovery(_))
        ));
    }
}
