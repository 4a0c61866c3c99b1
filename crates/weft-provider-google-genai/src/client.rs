//! The wrapped Gemini chat client and its construction arguments.

use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;

use weft_provider::{ChatLlmBackend, Error};

use crate::safety::SafetySetting;

/// Type tag reported for clients constructed by this provider.
pub const LLM_TYPE: &str = "chat_google_genai";

/// Final construction arguments for [`GenAiChatClient`].
///
/// The credential is a [`SecretString`], so `Debug` output redacts it.
#[derive(Debug, Clone, Default)]
pub struct ClientParams {
    pub model: String,
    pub google_api_key: Option<SecretString>,
    pub temperature: Option<f64>,
    pub max_output_tokens: Option<u64>,
    pub top_k: Option<u64>,
    pub top_p: Option<f64>,
    /// Number of candidates to generate.
    pub n: Option<u64>,
    pub safety_settings: Vec<SafetySetting>,
    /// Gemini has no system role; the client folds system messages into
    /// the first human turn when this is set.
    pub convert_system_message_to_human: bool,
    pub tools: Option<Value>,
    pub tool_choice: Option<Value>,
}

/// Ensure a usable async execution context is current.
///
/// The HTTP stack registers its connection pool and timers against the
/// ambient runtime handle, so construction must not proceed without one.
pub fn ensure_execution_context() -> Result<(), Error> {
    tokio::runtime::Handle::try_current()
        .map(|_| ())
        .map_err(|_| Error::NoRuntime)
}

/// The underlying chat client.
///
/// Chat traffic, streaming, and token accounting live behind this
/// boundary; this type owns the fully resolved construction arguments and
/// the HTTP client they will be used with.
#[derive(Debug)]
pub struct GenAiChatClient {
    params: ClientParams,
    #[allow(dead_code)]
    http: reqwest::Client,
}

impl GenAiChatClient {
    /// Construct a client from the final argument set.
    ///
    /// Fails when no usable credential is present or the HTTP stack cannot
    /// initialize; upstream messages propagate unchanged.
    pub fn new(params: ClientParams) -> Result<Self, Error> {
        ensure_execution_context()?;

        let has_key = params
            .google_api_key
            .as_ref()
            .is_some_and(|key| !key.expose_secret().trim().is_empty());
        if !has_key {
            return Err(Error::ClientConstruction(
                "google_api_key is missing or empty".into(),
            ));
        }

        let http = reqwest::Client::builder()
            .build()
            .map_err(|err| Error::ClientConstruction(Box::new(err)))?;

        Ok(Self { params, http })
    }

    pub fn params(&self) -> &ClientParams {
        &self.params
    }
}

impl ChatLlmBackend for GenAiChatClient {
    fn llm_type(&self) -> &str {
        LLM_TYPE
    }

    fn model(&self) -> &str {
        &self.params.model
    }
}

#[cfg(test)]
mod tests {
    use secrecy::SecretString;

    use super::{ClientParams, GenAiChatClient, LLM_TYPE, ensure_execution_context};
    use weft_provider::{ChatLlmBackend, Error};

    fn params() -> ClientParams {
        ClientParams {
            model: "gemini-pro".into(),
            google_api_key: Some(SecretString::from("sk-secret".to_string())),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn construction_succeeds_with_a_credential() {
        let client = GenAiChatClient::new(params()).unwrap();
        assert_eq!(client.llm_type(), LLM_TYPE);
        assert_eq!(client.model(), "gemini-pro");
    }

    #[tokio::test]
    async fn construction_fails_without_a_credential() {
        let err = GenAiChatClient::new(ClientParams {
            google_api_key: None,
            ..params()
        })
        .unwrap_err();
        assert!(matches!(err, Error::ClientConstruction(_)));

        let err = GenAiChatClient::new(ClientParams {
            google_api_key: Some(SecretString::from("   ".to_string())),
            ..params()
        })
        .unwrap_err();
        assert!(matches!(err, Error::ClientConstruction(_)));
    }

    #[test]
    fn construction_requires_an_execution_context() {
        // No tokio runtime in a plain #[test].
        assert!(matches!(ensure_execution_context(), Err(Error::NoRuntime)));
        assert!(matches!(
            GenAiChatClient::new(params()),
            Err(Error::NoRuntime)
        ));
    }

    #[tokio::test]
    async fn debug_output_redacts_the_credential() {
        let rendered = format!("{:?}", params());
        assert!(!rendered.contains("sk-secret"));
    }
}
