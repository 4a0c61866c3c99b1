//! Type-erased handle for a constructed chat client.

/// A constructed chat client, as returned by a provider's `make_llm`.
///
/// Wraps a [`ChatLlmBackend`] behind a `Box<dyn ...>` so hosts handle every
/// provider's clients uniformly. The type tag lives on the wrapper by
/// composition; adapters never subclass or shadow the wrapped client.
pub struct ChatLlm {
    inner: Box<dyn ChatLlmBackend>,
}

impl std::fmt::Debug for ChatLlm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatLlm")
            .field("llm_type", &self.inner.llm_type())
            .field("model", &self.inner.model())
            .finish()
    }
}

impl ChatLlm {
    /// Wrap any backend implementation into a client handle.
    pub fn new(backend: impl ChatLlmBackend + 'static) -> Self {
        Self {
            inner: Box::new(backend),
        }
    }

    /// The textual type tag identifying the client kind
    /// (e.g. `"chat_google_genai"`).
    pub fn llm_type(&self) -> &str {
        self.inner.llm_type()
    }

    /// The model this client was constructed for.
    pub fn model(&self) -> &str {
        self.inner.model()
    }
}

/// Trait that adapter crates implement for their constructed clients.
pub trait ChatLlmBackend: Send + Sync {
    fn llm_type(&self) -> &str;
    fn model(&self) -> &str;
}
