//! # weft-provider
//!
//! The plugin contract that lets the weft chat-orchestration host drive
//! remote language-model APIs through a uniform surface.
//!
//! An adapter crate implements [`ChatProviderBackend`] and exposes a
//! `provider(...)` constructor returning a type-erased [`ChatProvider`].
//! This crate supplies everything the contract needs:
//!
//! - **Typed option descriptors** ([`PresetValue`]) and the per-provider
//!   [`CustomizationConfig`] schema hosts use to render settings UIs.
//! - **The merge engine** ([`merge_customizations`]) resolving provider
//!   defaults, stored configuration, and caller overrides into one
//!   validated map.
//! - **Model capability catalogs** ([`StaticCatalog`], [`FetchedCatalog`])
//!   behind the polymorphic [`ModelCatalog`] interface.
//! - **The error taxonomy** ([`Error`]) shared by contract and adapters.
//!
//! # Quick start
//!
//! ```ignore
//! use weft_provider::MakeLlmRequest;
//!
//! let provider = weft_provider_google_genai::from_env();
//!
//! let models = provider.available_models().await?;
//! let llm = provider
//!     .make_llm(MakeLlmRequest {
//!         use_defaults: true,
//!         ..Default::default()
//!     })
//!     .await?;
//! assert_eq!(llm.llm_type(), "chat_google_genai");
//! ```

pub mod catalog;
pub mod error;
pub mod llm;
pub mod merge;
pub mod preset;
pub mod provider;
pub mod schema;

pub use catalog::{
    FetchedCatalog, ModelCapability, ModelCatalog, ModelLister, ModelListing, StaticCatalog,
};
pub use error::Error;
pub use llm::{ChatLlm, ChatLlmBackend};
pub use merge::merge_customizations;
pub use preset::{PresetValue, REDACTED, ValueType};
pub use provider::{Capabilities, ChatProvider, ChatProviderBackend, ConfigStore, MakeLlmRequest};
pub use schema::{CustomizationConfig, CustomizationMap, SchemaEntry};
