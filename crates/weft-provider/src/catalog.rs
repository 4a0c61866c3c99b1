//! Model capability catalogs: static tables and one-shot fetched listings.

use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde::Serialize;

use crate::error::Error;

/// One supported model and its token ceiling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModelCapability {
    pub name: String,
    pub max_tokens: u64,
}

impl ModelCapability {
    pub fn new(name: impl Into<String>, max_tokens: u64) -> Self {
        Self {
            name: name.into(),
            max_tokens,
        }
    }
}

/// Query surface over a provider's supported models.
///
/// Two implementations exist: [`StaticCatalog`] for tables baked into a
/// provider definition, and [`FetchedCatalog`] for listings discovered from
/// the live API. Providers pick one at construction time.
#[async_trait]
pub trait ModelCatalog: Send + Sync {
    /// All supported model identifiers, in catalog order.
    async fn available_models(&self) -> Result<Vec<String>, Error>;

    /// Token ceiling for one model. Unknown identifiers are an error,
    /// never a silent default.
    async fn max_tokens(&self, model: &str) -> Result<u64, Error>;

    /// The model used when the caller configures none.
    async fn default_model(&self) -> Result<String, Error>;

    /// The capability table, when it is known without a remote call.
    fn static_entries(&self) -> Option<&[ModelCapability]> {
        None
    }
}

/// A fixed capability table with an explicitly declared default model.
pub struct StaticCatalog {
    entries: Vec<ModelCapability>,
    default_model: String,
}

impl StaticCatalog {
    pub fn new(entries: Vec<ModelCapability>, default_model: impl Into<String>) -> Self {
        Self {
            entries,
            default_model: default_model.into(),
        }
    }
}

#[async_trait]
impl ModelCatalog for StaticCatalog {
    async fn available_models(&self) -> Result<Vec<String>, Error> {
        Ok(self.entries.iter().map(|entry| entry.name.clone()).collect())
    }

    async fn max_tokens(&self, model: &str) -> Result<u64, Error> {
        self.entries
            .iter()
            .find(|entry| entry.name == model)
            .map(|entry| entry.max_tokens)
            .ok_or_else(|| Error::UnknownModel(model.to_string()))
    }

    async fn default_model(&self) -> Result<String, Error> {
        Ok(self.default_model.clone())
    }

    fn static_entries(&self) -> Option<&[ModelCapability]> {
        Some(&self.entries)
    }
}

/// One raw listing returned by a [`ModelLister`].
#[derive(Debug, Clone)]
pub struct ModelListing {
    pub name: String,
    pub input_token_limit: u64,
}

/// Source of the remote model listing consumed by [`FetchedCatalog`].
#[async_trait]
pub trait ModelLister: Send + Sync {
    async fn list_models(&self) -> Result<Vec<ModelListing>, Error>;
}

/// A catalog discovered from the live API.
///
/// The listing is fetched on first access and a listing is retained only if
/// its name contains one of the family markers. Success is cached for the
/// catalog's lifetime; failure is not, so the next access retries. The
/// default model is the first retained entry in the order the remote
/// returned it.
pub struct FetchedCatalog {
    lister: Arc<dyn ModelLister>,
    markers: Vec<String>,
    cache: Mutex<Option<Vec<ModelCapability>>>,
}

impl FetchedCatalog {
    pub fn new(lister: Arc<dyn ModelLister>, markers: &[&str]) -> Self {
        Self {
            lister,
            markers: markers.iter().map(|marker| marker.to_string()).collect(),
            cache: Mutex::new(None),
        }
    }

    async fn entries(&self) -> Result<Vec<ModelCapability>, Error> {
        if let Some(entries) = self.cache.lock().as_ref() {
            return Ok(entries.clone());
        }

        let listings = self.lister.list_models().await?;
        let filtered: Vec<ModelCapability> = listings
            .into_iter()
            .filter(|listing| self.markers.iter().any(|marker| listing.name.contains(marker)))
            .map(|listing| ModelCapability::new(listing.name, listing.input_token_limit))
            .collect();
        if filtered.is_empty() {
            return Err(Error::NoModels);
        }

        *self.cache.lock() = Some(filtered.clone());
        Ok(filtered)
    }
}

#[async_trait]
impl ModelCatalog for FetchedCatalog {
    async fn available_models(&self) -> Result<Vec<String>, Error> {
        Ok(self
            .entries()
            .await?
            .into_iter()
            .map(|entry| entry.name)
            .collect())
    }

    async fn max_tokens(&self, model: &str) -> Result<u64, Error> {
        self.entries()
            .await?
            .into_iter()
            .find(|entry| entry.name == model)
            .map(|entry| entry.max_tokens)
            .ok_or_else(|| Error::UnknownModel(model.to_string()))
    }

    async fn default_model(&self) -> Result<String, Error> {
        let entries = self.entries().await?;
        // entries() rejects an empty catalog, so first always exists.
        entries
            .first()
            .map(|entry| entry.name.clone())
            .ok_or(Error::NoModels)
    }
}
