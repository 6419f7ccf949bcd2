use std::{sync::Arc, time::Duration};

use crate::{
    catalog::Catalog, config::GeneratorConfig, services::generation_client::GenerationClient,
};

/// Itinerary generator: catalog lookup, prompt, one generation call, parse,
/// budget check with a single retry and synthetic fallback.
#[derive(Debug, Clone)]
pub struct ItineraryGenerator {
    config: GeneratorConfig,
    client: Option<GenerationClient>,
    catalog: Arc<dyn Catalog>,
}

impl ItineraryGenerator {
    pub fn new(config: GeneratorConfig, catalog: Arc<dyn Catalog>) -> Self {
        let client = build_client(&config);
        Self {
            config,
            client,
            catalog,
        }
    }

    /// Generator configured from `GMS_API_KEY` / `GMS_BASE_URL`.
    pub fn from_env(catalog: Arc<dyn Catalog>) -> Self {
        Self::new(GeneratorConfig::from_env(), catalog)
    }

    pub fn with_api_key(self, api_key: impl Into<String>) -> Self {
        let config = self.config.with_api_key(api_key);
        Self::new(config, self.catalog)
    }

    pub fn with_base_url(self, base_url: impl Into<String>) -> Self {
        let config = self.config.with_base_url(base_url);
        Self::new(config, self.catalog)
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn has_credential(&self) -> bool {
        self.client.is_some()
    }

    pub(crate) fn client(&self) -> Option<&GenerationClient> {
        self.client.as_ref()
    }

    pub(crate) fn catalog(&self) -> &dyn Catalog {
        self.catalog.as_ref()
    }

    pub(crate) fn timeout(&self) -> Duration {
        self.config.timeout
    }
}

fn build_client(config: &GeneratorConfig) -> Option<GenerationClient> {
    config.api_key.as_ref().map(|api_key| {
        let mut client = GenerationClient::new(api_key.clone());
        client.set_base_url(config.base_url.clone());
        client
    })
}
