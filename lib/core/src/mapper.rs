use crate::error::Result;
use crate::extract::{ES_METADATA_ID, ID_KEY};
use crate::path::{PathCache, ResultPath};
use crate::response::ApiResult;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Configuration for a [`ResponseMapper`]
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MapperConfig {
    /// Key holding the document id next to each source payload
    #[serde(default = "default_id_key")]
    pub id_key: String,

    /// Synthetic field used when fragments are rendered back to JSON.
    /// Must not collide with a real response field.
    #[serde(default = "default_metadata_id_field")]
    pub metadata_id_field: String,

    /// Keep parsed result paths across responses
    #[serde(default = "default_cache_paths")]
    pub cache_paths: bool,
}

fn default_id_key() -> String {
    ID_KEY.to_string()
}

fn default_metadata_id_field() -> String {
    ES_METADATA_ID.to_string()
}

fn default_cache_paths() -> bool {
    true
}

impl Default for MapperConfig {
    fn default() -> Self {
        Self {
            id_key: default_id_key(),
            metadata_id_field: default_metadata_id_field(),
            cache_paths: default_cache_paths(),
        }
    }
}

/// Turns raw response bodies into [`ApiResult`]s
///
/// Safe to share between threads; the only shared state is the path cache.
#[derive(Debug, Default)]
pub struct ResponseMapper {
    config: MapperConfig,
    paths: PathCache,
}

impl ResponseMapper {
    pub fn new(config: MapperConfig) -> Self {
        Self {
            config,
            paths: PathCache::new(),
        }
    }

    #[inline]
    pub fn config(&self) -> &MapperConfig {
        &self.config
    }

    #[inline]
    pub fn path_cache(&self) -> &PathCache {
        &self.paths
    }

    pub fn resolve_path(&self, path_to_result: Option<&str>) -> Option<Arc<ResultPath>> {
        if self.config.cache_paths {
            self.paths.resolve(path_to_result)
        } else {
            ResultPath::resolve(path_to_result).map(Arc::new)
        }
    }

    pub fn parse(
        &self,
        body: &str,
        status_code: u16,
        reason_phrase: &str,
        path_to_result: Option<&str>,
    ) -> Result<ApiResult> {
        let path = self.resolve_path(path_to_result);
        let result = ApiResult::with_path(
            body.to_string(),
            status_code,
            reason_phrase.to_string(),
            path_to_result,
            path,
        )?
        .with_id_conventions(&self.config.id_key, &self.config.metadata_id_field);

        if !result.is_succeeded() {
            tracing::debug!(
                status = status_code,
                error = result.error_message().unwrap_or_default(),
                "response not succeeded"
            );
        }
        Ok(result)
    }
}
