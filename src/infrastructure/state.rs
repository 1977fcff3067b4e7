//! Shared application state

use std::sync::Arc;

use anyhow::{Context, Result};

use crate::application::ports::outbound::CharacterStorePort;
use crate::application::services::CharacterSheetServiceImpl;
use crate::domain::aggregates::CharacterSheet;
use crate::infrastructure::config::AppConfig;
use crate::infrastructure::persistence::CharacterStoreBackend;

/// Shared application state
pub struct AppState {
    pub config: AppConfig,
    /// Store backing the sheet service; also purged by the cleanup worker
    pub store: Arc<dyn CharacterStorePort>,
    // Application services
    pub sheet_service: CharacterSheetServiceImpl,
}

impl AppState {
    pub async fn new(config: AppConfig) -> Result<Self> {
        // Initialize the configured store backend
        let backend = CharacterStoreBackend::from_config(&config).await?;
        tracing::info!("Character store: {}", backend.name());

        let template = load_template(&config).await?;
        Ok(Self::with_store(config, Arc::new(backend), template))
    }

    pub fn with_store(config: AppConfig, store: Arc<dyn CharacterStorePort>, template: CharacterSheet) -> Self {
        let sheet_service = CharacterSheetServiceImpl::new(store.clone(), template, config.session_ttl());
        Self {
            config,
            store,
            sheet_service,
        }
    }
}

/// The sheet new sessions start from: the configured seed snapshot, or the
/// blank sheet of the rules
async fn load_template(config: &AppConfig) -> Result<CharacterSheet> {
    let Some(path) = &config.seed_character_path else {
        return Ok(CharacterSheet::blank());
    };

    let raw = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read seed character {}", path))?;
    let document = serde_json::from_str(&raw)
        .with_context(|| format!("Seed character {} is not valid JSON", path))?;
    let template = CharacterSheet::restore(document)
        .with_context(|| format!("Seed character {} is not a valid sheet", path))?;

    tracing::info!("Seed character loaded from {}", path);
    Ok(template)
}
