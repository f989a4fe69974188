//! Builds the task store and ranking oracle a command runs against.

use std::error::Error;
use std::path::PathBuf;

use chrono::{Local, NaiveDate};
use goaltrack_core::clock;
use goaltrack_core::storage::data_dir;
use goaltrack_core::{
    CohereOracle, Config, Credential, DisabledOracle, HeuristicOracle, JsonFileTaskStore,
    NotionTaskStore, OracleProvider, RankingOracle, StoreError, StoreProvider, TaskStore,
};

/// Global flags shared by every command.
pub struct Context {
    pub tasks_file: Option<PathBuf>,
    pub oracle: Option<OracleProvider>,
}

impl Context {
    pub fn store(&self, config: &Config) -> Result<Box<dyn TaskStore>, Box<dyn Error>> {
        if let Some(path) = &self.tasks_file {
            return Ok(Box::new(JsonFileTaskStore::new(path)));
        }

        match config.store.provider {
            StoreProvider::File => {
                let path = match &config.store.file_path {
                    Some(p) if !p.trim().is_empty() => PathBuf::from(p),
                    _ => data_dir()?.join("tasks.json"),
                };
                Ok(Box::new(JsonFileTaskStore::new(path)))
            }
            StoreProvider::Notion => {
                let missing = |what: &str| StoreError::NotConfigured {
                    store: "Notion".into(),
                    message: format!(
                        "no {what} found; run `goaltrack auth notion login` or pass --tasks-file"
                    ),
                };
                let token = Credential::NotionToken
                    .resolve()
                    .ok_or_else(|| missing("integration token"))?;
                let database_id = Credential::NotionDatabaseId
                    .resolve()
                    .ok_or_else(|| missing("database ID"))?;
                Ok(Box::new(NotionTaskStore::new(
                    token,
                    &database_id,
                    &config.store.notion_base_url,
                    config.store.timeout(),
                )?))
            }
        }
    }

    /// The oracle never fails to build: an unusable one is replaced by a
    /// disabled oracle so ranking falls back to the fixed rule.
    pub fn oracle(&self, config: &Config) -> Box<dyn RankingOracle> {
        match self.oracle.unwrap_or(config.oracle.provider) {
            OracleProvider::Heuristic => Box::new(HeuristicOracle::new()),
            OracleProvider::None => Box::new(DisabledOracle::new("ranking oracle disabled")),
            OracleProvider::Cohere => {
                let Some(key) = Credential::CohereApiKey.resolve() else {
                    tracing::warn!("no Cohere API key found; using fallback ranking");
                    return Box::new(DisabledOracle::new("missing Cohere API key"));
                };
                match CohereOracle::new(
                    key,
                    config.oracle.model.clone(),
                    &config.oracle.base_url,
                    config.oracle.timeout(),
                ) {
                    Ok(oracle) => Box::new(oracle),
                    Err(e) => {
                        tracing::warn!(error = %e, "Cohere oracle unavailable; using fallback ranking");
                        Box::new(DisabledOracle::new(e.to_string()))
                    }
                }
            }
        }
    }
}

/// `YYYY-MM-DD`, or today when absent.
pub fn resolve_date(raw: Option<&str>) -> Result<NaiveDate, Box<dyn Error>> {
    match raw {
        Some(raw) => clock::parse_date(raw)
            .ok_or_else(|| format!("invalid date '{raw}', expected YYYY-MM-DD").into()),
        None => Ok(Local::now().date_naive()),
    }
}
