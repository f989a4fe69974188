pub mod json_file;
pub mod notion;
pub mod traits;

pub use json_file::JsonFileTaskStore;
pub use notion::NotionTaskStore;
pub use traits::TaskStore;

/// Thin wrapper around the OS keyring for credential storage.
pub mod keyring_store {
    const SERVICE: &str = "goaltrack";

    pub fn get(key: &str) -> Result<Option<String>, Box<dyn std::error::Error>> {
        let entry = keyring::Entry::new(SERVICE, key)?;
        match entry.get_password() {
            Ok(pw) => Ok(Some(pw)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub fn set(key: &str, value: &str) -> Result<(), Box<dyn std::error::Error>> {
        let entry = keyring::Entry::new(SERVICE, key)?;
        entry.set_password(value)?;
        Ok(())
    }

    pub fn delete(key: &str) -> Result<(), Box<dyn std::error::Error>> {
        let entry = keyring::Entry::new(SERVICE, key)?;
        match entry.delete_credential() {
            Ok(()) => Ok(()),
            Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Secrets needed by the remote collaborators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Credential {
    NotionToken,
    NotionDatabaseId,
    CohereApiKey,
}

impl Credential {
    /// Environment variable checked before the keyring.
    pub fn env_var(&self) -> &'static str {
        match self {
            Self::NotionToken => "NOTION_TOKEN",
            Self::NotionDatabaseId => "NOTION_DATABASE_ID",
            Self::CohereApiKey => "COHERE_API_KEY",
        }
    }

    /// Keyring entry name.
    pub fn keyring_key(&self) -> &'static str {
        match self {
            Self::NotionToken => "notion_token",
            Self::NotionDatabaseId => "notion_database_id",
            Self::CohereApiKey => "cohere_api_key",
        }
    }

    /// Environment first, then keyring. Blank values count as absent and
    /// keyring failures are logged and treated as absent.
    pub fn resolve(&self) -> Option<String> {
        self.resolve_with(|name| std::env::var(name).ok())
    }

    /// Where a resolved value came from, for `auth status`.
    pub fn source(&self) -> Option<&'static str> {
        self.source_with(|name| std::env::var(name).ok())
    }

    fn resolve_with(&self, env: impl Fn(&str) -> Option<String>) -> Option<String> {
        if let Some(value) = non_blank(env(self.env_var())) {
            return Some(value);
        }
        match keyring_store::get(self.keyring_key()) {
            Ok(value) => non_blank(value),
            Err(e) => {
                tracing::debug!(key = self.keyring_key(), error = %e, "keyring lookup failed");
                None
            }
        }
    }

    fn source_with(&self, env: impl Fn(&str) -> Option<String>) -> Option<&'static str> {
        if non_blank(env(self.env_var())).is_some() {
            Some("environment")
        } else if non_blank(keyring_store::get(self.keyring_key()).ok().flatten()).is_some() {
            Some("keyring")
        } else {
            None
        }
    }

    pub fn store(&self, value: &str) -> Result<(), Box<dyn std::error::Error>> {
        keyring_store::set(self.keyring_key(), value.trim())
    }

    pub fn forget(&self) -> Result<(), Box<dyn std::error::Error>> {
        keyring_store::delete(self.keyring_key())
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
