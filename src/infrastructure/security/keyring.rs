use crate::domain::error::{AppError, Result};
use keyring::Entry;

/// OS keyring slot holding the upstream API key.
pub struct ApiKeyStore {
    service: String,
    account: String,
}

impl ApiKeyStore {
    pub fn new(service: &str, account: &str) -> Self {
        Self {
            service: service.to_string(),
            account: account.to_string(),
        }
    }

    fn entry(&self) -> Result<Entry> {
        Entry::new(&self.service, &self.account)
            .map_err(|e| AppError::SecurityError(format!("Failed to create entry: {}", e)))
    }

    pub fn save(&self, api_key: &str) -> Result<()> {
        self.entry()?
            .set_password(api_key)
            .map_err(|e| AppError::SecurityError(format!("Failed to store API key: {}", e)))
    }

    /// `None` when nothing has been stored yet.
    pub fn load(&self) -> Result<Option<String>> {
        match self.entry()?.get_password() {
            Ok(key) => Ok(Some(key)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(AppError::SecurityError(format!(
                "Failed to read API key: {}",
                e
            ))),
        }
    }

    pub fn delete(&self) -> Result<()> {
        match self.entry()?.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(AppError::SecurityError(format!(
                "Failed to delete API key: {}",
                e
            ))),
        }
    }
}
