#[cfg(test)]
#[path = "credentials_test.rs"]
mod tests;

use std::path;

use anyhow::Result;
use serde_derive::Deserialize;
use serde_derive::Serialize;
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::AuthResponse;

/// The signed-in identity, persisted between runs. Cleared as a whole on
/// logout.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub access_token: String,
    pub user_id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub school: String,
}

impl Credentials {
    pub fn from_auth(auth: &AuthResponse) -> Credentials {
        return Credentials {
            access_token: auth.access_token.to_string(),
            user_id: auth.id.to_string(),
            email: auth.email.to_string(),
            first_name: auth.first_name.to_string(),
            last_name: auth.last_name.to_string(),
            school: auth.school.to_string(),
        };
    }

    pub fn display_name(&self) -> String {
        return format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string();
    }

    /// Publishes the identity into the config store so the API client and
    /// the renderer can reach it without threading it everywhere.
    pub fn publish(&self) {
        Config::set(ConfigKey::AccessToken, &self.access_token);
        Config::set(ConfigKey::UserID, &self.user_id);
        Config::set(ConfigKey::Username, &self.display_name());
    }
}

pub struct CredentialStore {
    pub config_dir: path::PathBuf,
}

impl Default for CredentialStore {
    fn default() -> CredentialStore {
        let config_dir = dirs::config_dir().unwrap().join("studyhall");
        return CredentialStore::new(config_dir);
    }
}

impl CredentialStore {
    pub fn new(config_dir: path::PathBuf) -> CredentialStore {
        return CredentialStore { config_dir };
    }

    fn file_path(&self) -> path::PathBuf {
        return self.config_dir.join("credentials.yaml");
    }

    pub async fn load(&self) -> Result<Option<Credentials>> {
        let file_path = self.file_path();
        if !file_path.exists() {
            return Ok(None);
        }

        let payload = fs::read_to_string(file_path).await?;
        let credentials: Credentials = serde_yaml::from_str(&payload)?;

        return Ok(Some(credentials));
    }

    pub async fn save(&self, credentials: &Credentials) -> Result<()> {
        if !self.config_dir.exists() {
            fs::create_dir_all(&self.config_dir).await?;
        }

        let payload = serde_yaml::to_string(credentials)?;
        let mut file = fs::File::create(self.file_path()).await?;
        file.write_all(payload.as_bytes()).await?;

        return Ok(());
    }

    pub async fn clear(&self) -> Result<()> {
        let file_path = self.file_path();
        if !file_path.exists() {
            return Ok(());
        }

        fs::remove_file(file_path).await?;
        return Ok(());
    }
}
