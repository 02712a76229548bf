#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;

use anyhow::bail;
use anyhow::Result;
use serde_derive::Deserialize;
use serde_derive::Serialize;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    /// Validated before any network call. Failures never reach the server.
    pub fn validate(&self) -> Result<()> {
        validate_email(&self.email)?;
        validate_password(&self.password)?;
        return Ok(());
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub school: String,
}

impl RegisterRequest {
    pub fn validate(&self) -> Result<()> {
        validate_required("First name", &self.first_name)?;
        validate_required("Last name", &self.last_name)?;
        validate_required("School", &self.school)?;
        validate_email(&self.email)?;
        validate_password(&self.password)?;
        return Ok(());
    }
}

/// Returned by both login and register. Register responses may omit the
/// profile fields, so everything except the token defaults.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct AuthResponse {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub school: String,
    pub access_token: String,
}

pub fn validate_required(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        bail!(format!("{field} is required"));
    }
    return Ok(());
}

pub fn validate_email(email: &str) -> Result<()> {
    validate_required("Email", email)?;
    if !email.contains('@') {
        bail!("Please enter a valid email address");
    }
    return Ok(());
}

pub fn validate_password(password: &str) -> Result<()> {
    if password.len() < 8 {
        bail!("Password must be at least 8 characters");
    }
    return Ok(());
}
