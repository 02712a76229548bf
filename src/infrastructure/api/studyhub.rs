#[cfg(test)]
#[path = "studyhub_test.rs"]
mod tests;

use std::time::Duration;

use anyhow::anyhow;
use anyhow::bail;
use anyhow::Result;
use async_trait::async_trait;
use serde_derive::Deserialize;
use serde_derive::Serialize;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::Api;
use crate::domain::models::AuthResponse;
use crate::domain::models::ChatMessage;
use crate::domain::models::CreateSessionRequest;
use crate::domain::models::LoginRequest;
use crate::domain::models::RegisterRequest;
use crate::domain::models::StudySession;

/// Error payload the server attaches to non-2xx responses.
#[derive(Default, Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    detail: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct SendMessageRequest {
    session_id: String,
    message: String,
}

pub struct StudyHub {
    url: String,
    token: String,
    timeout: String,
}

impl Default for StudyHub {
    fn default() -> StudyHub {
        return StudyHub {
            url: Config::get(ConfigKey::ServerURL),
            token: Config::get(ConfigKey::AccessToken),
            timeout: Config::get(ConfigKey::HealthCheckTimeout),
        };
    }
}

impl StudyHub {
    fn get(&self, path: &str) -> reqwest::RequestBuilder {
        return reqwest::Client::new()
            .get(format!("{url}{path}", url = self.url))
            .bearer_auth(&self.token);
    }

    fn post(&self, path: &str) -> reqwest::RequestBuilder {
        return reqwest::Client::new()
            .post(format!("{url}{path}", url = self.url))
            .bearer_auth(&self.token);
    }

    fn delete(&self, path: &str) -> reqwest::RequestBuilder {
        return reqwest::Client::new()
            .delete(format!("{url}{path}", url = self.url))
            .bearer_auth(&self.token);
    }

    /// Pulls the server provided `detail` out of a rejected response so it
    /// can be surfaced to the user verbatim. Falls back to the HTTP status
    /// reason when the body carries no detail.
    async fn detail_error(res: reqwest::Response) -> anyhow::Error {
        let status = res.status();
        let detail = res.json::<ErrorResponse>().await.ok().and_then(|body| {
            return body.detail;
        });

        return anyhow!(detail.unwrap_or_else(|| {
            return status
                .canonical_reason()
                .unwrap_or("Request failed")
                .to_string();
        }));
    }
}

#[async_trait]
impl Api for StudyHub {
    async fn health_check(&self) -> Result<()> {
        let res = reqwest::Client::new()
            .get(&self.url)
            .timeout(Duration::from_millis(self.timeout.parse::<u64>()?))
            .send()
            .await;

        if res.is_err() {
            tracing::error!(error = ?res.unwrap_err(), "server is not reachable");
            bail!("The study session server is not reachable");
        }

        if !res.unwrap().status().is_success() {
            bail!("The study session server failed its health check");
        }

        return Ok(());
    }

    async fn login(&self, request: &LoginRequest) -> Result<AuthResponse> {
        let res = reqwest::Client::new()
            .post(format!("{url}/auth/login", url = self.url))
            .json(request)
            .send()
            .await?;

        if !res.status().is_success() {
            return Err(StudyHub::detail_error(res).await);
        }

        return Ok(res.json::<AuthResponse>().await?);
    }

    async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse> {
        let res = reqwest::Client::new()
            .post(format!("{url}/auth/register", url = self.url))
            .json(request)
            .send()
            .await?;

        if !res.status().is_success() {
            return Err(StudyHub::detail_error(res).await);
        }

        return Ok(res.json::<AuthResponse>().await?);
    }

    async fn list_sessions(&self) -> Result<Vec<StudySession>> {
        let res = self.get("/sessions/").send().await?;
        if !res.status().is_success() {
            return Err(StudyHub::detail_error(res).await);
        }

        return Ok(res.json::<Vec<StudySession>>().await?);
    }

    async fn list_my_sessions(&self) -> Result<Vec<StudySession>> {
        let res = self.get("/sessions/my/sessions").send().await?;
        if !res.status().is_success() {
            return Err(StudyHub::detail_error(res).await);
        }

        return Ok(res.json::<Vec<StudySession>>().await?);
    }

    async fn create_session(&self, request: &CreateSessionRequest) -> Result<StudySession> {
        let res = self.post("/sessions/").json(request).send().await?;
        if !res.status().is_success() {
            return Err(StudyHub::detail_error(res).await);
        }

        return Ok(res.json::<StudySession>().await?);
    }

    async fn join_session(&self, session_id: &str) -> Result<()> {
        let res = self.post(&format!("/sessions/{session_id}/join")).send().await?;
        if !res.status().is_success() {
            return Err(StudyHub::detail_error(res).await);
        }

        return Ok(());
    }

    async fn leave_session(&self, session_id: &str) -> Result<()> {
        let res = self
            .post(&format!("/sessions/{session_id}/leave"))
            .send()
            .await?;
        if !res.status().is_success() {
            return Err(StudyHub::detail_error(res).await);
        }

        return Ok(());
    }

    async fn delete_session(&self, session_id: &str) -> Result<()> {
        let res = self.delete(&format!("/sessions/{session_id}")).send().await?;
        if !res.status().is_success() {
            return Err(StudyHub::detail_error(res).await);
        }

        return Ok(());
    }

    async fn get_messages(&self, session_id: &str) -> Result<Vec<ChatMessage>> {
        let res = self
            .get(&format!("/chat/{session_id}/messages"))
            .send()
            .await?;
        if !res.status().is_success() {
            return Err(StudyHub::detail_error(res).await);
        }

        return Ok(res.json::<Vec<ChatMessage>>().await?);
    }

    async fn send_message(&self, session_id: &str, message: &str) -> Result<ChatMessage> {
        let req = SendMessageRequest {
            session_id: session_id.to_string(),
            message: message.to_string(),
        };

        let res = self
            .post(&format!("/chat/{session_id}/messages"))
            .json(&req)
            .send()
            .await?;
        if !res.status().is_success() {
            return Err(StudyHub::detail_error(res).await);
        }

        return Ok(res.json::<ChatMessage>().await?);
    }
}
