use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;

use super::AuthResponse;
use super::ChatMessage;
use super::CreateSessionRequest;
use super::LoginRequest;
use super::RegisterRequest;
use super::StudySession;

pub type ApiArc = Arc<dyn Api + Send + Sync>;

/// The full REST contract exposed by the study session server. The chat
/// controller and the CLI only ever talk to this trait, which keeps the
/// HTTP client swappable in tests.
#[async_trait]
pub trait Api {
    /// Used at startup to verify the server is reachable before entering
    /// the chat view.
    async fn health_check(&self) -> Result<()>;

    async fn login(&self, request: &LoginRequest) -> Result<AuthResponse>;

    async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse>;

    /// The full session catalog.
    async fn list_sessions(&self) -> Result<Vec<StudySession>>;

    /// Sessions the caller created or joined. These are the sessions with
    /// a group chat available to the caller.
    async fn list_my_sessions(&self) -> Result<Vec<StudySession>>;

    /// Creates a session with the caller as creator and first member.
    async fn create_session(&self, request: &CreateSessionRequest) -> Result<StudySession>;

    async fn join_session(&self, session_id: &str) -> Result<()>;

    async fn leave_session(&self, session_id: &str) -> Result<()>;

    /// Only valid for sessions the caller created.
    async fn delete_session(&self, session_id: &str) -> Result<()>;

    /// Messages for one session, ordered by creation time ascending. The
    /// client renders them in the order given.
    async fn get_messages(&self, session_id: &str) -> Result<Vec<ChatMessage>>;

    /// Posts a message. Errors carry the server provided detail so callers
    /// can surface it verbatim.
    async fn send_message(&self, session_id: &str, message: &str) -> Result<ChatMessage>;
}
