#[cfg(test)]
#[path = "chat_test.rs"]
mod tests;

use std::sync::Arc;
use std::sync::Mutex;
use std::time::Duration;

use anyhow::Result;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time;
use tokio::time::MissedTickBehavior;

use crate::domain::models::ApiArc;
use crate::domain::models::ChatRefresh;
use crate::domain::models::Event;
use crate::domain::models::StudySession;

/// The session id of the currently open chat, shared between the
/// controller, its poll task, and in flight fetches. Every response handler
/// checks it before emitting so a reply that lands after the chat changed
/// or closed is discarded instead of rendering into a torn down view.
type Binding = Arc<Mutex<Option<String>>>;

/// Owns the open/poll/close lifecycle for the single active group chat.
/// While a chat is open a background task re-fetches its messages on a
/// fixed interval and emits `Event::ChatRefresh` for the UI to render.
pub struct ChatController {
    api: ApiArc,
    tx: mpsc::UnboundedSender<Event>,
    binding: Binding,
    poll_handle: Option<JoinHandle<()>>,
    poll_interval: Duration,
}

impl ChatController {
    pub fn new(
        api: ApiArc,
        tx: mpsc::UnboundedSender<Event>,
        poll_interval: Duration,
    ) -> ChatController {
        return ChatController {
            api,
            tx,
            binding: Arc::new(Mutex::new(None)),
            poll_handle: None,
            poll_interval,
        };
    }

    pub fn session_id(&self) -> Option<String> {
        return self.binding.lock().unwrap().clone();
    }

    pub fn is_open(&self) -> bool {
        return self.session_id().is_some();
    }

    pub fn has_poll_task(&self) -> bool {
        return self.poll_handle.is_some();
    }

    /// Binds the session and starts polling. The first poll tick fires
    /// immediately, so messages show up without waiting a full interval.
    /// Any previously open chat is closed first.
    pub fn open(&mut self, session: &StudySession) {
        self.close();
        *self.binding.lock().unwrap() = Some(session.id.to_string());

        let api = self.api.clone();
        let tx = self.tx.clone();
        let binding = self.binding.clone();
        let session_id = session.id.to_string();
        let poll_interval = self.poll_interval;

        self.poll_handle = Some(tokio::spawn(async move {
            let mut interval = time::interval(poll_interval);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                interval.tick().await;
                if !is_bound(&binding, &session_id) {
                    break;
                }
                fetch_and_emit(&api, &tx, &binding, &session_id).await;
            }
        }));

        tracing::debug!(session_id = session.id, "chat opened");
    }

    /// Unbinds the session and stops the poll. Idempotent, and no tick can
    /// observably fire once this returns: the binding is cleared before the
    /// task is aborted, and the task re-checks it around every fetch.
    pub fn close(&mut self) {
        let closed = self.binding.lock().unwrap().take();
        if let Some(handle) = self.poll_handle.take() {
            handle.abort();
        }

        if let Some(session_id) = closed {
            tracing::debug!(session_id, "chat closed");
        }
    }

    /// Posts a message to the open chat and immediately re-fetches so the
    /// sent message appears without waiting for the next scheduled tick.
    /// Whitespace-only input is dropped before any network call. Errors
    /// carry the server detail; the caller keeps the unsent text so the
    /// user can retry.
    pub async fn send(&self, text: &str) -> Result<bool> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Ok(false);
        }

        let session_id = match self.session_id() {
            Some(session_id) => session_id,
            None => return Ok(false),
        };

        self.api.send_message(&session_id, trimmed).await?;
        fetch_and_emit(&self.api, &self.tx, &self.binding, &session_id).await;

        return Ok(true);
    }
}

fn is_bound(binding: &Binding, session_id: &str) -> bool {
    return binding.lock().unwrap().as_deref() == Some(session_id);
}

/// One poll. Fetch failures are logged and emit nothing, so the last
/// successfully rendered conversation stays on screen instead of flashing
/// an error every interval.
async fn fetch_and_emit(
    api: &ApiArc,
    tx: &mpsc::UnboundedSender<Event>,
    binding: &Binding,
    session_id: &str,
) {
    if !is_bound(binding, session_id) {
        return;
    }

    match api.get_messages(session_id).await {
        Ok(messages) => {
            if !is_bound(binding, session_id) {
                tracing::debug!(session_id, "discarded stale message fetch");
                return;
            }

            tx.send(Event::ChatRefresh(ChatRefresh {
                session_id: session_id.to_string(),
                messages,
            }))
            .ok();
        }
        Err(err) => {
            tracing::warn!(error = ?err, session_id, "failed to refresh chat messages");
        }
    }
}
