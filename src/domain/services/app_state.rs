#[cfg(test)]
#[path = "app_state_test.rs"]
mod tests;

use ratatui::prelude::Rect;

use super::BubbleList;
use super::Scroll;
use crate::domain::models::ChatMessage;
use crate::domain::models::ChatRefresh;
use crate::domain::models::StudySession;

/// View state for one open group chat: the session, the last successfully
/// fetched messages, and how they are laid out on screen.
pub struct AppState<'a> {
    pub session: StudySession,
    pub messages: Vec<ChatMessage>,
    pub bubble_list: BubbleList<'a>,
    pub scroll: Scroll,
    pub last_known_width: u16,
    pub last_known_height: u16,
    pub send_error: Option<String>,
}

impl<'a> AppState<'a> {
    pub fn new(session: StudySession, viewer_id: &str) -> AppState<'a> {
        return AppState {
            session,
            messages: vec![],
            bubble_list: BubbleList::new(viewer_id),
            scroll: Scroll::default(),
            last_known_width: 0,
            last_known_height: 0,
            send_error: None,
        };
    }

    pub fn set_rect(&mut self, rect: Rect) {
        self.last_known_width = rect.width;
        self.last_known_height = rect.height;
        self.sync_dependants();
    }

    /// Replaces the message list wholesale. The view follows the newest
    /// message only when the reader was already at the bottom, or when
    /// these are the first messages ever shown; a reader scrolled up into
    /// history keeps their place.
    pub fn handle_chat_refresh(&mut self, refresh: ChatRefresh) {
        if refresh.session_id != self.session.id {
            tracing::debug!(
                session_id = refresh.session_id,
                "dropped refresh for a session that is no longer open"
            );
            return;
        }

        let was_at_bottom = self.scroll.is_at_bottom();
        let first_messages = self.messages.is_empty() && !refresh.messages.is_empty();

        self.messages = refresh.messages;
        self.sync_dependants();

        if was_at_bottom || first_messages {
            self.scroll.last();
        }
    }

    pub fn set_send_error(&mut self, error: String) {
        self.send_error = Some(error);
    }

    pub fn clear_send_error(&mut self) {
        self.send_error = None;
    }

    fn sync_dependants(&mut self) {
        self.bubble_list
            .set_messages(&self.messages, self.last_known_width as usize);

        self.scroll
            .set_state(self.bubble_list.len() as u16, self.last_known_height);
    }
}
