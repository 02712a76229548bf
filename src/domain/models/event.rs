use tui_textarea::Input;

use super::ChatMessage;

/// A completed message fetch for one session. Carries the originating
/// session id so late responses can be checked against the currently open
/// chat before rendering.
pub struct ChatRefresh {
    pub session_id: String,
    pub messages: Vec<ChatMessage>,
}

pub enum Event {
    ChatRefresh(ChatRefresh),
    KeyboardCharInput(Input),
    KeyboardCTRLC(),
    KeyboardEnter(),
    KeyboardEsc(),
    KeyboardPaste(String),
    UIScrollDown(),
    UIScrollUp(),
    UIScrollPageDown(),
    UIScrollPageUp(),
    UITick(),
}
