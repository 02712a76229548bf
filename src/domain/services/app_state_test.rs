use ratatui::prelude::Rect;

use super::AppState;
use crate::domain::models::ChatMessage;
use crate::domain::models::ChatRefresh;
use crate::domain::models::StudySession;

fn study_session(id: &str) -> StudySession {
    return StudySession {
        id: id.to_string(),
        title: "Midterm cram".to_string(),
        course_code: "CS101".to_string(),
        description: "Midterm review".to_string(),
        date: "2024-03-14".to_string(),
        time: "18:00".to_string(),
        location: "Library room 2".to_string(),
        meeting_type: "on_campus".to_string(),
        max_capacity: 5,
        current_capacity: 3,
        creator_id: "user-1".to_string(),
        creator_name: "Jane Doe".to_string(),
        is_full: false,
    };
}

fn messages(count: usize) -> Vec<ChatMessage> {
    return (0..count)
        .map(|idx| {
            let mut msg = ChatMessage::new(
                "session-1",
                "user-2",
                "John Smith",
                &format!("message {idx}"),
            );
            msg.id = format!("msg-{idx}");
            return msg;
        })
        .collect();
}

fn refresh(count: usize) -> ChatRefresh {
    return ChatRefresh {
        session_id: "session-1".to_string(),
        messages: messages(count),
    };
}

fn app_state() -> AppState<'static> {
    let mut app_state = AppState::new(study_session("session-1"), "user-1");
    // A 40x4 message viewport. Every short message renders as a three line
    // bubble.
    app_state.set_rect(Rect::new(0, 0, 40, 4));
    return app_state;
}

#[test]
fn it_shows_nothing_and_stays_put_on_an_empty_refresh() {
    let mut app_state = app_state();

    app_state.handle_chat_refresh(refresh(0));

    assert!(app_state.messages.is_empty());
    assert_eq!(app_state.scroll.position, 0);
}

#[test]
fn it_jumps_to_the_bottom_when_the_first_messages_arrive() {
    let mut app_state = app_state();

    app_state.handle_chat_refresh(refresh(5));

    assert_eq!(app_state.messages.len(), 5);
    assert_eq!(app_state.bubble_list.len(), 15);
    assert_eq!(app_state.scroll.position, 11);
    assert!(app_state.scroll.is_at_bottom());
}

#[test]
fn it_follows_new_messages_when_the_reader_is_at_the_bottom() {
    let mut app_state = app_state();
    app_state.handle_chat_refresh(refresh(5));
    assert!(app_state.scroll.is_at_bottom());

    app_state.handle_chat_refresh(refresh(6));

    assert_eq!(app_state.messages.len(), 6);
    assert_eq!(app_state.scroll.position, 14);
    assert!(app_state.scroll.is_at_bottom());
}

#[test]
fn it_keeps_the_readers_place_when_scrolled_up_into_history() {
    let mut app_state = app_state();
    app_state.handle_chat_refresh(refresh(5));

    app_state.scroll.up_page();
    app_state.scroll.up_page();
    assert_eq!(app_state.scroll.position, 0);

    app_state.handle_chat_refresh(refresh(6));

    assert_eq!(app_state.messages.len(), 6);
    assert_eq!(app_state.scroll.position, 0);
}

#[test]
fn it_drops_refreshes_for_other_sessions() {
    let mut app_state = app_state();
    app_state.handle_chat_refresh(refresh(5));

    app_state.handle_chat_refresh(ChatRefresh {
        session_id: "session-2".to_string(),
        messages: vec![],
    });

    assert_eq!(app_state.messages.len(), 5);
}

#[test]
fn it_keeps_the_send_error_until_cleared() {
    let mut app_state = app_state();

    app_state.set_send_error("Failed to send message: too long".to_string());
    assert_eq!(
        app_state.send_error.as_deref(),
        Some("Failed to send message: too long")
    );

    app_state.handle_chat_refresh(refresh(1));
    assert!(app_state.send_error.is_some());

    app_state.clear_send_error();
    assert!(app_state.send_error.is_none());
}
