use std::io;
use std::time::Duration;

use anyhow::Result;
use crossterm::cursor;
use crossterm::event::DisableMouseCapture;
use crossterm::event::EnableMouseCapture;
use crossterm::execute;
use crossterm::terminal::disable_raw_mode;
use crossterm::terminal::enable_raw_mode;
use crossterm::terminal::EnterAlternateScreen;
use crossterm::terminal::LeaveAlternateScreen;
use ratatui::backend::CrosstermBackend;
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;
use ratatui::widgets::Scrollbar;
use ratatui::widgets::ScrollbarOrientation;
use ratatui::Terminal;
use tokio::sync::mpsc;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::ApiArc;
use crate::domain::models::Event;
use crate::domain::models::StudySession;
use crate::domain::models::TextArea;
use crate::domain::services::events::EventsService;
use crate::domain::services::AppState;
use crate::domain::services::ChatController;

/// How the chat view was left: back to the session picker, or out of the
/// program entirely.
pub enum UiExit {
    CloseChat,
    Quit,
}

pub fn destruct_terminal_for_panic() {
    disable_raw_mode().unwrap();
    execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture).unwrap();
    execute!(io::stdout(), cursor::Show).unwrap();
}

async fn start_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    api: ApiArc,
    session: StudySession,
) -> Result<UiExit> {
    let (tx, rx) = mpsc::unbounded_channel::<Event>();
    let mut events = EventsService::new(rx);

    let poll_interval =
        Duration::from_millis(Config::get(ConfigKey::PollInterval).parse::<u64>()?);
    let mut controller = ChatController::new(api, tx, poll_interval);
    let mut app_state = AppState::new(session.clone(), &Config::get(ConfigKey::UserID));
    let mut textarea = TextArea::default();

    controller.open(&session);

    let exit = loop {
        terminal.draw(|frame| {
            let mut constraints = vec![
                Constraint::Length(1),
                Constraint::Min(1),
                Constraint::Max(4),
            ];
            if app_state.send_error.is_some() {
                constraints.insert(2, Constraint::Length(1));
            }

            let layout = Layout::default()
                .direction(Direction::Vertical)
                .constraints(constraints)
                .split(frame.size());

            let header = Paragraph::new(format!(
                "{} [{}] {}",
                app_state.session.title,
                app_state.session.course_code,
                app_state.session.capacity_label()
            ))
            .style(Style::default().add_modifier(Modifier::BOLD));
            frame.render_widget(header, layout[0]);

            if layout[1].width != app_state.last_known_width
                || layout[1].height != app_state.last_known_height
            {
                app_state.set_rect(layout[1]);
            }

            if app_state.messages.is_empty() {
                frame.render_widget(
                    Paragraph::new("No messages yet. Start the conversation!")
                        .style(Style::default().fg(Color::DarkGray))
                        .alignment(Alignment::Center),
                    layout[1],
                );
            } else {
                app_state.bubble_list.render(
                    frame,
                    layout[1],
                    app_state.scroll.position as usize,
                );
                frame.render_stateful_widget(
                    Scrollbar::new(ScrollbarOrientation::VerticalRight),
                    layout[1].inner(&Margin {
                        vertical: 1,
                        horizontal: 0,
                    }),
                    &mut app_state.scroll.scrollbar_state,
                );
            }

            let mut input_idx = 2;
            if let Some(error) = &app_state.send_error {
                frame.render_widget(
                    Paragraph::new(error.to_string()).style(Style::default().fg(Color::Red)),
                    layout[2],
                );
                input_idx = 3;
            }

            frame.render_widget(textarea.widget(), layout[input_idx]);
        })?;

        match events.next().await? {
            Event::ChatRefresh(refresh) => {
                app_state.handle_chat_refresh(refresh);
            }
            Event::KeyboardCharInput(input) => {
                app_state.clear_send_error();
                textarea.input(input);
            }
            Event::KeyboardPaste(text) => {
                textarea.set_yank_text(text.replace('\r', "\n"));
                textarea.paste();
            }
            Event::KeyboardEnter() => {
                let input_str = textarea.lines().join("\n");
                match controller.send(&input_str).await {
                    Ok(sent) => {
                        if sent {
                            textarea = TextArea::default();
                            app_state.clear_send_error();
                        }
                    }
                    Err(err) => {
                        // The unsent text stays in the input for retry.
                        app_state.set_send_error(format!("Failed to send message: {err}"));
                    }
                }
            }
            Event::KeyboardEsc() => {
                break UiExit::CloseChat;
            }
            Event::KeyboardCTRLC() => {
                break UiExit::Quit;
            }
            Event::UIScrollDown() => {
                app_state.scroll.down();
            }
            Event::UIScrollUp() => {
                app_state.scroll.up();
            }
            Event::UIScrollPageDown() => {
                app_state.scroll.down_page();
            }
            Event::UIScrollPageUp() => {
                app_state.scroll.up_page();
            }
            Event::UITick() => {}
        }
    };

    controller.close();
    return Ok(exit);
}

pub async fn start(api: ApiArc, session: StudySession) -> Result<UiExit> {
    enable_raw_mode()?;
    execute!(io::stdout(), EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)?;

    let res = start_loop(&mut terminal, api, session).await;

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    return res;
}
