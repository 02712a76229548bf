#[cfg(test)]
#[path = "bubble_list_test.rs"]
mod tests;

use std::collections::HashMap;

use ratatui::prelude::Backend;
use ratatui::prelude::Rect;
use ratatui::text::Line;
use ratatui::widgets::Block;
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use super::Bubble;
use super::BubbleAlignment;
use crate::domain::models::ChatMessage;

struct BubbleCacheEntry<'a> {
    message_id: String,
    text_len: usize,
    lines: Vec<Line<'a>>,
}

/// Renders the message list as chat bubbles, with the viewer's own
/// messages on the right. Bubbles are cached per position so an unchanged
/// conversation is not re-laid-out on every poll.
pub struct BubbleList<'a> {
    cache: HashMap<usize, BubbleCacheEntry<'a>>,
    line_width: usize,
    lines_len: usize,
    viewer_id: String,
}

impl<'a> BubbleList<'a> {
    pub fn new(viewer_id: &str) -> BubbleList<'a> {
        return BubbleList {
            cache: HashMap::new(),
            line_width: 0,
            lines_len: 0,
            viewer_id: viewer_id.to_string(),
        };
    }

    pub fn set_messages(&mut self, messages: &[ChatMessage], line_width: usize) {
        if self.line_width != line_width {
            self.cache.clear();
            self.line_width = line_width;
        }

        // Polls replace the whole list, so entries past the end are gone.
        self.cache.retain(|idx, _| {
            return *idx < messages.len();
        });

        self.lines_len = messages
            .iter()
            .enumerate()
            .map(|(idx, message)| {
                if let Some(cache_entry) = self.cache.get(&idx) {
                    if cache_entry.message_id == message.id
                        && cache_entry.text_len == message.message.len()
                    {
                        return cache_entry.lines.len();
                    }
                }

                let mut align = BubbleAlignment::Left;
                if message.user_id == self.viewer_id {
                    align = BubbleAlignment::Right;
                }

                let bubble_lines = Bubble::new(message, align, line_width).as_lines();
                let bubble_line_len = bubble_lines.len();

                self.cache.insert(
                    idx,
                    BubbleCacheEntry {
                        message_id: message.id.to_string(),
                        text_len: message.message.len(),
                        lines: bubble_lines,
                    },
                );

                return bubble_line_len;
            })
            .sum();
    }

    pub fn len(&self) -> usize {
        return self.lines_len;
    }

    pub fn render<B: Backend>(&self, frame: &mut Frame<B>, rect: Rect, scroll: usize) {
        let mut indexes: Vec<usize> = self.cache.keys().cloned().collect();
        indexes.sort();

        let lines: Vec<Line<'a>> = indexes
            .iter()
            .flat_map(|idx| {
                return self.cache.get(idx).unwrap().lines.to_owned();
            })
            .collect();

        frame.render_widget(
            Paragraph::new(lines)
                .block(Block::default())
                .scroll((scroll.try_into().unwrap(), 0)),
            rect,
        );
    }
}
