#[cfg(test)]
#[path = "bubble_test.rs"]
mod tests;

use ratatui::style::Color;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::text::Span;

use crate::domain::models::ChatMessage;

#[derive(PartialEq, Eq)]
pub enum BubbleAlignment {
    /// Messages from other participants.
    Left,
    /// The viewer's own messages.
    Right,
}

// left border + left padding + (text, not counted) + right padding + right
// border + scrollbar.
const BORDER_ELEMENTS_LENGTH: usize = 5;
const OUTER_PADDING_PERCENTAGE: f32 = 0.04;

pub struct Bubble<'a> {
    alignment: BubbleAlignment,
    message: &'a ChatMessage,
    window_max_width: usize,
}

/// Strips control characters from user supplied text so it can never carry
/// terminal escape sequences into the rendered view. Everything printable
/// passes through untouched and renders as literal text.
pub fn sanitize(text: &str) -> String {
    return text
        .replace('\t', "  ")
        .chars()
        .filter(|ch| {
            return *ch == '\n' || !ch.is_control();
        })
        .collect();
}

/// Word wraps a message body to the given width, keeping explicit line
/// breaks.
pub fn wrap_text(text: &str, line_max_width: usize) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();

    for full_line in text.split('\n') {
        if full_line.trim().is_empty() {
            lines.push(" ".to_string());
            continue;
        }

        if full_line.chars().count() <= line_max_width {
            lines.push(full_line.trim_end().to_string());
            continue;
        }

        let mut char_count = 0;
        let mut current_lines: Vec<&str> = vec![];

        for word in full_line.split(' ') {
            let word_length = word.chars().count();

            // The separating space only exists once the line holds a word.
            let mut separator_length = 1;
            if current_lines.is_empty() {
                separator_length = 0;
            }

            if char_count + separator_length + word_length > line_max_width
                && !current_lines.is_empty()
            {
                lines.push(current_lines.join(" ").trim_end().to_string());
                current_lines = vec![word];
                char_count = word_length;
            } else {
                current_lines.push(word);
                char_count += separator_length + word_length;
            }
        }
        if !current_lines.is_empty() {
            lines.push(current_lines.join(" ").trim_end().to_string());
        }
    }

    return lines;
}

fn repeat_from_subtractions(text: &str, subtractions: Vec<usize>) -> String {
    let count = subtractions
        .into_iter()
        .map(|e| {
            return i32::try_from(e).unwrap();
        })
        .reduce(|a, b| {
            return a - b;
        })
        .unwrap();

    if count <= 0 {
        return "".to_string();
    }

    return [text].repeat(count.try_into().unwrap()).join("");
}

impl<'a> Bubble<'_> {
    pub fn new(
        message: &'a ChatMessage,
        alignment: BubbleAlignment,
        window_max_width: usize,
    ) -> Bubble {
        return Bubble {
            alignment,
            message,
            window_max_width,
        };
    }

    pub fn as_lines(&self) -> Vec<Line<'a>> {
        let text = sanitize(&self.message.message);
        let title = self.title();
        let time_label = sanitize(&self.message.timestamp());
        let max_line_length = self.max_line_length(&text, &title, &time_label);

        let mut lines = vec![self.top_bar(&title, max_line_length)];
        for wrapped in wrap_text(&text, max_line_length) {
            lines.push(self.body_line(wrapped, max_line_length));
        }
        lines.push(self.bottom_bar(&time_label, max_line_length));

        return lines;
    }

    fn title(&self) -> String {
        let name = sanitize(&self.message.user_name);
        return format!("{} {name}", self.message.initials())
            .trim()
            .to_string();
    }

    fn max_line_length(&self, text: &str, title: &str, time_label: &str) -> usize {
        // Keep a minimum 4% of padding on the side.
        let min_bubble_padding_length = ((self.window_max_width as f32
            * OUTER_PADDING_PERCENTAGE)
            .ceil()) as usize;

        let line_border_width = BORDER_ELEMENTS_LENGTH + min_bubble_padding_length;

        let mut max_line_length = text
            .lines()
            .map(|line| {
                return line.chars().count();
            })
            .max()
            .unwrap_or(0);

        // Saturate so a pane narrower than the borders can't underflow.
        let usable_width = self.window_max_width.saturating_sub(line_border_width);
        if max_line_length > usable_width {
            max_line_length = usable_width;
        }

        for label in [title, time_label] {
            let label_length = label.chars().count();
            if max_line_length < label_length {
                max_line_length = label_length;
            }
        }

        return max_line_length;
    }

    fn top_bar(&self, title: &str, max_line_length: usize) -> Line<'a> {
        let bar = repeat_from_subtractions(
            "─",
            vec![max_line_length + 2, title.chars().count()],
        );
        return self.align_bubble_line(
            vec![self.highlight_span(format!("╭{title}{bar}╮"))],
            max_line_length,
        );
    }

    fn bottom_bar(&self, time_label: &str, max_line_length: usize) -> Line<'a> {
        let bar = repeat_from_subtractions(
            "─",
            vec![max_line_length + 2, time_label.chars().count()],
        );
        return self.align_bubble_line(
            vec![self.highlight_span(format!("╰{bar}{time_label}╯"))],
            max_line_length,
        );
    }

    fn body_line(&self, text: String, max_line_length: usize) -> Line<'a> {
        let fill = repeat_from_subtractions(" ", vec![max_line_length, text.chars().count()]);
        let spans = vec![
            self.highlight_span("│ ".to_string()),
            Span::from(format!("{text}{fill}")),
            self.highlight_span(" │".to_string()),
        ];

        return self.align_bubble_line(spans, max_line_length);
    }

    fn align_bubble_line(&self, spans: Vec<Span<'a>>, max_line_length: usize) -> Line<'a> {
        // Borders and inner padding around the text.
        let bubble_width = max_line_length + 4;
        let outer_padding =
            repeat_from_subtractions(" ", vec![self.window_max_width, bubble_width]);

        if self.alignment == BubbleAlignment::Left {
            let mut line_spans = spans;
            line_spans.push(Span::from(outer_padding));
            return Line::from(line_spans);
        }

        let mut line_spans = vec![Span::from(outer_padding)];
        line_spans.extend(spans);

        return Line::from(line_spans);
    }

    fn highlight_span(&self, text: String) -> Span<'a> {
        let color = match self.alignment {
            BubbleAlignment::Left => Color::DarkGray,
            BubbleAlignment::Right => Color::Cyan,
        };

        return Span::styled(
            text,
            Style {
                fg: Some(color),
                ..Style::default()
            },
        );
    }
}
