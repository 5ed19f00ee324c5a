//! Ratatui rendering of the chat view.
//!
//! Pure projection of [`UiState`]: a scrollable message list above a
//! three-line input bar. User bubbles sit on the right, assistant bubbles
//! on the left; a loading placeholder renders as an animated dot loader
//! and a failed exchange as a red bubble.

use murmur_domain::{MessageRecord, Sender};
use unicode_width::UnicodeWidthStr;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use super::state::UiState;

const LOADER_FRAMES: [&str; 3] = ["·", "··", "···"];

pub fn render(frame: &mut Frame, state: &mut UiState) {
    let [messages_area, input_area] =
        Layout::vertical([Constraint::Min(1), Constraint::Length(3)]).areas(frame.area());

    render_messages(frame, messages_area, state);
    render_input(frame, input_area, state);
}

fn render_messages(frame: &mut Frame, area: Rect, state: &mut UiState) {
    let block = Block::default().borders(Borders::ALL).title(" murmur ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut lines: Vec<Line> = Vec::new();
    for message in &state.messages {
        push_message_lines(
            &mut lines,
            message,
            state.show_sender_labels,
            state.spinner_frame,
        );
        lines.push(Line::default());
    }

    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: false });

    // Clamp the scroll offset against the rendered height; follow mode pins
    // the view to the newest line.
    let total = paragraph.line_count(inner.width) as u16;
    let max_scroll = total.saturating_sub(inner.height);
    if state.follow {
        state.scroll = max_scroll;
    } else {
        state.scroll = state.scroll.min(max_scroll);
        if state.scroll == max_scroll {
            state.follow = true;
        }
    }

    frame.render_widget(paragraph.scroll((state.scroll, 0)), inner);
}

fn push_message_lines(
    lines: &mut Vec<Line>,
    message: &MessageRecord,
    labels: bool,
    frame_idx: usize,
) {
    let (alignment, label, style) = match message.sender {
        Sender::User => (Alignment::Right, "You", Style::default().fg(Color::Cyan)),
        Sender::Assistant if message.failed => {
            (Alignment::Left, "Assistant", Style::default().fg(Color::Red))
        }
        Sender::Assistant => (Alignment::Left, "Assistant", Style::default()),
    };

    if labels {
        lines.push(
            Line::from(Span::styled(label, style.add_modifier(Modifier::BOLD)))
                .alignment(alignment),
        );
    }

    if message.loading {
        let dots = LOADER_FRAMES[frame_idx % LOADER_FRAMES.len()];
        lines.push(
            Line::from(Span::styled(dots, Style::default().fg(Color::DarkGray)))
                .alignment(alignment),
        );
        return;
    }

    for text_line in message.content.lines() {
        lines.push(Line::from(Span::styled(text_line.to_string(), style)).alignment(alignment));
    }
    if message.content.is_empty() {
        lines.push(Line::default());
    }
}

fn render_input(frame: &mut Frame, area: Rect, state: &UiState) {
    let (title, style) = if state.streaming {
        (" waiting for reply ", Style::default().fg(Color::DarkGray))
    } else {
        (" Message (Enter to send, Esc to quit) ", Style::default())
    };

    let block = Block::default().borders(Borders::ALL).title(title).style(style);
    let inner = block.inner(area);
    frame.render_widget(Paragraph::new(state.input.as_str()).block(block), area);

    if !state.streaming {
        // Display width, not char count: CJK and emoji occupy two cells.
        let x = inner.x + state.input[..state.cursor].width() as u16;
        frame.set_cursor_position(Position::new(
            x.min(inner.right().saturating_sub(1)),
            inner.y,
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{Terminal, backend::TestBackend};

    fn rendered_text(state: &mut UiState) -> String {
        let backend = TestBackend::new(48, 14);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|frame| render(frame, state)).unwrap();
        let buffer = terminal.backend().buffer();
        buffer.content.iter().map(|cell| cell.symbol()).collect()
    }

    #[test]
    fn renders_user_and_assistant_messages() {
        let mut state = UiState::new(true, 4000);
        state.messages = vec![
            MessageRecord::user("hi"),
            MessageRecord::assistant_loading().with_content("Hello!"),
        ];
        let text = rendered_text(&mut state);
        assert!(text.contains("hi"));
        assert!(text.contains("Hello!"));
        assert!(text.contains("You"));
        assert!(text.contains("Assistant"));
    }

    #[test]
    fn loading_record_renders_the_dot_loader_not_content() {
        let mut state = UiState::new(false, 4000);
        state.messages = vec![MessageRecord::user("hi"), MessageRecord::assistant_loading()];
        state.spinner_frame = 2;
        let text = rendered_text(&mut state);
        assert!(text.contains("···"));
    }

    #[test]
    fn streaming_state_changes_the_input_title() {
        let mut state = UiState::new(true, 4000);
        state.streaming = true;
        let text = rendered_text(&mut state);
        assert!(text.contains("waiting for reply"));

        state.streaming = false;
        let text = rendered_text(&mut state);
        assert!(text.contains("Enter to send"));
    }

    #[test]
    fn cursor_accounts_for_double_width_characters() {
        let mut state = UiState::new(false, 4000);
        state.insert_char('日');
        state.insert_char('x');

        let backend = TestBackend::new(48, 14);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|frame| render(frame, &mut state)).unwrap();

        // "日" renders as two cells, so the cursor sits three cells past
        // the input area's left border, not two.
        let position = terminal.get_cursor_position().unwrap();
        assert_eq!(position.x, 4);
    }

    #[test]
    fn follow_mode_keeps_the_newest_message_visible() {
        let mut state = UiState::new(false, 4000);
        for i in 0..40 {
            state.messages.push(MessageRecord::user(format!("message {i}")));
        }
        let text = rendered_text(&mut state);
        assert!(text.contains("message 39"));
        assert!(!text.contains("message 0 "));
    }
}
