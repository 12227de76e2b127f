use crate::core::app::{App, Screen};
use crate::core::constants::{APP_HEADING, INDICATOR_SPACE};
use crate::core::message::Sender;
use crate::ui::wrap::prewrap_lines;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

const USER_LABEL: &str = "أنت";
const INPUT_PLACEHOLDER: &str = "اكتب رسالتك هنا...";

pub fn ui(f: &mut Frame, app: &mut App) {
    let area = f.area();
    f.render_widget(
        Block::default().style(Style::default().bg(app.theme.background_color)),
        area,
    );

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(0)])
        .split(area);

    let heading = Paragraph::new(Line::from(Span::styled(
        APP_HEADING,
        app.theme.heading_style,
    )))
    .alignment(Alignment::Center);
    f.render_widget(heading, chunks[0]);

    match app.screen() {
        Screen::Selector => render_selector(f, app, chunks[1]),
        Screen::Chat => render_chat(f, app, chunks[1]),
    }
}

fn render_selector(f: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let mut lines = Vec::new();
    for (index, item) in app.picker.items.iter().enumerate() {
        let highlight = if index == app.picker.selected {
            theme.selection_highlight_style
        } else {
            Style::default()
        };
        let marker = if index == app.picker.selected { "▶ " } else { "  " };
        lines.push(
            Line::from(vec![
                Span::raw(marker),
                Span::styled(format!("{}. ", index + 1), theme.picker_description_style),
                Span::styled(item.label.clone(), theme.picker_label_style),
            ])
            .style(highlight),
        );
        lines.push(
            Line::from(vec![
                Span::raw("     "),
                Span::styled(item.description.clone(), theme.picker_description_style),
            ])
            .style(highlight),
        );
        lines.push(Line::from(""));
    }

    let list = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.input_border_style)
                .title(Span::styled(
                    "Choose a character (↑/↓ or 1-8, Enter to chat, Ctrl+C to quit)",
                    theme.input_title_style,
                )),
        )
        .scroll((selector_scroll(app.picker.selected, area.height), 0));
    f.render_widget(list, area);
}

/// Keep the highlighted entry (three rows each) inside the bordered list.
fn selector_scroll(selected: usize, area_height: u16) -> u16 {
    let inner = area_height.saturating_sub(2);
    let bottom = (selected as u16 + 1).saturating_mul(3);
    bottom.saturating_sub(inner)
}

fn render_chat(f: &mut Frame, app: &mut App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(area);

    let persona_name = app
        .active_persona()
        .map(|p| p.display_name.clone())
        .unwrap_or_default();
    let header = Line::from(vec![
        Span::styled(format!("تدردش مع: {persona_name}"), app.theme.heading_style),
        Span::styled(
            format!("  ({} • Esc تغيير الشخصية)", app.model),
            app.theme.placeholder_style,
        ),
    ]);
    f.render_widget(Paragraph::new(header), chunks[0]);

    let lines = prewrap_lines(&build_display_lines(app), chunks[1].width);
    let total = u16::try_from(lines.len()).unwrap_or(u16::MAX);
    let max_offset = total.saturating_sub(chunks[1].height);
    let scroll_offset = app.effective_scroll(max_offset);

    let log = Paragraph::new(lines).scroll((scroll_offset, 0));
    f.render_widget(log, chunks[1]);

    render_input(f, app, chunks[2]);
}

fn render_input(f: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let busy = app.session.is_busy();
    let inner_width = area.width.saturating_sub(2);
    let text_width = inner_width.saturating_sub(INDICATOR_SPACE);

    let input = app.session.pending_input();
    let (content, style) = if input.is_empty() && !busy {
        (INPUT_PLACEHOLDER.to_string(), theme.placeholder_style)
    } else if busy {
        (input.to_string(), theme.input_disabled_style)
    } else {
        (input.to_string(), theme.input_text_style)
    };
    let (visible, visible_width) = visible_tail(&content, text_width as usize);

    let mut spans = vec![Span::styled(visible.to_string(), style)];
    if busy {
        let padding = (text_width as usize).saturating_sub(visible_width) + 2;
        spans.push(Span::raw(" ".repeat(padding)));
        spans.push(Span::styled(
            pulse_symbol(app.pulse_start.elapsed().as_secs_f32()).to_string(),
            theme.busy_indicator_style,
        ));
    }

    let title = if busy {
        "Waiting for reply… (Esc to change character, Ctrl+C to quit)"
    } else {
        "Enter to send • Esc to change character • Ctrl+C to quit"
    };
    let widget = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(theme.input_border_style)
            .title(Span::styled(title, theme.input_title_style)),
    );
    f.render_widget(widget, area);

    if !busy {
        let typed_width = if input.is_empty() { 0 } else { visible_width };
        let cursor_x = area.x + 1 + (typed_width as u16).min(text_width);
        f.set_cursor_position((cursor_x, area.y + 1));
    }
}

/// Lines for the chat log, including the placeholder and the busy bubble.
pub fn build_display_lines(app: &App) -> Vec<Line<'static>> {
    let theme = &app.theme;
    let persona_name = app
        .active_persona()
        .map(|p| p.display_name.clone())
        .unwrap_or_default();
    let mut lines = Vec::new();

    if app.session.messages().is_empty() && !app.session.is_busy() {
        lines.push(Line::from(""));
        lines.push(
            Line::from(Span::styled(
                format!("ابدأ الدردشة مع {persona_name}!"),
                theme.placeholder_style,
            ))
            .alignment(Alignment::Center),
        );
        return lines;
    }

    for message in app.session.messages() {
        let (label, prefix_style, text_style) = match message.sender {
            Sender::User => (USER_LABEL, theme.user_prefix_style, theme.user_text_style),
            Sender::Character => (
                persona_name.as_str(),
                theme.character_prefix_style,
                theme.character_text_style,
            ),
        };
        push_message_lines(&mut lines, label, &message.text, prefix_style, text_style);
    }

    if app.session.is_busy() {
        let symbol = pulse_symbol(app.pulse_start.elapsed().as_secs_f32());
        lines.push(Line::from(vec![
            Span::styled(format!("{persona_name}: "), theme.character_prefix_style),
            Span::styled(symbol.to_string(), theme.busy_indicator_style),
        ]));
    }

    lines
}

fn push_message_lines(
    lines: &mut Vec<Line<'static>>,
    label: &str,
    text: &str,
    prefix_style: Style,
    text_style: Style,
) {
    let mut text_lines = text.lines();
    let first = text_lines.next().unwrap_or_default();
    lines.push(Line::from(vec![
        Span::styled(format!("{label}: "), prefix_style),
        Span::styled(first.to_string(), text_style),
    ]));
    for rest in text_lines {
        lines.push(Line::from(Span::styled(rest.to_string(), text_style)));
    }
    lines.push(Line::from(""));
}

/// Longest suffix of `text` that fits in `max_width` columns, and its width.
fn visible_tail(text: &str, max_width: usize) -> (&str, usize) {
    let total = text.width();
    if total <= max_width {
        return (text, total);
    }
    let mut width = 0;
    let mut start = text.len();
    for (index, ch) in text.char_indices().rev() {
        let ch_width = unicode_width::UnicodeWidthChar::width(ch).unwrap_or(0);
        if width + ch_width > max_width {
            break;
        }
        width += ch_width;
        start = index;
    }
    (&text[start..], width)
}

/// Busy indicator: pulses twice per second.
fn pulse_symbol(elapsed_secs: f32) -> char {
    let pulse_phase = (elapsed_secs * 2.0) % 2.0;
    let pulse_intensity = if pulse_phase < 1.0 {
        pulse_phase
    } else {
        2.0 - pulse_phase
    };

    if pulse_intensity < 0.33 {
        '○'
    } else if pulse_intensity < 0.66 {
        '◐'
    } else {
        '●'
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::persona::{Persona, PersonaCatalog};
    use crate::ui::theme::Theme;
    use ratatui::{backend::TestBackend, buffer::Buffer, Terminal};

    fn ascii_app() -> App {
        let catalog = PersonaCatalog::from_personas(vec![
            Persona {
                id: "sage".to_string(),
                display_name: "Sage".to_string(),
                description: "Calm and balanced".to_string(),
                instruction_prompt: "You are Sage.".to_string(),
            },
            Persona {
                id: "jester".to_string(),
                display_name: "Jester".to_string(),
                description: "Always joking".to_string(),
                instruction_prompt: "You are Jester.".to_string(),
            },
        ]);
        App::new(catalog, Theme::dark_default(), "test-model")
    }

    fn render(app: &mut App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 20)).unwrap();
        terminal.draw(|f| ui(f, app)).unwrap();
        buffer_text(terminal.backend().buffer())
    }

    fn buffer_text(buffer: &Buffer) -> String {
        let area = buffer.area;
        (0..area.height)
            .map(|y| {
                (0..area.width)
                    .map(|x| buffer[(x, y)].symbol())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn selector_lists_personas_with_descriptions() {
        let mut app = ascii_app();
        let screen = render(&mut app);
        assert!(screen.contains("Sage"));
        assert!(screen.contains("Calm and balanced"));
        assert!(screen.contains("Jester"));
        assert!(screen.contains("▶ 1. Sage"));
    }

    #[test]
    fn chat_shows_log_and_input() {
        let mut app = ascii_app();
        app.select_index(1);
        app.session.push_input_str("hello");
        let (_, id) = app.submit().unwrap();
        app.handle_outcome(Ok("Why did the chicken\ncross the road?".to_string()), id);
        app.session.push_input_str("draft");

        let screen = render(&mut app);
        assert!(screen.contains("hello"));
        assert!(screen.contains("Jester: Why did the chicken"));
        assert!(screen.contains("cross the road?"));
        assert!(screen.contains("draft"));
        assert!(screen.contains("test-model"));
    }

    #[test]
    fn busy_chat_shows_indicator_instead_of_placeholder() {
        let mut app = ascii_app();
        app.select_index(0);
        let idle = build_display_lines(&app);
        assert_eq!(idle.len(), 2);

        app.session.push_input_str("hello");
        app.submit().unwrap();
        let busy = build_display_lines(&app);
        let last = busy.last().unwrap().to_string();
        assert!(last.starts_with("Sage: "));
        assert!(render(&mut app).contains("Waiting for reply"));
    }

    #[test]
    fn long_reply_end_is_reachable_on_narrow_screen() {
        let mut app = ascii_app();
        app.select_index(0);
        app.session.push_input_str("hi");
        let (_, id) = app.submit().unwrap();
        let reply = format!("{}ENDMARK", "abcdefg ".repeat(30));
        app.handle_outcome(Ok(reply), id);

        let mut terminal = Terminal::new(TestBackend::new(20, 14)).unwrap();
        terminal.draw(|f| ui(f, &mut app)).unwrap();
        assert!(buffer_text(terminal.backend().buffer()).contains("ENDMARK"));

        app.scroll_up(5);
        app.scroll_down(100);
        terminal.draw(|f| ui(f, &mut app)).unwrap();
        assert!(buffer_text(terminal.backend().buffer()).contains("ENDMARK"));
    }

    #[test]
    fn visible_tail_keeps_end_of_long_input() {
        assert_eq!(visible_tail("hello", 10), ("hello", 5));
        assert_eq!(visible_tail("hello world", 5), ("world", 5));
        assert_eq!(visible_tail("", 5), ("", 0));
    }

    #[test]
    fn selector_scroll_keeps_highlight_visible() {
        assert_eq!(selector_scroll(0, 20), 0);
        assert_eq!(selector_scroll(7, 20), 6);
    }

    #[test]
    fn pulse_cycles_through_symbols() {
        assert_eq!(pulse_symbol(0.0), '○');
        assert_eq!(pulse_symbol(0.25), '◐');
        assert_eq!(pulse_symbol(0.45), '●');
    }
}
