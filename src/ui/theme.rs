use ratatui::style::{Color, Modifier, Style};

#[derive(Debug, Clone)]
pub struct Theme {
    pub background_color: Color,
    pub heading_style: Style,

    // Selector screen
    pub picker_label_style: Style,
    pub picker_description_style: Style,
    pub selection_highlight_style: Style,

    // Chat log
    pub user_prefix_style: Style,
    pub user_text_style: Style,
    pub character_prefix_style: Style,
    pub character_text_style: Style,
    pub placeholder_style: Style,
    pub busy_indicator_style: Style,

    // Input area
    pub input_border_style: Style,
    pub input_title_style: Style,
    pub input_text_style: Style,
    pub input_disabled_style: Style,
}

impl Theme {
    pub fn dark_default() -> Self {
        Theme {
            background_color: Color::Black,
            heading_style: Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),

            picker_label_style: Style::default()
                .fg(Color::LightBlue)
                .add_modifier(Modifier::BOLD),
            picker_description_style: Style::default().fg(Color::Gray),
            selection_highlight_style: Style::default().bg(Color::DarkGray),

            user_prefix_style: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            user_text_style: Style::default().fg(Color::Cyan),
            character_prefix_style: Style::default()
                .fg(Color::LightBlue)
                .add_modifier(Modifier::BOLD),
            character_text_style: Style::default().fg(Color::White),
            placeholder_style: Style::default().fg(Color::DarkGray),
            busy_indicator_style: Style::default().fg(Color::White),

            input_border_style: Style::default().fg(Color::Gray),
            input_title_style: Style::default().fg(Color::Gray),
            input_text_style: Style::default().fg(Color::White),
            input_disabled_style: Style::default().fg(Color::DarkGray),
        }
    }

    pub fn light() -> Self {
        Theme {
            background_color: Color::White,
            heading_style: Style::default()
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),

            picker_label_style: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            picker_description_style: Style::default().fg(Color::DarkGray),
            selection_highlight_style: Style::default().bg(Color::Gray),

            user_prefix_style: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            user_text_style: Style::default().fg(Color::Blue),
            character_prefix_style: Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
            character_text_style: Style::default().fg(Color::Black),
            placeholder_style: Style::default().fg(Color::Gray),
            busy_indicator_style: Style::default().fg(Color::Black),

            input_border_style: Style::default().fg(Color::DarkGray),
            input_title_style: Style::default().fg(Color::DarkGray),
            input_text_style: Style::default().fg(Color::Black),
            input_disabled_style: Style::default().fg(Color::Gray),
        }
    }

    /// Theme for a configured name; unknown or missing names get the dark theme.
    pub fn from_name(name: Option<&str>) -> Self {
        match name.map(str::trim) {
            Some(n) if n.eq_ignore_ascii_case("light") => Self::light(),
            _ => Self::dark_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_name_is_case_insensitive_with_dark_fallback() {
        assert_eq!(Theme::from_name(Some("Light")).background_color, Color::White);
        assert_eq!(Theme::from_name(Some("dracula")).background_color, Color::Black);
        assert_eq!(Theme::from_name(None).background_color, Color::Black);
    }
}
