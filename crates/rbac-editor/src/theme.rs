use ratatui::style::{Color, Modifier, Style};

/// Theme tokens for consistent styling across the TUI
pub struct Theme {
    pub title: Style,
    pub border: Style,
    pub selected: Style,
    pub normal: Style,
    pub muted: Style,
    pub danger: Style,
    pub success: Style,
    pub key_hint: Style,
    pub checked: Style,
    pub unchecked: Style,
    pub path: Style,
    pub grabbed: Style,
    pub field_focus: Style,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            title: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            border: Style::default().fg(Color::DarkGray),
            selected: Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            normal: Style::default().fg(Color::White),
            muted: Style::default().fg(Color::DarkGray),
            danger: Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            success: Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
            key_hint: Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
            checked: Style::default().fg(Color::Green),
            unchecked: Style::default().fg(Color::DarkGray),
            path: Style::default().fg(Color::Blue),
            grabbed: Style::default()
                .fg(Color::Black)
                .bg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
            field_focus: Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::UNDERLINED),
        }
    }
}
