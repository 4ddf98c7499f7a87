use crossterm::event::KeyCode;
use engine::{Topic, MENU};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Padding, Paragraph, StatefulWidget, Widget, Wrap},
};

const TIP: &str = "Selecione um módulo acima. A IA irá gerar explicações únicas e analogias \
    criativas para facilitar seu aprendizado.";

/// Map a number key to the menu entry it picks
pub fn shortcut(code: KeyCode) -> Option<Topic> {
    match code {
        KeyCode::Char(c) => {
            let index = c.to_digit(10)?.checked_sub(1)? as usize;
            MENU.get(index).map(|entry| entry.id)
        }
        _ => None,
    }
}

/// The cursor row of the navigation panel
#[derive(Clone, Debug, Default)]
pub struct NavigationState {
    cursor: usize,
}

impl NavigationState {
    /// the topic under the cursor
    pub fn selected(&self) -> Topic {
        MENU[self.cursor.min(MENU.len() - 1)].id
    }

    /// move the cursor onto the given topic
    pub fn set_cursor(&mut self, topic: Topic) {
        if let Some(index) = MENU.iter().position(|entry| entry.id == topic) {
            self.cursor = index;
        }
    }

    /// Handle a key while the panel has focus. Returns the chosen topic on selection.
    pub fn handle_key(&mut self, code: KeyCode) -> Option<Topic> {
        match code {
            KeyCode::Char('j') | KeyCode::Char('J') | KeyCode::Down => {
                self.cursor = (self.cursor + 1).min(MENU.len() - 1);
                None
            }
            KeyCode::Char('k') | KeyCode::Char('K') | KeyCode::Up => {
                self.cursor = self.cursor.saturating_sub(1);
                None
            }
            KeyCode::Enter => Some(self.selected()),
            code => shortcut(code),
        }
    }
}

/// The navigation panel listing the fixed menu entries
#[derive(Clone, Debug, Default)]
pub struct Navigation {
    /// the topic on screen
    active: Option<Topic>,
    /// whether the panel has keyboard focus
    focused: bool,
}

impl Navigation {
    pub fn new(active: Option<Topic>, focused: bool) -> Self {
        Self { active, focused }
    }

    fn entries(&self, cursor: usize) -> Vec<Line<'static>> {
        let mut lines = vec![
            Line::from(Span::styled(
                ">_ Python AI",
                Style::default()
                    .fg(Color::LightBlue)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                "Guia interativo masterclass",
                Style::default().fg(Color::Gray),
            )),
            Line::from(""),
        ];

        for (i, entry) in MENU.iter().enumerate() {
            let active = self.active == Some(entry.id);
            let marker = if self.focused && i == cursor { "> " } else { "  " };
            let title_style = if active {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::LightBlue)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD)
            };
            lines.push(Line::from(vec![
                Span::raw(marker),
                Span::styled(format!("{} {}", i + 1, entry.icon.glyph()), title_style),
                Span::styled(format!(" {}", entry.title), title_style),
            ]));
            lines.push(Line::from(Span::styled(
                format!("    {}", entry.description),
                Style::default().fg(Color::Gray),
            )));
            lines.push(Line::from(""));
        }
        lines
    }
}

impl StatefulWidget for Navigation {
    type State = NavigationState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let fg = if self.focused {
            Color::White
        } else {
            Color::DarkGray
        };
        let block = Block::default()
            .padding(Padding::horizontal(1))
            .style(Style::default().fg(fg))
            .borders(Borders::ALL);
        let inner = block.inner(area);
        Widget::render(block, area, buf);

        let [entries_area, tip_area] =
            Layout::vertical([Constraint::Min(1), Constraint::Length(6)]).areas(inner);

        let entries = Paragraph::new(self.entries(state.cursor))
            .style(Style::default().fg(Color::White))
            .wrap(Wrap { trim: false });
        Widget::render(entries, entries_area, buf);

        let tip = Paragraph::new(vec![
            Line::from(Span::styled(
                "Dica Pro",
                Style::default()
                    .fg(Color::Gray)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(TIP, Style::default().fg(Color::DarkGray))),
        ])
        .wrap(Wrap { trim: true });
        Widget::render(tip, tip_area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn screen(buf: &Buffer) -> String {
        let area = buf.area;
        (area.top()..area.bottom())
            .map(|y| {
                (area.left()..area.right())
                    .map(|x| buf[(x, y)].symbol())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_renders_fixed_menu() {
        let area = Rect::new(0, 0, 60, 20);
        let mut buf = Buffer::empty(area);
        let mut state = NavigationState::default();
        StatefulWidget::render(
            Navigation::new(Some(Topic::Api), true),
            area,
            &mut buf,
            &mut state,
        );

        let text = screen(&buf);
        assert!(text.contains("Python AI"));
        assert!(text.contains("Guia interativo masterclass"));
        assert!(text.contains("> 1 ▣ Orientação a Objetos"));
        assert!(text.contains("  2 ≡ Ambientes e APIs"));
        assert!(text.contains("Dica Pro"));
        let oop = text.find("Orientação a Objetos").unwrap();
        let api = text.find("Ambientes e APIs").unwrap();
        assert!(oop < api);
    }

    #[test]
    fn test_shortcuts() {
        assert_eq!(shortcut(KeyCode::Char('1')), Some(Topic::Oop));
        assert_eq!(shortcut(KeyCode::Char('2')), Some(Topic::Api));
        assert_eq!(shortcut(KeyCode::Char('0')), None);
        assert_eq!(shortcut(KeyCode::Char('3')), None);
        assert_eq!(shortcut(KeyCode::Char('x')), None);
    }

    #[test]
    fn test_cursor_selection() {
        let mut state = NavigationState::default();
        assert_eq!(state.handle_key(KeyCode::Enter), Some(Topic::Oop));
        assert_eq!(state.handle_key(KeyCode::Char('j')), None);
        assert_eq!(state.handle_key(KeyCode::Char('j')), None);
        assert_eq!(state.handle_key(KeyCode::Enter), Some(Topic::Api));
        assert_eq!(state.handle_key(KeyCode::Up), None);
        assert_eq!(state.selected(), Topic::Oop);
        assert_eq!(state.handle_key(KeyCode::Char('2')), Some(Topic::Api));

        state.set_cursor(Topic::Api);
        assert_eq!(state.selected(), Topic::Api);
    }
}
