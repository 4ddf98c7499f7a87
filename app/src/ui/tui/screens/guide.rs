use crate::{
    ui::tui::{
        widgets::{navigation, LessonBox, LessonBoxState, Navigation, NavigationState, StatusBar},
        Event as UiEvent, EventHandler,
    },
    Error,
};
use crossterm::event::{Event, KeyCode};
use engine::{Lesson, Message, Topic};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Padding, Paragraph, StatefulWidget, Widget, Wrap},
};
use std::sync::Arc;
use tracing::info;

/// What the content area shows
#[derive(Clone, Debug, Default)]
enum View {
    #[default]
    Landing,
    Loading(Topic),
    Ready(Topic, Arc<Lesson>),
    Failed(Topic, String),
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
enum FocusedView {
    Navigation,
    #[default]
    Content,
}

/// The main screen: navigation panel, lesson content and status
#[derive(Clone, Debug, Default)]
pub struct Guide {
    /// what the engine last reported
    view: View,
    /// which panel receives the movement keys
    focused: FocusedView,
    /// the navigation cursor
    navigation: NavigationState,
    /// the lesson page
    lesson_box: LessonBoxState,
    /// the status line
    status: StatusBar,
}

impl Guide {
    /// Create the screen showing the landing view
    pub fn new() -> Self {
        Self::default()
    }

    /// the topic on screen, if any
    pub fn active_topic(&self) -> Option<Topic> {
        match &self.view {
            View::Landing => None,
            View::Loading(topic) | View::Ready(topic, _) | View::Failed(topic, _) => Some(*topic),
        }
    }

    /// the lesson on screen, if one is ready
    pub fn lesson(&self) -> Option<(Topic, Arc<Lesson>)> {
        match &self.view {
            View::Ready(topic, lesson) => Some((*topic, lesson.clone())),
            _ => None,
        }
    }

    /// show a one-off note in the status line
    pub fn set_notice(&mut self, notice: String) {
        self.status.set_notice(notice);
    }

    /// Update the view from an engine message
    pub fn on_message(&mut self, msg: &Message) {
        match msg {
            Message::Idle => {
                self.view = View::Landing;
                self.focused = FocusedView::Navigation;
                self.status.set_blank();
            }
            Message::Loading { topic } => {
                info!("Loading {}", topic);
                self.view = View::Loading(*topic);
                self.navigation.set_cursor(*topic);
                self.lesson_box.set_loading();
                self.status
                    .set_working("Gerando material didático completo...".to_string());
            }
            Message::ShowLesson { topic, lesson } => {
                info!("Showing lesson {}", lesson.title);
                self.view = View::Ready(*topic, lesson.clone());
                self.lesson_box.set_lesson(lesson);
                self.status.set_blank();
            }
            Message::Error { topic, error } => {
                self.view = View::Failed(*topic, error.clone());
                self.status.set_blank();
            }
            _ => {}
        }
    }

    fn render_content(&mut self, area: Rect, buf: &mut Buffer) {
        let fg = match self.focused {
            FocusedView::Navigation => Color::DarkGray,
            FocusedView::Content => Color::White,
        };
        let block = |title: &str| {
            Block::default()
                .title(Line::from(format!(" {title} ")))
                .padding(Padding::horizontal(1))
                .style(Style::default().fg(fg))
                .borders(Borders::ALL)
        };

        match &self.view {
            View::Landing => {
                let text = vec![
                    Line::from(Span::styled(
                        "Bem-vindo ao Python AI",
                        Style::default().add_modifier(Modifier::BOLD),
                    )),
                    Line::from(""),
                    Line::from("Selecione um módulo no menu (1 ou 2) para gerar o material didático."),
                ];
                render_centered(text, block("Python AI"), area, buf);
            }
            View::Failed(_, message) => {
                let text = vec![
                    Line::from(Span::styled(
                        "⚠ Erro ao carregar aula",
                        Style::default()
                            .fg(Color::LightRed)
                            .add_modifier(Modifier::BOLD),
                    )),
                    Line::from(""),
                    Line::from(message.clone()),
                    Line::from(""),
                    Line::from(Span::styled(
                        "Pressione r para tentar novamente",
                        Style::default().fg(Color::LightBlue),
                    )),
                ];
                render_centered(text, block("Erro"), area, buf);
            }
            View::Loading(topic) => {
                let lesson_box = LessonBox::new().block(block(topic.menu_entry().title));
                StatefulWidget::render(lesson_box, area, buf, &mut self.lesson_box);
            }
            View::Ready(_, lesson) => {
                let lesson_box = LessonBox::new()
                    .block(block(&lesson.title))
                    .style(Style::default().fg(Color::White));
                StatefulWidget::render(lesson_box, area, buf, &mut self.lesson_box);
            }
        }
    }

    // render the keyboard shortcuts
    fn render_keys(&mut self, area: Rect, buf: &mut Buffer) {
        let keys = Paragraph::new(
            "1/2: módulo  |  tab: foco  |  j/k: rolar  |  n/p: exemplo  |  r: tentar novamente  |  x: exportar  |  `: log  |  q: sair",
        )
        .style(Style::default().fg(Color::Black).bg(Color::White))
        .alignment(Alignment::Left);

        Widget::render(keys, area, buf);
    }
}

fn render_centered(text: Vec<Line<'_>>, block: Block<'_>, area: Rect, buf: &mut Buffer) {
    let inner = block.inner(area);
    Widget::render(block, area, buf);
    let [centered] = Layout::vertical([Constraint::Length(text.len() as u16 + 2)])
        .flex(Flex::Center)
        .areas(inner);
    let paragraph = Paragraph::new(text)
        .style(Style::default().fg(Color::White))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    Widget::render(paragraph, centered, buf);
}

#[async_trait::async_trait]
impl EventHandler for &mut Guide {
    async fn handle_event(&mut self, evt: &Event) -> Result<Option<UiEvent>, Error> {
        let Event::Key(key) = evt else {
            return Ok(None);
        };

        if let Some(topic) = navigation::shortcut(key.code) {
            return Ok(Some(UiEvent::SelectTopic(topic)));
        }

        match key.code {
            KeyCode::Tab => {
                info!("Switch focus");
                self.focused = match self.focused {
                    FocusedView::Navigation => FocusedView::Content,
                    FocusedView::Content => FocusedView::Navigation,
                };
                Ok(None)
            }
            KeyCode::Char('r') | KeyCode::Char('R') => match self.view {
                View::Failed(..) => Ok(Some(UiEvent::Retry)),
                _ => Ok(None),
            },
            KeyCode::Char('x') | KeyCode::Char('X') => match self.view {
                View::Ready(..) => Ok(Some(UiEvent::Export)),
                _ => Ok(None),
            },
            KeyCode::PageUp => {
                self.lesson_box.page_up();
                Ok(None)
            }
            KeyCode::PageDown => {
                self.lesson_box.page_down();
                Ok(None)
            }
            KeyCode::Home => {
                self.lesson_box.scroll_top();
                Ok(None)
            }
            KeyCode::End => {
                self.lesson_box.scroll_bottom();
                Ok(None)
            }
            KeyCode::Char('n') | KeyCode::Char('N') => {
                self.lesson_box.next_section();
                Ok(None)
            }
            KeyCode::Char('p') | KeyCode::Char('P') => {
                self.lesson_box.prev_section();
                Ok(None)
            }
            code => match self.focused {
                FocusedView::Navigation => {
                    Ok(self.navigation.handle_key(code).map(UiEvent::SelectTopic))
                }
                FocusedView::Content => {
                    match code {
                        KeyCode::Char('j') | KeyCode::Char('J') | KeyCode::Down => {
                            self.lesson_box.scroll_down()
                        }
                        KeyCode::Char('k') | KeyCode::Char('K') | KeyCode::Up => {
                            self.lesson_box.scroll_up()
                        }
                        _ => {}
                    }
                    Ok(None)
                }
            },
        }
    }
}

impl Widget for &mut Guide {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // this splits the screen into a top area and two one-line bottom areas
        let [main_area, status_area, keys_area] = Layout::vertical([
            Constraint::Percentage(100),
            Constraint::Min(1),
            Constraint::Min(1),
        ])
        .flex(Flex::End)
        .areas(area);

        let [navigation_area, content_area] =
            Layout::horizontal([Constraint::Length(36), Constraint::Min(1)]).areas(main_area);

        let navigation = Navigation::new(
            self.active_topic(),
            self.focused == FocusedView::Navigation,
        );
        StatefulWidget::render(navigation, navigation_area, buf, &mut self.navigation);
        self.render_content(content_area, buf);
        Widget::render(&mut self.status, status_area, buf);
        self.render_keys(keys_area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEvent, KeyModifiers};
    use engine::Example;

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn lesson() -> Arc<Lesson> {
        Arc::new(Lesson {
            title: "Ambientes virtuais, arquivos e APIs".to_string(),
            introduction: "Intro".to_string(),
            key_concepts: vec!["Herança".to_string()],
            examples: vec![Example {
                title: "Herança Genética".to_string(),
                analogy: "Filhos herdam traços.".to_string(),
                code: "class Filho(Pai):\n    pass".to_string(),
                explanation: "Filho herda de Pai.".to_string(),
            }],
        })
    }

    fn screen(guide: &mut Guide) -> String {
        let area = Rect::new(0, 0, 120, 30);
        let mut buf = Buffer::empty(area);
        Widget::render(guide, area, &mut buf);
        (0..area.height)
            .map(|y| (0..area.width).map(|x| buf[(x, y)].symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[tokio::test]
    async fn test_number_keys_select_topics() {
        let mut guide = Guide::new();
        assert!(matches!(
            (&mut guide).handle_event(&key(KeyCode::Char('2'))).await,
            Ok(Some(UiEvent::SelectTopic(Topic::Api)))
        ));
        assert!(matches!(
            (&mut guide).handle_event(&key(KeyCode::Char('1'))).await,
            Ok(Some(UiEvent::SelectTopic(Topic::Oop)))
        ));
    }

    #[tokio::test]
    async fn test_navigation_focus_selects_with_enter() {
        let mut guide = Guide::new();
        guide.on_message(&Message::Idle);
        assert!(matches!(
            (&mut guide).handle_event(&key(KeyCode::Char('j'))).await,
            Ok(None)
        ));
        assert!(matches!(
            (&mut guide).handle_event(&key(KeyCode::Enter)).await,
            Ok(Some(UiEvent::SelectTopic(Topic::Api)))
        ));
    }

    #[tokio::test]
    async fn test_retry_only_when_failed() {
        let mut guide = Guide::new();
        guide.on_message(&Message::Loading { topic: Topic::Oop });
        assert!(matches!(
            (&mut guide).handle_event(&key(KeyCode::Char('r'))).await,
            Ok(None)
        ));

        guide.on_message(&Message::Error {
            topic: Topic::Oop,
            error: engine::FAILURE_MESSAGE.to_string(),
        });
        assert!(matches!(
            (&mut guide).handle_event(&key(KeyCode::Char('r'))).await,
            Ok(Some(UiEvent::Retry))
        ));
        assert!(screen(&mut guide).contains("Erro ao carregar aula"));
    }

    #[tokio::test]
    async fn test_export_only_when_ready() {
        let mut guide = Guide::new();
        assert!(matches!(
            (&mut guide).handle_event(&key(KeyCode::Char('x'))).await,
            Ok(None)
        ));
        guide.on_message(&Message::ShowLesson {
            topic: Topic::Api,
            lesson: lesson(),
        });
        assert!(matches!(
            (&mut guide).handle_event(&key(KeyCode::Char('x'))).await,
            Ok(Some(UiEvent::Export))
        ));
        assert_eq!(guide.lesson().map(|(topic, _)| topic), Some(Topic::Api));
    }

    #[test]
    fn test_views_render() {
        let mut guide = Guide::new();
        guide.on_message(&Message::Idle);
        assert!(screen(&mut guide).contains("Bem-vindo ao Python AI"));
        assert_eq!(guide.active_topic(), None);

        guide.on_message(&Message::Loading { topic: Topic::Api });
        let text = screen(&mut guide);
        assert!(text.contains("Gerando material didático completo..."));
        assert!(text.contains("░░░"));
        assert_eq!(guide.active_topic(), Some(Topic::Api));

        guide.on_message(&Message::ShowLesson {
            topic: Topic::Api,
            lesson: lesson(),
        });
        let text = screen(&mut guide);
        assert!(text.contains("Herança Genética"));
        assert!(text.contains("exemplo_pratico_1.py"));
        assert!(!text.contains("░░░"));
    }
}
