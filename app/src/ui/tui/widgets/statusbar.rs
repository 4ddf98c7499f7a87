use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Style},
    text::Line,
    widgets::{Paragraph, Widget},
};
use std::time::Instant;

const THROBBER: [char; 10] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];

#[derive(Clone, Debug, Default, PartialEq)]
pub enum StatusMode {
    #[default]
    Blank,
    /// a message with a throbber
    Working,
    /// a plain message
    Notice,
}

/// A status bar widget that shows a message, with a throbber while work is pending
#[derive(Clone, Debug, Default)]
pub struct StatusBar {
    /// Current mode of the status bar
    mode: StatusMode,
    /// Current message to display
    message: String,
    /// Start time for throbber animation
    start_time: Option<Instant>,
}

impl StatusBar {
    /// Create a new StatusBar
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear the status bar
    pub fn set_blank(&mut self) {
        self.mode = StatusMode::Blank;
        self.message.clear();
        self.start_time = None;
    }

    /// Show a message with a running throbber
    pub fn set_working(&mut self, message: String) {
        self.mode = StatusMode::Working;
        self.message = message;
        self.start_time = Some(Instant::now());
    }

    /// Show a plain message
    pub fn set_notice(&mut self, message: String) {
        self.mode = StatusMode::Notice;
        self.message = message;
        self.start_time = None;
    }

    pub fn mode(&self) -> &StatusMode {
        &self.mode
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get current throbber character based on elapsed time
    fn get_throbber_char(&self) -> char {
        match self.start_time {
            // 100ms per frame
            Some(start_time) => {
                THROBBER[(start_time.elapsed().as_millis() / 100) as usize % THROBBER.len()]
            }
            None => THROBBER[0],
        }
    }
}

impl Widget for &mut StatusBar {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let paragraph = match self.mode {
            StatusMode::Blank => Paragraph::new(Line::from("")),
            StatusMode::Working => {
                let content = format!("{} {}", self.get_throbber_char(), self.message);
                Paragraph::new(Line::from(content)).style(Style::default().fg(Color::Yellow))
            }
            StatusMode::Notice => Paragraph::new(Line::from(self.message.clone()))
                .style(Style::default().fg(Color::LightGreen)),
        };
        Widget::render(paragraph.alignment(Alignment::Left), area, buf);
    }
}
