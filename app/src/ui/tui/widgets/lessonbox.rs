use engine::Lesson;
use languages::{python, Category};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{
        Block, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState, StatefulWidget, Widget,
    },
};
use std::fmt;
use textwrap::core::display_width;

/// The narrowest width text is ever wrapped to
const MIN_WRAP: usize = 10;

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub enum Scroll {
    #[default]
    Top,
    MaybeTop(usize),
    Offset(usize),
    MaybeBottom(usize),
    Bottom,
}

impl fmt::Display for Scroll {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scroll::Top => write!(f, "Top"),
            Scroll::MaybeTop(offset) => write!(f, "MaybeTop({})", offset),
            Scroll::Offset(offset) => write!(f, "Offset({})", offset),
            Scroll::MaybeBottom(offset) => write!(f, "MaybeBottom({})", offset),
            Scroll::Bottom => write!(f, "Bottom"),
        }
    }
}

/// Trait for content blocks that can be rendered to styled text lines
pub trait ContentBlock {
    /// Render the content block to a list of styled text lines
    ///
    /// # Arguments
    /// * `width` - The width of the render area for text wrapping
    fn render(&self, width: u16) -> Vec<Line<'static>>;
}

/// The blocks a lesson page is made of
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Content {
    /// small uppercase label above the title
    Label(String),
    /// the page title
    Heading(String),
    /// text set off by a colored bar, with an optional title line
    Callout {
        title: Option<String>,
        text: String,
        color: Color,
    },
    /// a small bold caption
    Caption(String),
    /// a bulleted entry
    ListItem(String),
    /// a full-width rule
    Separator,
    /// the numbered title opening an example section
    Section { number: usize, title: String },
    /// plain wrapped text
    Paragraph(String),
    /// highlighted source under a file label
    Code { file: String, code: String },
    /// the arrow between two example sections
    Connector,
    /// the completion footer
    Footer { title: String, text: String },
    /// a placeholder bar of the given percentage of the width and height in lines
    Skeleton { percent: u16, height: u16 },
}

/// Lay out a lesson page. While loading, the page is a fixed skeleton whatever the lesson.
pub fn layout(lesson: Option<&Lesson>, loading: bool) -> Vec<Content> {
    if loading {
        return skeleton();
    }
    let Some(lesson) = lesson else {
        return Vec::new();
    };

    let mut content = vec![
        Content::Label("Módulo de Aprendizado".to_string()),
        Content::Heading(lesson.title.clone()),
        Content::Callout {
            title: None,
            text: lesson.introduction.clone(),
            color: Color::LightBlue,
        },
        Content::Caption("Neste guia você vai aprender:".to_string()),
    ];
    content.extend(lesson.key_concepts.iter().cloned().map(Content::ListItem));
    content.push(Content::Separator);

    let count = lesson.examples.len();
    for (i, example) in lesson.examples.iter().enumerate() {
        let number = i + 1;
        content.push(Content::Section {
            number,
            title: example.title.clone(),
        });
        content.push(Content::Callout {
            title: Some("💡 Analogia Prática".to_string()),
            text: format!("\"{}\"", example.analogy),
            color: Color::Yellow,
        });
        content.push(Content::Paragraph(example.explanation.clone()));
        content.push(Content::Code {
            file: format!("exemplo_pratico_{number}.py"),
            code: example.code.clone(),
        });
        if number < count {
            content.push(Content::Connector);
        }
    }

    content.push(Content::Footer {
        title: "Módulo Concluído".to_string(),
        text: "Você revisou todos os conceitos desta seção.".to_string(),
    });
    content
}

fn skeleton() -> Vec<Content> {
    vec![
        Content::Skeleton {
            percent: 33,
            height: 1,
        },
        Content::Skeleton {
            percent: 100,
            height: 1,
        },
        Content::Skeleton {
            percent: 100,
            height: 1,
        },
        Content::Skeleton {
            percent: 66,
            height: 1,
        },
        Content::Skeleton {
            percent: 100,
            height: 8,
        },
    ]
}

fn wrap(text: &str, width: usize) -> Vec<String> {
    textwrap::wrap(text, width.max(MIN_WRAP))
        .into_iter()
        .map(|line| line.into_owned())
        .collect()
}

impl ContentBlock for Content {
    fn render(&self, width: u16) -> Vec<Line<'static>> {
        let width = width as usize;
        match self {
            Content::Label(text) => vec![Line::from(Span::styled(
                format!("🎓 {text}"),
                Style::default()
                    .fg(Color::LightBlue)
                    .add_modifier(Modifier::BOLD),
            ))],
            Content::Heading(text) => {
                let style = Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD);
                wrap(text, width)
                    .into_iter()
                    .map(|line| Line::from(Span::styled(line, style)))
                    .collect()
            }
            Content::Callout { title, text, color } => {
                let bar = Span::styled("▌ ", Style::default().fg(*color));
                let mut lines = Vec::new();
                if let Some(title) = title {
                    lines.push(Line::from(vec![
                        bar.clone(),
                        Span::styled(
                            title.clone(),
                            Style::default().fg(*color).add_modifier(Modifier::BOLD),
                        ),
                    ]));
                }
                lines.extend(
                    wrap(text, width.saturating_sub(2))
                        .into_iter()
                        .map(|line| Line::from(vec![bar.clone(), Span::raw(line)])),
                );
                lines
            }
            Content::Caption(text) => vec![Line::from(Span::styled(
                text.clone(),
                Style::default()
                    .fg(Color::Gray)
                    .add_modifier(Modifier::BOLD),
            ))],
            Content::ListItem(text) => {
                let bullet = Style::default().fg(Color::LightGreen);
                wrap(text, width.saturating_sub(2))
                    .into_iter()
                    .enumerate()
                    .map(|(i, line)| {
                        let prefix = if i == 0 { "• " } else { "  " };
                        Line::from(vec![Span::styled(prefix, bullet), Span::raw(line)])
                    })
                    .collect()
            }
            Content::Separator => vec![Line::from(Span::styled(
                "─".repeat(width),
                Style::default().fg(Color::DarkGray),
            ))],
            Content::Section { number, title } => {
                let prefix = format!("{number}  ");
                let indent = " ".repeat(prefix.len());
                let number_style = Style::default()
                    .fg(Color::LightBlue)
                    .add_modifier(Modifier::BOLD);
                let title_style = Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD);
                wrap(title, width.saturating_sub(prefix.len()))
                    .into_iter()
                    .enumerate()
                    .map(|(i, line)| {
                        let lead = if i == 0 {
                            Span::styled(prefix.clone(), number_style)
                        } else {
                            Span::raw(indent.clone())
                        };
                        Line::from(vec![lead, Span::styled(line, title_style)])
                    })
                    .collect()
            }
            Content::Paragraph(text) => wrap(text, width).into_iter().map(Line::from).collect(),
            Content::Code { file, code } => {
                let border = Style::default().fg(Color::Gray);
                let mut lines = vec![Line::from(vec![
                    Span::styled("┌─ ", border),
                    Span::styled(file.clone(), Style::default().fg(Color::DarkGray)),
                ])];
                for line in highlight_lines(code) {
                    for row in wrap_spans(line, width.saturating_sub(2)) {
                        let mut spans = vec![Span::styled("│ ", border)];
                        spans.extend(row.spans);
                        lines.push(Line::from(spans));
                    }
                }
                lines.push(Line::from(Span::styled("└─", border)));
                lines
            }
            Content::Connector => vec![Line::from(Span::styled(
                "↓",
                Style::default().fg(Color::DarkGray),
            ))
            .alignment(Alignment::Center)],
            Content::Footer { title, text } => vec![
                Line::from(Span::styled(
                    format!("✓ {title}"),
                    Style::default()
                        .fg(Color::LightGreen)
                        .add_modifier(Modifier::BOLD),
                ))
                .alignment(Alignment::Center),
                Line::from(Span::styled(text.clone(), Style::default().fg(Color::Gray)))
                    .alignment(Alignment::Center),
            ],
            Content::Skeleton { percent, height } => {
                let len = width * (*percent).min(100) as usize / 100;
                let bar = "░".repeat(len.max(1));
                let style = Style::default().fg(Color::DarkGray);
                (0..*height)
                    .map(|_| Line::from(Span::styled(bar.clone(), style)))
                    .collect()
            }
        }
    }
}

/// The terminal style for a token category
fn token_style(category: Category) -> Style {
    let style = Style::default().bg(Color::Black);
    match category {
        Category::Plain => style.fg(Color::White),
        Category::Keyword => style.fg(Color::Rgb(198, 120, 221)),
        Category::SelfRef => style.fg(Color::Rgb(224, 108, 117)),
        Category::Decorator => style.fg(Color::Rgb(229, 192, 123)),
        Category::String => style.fg(Color::Rgb(152, 195, 121)),
        Category::Comment => style
            .fg(Color::Rgb(127, 132, 142))
            .add_modifier(Modifier::ITALIC),
        Category::ClassName | Category::FunctionName => style.fg(Color::Rgb(97, 175, 239)),
    }
}

/// Highlight python source into one styled line per source line. Tokens spanning lines, like
/// triple-quoted strings, keep their style on every line.
pub fn highlight_lines(code: &str) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    let mut spans = Vec::new();
    for token in python::tokenize(code) {
        let style = token_style(token.category);
        for (i, piece) in token.text.split('\n').enumerate() {
            if i > 0 {
                lines.push(Line::from(std::mem::take(&mut spans)));
            }
            if !piece.is_empty() {
                spans.push(Span::styled(piece.replace('\t', "    "), style));
            }
        }
    }
    lines.push(Line::from(spans));
    lines
}

/// Break a styled line into rows no wider than `width`. A span cut at the edge continues on the
/// next row with the same style.
fn wrap_spans(line: Line<'static>, width: usize) -> Vec<Line<'static>> {
    let width = width.max(MIN_WRAP);
    let mut rows = Vec::new();
    let mut row = Vec::new();
    let mut used = 0;
    for span in line.spans {
        let mut piece = String::new();
        for ch in span.content.chars() {
            let mut utf8 = [0; 4];
            let ch_width = display_width(ch.encode_utf8(&mut utf8));
            if used > 0 && used + ch_width > width {
                if !piece.is_empty() {
                    row.push(Span::styled(std::mem::take(&mut piece), span.style));
                }
                rows.push(Line::from(std::mem::take(&mut row)));
                used = 0;
            }
            piece.push(ch);
            used += ch_width;
        }
        if !piece.is_empty() {
            row.push(Span::styled(piece, span.style));
        }
    }
    rows.push(Line::from(row));
    rows
}

/// State for the LessonBox widget
#[derive(Clone, Debug, Default)]
pub struct LessonBoxState {
    /// The page blocks
    content: Vec<Content>,
    /// Rendered lines for `cached_width`
    cached_lines: Vec<Line<'static>>,
    /// The first line of each example section
    section_starts: Vec<usize>,
    /// The width the cache was built for
    cached_width: u16,
    /// Current scroll position
    scroll: Scroll,
    /// Total lines after rendering
    total_lines: usize,
    /// Window height for scrolling
    window_lines: usize,
}

impl LessonBoxState {
    /// Show a lesson from the top
    pub fn set_lesson(&mut self, lesson: &Lesson) {
        self.set_content(layout(Some(lesson), false));
    }

    /// Show the loading skeleton
    pub fn set_loading(&mut self) {
        self.set_content(layout(None, true));
    }

    fn set_content(&mut self, content: Vec<Content>) {
        self.content = content;
        self.scroll = Scroll::Top;
        self.cached_lines.clear();
        self.cached_width = 0;
    }

    /// Rebuild the cached lines from content
    fn rebuild_cache(&mut self, width: u16) {
        self.cached_lines.clear();
        self.section_starts.clear();
        let mut last_was_list_item = false;

        for (i, block) in self.content.iter().enumerate() {
            let is_list_item = matches!(block, Content::ListItem(_));

            // blank line between blocks, except inside a run of list items
            if i > 0 && !(last_was_list_item && is_list_item) {
                self.cached_lines.push(Line::from(""));
            }
            if matches!(block, Content::Section { .. }) {
                self.section_starts.push(self.cached_lines.len());
            }
            self.cached_lines.extend(block.render(width));
            last_was_list_item = is_list_item;
        }

        self.cached_width = width;
        self.total_lines = self.cached_lines.len();
    }

    /// the rendered lines for the given width
    pub fn lines(&mut self, width: u16) -> &[Line<'static>] {
        if width != self.cached_width || self.cached_lines.is_empty() {
            self.rebuild_cache(width);
        }
        &self.cached_lines
    }

    /// the first line of each example section
    pub fn section_starts(&self) -> &[usize] {
        &self.section_starts
    }

    /// the current top line
    pub fn offset(&self) -> usize {
        let max = self.total_lines.saturating_sub(self.window_lines);
        match self.scroll {
            Scroll::Top => 0,
            Scroll::MaybeTop(offset) | Scroll::Offset(offset) | Scroll::MaybeBottom(offset) => {
                offset.min(max)
            }
            Scroll::Bottom => max,
        }
    }

    pub fn scroll_top(&mut self) {
        self.scroll = Scroll::Top;
    }

    pub fn scroll_bottom(&mut self) {
        self.scroll = Scroll::Bottom;
    }

    pub fn scroll_up(&mut self) {
        self.scroll = Scroll::MaybeTop(self.offset().saturating_sub(1));
    }

    pub fn scroll_down(&mut self) {
        if self.scroll != Scroll::Bottom {
            self.scroll = Scroll::MaybeBottom(self.offset().saturating_add(1));
        }
    }

    pub fn page_up(&mut self) {
        self.scroll = Scroll::MaybeTop(self.offset().saturating_sub(self.window_lines.max(1)));
    }

    pub fn page_down(&mut self) {
        if self.scroll != Scroll::Bottom {
            self.scroll =
                Scroll::MaybeBottom(self.offset().saturating_add(self.window_lines.max(1)));
        }
    }

    /// Scroll to the next example section below the top line
    pub fn next_section(&mut self) {
        let offset = self.offset();
        if let Some(start) = self.section_starts.iter().find(|s| **s > offset) {
            self.scroll = Scroll::MaybeBottom(*start);
        }
    }

    /// Scroll to the previous example section above the top line
    pub fn prev_section(&mut self) {
        let offset = self.offset();
        if let Some(start) = self.section_starts.iter().rev().find(|s| **s < offset) {
            self.scroll = Scroll::MaybeTop(*start);
        }
    }

    pub fn get_scroll(&self) -> &Scroll {
        &self.scroll
    }

    pub fn get_lines(&self) -> usize {
        self.total_lines
    }
}

/// A lesson box widget that displays a laid out lesson page
#[derive(Clone, Debug, Default)]
pub struct LessonBox<'a> {
    /// The optional surrounding block
    block: Option<Block<'a>>,
    /// The style of the text
    style: Style,
}

impl<'a> LessonBox<'a> {
    /// Create a new LessonBox
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a block
    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }

    /// Set the style
    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }
}

impl StatefulWidget for LessonBox<'_> {
    type State = LessonBoxState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let inner = match &self.block {
            Some(block) => block.inner(area),
            None => area,
        };

        // leave a column for the scrollbar
        state.lines(inner.width.saturating_sub(1));
        state.window_lines = inner.height as usize;

        // resolve the scroll position against the window
        let max = state.total_lines.saturating_sub(state.window_lines);
        let scroll_offset = match state.scroll {
            Scroll::Top => 0,
            Scroll::MaybeTop(offset) => {
                if offset > 0 {
                    state.scroll = Scroll::Offset(offset.min(max));
                    offset.min(max)
                } else {
                    state.scroll = Scroll::Top;
                    0
                }
            }
            Scroll::Offset(offset) => offset.min(max),
            Scroll::MaybeBottom(offset) => {
                if offset < max {
                    state.scroll = Scroll::Offset(offset);
                    offset
                } else {
                    state.scroll = Scroll::Bottom;
                    max
                }
            }
            Scroll::Bottom => max,
        };

        let items = state
            .cached_lines
            .iter()
            .skip(scroll_offset)
            .take(state.window_lines)
            .cloned()
            .collect::<Vec<_>>();

        let mut paragraph = Paragraph::new(items)
            .alignment(Alignment::Left)
            .style(self.style);
        if let Some(block) = self.block {
            paragraph = paragraph.block(block);
        }
        Widget::render(paragraph, area, buf);

        // Render scrollbar if needed
        if state.total_lines > state.window_lines {
            let mut scrollbar_state = ScrollbarState::new(max)
                .position(scroll_offset)
                .viewport_content_length(state.window_lines);
            let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
                .begin_symbol(Some("↑"))
                .track_symbol(Some("│"))
                .thumb_symbol("█")
                .end_symbol(Some("↓"));
            StatefulWidget::render(scrollbar, inner, buf, &mut scrollbar_state);
        }
    }
}
