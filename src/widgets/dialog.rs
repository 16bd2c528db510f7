//! Dialog widget for progress, warnings, and errors
//!
//! Self-contained widget implementing the Widget trait. Handles centering,
//! borders, and content rendering; the caller supplies title, content, and
//! an optional footer with the available key bindings.

use crate::styles;
use crate::utils::center_popup;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Widget, Wrap};

/// Dialog variant for different visual styles
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DialogVariant {
    #[default]
    Default,
    Warning,
    Error,
}

impl DialogVariant {
    fn border_style(self) -> Style {
        match self {
            DialogVariant::Default => Style::default().fg(Color::Cyan),
            DialogVariant::Warning => styles::warning_style(),
            DialogVariant::Error => styles::error_style(),
        }
    }
}

/// A centered modal dialog.
pub struct Dialog<'a> {
    title: &'a str,
    content: &'a str,
    variant: DialogVariant,
    /// Footer line listing the available choices, when present.
    footer: Option<&'a str>,
    min_width: u16,
    max_width: u16,
}

impl<'a> Dialog<'a> {
    pub fn new(title: &'a str, content: &'a str) -> Self {
        Self {
            title,
            content,
            variant: DialogVariant::Default,
            footer: None,
            min_width: 40,
            max_width: 70,
        }
    }

    pub fn variant(mut self, variant: DialogVariant) -> Self {
        self.variant = variant;
        self
    }

    pub fn footer(mut self, footer: &'a str) -> Self {
        self.footer = Some(footer);
        self
    }

    fn desired_size(&self, area: Rect) -> (u16, u16) {
        let longest_line = self
            .content
            .lines()
            .chain(self.footer.into_iter())
            .map(|l| l.chars().count() as u16)
            .max()
            .unwrap_or(0);
        let width = (longest_line + 4)
            .clamp(self.min_width, self.max_width)
            .min(area.width);

        let content_lines = self.content.lines().count() as u16;
        let footer_lines = if self.footer.is_some() { 2 } else { 0 };
        let height = (content_lines + footer_lines + 2).min(area.height);
        (width, height)
    }
}

impl Widget for Dialog<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let (width, height) = self.desired_size(area);
        let popup = center_popup(area, width, height);

        Clear.render(popup, buf);

        let block = Block::default()
            .title(format!(" {} ", self.title))
            .borders(Borders::ALL)
            .border_style(self.variant.border_style());
        let inner = block.inner(popup);
        block.render(popup, buf);

        let mut lines: Vec<Line> = self.content.lines().map(Line::from).collect();
        if let Some(footer) = self.footer {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(footer, styles::muted_style())));
        }

        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .render(inner, buf);
    }
}
