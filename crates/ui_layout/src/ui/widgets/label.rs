//! Label widget - text measured with a fixed-advance font
//!
//! Labels are the usual client of content sizing: unwrapped labels expose
//! their extent for the direct strategy, word-wrapped ones a fit test for
//! the bisection strategy.

use crate::ui::element::ElementBehaviour;
use crate::ui::error::UiError;
use crate::ui::geometry::{Rect, Size};
use crate::ui::units::UDim;

/// Text label
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    /// Text content to display
    pub text: String,

    /// Horizontal advance of every glyph in pixels
    pub glyph_advance: f32,

    /// Height of a line in pixels
    pub line_height: f32,

    /// Space between the element edge and the text
    pub padding: f32,

    /// Break lines at word boundaries to fit the width
    pub word_wrap: bool,
}

impl Default for Label {
    fn default() -> Self {
        Self {
            text: String::new(),
            glyph_advance: 8.0,
            line_height: 16.0,
            padding: 0.0,
            word_wrap: false,
        }
    }
}

impl Label {
    /// Label showing `text`
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    /// Set the padding
    pub fn with_padding(mut self, padding: f32) -> Self {
        self.padding = padding;
        self
    }

    /// Enable word wrapping
    pub fn wrapped(mut self) -> Self {
        self.word_wrap = true;
        self
    }

    /// Set the glyph metrics
    pub fn with_metrics(mut self, glyph_advance: f32, line_height: f32) -> Self {
        self.glyph_advance = glyph_advance;
        self.line_height = line_height;
        self
    }

    fn text_width(&self, text: &str) -> f32 {
        text.chars().count() as f32 * self.glyph_advance
    }

    /// Number of lines when wrapped to `width`, or `None` if a single word
    /// is wider than that
    pub fn wrapped_line_count(&self, width: f32) -> Option<usize> {
        let space = self.glyph_advance;
        let mut count = 0;

        for paragraph in self.text.lines() {
            let mut line_width: Option<f32> = None;
            count += 1;
            for word in paragraph.split_whitespace() {
                let word_width = self.text_width(word);
                if word_width > width {
                    return None;
                }
                line_width = match line_width {
                    Some(current) if current + space + word_width <= width => Some(current + space + word_width),
                    Some(_) => {
                        count += 1;
                        Some(word_width)
                    }
                    None => Some(word_width),
                };
            }
        }
        Some(count)
    }
}

impl ElementBehaviour for Label {
    fn inner_rect(&self, outer: Rect) -> Rect {
        let p = self.padding;
        outer.inset(p, p, p, p)
    }

    fn content_size(&self) -> Result<Size, UiError> {
        let width = self
            .text
            .lines()
            .map(|line| self.text_width(line))
            .fold(0.0, f32::max);
        let height = self.text.lines().count() as f32 * self.line_height;
        Ok(Size::new(width, height))
    }

    fn content_width_lower_bound(&self) -> Result<UDim, UiError> {
        Ok(UDim::new(1.0, -2.0 * self.padding))
    }

    fn content_height_lower_bound(&self) -> Result<UDim, UiError> {
        Ok(UDim::new(1.0, -2.0 * self.padding))
    }

    fn content_fits(&self, content_area: Size) -> Result<bool, UiError> {
        if !self.word_wrap {
            let size = self.content_size()?;
            return Ok(size.width <= content_area.width && size.height <= content_area.height);
        }
        Ok(self
            .wrapped_line_count(content_area.width)
            .is_some_and(|lines| lines as f32 * self.line_height <= content_area.height))
    }
}
