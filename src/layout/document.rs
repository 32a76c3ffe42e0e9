//! Laid-out pages as plain draw operations.
//!
//! Coordinates are millimetres with the origin at the top-left corner of the
//! page and `y` growing downwards. Text `y` is the baseline.

/// Built-in font faces used by the receipt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Font {
    Helvetica,
    HelveticaBold,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextOp {
    /// Left edge of the run after alignment has been resolved.
    pub x: f32,
    pub y: f32,
    pub text: String,
    pub font: Font,
    /// Points.
    pub size: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineOp {
    pub from: Point,
    pub to: Point,
    /// Millimetres.
    pub width: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Text(TextOp),
    Line(LineOp),
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Page {
    pub ops: Vec<DrawOp>,
}

impl Page {
    pub fn texts(&self) -> impl Iterator<Item = &TextOp> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text(text) => Some(text),
            DrawOp::Line(_) => None,
        })
    }

    pub fn lines(&self) -> impl Iterator<Item = &LineOp> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Line(line) => Some(line),
            DrawOp::Text(_) => None,
        })
    }
}

/// A paginated document, ready for a renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub title: String,
    pub width: f32,
    pub height: f32,
    pub pages: Vec<Page>,
}

impl Document {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// First text run starting with `prefix`, with its zero-based page index.
    pub fn find_text(&self, prefix: &str) -> Option<(usize, &TextOp)> {
        self.pages.iter().enumerate().find_map(|(index, page)| {
            page.texts()
                .find(|text| text.text.starts_with(prefix))
                .map(|text| (index, text))
        })
    }
}
