//! Document layout: turns a service record and its tax breakdown into pages of
//! positioned draw operations. Independent of any output format.

pub mod dashed;
pub mod document;
pub mod engine;
pub mod metrics;
pub mod wrap;

pub use document::{Document, DrawOp, Font, LineOp, Page, Point, TextOp};
pub use engine::{LayoutCursor, layout_receipt};
