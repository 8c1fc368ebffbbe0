//! `quillspan` - Span-based rich-text formatting core
//!
//! Styled text is a plain character buffer plus a set of attribute spans.
//! On top of that model the crate provides inline style toggling with
//! remainder splitting, line-oriented block formats (bullets, quotes),
//! bounded snapshot undo/redo, and HTML-subset markup import/export.

// Crate-level lint configuration
#![allow(clippy::cast_possible_truncation)] // Intentional color channel casts
#![allow(clippy::module_name_repetitions)] // Allow style::StyleKind etc
#![allow(clippy::missing_const_for_fn)] // Many functions could be const, not critical
#![allow(clippy::doc_markdown)] // Allow technical names without backticks
#![allow(clippy::use_self)] // Allow explicit type names in impl blocks
#![allow(clippy::needless_pass_by_value)] // Payloads are passed by value into span sets
#![allow(clippy::collapsible_if)] // Sometimes nested ifs are clearer
#![allow(clippy::semicolon_if_nothing_returned)] // Style preference

pub mod color;
pub mod config;
pub mod editor;
pub mod error;
pub mod history;
pub mod image;
pub mod markup;
pub mod style;
pub mod text;

// Re-export core types at crate root
pub use color::Rgba;
pub use error::{Error, Result};
pub use style::{
    Alignment, BulletStyle, Emphasis, Format, Formats, HeadingLevel, Link, LinkStyle, Payload,
    QuoteStyle, StyleKind,
};
pub use text::{Interval, RopeWrapper, Span, SpannedText, StyleTarget};

// Re-export image types
pub use image::{
    Bitmap, ImageRequest, ImageResolver, ImageSource, InlineImage, NoImages, OBJECT_REPLACEMENT,
};

// Re-export editing surface
pub use config::EditorConfig;
pub use editor::RichEditor;
pub use history::{DEFAULT_HISTORY_SIZE, History, HistoryState};
pub use markup::{HtmlCodec, MarkupCodec};
