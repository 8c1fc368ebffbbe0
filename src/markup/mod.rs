//! Markup import and export.
//!
//! A [`MarkupCodec`] turns external markup into a [`SpannedText`] and back.
//! Codecs produce generic block and link spans; [`normalize`] then rewrites
//! them into the editor's own shapes (one block span per line, configured
//! decoration and link presentation).
//!
//! # Examples
//!
//! ```
//! use quillspan::{EditorConfig, HtmlCodec, MarkupCodec, NoImages, StyleKind};
//! use quillspan::markup::normalize;
//!
//! let codec = HtmlCodec::new();
//! let mut text = codec.parse("<ul><li>one</li><li>two</li></ul>", &mut NoImages);
//! normalize(&mut text, &EditorConfig::default());
//!
//! assert_eq!(text.text(), "one\ntwo");
//! assert!(text.contains_block(StyleKind::Bullet, 0..7));
//! assert_eq!(codec.serialize(&text), "<ul><li>one</li><li>two</li></ul>");
//! ```

mod html;
mod normalize;

pub use html::HtmlCodec;
pub use normalize::normalize;

use crate::image::ImageResolver;
use crate::text::SpannedText;

/// Converts between a markup language and styled text.
pub trait MarkupCodec {
    /// Parse markup. Image references are handed to `images` for a bitmap.
    fn parse(&self, source: &str, images: &mut dyn ImageResolver) -> SpannedText;

    /// Emit markup equivalent to `text`.
    fn serialize(&self, text: &SpannedText) -> String;
}
