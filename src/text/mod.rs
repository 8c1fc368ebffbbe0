//! Attributed text and the span engines that operate on it.
//!
//! Key types:
//!
//! - [`SpannedText`]: Rope-backed text owning a collection of typed spans
//! - [`Span`]: A payload over a character range
//! - [`Interval`]: A half-open range, optionally carrying a value
//! - [`StyleTarget`]: Which spans a toggle operation matches
//!
//! Inline styles are handled by the toggle engine (`apply_style`,
//! `remove_style`, `contains_style`); bullet and quote lines by the block
//! engine (`apply_block`, `remove_block`, `contains_block`). Both are
//! inherent methods on [`SpannedText`].
//!
//! # Examples
//!
//! ```
//! use quillspan::{Payload, QuoteStyle, SpannedText, StyleKind};
//!
//! let mut text = SpannedText::with_text("one\ntwo");
//! text.apply_block(Payload::Quote(QuoteStyle::default()), 0..7);
//!
//! assert!(text.contains_block(StyleKind::Quote, 0..7));
//! assert_eq!(text.spans().len(), 2);
//! ```

mod block;
mod buffer;
mod interval;
mod rope;
mod span;
mod toggle;

pub use buffer::SpannedText;
pub use interval::Interval;
pub use rope::RopeWrapper;
pub use span::Span;
pub use toggle::StyleTarget;
