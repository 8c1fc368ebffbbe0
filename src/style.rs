//! Style kinds and span payloads.
//!
//! This module provides the vocabulary shared by the span engines:
//!
//! - [`StyleKind`]: The category of a span (emphasis, link, quote, ...)
//! - [`Payload`]: Kind-specific data carried by a span
//! - [`Format`]: A toggle request from the editing API
//! - [`Formats`]: Bitflags answering "which formats hold on the selection"
//!
//! # Examples
//!
//! ```
//! use quillspan::{Emphasis, Format, Formats, Payload, StyleKind};
//!
//! let payload = Payload::Emphasis(Emphasis::Bold);
//! assert_eq!(payload.kind(), StyleKind::Emphasis);
//! assert_eq!(Format::Emphasis(Emphasis::Bold).flag(), Formats::BOLD);
//! ```

use crate::color::Rgba;
use crate::image::InlineImage;
use bitflags::bitflags;
use serde::{Deserialize, Serialize};

/// Category of a span.
///
/// Bold and italic share [`StyleKind::Emphasis`]; the [`Emphasis`] payload
/// tells them apart.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StyleKind {
    Emphasis,
    Underline,
    Strikethrough,
    ForegroundColor,
    HeadingSize,
    Alignment,
    Link,
    Bullet,
    Quote,
    Image,
}

impl StyleKind {
    /// Kinds handled by the line-oriented block engine.
    #[must_use]
    pub const fn is_block(self) -> bool {
        matches!(self, Self::Bullet | Self::Quote)
    }

    /// Whether removing part of a span re-applies the untouched remainders.
    ///
    /// Links are destroyed outright instead.
    #[must_use]
    pub const fn preserves_remainder(self) -> bool {
        !matches!(self, Self::Link)
    }
}

/// Font emphasis. One kind, four mutually distinct values.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Emphasis {
    #[default]
    Normal,
    Bold,
    Italic,
    BoldItalic,
}

impl Emphasis {
    #[must_use]
    pub const fn is_bold(self) -> bool {
        matches!(self, Self::Bold | Self::BoldItalic)
    }

    #[must_use]
    pub const fn is_italic(self) -> bool {
        matches!(self, Self::Italic | Self::BoldItalic)
    }
}

/// Heading level, realized as a relative font size.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HeadingLevel {
    H1,
    H2,
    H3,
    H4,
    H5,
    H6,
}

impl HeadingLevel {
    pub const ALL: [Self; 6] = [Self::H1, Self::H2, Self::H3, Self::H4, Self::H5, Self::H6];

    /// Relative size multiplier applied to the base font.
    #[must_use]
    pub const fn scale(self) -> f32 {
        match self {
            Self::H1 => 1.5,
            Self::H2 => 1.4,
            Self::H3 => 1.3,
            Self::H4 => 1.2,
            Self::H5 => 1.1,
            Self::H6 => 1.0,
        }
    }

    /// Level whose scale is closest to `scale`.
    #[must_use]
    pub fn from_scale(scale: f32) -> Self {
        Self::ALL
            .into_iter()
            .min_by(|a, b| {
                (a.scale() - scale)
                    .abs()
                    .total_cmp(&(b.scale() - scale).abs())
            })
            .unwrap_or(Self::H6)
    }

    /// 1-based level number (`H1` is 1).
    #[must_use]
    pub const fn number(self) -> u8 {
        match self {
            Self::H1 => 1,
            Self::H2 => 2,
            Self::H3 => 3,
            Self::H4 => 4,
            Self::H5 => 5,
            Self::H6 => 6,
        }
    }

    #[must_use]
    pub const fn from_number(n: u8) -> Option<Self> {
        match n {
            1 => Some(Self::H1),
            2 => Some(Self::H2),
            3 => Some(Self::H3),
            4 => Some(Self::H4),
            5 => Some(Self::H5),
            6 => Some(Self::H6),
            _ => None,
        }
    }
}

/// Paragraph alignment.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Alignment {
    #[default]
    Normal,
    Center,
    Opposite,
}

/// How links are drawn. Set once per editor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkStyle {
    pub color: Rgba,
    pub underline: bool,
}

impl Default for LinkStyle {
    fn default() -> Self {
        Self {
            color: Rgba::TRANSPARENT,
            underline: true,
        }
    }
}

/// Link target plus its presentation.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Link {
    pub url: String,
    pub style: LinkStyle,
}

impl Link {
    #[must_use]
    pub fn new(url: impl Into<String>, style: LinkStyle) -> Self {
        Self {
            url: url.into(),
            style,
        }
    }
}

/// Bullet decoration parameters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct BulletStyle {
    pub color: Rgba,
    pub radius: u32,
    pub gap_width: u32,
}

/// Quote stripe decoration parameters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct QuoteStyle {
    pub color: Rgba,
    pub stripe_width: u32,
    pub gap_width: u32,
}

/// Kind-specific data carried by a span.
#[derive(Clone, Debug, PartialEq)]
pub enum Payload {
    Emphasis(Emphasis),
    Underline,
    Strikethrough,
    Color(Rgba),
    Heading(HeadingLevel),
    Alignment(Alignment),
    Link(Link),
    Bullet(BulletStyle),
    Quote(QuoteStyle),
    Image(InlineImage),
}

impl Payload {
    /// Kind this payload belongs to.
    #[must_use]
    pub const fn kind(&self) -> StyleKind {
        match self {
            Self::Emphasis(_) => StyleKind::Emphasis,
            Self::Underline => StyleKind::Underline,
            Self::Strikethrough => StyleKind::Strikethrough,
            Self::Color(_) => StyleKind::ForegroundColor,
            Self::Heading(_) => StyleKind::HeadingSize,
            Self::Alignment(_) => StyleKind::Alignment,
            Self::Link(_) => StyleKind::Link,
            Self::Bullet(_) => StyleKind::Bullet,
            Self::Quote(_) => StyleKind::Quote,
            Self::Image(_) => StyleKind::Image,
        }
    }

    #[must_use]
    pub const fn emphasis(&self) -> Option<Emphasis> {
        match self {
            Self::Emphasis(e) => Some(*e),
            _ => None,
        }
    }

    #[must_use]
    pub fn link(&self) -> Option<&Link> {
        match self {
            Self::Link(link) => Some(link),
            _ => None,
        }
    }
}

bitflags! {
    /// Formats that can be queried on a selection.
    #[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
    pub struct Formats: u16 {
        const BOLD          = 1 << 0;
        const ITALIC        = 1 << 1;
        const UNDERLINE     = 1 << 2;
        const STRIKETHROUGH = 1 << 3;
        const BULLET        = 1 << 4;
        const QUOTE         = 1 << 5;
        const LINK          = 1 << 6;
        const TEXT_COLOR    = 1 << 7;
        const HEADING       = 1 << 8;
        const ALIGN         = 1 << 9;
    }
}

/// A formatting request from the toggle API.
#[derive(Clone, Debug, PartialEq)]
pub enum Format {
    Emphasis(Emphasis),
    Underline,
    Strikethrough,
    Color(Rgba),
    Heading(HeadingLevel),
    Alignment(Alignment),
    Link(String),
    Bullet,
    Quote,
}

impl Format {
    /// Query flag that reports this format.
    ///
    /// `Normal` and `BoldItalic` emphasis have no flag of their own.
    #[must_use]
    pub fn flag(&self) -> Formats {
        match self {
            Self::Emphasis(Emphasis::Bold) => Formats::BOLD,
            Self::Emphasis(Emphasis::Italic) => Formats::ITALIC,
            Self::Emphasis(_) => Formats::empty(),
            Self::Underline => Formats::UNDERLINE,
            Self::Strikethrough => Formats::STRIKETHROUGH,
            Self::Color(_) => Formats::TEXT_COLOR,
            Self::Heading(_) => Formats::HEADING,
            Self::Alignment(_) => Formats::ALIGN,
            Self::Link(_) => Formats::LINK,
            Self::Bullet => Formats::BULLET,
            Self::Quote => Formats::QUOTE,
        }
    }
}
