//! Rich-text editing surface: selection, format toggles, history, markup.
//!
//! [`RichEditor`] owns one [`SpannedText`] and drives the span engines from a
//! selection, the way a toolbar would. Every change to the content runs
//! through the history capture hooks, but only a change to the plain text
//! commits a snapshot. Snapshots carry the formatting present at that point,
//! so a formatting change is undone together with the next text edit.
//!
//! # Examples
//!
//! ```
//! use quillspan::{EditorConfig, Formats, RichEditor};
//!
//! let mut editor = RichEditor::new(EditorConfig::default()).unwrap();
//! editor.insert("Hello world");
//! editor.set_selection(0, 5);
//! editor.bold(true);
//! assert!(editor.contains(Formats::BOLD));
//!
//! assert_eq!(editor.to_markup(), "<b>Hello</b> world");
//!
//! // Formatting alone records no snapshot; undo reverts the insert.
//! editor.undo();
//! assert_eq!(editor.text(), "");
//! ```

use crate::color::Rgba;
use crate::config::EditorConfig;
use crate::error::Result;
use crate::history::History;
use crate::image::{
    Bitmap, ImageRequest, ImageResolver, ImageSource, InlineImage, NoImages, OBJECT_REPLACEMENT,
};
use crate::markup::{HtmlCodec, MarkupCodec, normalize};
use crate::style::{
    Alignment, Emphasis, Format, Formats, HeadingLevel, Link, Payload, StyleKind,
};
use crate::text::{SpannedText, StyleTarget};
use std::ops::Range;
use unicode_segmentation::UnicodeSegmentation;

/// Characters inspected before the cursor when looking for a grapheme boundary.
const GRAPHEME_WINDOW: usize = 64;

/// Query flags answered by the toggle engine.
const INLINE_QUERIES: [(Formats, StyleTarget); 8] = [
    (Formats::BOLD, StyleTarget::Emphasis(Emphasis::Bold)),
    (Formats::ITALIC, StyleTarget::Emphasis(Emphasis::Italic)),
    (Formats::UNDERLINE, StyleTarget::Kind(StyleKind::Underline)),
    (Formats::STRIKETHROUGH, StyleTarget::Kind(StyleKind::Strikethrough)),
    (Formats::LINK, StyleTarget::Kind(StyleKind::Link)),
    (Formats::TEXT_COLOR, StyleTarget::Kind(StyleKind::ForegroundColor)),
    (Formats::HEADING, StyleTarget::Kind(StyleKind::HeadingSize)),
    (Formats::ALIGN, StyleTarget::Kind(StyleKind::Alignment)),
];

/// Query flags answered by the block engine.
const BLOCK_QUERIES: [(Formats, StyleKind); 2] = [
    (Formats::BULLET, StyleKind::Bullet),
    (Formats::QUOTE, StyleKind::Quote),
];

/// Styled text with a selection, undo history and a markup codec.
#[derive(Debug)]
pub struct RichEditor<C = HtmlCodec> {
    content: SpannedText,
    selection: Range<usize>,
    config: EditorConfig,
    history: History<SpannedText>,
    codec: C,
    image_generation: u64,
    pending_image: Option<u64>,
}

impl RichEditor<HtmlCodec> {
    /// Create an editor using the built-in HTML codec.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidHistorySize`](crate::Error::InvalidHistorySize)
    /// when history is enabled with a size of zero.
    pub fn new(config: EditorConfig) -> Result<Self> {
        Self::with_codec(config, HtmlCodec::new())
    }
}

impl<C: MarkupCodec> RichEditor<C> {
    /// Create an editor using a custom markup codec.
    ///
    /// # Errors
    ///
    /// Fails like [`RichEditor::new`] on an invalid configuration.
    pub fn with_codec(config: EditorConfig, codec: C) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            content: SpannedText::new(),
            selection: 0..0,
            config,
            history: History::new(config.history_enabled, config.history_size),
            codec,
            image_generation: 0,
            pending_image: None,
        })
    }

    #[must_use]
    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    #[must_use]
    pub fn content(&self) -> &SpannedText {
        &self.content
    }

    /// Plain text of the content.
    #[must_use]
    pub fn text(&self) -> String {
        self.content.text()
    }

    #[must_use]
    pub fn history(&self) -> &History<SpannedText> {
        &self.history
    }

    // ------------------------------------------------------------------
    // Selection
    // ------------------------------------------------------------------

    /// Current selection. Empty when it is a plain cursor.
    #[must_use]
    pub fn selection(&self) -> Range<usize> {
        self.selection.clone()
    }

    /// Select `[start, end)`. Bounds are reordered and clamped to the text.
    pub fn set_selection(&mut self, start: usize, end: usize) {
        let len = self.content.len_chars();
        let (start, end) = (start.min(end).min(len), start.max(end).min(len));
        self.selection = start..end;
    }

    /// Place a cursor at `offset`.
    pub fn set_cursor(&mut self, offset: usize) {
        self.set_selection(offset, offset);
    }

    /// Select the whole text.
    pub fn select_all(&mut self) {
        self.selection = 0..self.content.len_chars();
    }

    // ------------------------------------------------------------------
    // Text editing
    // ------------------------------------------------------------------

    /// Replace the selection with `text`, leaving the cursor after it.
    pub fn insert(&mut self, text: &str) {
        let selection = self.selection();
        let inserted = text.chars().count();
        if selection.is_empty() && inserted == 0 {
            return;
        }
        self.mutate(|content| content.replace_range(selection.clone(), text));
        self.set_cursor(selection.start + inserted);
    }

    /// Delete the selection, or the grapheme cluster before the cursor.
    pub fn delete_backward(&mut self) {
        let selection = self.selection();
        if !selection.is_empty() {
            self.delete_range(selection.start, selection.end);
            return;
        }

        let cursor = selection.start;
        if cursor == 0 {
            return;
        }
        let window = self
            .content
            .slice(cursor.saturating_sub(GRAPHEME_WINDOW)..cursor);
        let width = window
            .graphemes(true)
            .next_back()
            .map_or(1, |g| g.chars().count());
        self.delete_range(cursor - width, cursor);
    }

    /// Delete `[start, end)`, leaving the cursor at `start`.
    pub fn delete_range(&mut self, start: usize, end: usize) {
        let len = self.content.len_chars();
        let (start, end) = (start.min(end).min(len), start.max(end).min(len));
        if start == end {
            return;
        }
        self.mutate(|content| content.delete(start..end));
        self.set_cursor(start);
    }

    /// Replace the whole content, moving the cursor to the end.
    pub fn set_content(&mut self, content: SpannedText) {
        self.mutate(|current| *current = content);
        self.cursor_to_end();
    }

    // ------------------------------------------------------------------
    // Inline formats
    // ------------------------------------------------------------------

    pub fn bold(&mut self, enabled: bool) {
        self.emphasis(Emphasis::Bold, enabled);
    }

    pub fn italic(&mut self, enabled: bool) {
        self.emphasis(Emphasis::Italic, enabled);
    }

    /// Apply or remove one emphasis value. Other values are left alone.
    pub fn emphasis(&mut self, emphasis: Emphasis, enabled: bool) {
        self.toggle_inline(Payload::Emphasis(emphasis), enabled);
    }

    pub fn underline(&mut self, enabled: bool) {
        self.toggle_inline(Payload::Underline, enabled);
    }

    pub fn strikethrough(&mut self, enabled: bool) {
        self.toggle_inline(Payload::Strikethrough, enabled);
    }

    /// Color the selection, or strip every color from it.
    pub fn text_color(&mut self, color: Rgba, enabled: bool) {
        self.toggle_inline(Payload::Color(color), enabled);
    }

    /// Like [`text_color`](Self::text_color), with a `#hex` or named color.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidColor`](crate::Error::InvalidColor) when
    /// `color` cannot be parsed; the content is left unchanged.
    pub fn text_color_str(&mut self, color: &str, enabled: bool) -> Result<()> {
        let color: Rgba = color.parse()?;
        self.text_color(color, enabled);
        Ok(())
    }

    /// Apply a heading size, or strip every heading size.
    pub fn heading(&mut self, level: HeadingLevel, enabled: bool) {
        self.toggle_inline(Payload::Heading(level), enabled);
    }

    /// Apply an alignment, or strip every alignment.
    pub fn align(&mut self, alignment: Alignment, enabled: bool) {
        self.toggle_inline(Payload::Alignment(alignment), enabled);
    }

    fn toggle_inline(&mut self, payload: Payload, enabled: bool) {
        let range = self.selection();
        if range.is_empty() {
            return;
        }
        self.mutate(|content| {
            if enabled {
                content.apply_style(payload, range);
            } else {
                content.remove_style(StyleTarget::for_payload(&payload), range);
            }
        });
    }

    // ------------------------------------------------------------------
    // Links
    // ------------------------------------------------------------------

    /// Link the selection to `url`. `None` or a blank URL removes links.
    pub fn link(&mut self, url: Option<&str>) {
        self.link_range(url, self.selection());
    }

    /// Link an explicit range, independent of the selection.
    ///
    /// Any link already intersecting the range is removed first, whole.
    pub fn link_range(&mut self, url: Option<&str>, range: Range<usize>) {
        if range.start >= range.end {
            return;
        }
        let url = url.map(str::trim).filter(|url| !url.is_empty());
        let style = self.config.link;
        self.mutate(|content| {
            content.remove_style(StyleKind::Link.into(), range.clone());
            if let Some(url) = url {
                content.apply_style(Payload::Link(Link::new(url, style)), range);
            }
        });
    }

    // ------------------------------------------------------------------
    // Block formats
    // ------------------------------------------------------------------

    /// Bullet or un-bullet every line the selection covers.
    pub fn bullet(&mut self, enabled: bool) {
        self.toggle_block(Payload::Bullet(self.config.bullet), enabled);
    }

    /// Quote or un-quote every line the selection covers.
    pub fn quote(&mut self, enabled: bool) {
        self.toggle_block(Payload::Quote(self.config.quote), enabled);
    }

    fn toggle_block(&mut self, payload: Payload, enabled: bool) {
        let selection = self.selection();
        self.mutate(|content| {
            if enabled {
                content.apply_block(payload, selection);
            } else {
                content.remove_block(payload.kind(), selection);
            }
        });
    }

    /// Apply or remove any format.
    pub fn set_format(&mut self, format: Format, enabled: bool) {
        match format {
            Format::Emphasis(e) => self.emphasis(e, enabled),
            Format::Underline => self.underline(enabled),
            Format::Strikethrough => self.strikethrough(enabled),
            Format::Color(color) => self.text_color(color, enabled),
            Format::Heading(level) => self.heading(level, enabled),
            Format::Alignment(alignment) => self.align(alignment, enabled),
            Format::Link(url) => self.link(enabled.then_some(url.as_str())),
            Format::Bullet => self.bullet(enabled),
            Format::Quote => self.quote(enabled),
        }
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    /// Check whether every format in `formats` holds on the selection.
    #[must_use]
    pub fn contains(&self, formats: Formats) -> bool {
        !formats.is_empty() && formats.iter().all(|flag| self.holds(flag))
    }

    /// Every format that holds on the selection.
    #[must_use]
    pub fn active_formats(&self) -> Formats {
        Formats::all()
            .iter()
            .filter(|&flag| self.holds(flag))
            .collect()
    }

    fn holds(&self, flag: Formats) -> bool {
        let range = self.selection();
        if let Some(&(_, target)) = INLINE_QUERIES.iter().find(|(f, _)| *f == flag) {
            return self.content.contains_style(target, range);
        }
        BLOCK_QUERIES
            .iter()
            .find(|(f, _)| *f == flag)
            .is_some_and(|&(_, kind)| self.content.contains_block(kind, range))
    }

    /// Drop every span, keeping the text, and move the cursor to the end.
    pub fn clear_formats(&mut self) {
        self.mutate(SpannedText::clear_spans);
        self.cursor_to_end();
    }

    // ------------------------------------------------------------------
    // Images
    // ------------------------------------------------------------------

    /// Insert an image placeholder and a line break at the selection start.
    pub fn insert_image(&mut self, source: ImageSource, bitmap: Option<Bitmap>) {
        let at = self.selection.start;
        let mut piece = SpannedText::with_text(&format!("{OBJECT_REPLACEMENT}\n"));
        piece.add_span(0..1, Payload::Image(InlineImage::new(source, bitmap)));

        self.mutate(|content| content.insert_spanned(at, &piece));
        let len = piece.len_chars();
        self.set_selection(self.selection.start + len, self.selection.end + len);
    }

    /// Start an asynchronous image load, superseding any earlier request.
    ///
    /// The host loads and scales the image, then hands the bitmap to
    /// [`complete_image`](Self::complete_image) together with the ticket.
    pub fn request_image(&mut self, source: ImageSource, max_width: u32) -> ImageRequest {
        self.image_generation += 1;
        if let Some(previous) = self.pending_image.replace(self.image_generation) {
            tracing::debug!(previous, current = self.image_generation, "image request superseded");
        }
        ImageRequest {
            id: self.image_generation,
            source,
            max_width,
        }
    }

    /// Finish a load started by [`request_image`](Self::request_image).
    ///
    /// Returns `false`, inserting nothing, when the request was superseded or
    /// cancelled.
    pub fn complete_image(&mut self, request: ImageRequest, bitmap: Bitmap) -> bool {
        if self.pending_image != Some(request.id) {
            tracing::debug!(id = request.id, "dropping stale image result");
            return false;
        }
        self.pending_image = None;
        self.insert_image(request.source, Some(bitmap));
        true
    }

    /// Forget the pending image request, if any.
    pub fn cancel_image(&mut self) {
        if let Some(id) = self.pending_image.take() {
            tracing::debug!(id, "image request cancelled");
        }
    }

    // ------------------------------------------------------------------
    // History
    // ------------------------------------------------------------------

    /// Undo the last change. Returns `false` when there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        let undone = self.history.undo(&mut self.content);
        if undone {
            self.cursor_to_end();
        }
        undone
    }

    /// Redo the last undone change. Returns `false` when there is nothing to redo.
    pub fn redo(&mut self) -> bool {
        let redone = self.history.redo(&mut self.content);
        if redone {
            self.cursor_to_end();
        }
        redone
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    // ------------------------------------------------------------------
    // Markup
    // ------------------------------------------------------------------

    /// Replace the content with parsed markup. Images get no bitmap.
    pub fn from_markup(&mut self, source: &str) {
        self.from_markup_with(source, &mut NoImages);
    }

    /// Replace the content with parsed markup, resolving images through `images`.
    pub fn from_markup_with(&mut self, source: &str, images: &mut dyn ImageResolver) {
        let mut parsed = self.codec.parse(source, images);
        normalize(&mut parsed, &self.config);
        self.set_content(parsed);
    }

    /// Serialize the content.
    #[must_use]
    pub fn to_markup(&self) -> String {
        self.codec.serialize(&self.content)
    }

    fn mutate<R>(&mut self, f: impl FnOnce(&mut SpannedText) -> R) -> R {
        self.history.before_change(&self.content);
        let result = f(&mut self.content);
        self.history
            .after_change_by(&self.content, |before, after| before.rope() == after.rope());
        self.clamp_selection();
        result
    }

    fn clamp_selection(&mut self) {
        let Range { start, end } = self.selection;
        self.set_selection(start, end);
    }

    fn cursor_to_end(&mut self) {
        self.set_cursor(self.content.len_chars());
    }
}
