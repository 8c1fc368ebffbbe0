//! HTML-like markup codec.
//!
//! Supported elements:
//!
//! | Markup | Span |
//! |---|---|
//! | `<b>`, `<strong>` | bold emphasis |
//! | `<i>`, `<em>` | italic emphasis |
//! | `<u>` | underline |
//! | `<del>`, `<s>`, `<strike>` | strikethrough |
//! | `<font color="...">` | foreground color |
//! | `<h1>` .. `<h6>` | heading size (inline) |
//! | `<div align="left\|center\|right">` | alignment |
//! | `<a href="...">` | link |
//! | `<ul><li>` | bullet line |
//! | `<blockquote>` | quote line |
//! | `<br>` | line break |
//! | `<img src="...">` | inline image |
//!
//! Unknown elements are skipped but their content is kept. Raw line breaks
//! in the source are formatting whitespace and dropped; only `<br>` and the
//! end of a block element produce `\n`.
//!
//! A closed block element implies the line break after it. The break is only
//! written once more content follows, so a document ending in a block line
//! has no trailing `\n`. Parsed block spans include their break; the
//! normalizer trims it.

use super::MarkupCodec;
use crate::color::Rgba;
use crate::image::{ImageResolver, ImageSource, InlineImage, OBJECT_REPLACEMENT};
use crate::style::{
    Alignment, BulletStyle, Emphasis, HeadingLevel, Link, LinkStyle, Payload, QuoteStyle,
    StyleKind,
};
use crate::text::{Span, SpannedText};
use std::iter::Peekable;
use std::ops::Range;
use std::str::Chars;

/// Default [`MarkupCodec`] for the HTML subset listed above.
#[derive(Clone, Copy, Debug, Default)]
pub struct HtmlCodec;

impl HtmlCodec {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl MarkupCodec for HtmlCodec {
    fn parse(&self, source: &str, images: &mut dyn ImageResolver) -> SpannedText {
        HtmlParser::parse(source, images)
    }

    fn serialize(&self, text: &SpannedText) -> String {
        HtmlWriter::new(text).write()
    }
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

/// An element that has been opened but not closed yet.
#[derive(Debug)]
struct OpenElement {
    name: String,
    start: usize,
    payload: Option<Payload>,
}

struct HtmlParser<'r> {
    text: String,
    len: usize,
    spans: Vec<Span>,
    open: Vec<OpenElement>,
    /// Block elements closed since the last content, waiting for their break.
    pending_blocks: Vec<(usize, Payload)>,
    images: &'r mut dyn ImageResolver,
}

impl<'r> HtmlParser<'r> {
    fn new(images: &'r mut dyn ImageResolver) -> Self {
        Self {
            text: String::new(),
            len: 0,
            spans: Vec::new(),
            open: Vec::new(),
            pending_blocks: Vec::new(),
            images,
        }
    }

    fn parse(html: &str, images: &'r mut dyn ImageResolver) -> SpannedText {
        let mut parser = HtmlParser::new(images);
        let mut chars = html.chars().peekable();

        while let Some(c) = chars.next() {
            match c {
                '<' => {
                    let mut tag_content = String::new();
                    while let Some(tc) = chars.next_if(|&tc| tc != '>') {
                        tag_content.push(tc);
                    }
                    chars.next(); // '>'
                    parser.handle_tag(&tag_content);
                }
                '&' => {
                    let decoded = read_entity(&mut chars);
                    for ch in decoded.chars() {
                        parser.push_char(ch);
                    }
                }
                '\n' | '\r' => {}
                _ => parser.push_char(c),
            }
        }

        parser.finish()
    }

    fn push_char(&mut self, c: char) {
        self.flush_pending();
        self.text.push(c);
        self.len += 1;
    }

    /// Write the break owed by closed block elements and close their spans.
    fn flush_pending(&mut self) {
        if self.pending_blocks.is_empty() {
            return;
        }
        self.text.push('\n');
        self.len += 1;
        for (start, payload) in self.pending_blocks.drain(..) {
            self.spans.push(Span::new(start..self.len, payload));
        }
    }

    fn close_element(&mut self, element: OpenElement) {
        let Some(payload) = element.payload else {
            return;
        };
        if payload.kind().is_block() {
            self.pending_blocks.push((element.start, payload));
        } else {
            self.spans.push(Span::new(element.start..self.len, payload));
        }
    }

    fn finish(mut self) -> SpannedText {
        while let Some(element) = self.open.pop() {
            self.close_element(element);
        }
        for (start, payload) in std::mem::take(&mut self.pending_blocks) {
            self.spans.push(Span::new(start..self.len, payload));
        }

        let mut text = SpannedText::with_text(&self.text);
        for span in self.spans {
            text.add_span(span.range, span.payload);
        }
        text
    }

    fn handle_tag(&mut self, tag_content: &str) {
        let tag_content = tag_content.trim();
        if tag_content.starts_with('!') || tag_content.starts_with('?') {
            return;
        }

        let is_self_closing = tag_content.ends_with('/');
        let tag_content = tag_content.trim_end_matches('/').trim();

        let is_closing = tag_content.starts_with('/');
        let tag_content = tag_content.trim_start_matches('/').trim();

        let (tag_name, attrs_str) = match tag_content.find(char::is_whitespace) {
            Some(idx) => (&tag_content[..idx], tag_content[idx..].trim()),
            None => (tag_content, ""),
        };
        let tag_name = tag_name.to_ascii_lowercase();
        if tag_name.is_empty() {
            return;
        }

        if is_closing {
            self.handle_closing_tag(&tag_name);
        } else {
            let attrs = parse_attributes(attrs_str);
            self.handle_opening_tag(tag_name, &attrs, is_self_closing);
        }
    }

    fn handle_opening_tag(&mut self, name: String, attrs: &[(String, String)], is_self_closing: bool) {
        match name.as_str() {
            "br" => {
                self.push_char('\n');
                return;
            }
            "img" => {
                if let Some(src) = attr(attrs, "src") {
                    self.push_image(src);
                }
                return;
            }
            _ => {}
        }

        self.flush_pending();
        if is_self_closing {
            return;
        }

        let payload = match name.as_str() {
            "b" | "strong" => Some(Payload::Emphasis(Emphasis::Bold)),
            "i" | "em" => Some(Payload::Emphasis(Emphasis::Italic)),
            "u" => Some(Payload::Underline),
            "s" | "del" | "strike" => Some(Payload::Strikethrough),
            "font" => attr(attrs, "color").and_then(Rgba::parse).map(Payload::Color),
            "div" => attr(attrs, "align").and_then(parse_alignment).map(Payload::Alignment),
            "a" => attr(attrs, "href")
                .map(|href| Payload::Link(Link::new(href, LinkStyle::default()))),
            "li" => Some(Payload::Bullet(BulletStyle::default())),
            "blockquote" => Some(Payload::Quote(QuoteStyle::default())),
            heading => heading_level(heading).map(Payload::Heading),
        };

        self.open.push(OpenElement {
            name,
            start: self.len,
            payload,
        });
    }

    fn handle_closing_tag(&mut self, name: &str) {
        // Closing an element also closes anything left open inside it.
        let Some(idx) = self.open.iter().rposition(|e| e.name == name) else {
            return;
        };
        let closed: Vec<_> = self.open.drain(idx..).rev().collect();
        for element in closed {
            self.close_element(element);
        }
    }

    fn push_image(&mut self, src: &str) {
        let bitmap = self.images.resolve(src);
        let start = self.len;
        self.push_char(OBJECT_REPLACEMENT);
        let image = InlineImage::new(ImageSource::from_locator(src), bitmap);
        self.spans.push(Span::new(start..self.len, Payload::Image(image)));
    }
}

fn attr<'a>(attrs: &'a [(String, String)], key: &str) -> Option<&'a str> {
    attrs
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
}

fn heading_level(tag_name: &str) -> Option<HeadingLevel> {
    let digit = tag_name.strip_prefix('h')?;
    HeadingLevel::from_number(digit.parse().ok()?)
}

fn parse_alignment(value: &str) -> Option<Alignment> {
    match value.trim().to_ascii_lowercase().as_str() {
        "left" | "start" | "normal" => Some(Alignment::Normal),
        "center" => Some(Alignment::Center),
        "right" | "end" | "opposite" => Some(Alignment::Opposite),
        _ => None,
    }
}

/// Read an entity body after `&` and decode it.
///
/// Anything that does not look like an entity is returned literally.
fn read_entity(chars: &mut Peekable<Chars<'_>>) -> String {
    let mut entity = String::new();
    loop {
        match chars.peek() {
            Some(';') => {
                chars.next();
                return decode_entity(&entity);
            }
            Some(&c) if c != '<' && c != '&' && !c.is_whitespace() && entity.len() <= 10 => {
                entity.push(c);
                chars.next();
            }
            _ => return format!("&{entity}"),
        }
    }
}

/// Decode common HTML entities.
fn decode_entity(entity: &str) -> String {
    let named = match entity {
        "lt" => Some('<'),
        "gt" => Some('>'),
        "amp" => Some('&'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        "nbsp" => Some('\u{00A0}'),
        _ => None,
    };
    if let Some(c) = named {
        return c.to_string();
    }

    let numeric = entity.strip_prefix('#').and_then(|num| {
        let code_point = match num.strip_prefix('x').or_else(|| num.strip_prefix('X')) {
            Some(hex) => u32::from_str_radix(hex, 16).ok()?,
            None => num.parse::<u32>().ok()?,
        };
        char::from_u32(code_point)
    });
    match numeric {
        Some(c) => c.to_string(),
        None => format!("&{entity};"),
    }
}

/// Parse attributes from a string, respecting quoted values.
fn parse_attributes(attrs_str: &str) -> Vec<(String, String)> {
    let mut result = Vec::new();
    let mut chars = attrs_str.chars().peekable();

    loop {
        while chars.next_if(|c| c.is_whitespace()).is_some() {}

        let mut key = String::new();
        while let Some(c) = chars.next_if(|&c| c != '=' && !c.is_whitespace()) {
            key.push(c);
        }
        if key.is_empty() {
            break;
        }

        while chars.next_if(|c| c.is_whitespace()).is_some() {}
        if chars.next_if_eq(&'=').is_none() {
            // Attribute without value
            continue;
        }
        while chars.next_if(|c| c.is_whitespace()).is_some() {}

        let mut value = String::new();
        if let Some(quote) = chars.next_if(|&c| c == '"' || c == '\'') {
            for c in chars.by_ref() {
                if c == quote {
                    break;
                }
                value.push(c);
            }
        } else {
            while let Some(c) = chars.next_if(|c| !c.is_whitespace()) {
                value.push(c);
            }
        }

        result.push((key.to_ascii_lowercase(), decode_text_entities(&value)));
    }

    result
}

fn decode_text_entities(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '&' {
            out.push_str(&read_entity(&mut chars));
        } else {
            out.push(c);
        }
    }
    out
}

// ---------------------------------------------------------------------------
// Serialization
// ---------------------------------------------------------------------------

/// Inline wrapper, in the order wrappers nest when opened together.
#[derive(Clone, Debug, PartialEq, Eq)]
enum InlineTag {
    Link(String),
    Color(Rgba),
    Heading(HeadingLevel),
    Align(Alignment),
    Bold,
    Italic,
    Underline,
    Strike,
}

impl InlineTag {
    fn open(&self, out: &mut String) {
        match self {
            Self::Link(url) => {
                out.push_str("<a href=\"");
                escape_into(out, url, true);
                out.push_str("\">");
            }
            Self::Color(color) => out.push_str(&format!("<font color=\"{}\">", color.to_hex())),
            Self::Heading(level) => out.push_str(&format!("<h{}>", level.number())),
            Self::Align(align) => {
                out.push_str(&format!("<div align=\"{}\">", alignment_name(*align)));
            }
            Self::Bold => out.push_str("<b>"),
            Self::Italic => out.push_str("<i>"),
            Self::Underline => out.push_str("<u>"),
            Self::Strike => out.push_str("<del>"),
        }
    }

    fn close(&self, out: &mut String) {
        match self {
            Self::Link(_) => out.push_str("</a>"),
            Self::Color(_) => out.push_str("</font>"),
            Self::Heading(level) => out.push_str(&format!("</h{}>", level.number())),
            Self::Align(_) => out.push_str("</div>"),
            Self::Bold => out.push_str("</b>"),
            Self::Italic => out.push_str("</i>"),
            Self::Underline => out.push_str("</u>"),
            Self::Strike => out.push_str("</del>"),
        }
    }
}

const fn alignment_name(align: Alignment) -> &'static str {
    match align {
        Alignment::Normal => "left",
        Alignment::Center => "center",
        Alignment::Opposite => "right",
    }
}

struct HtmlWriter<'a> {
    text: &'a SpannedText,
    out: String,
    open: Vec<InlineTag>,
    in_list: bool,
}

impl<'a> HtmlWriter<'a> {
    fn new(text: &'a SpannedText) -> Self {
        Self {
            text,
            out: String::new(),
            open: Vec::new(),
            in_list: false,
        }
    }

    fn write(mut self) -> String {
        let lines = self.text.line_intervals();
        let last = lines.len().saturating_sub(1);

        for (idx, line) in lines.iter().enumerate() {
            let bullet = self.line_has(StyleKind::Bullet, line.range());
            let quote = self.line_has(StyleKind::Quote, line.range());
            let block = bullet || quote;
            // Plain list lines share one <ul>; quoted ones get their own.
            let listed = bullet && !quote;

            if block {
                self.close_all();
            }
            if self.in_list && !listed {
                self.out.push_str("</ul>");
                self.in_list = false;
            }
            if listed && !self.in_list {
                self.out.push_str("<ul>");
                self.in_list = true;
            }
            if quote {
                self.out.push_str("<blockquote>");
                if bullet {
                    self.out.push_str("<ul>");
                }
            }
            if bullet {
                self.out.push_str("<li>");
            }

            for pos in line.range() {
                self.write_char(pos);
            }

            if block {
                self.close_all();
                if bullet {
                    self.out.push_str("</li>");
                }
                if quote {
                    if bullet {
                        self.out.push_str("</ul>");
                    }
                    self.out.push_str("</blockquote>");
                }
            } else if idx < last {
                // The break keeps the styles covering it.
                self.transition(line.end);
                self.out.push_str("<br>");
            }
        }

        self.close_all();
        if self.in_list {
            self.out.push_str("</ul>");
        }
        self.out
    }

    fn line_has(&self, kind: StyleKind, line: Range<usize>) -> bool {
        line.start < line.end && self.text.spans_in_range(line).any(|span| span.kind() == kind)
    }

    fn write_char(&mut self, pos: usize) {
        let text = self.text;
        let Some(c) = text.char_at(pos) else {
            return;
        };
        self.transition(pos);

        let image = text
            .spans_in_range(pos..pos + 1)
            .find_map(|span| match &span.payload {
                Payload::Image(image) => Some(image),
                _ => None,
            });
        match image {
            Some(image) if c == OBJECT_REPLACEMENT => {
                self.out.push_str("<img src=\"");
                escape_into(&mut self.out, &image.source.locator(), true);
                self.out.push_str("\">");
            }
            _ => {
                let mut buf = [0u8; 4];
                escape_into(&mut self.out, c.encode_utf8(&mut buf), false);
            }
        }
    }

    /// Close and open wrappers so exactly the styles at `pos` are open.
    fn transition(&mut self, pos: usize) {
        let wanted = self.tags_at(pos);
        let common = self
            .open
            .iter()
            .zip(&wanted)
            .take_while(|(a, b)| a == b)
            .count();

        while self.open.len() > common {
            if let Some(tag) = self.open.pop() {
                tag.close(&mut self.out);
            }
        }
        for tag in wanted.into_iter().skip(common) {
            tag.open(&mut self.out);
            self.open.push(tag);
        }
    }

    fn close_all(&mut self) {
        while let Some(tag) = self.open.pop() {
            tag.close(&mut self.out);
        }
    }

    /// Inline styles covering `pos`, in nesting order.
    ///
    /// Single-valued kinds take the most recently added span.
    fn tags_at(&self, pos: usize) -> Vec<InlineTag> {
        let mut link = None;
        let mut color = None;
        let mut heading = None;
        let mut align = None;
        let (mut bold, mut italic, mut underline, mut strike) = (false, false, false, false);

        for span in self.text.spans_in_range(pos..pos + 1) {
            match &span.payload {
                Payload::Link(l) => link = Some(l.url.clone()),
                Payload::Color(c) => color = Some(*c),
                Payload::Heading(h) => heading = Some(*h),
                Payload::Alignment(a) => align = Some(*a),
                Payload::Emphasis(e) => {
                    bold |= e.is_bold();
                    italic |= e.is_italic();
                }
                Payload::Underline => underline = true,
                Payload::Strikethrough => strike = true,
                Payload::Bullet(_) | Payload::Quote(_) | Payload::Image(_) => {}
            }
        }

        let mut tags = Vec::new();
        tags.extend(link.map(InlineTag::Link));
        tags.extend(color.map(InlineTag::Color));
        tags.extend(heading.map(InlineTag::Heading));
        tags.extend(align.map(InlineTag::Align));
        if bold {
            tags.push(InlineTag::Bold);
        }
        if italic {
            tags.push(InlineTag::Italic);
        }
        if underline {
            tags.push(InlineTag::Underline);
        }
        if strike {
            tags.push(InlineTag::Strike);
        }
        tags
    }
}

fn escape_into(out: &mut String, text: &str, attribute: bool) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' if attribute => out.push_str("&quot;"),
            // a raw carriage return is layout whitespace to the parser
            '\r' => out.push_str("&#13;"),
            _ => out.push(c),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::{Bitmap, NoImages};
    use crate::text::StyleTarget;

    fn parse(html: &str) -> SpannedText {
        HtmlCodec.parse(html, &mut NoImages)
    }

    fn ranges_of(text: &SpannedText, kind: StyleKind) -> Vec<std::ops::Range<usize>> {
        let mut out: Vec<_> = text.spans_of_kind(kind).map(|s| s.range.clone()).collect();
        out.sort_by_key(|r| r.start);
        out
    }

    #[test]
    fn test_plain_text() {
        let text = parse("Hello, world!");
        assert_eq!(text.text(), "Hello, world!");
        assert!(text.spans().is_empty());
    }

    #[test]
    fn test_bold_and_strong() {
        let text = parse("a<b>bc</b><strong>d</strong>");
        assert_eq!(text.text(), "abcd");
        assert!(text.contains_style(StyleTarget::Emphasis(Emphasis::Bold), 1..4));
    }

    #[test]
    fn test_nested_tags() {
        let text = parse("<b><i>x</i>y</b>");
        assert_eq!(ranges_of(&text, StyleKind::Emphasis).len(), 2);
        assert!(text.contains_style(StyleTarget::Emphasis(Emphasis::Italic), 0..1));
        assert!(!text.contains_style(StyleTarget::Emphasis(Emphasis::Italic), 0..2));
    }

    #[test]
    fn test_font_heading_alignment() {
        let text = parse(r#"<font color="red">r</font><h2>h</h2><div align="center">c</div>"#);
        assert_eq!(text.text(), "rhc");
        assert!(text.spans().contains(&Span::new(0..1, Payload::Color(Rgba::RED))));
        assert!(text.spans().contains(&Span::new(1..2, Payload::Heading(HeadingLevel::H2))));
        assert!(
            text.spans()
                .contains(&Span::new(2..3, Payload::Alignment(Alignment::Center)))
        );
    }

    #[test]
    fn test_link_href() {
        let text = parse(r#"go <a href="https://a.io/?x=1&amp;y=2">here</a>"#);
        let link = text.spans()[0].payload.link().cloned();
        assert_eq!(link.map(|l| l.url), Some("https://a.io/?x=1&y=2".to_string()));
        assert_eq!(text.spans()[0].range, 3..7);
    }

    #[test]
    fn test_list_items_include_break() {
        let text = parse("<ul><li>a</li><li>b</li></ul>tail");
        assert_eq!(text.text(), "a\nb\ntail");
        assert_eq!(ranges_of(&text, StyleKind::Bullet), vec![0..2, 2..4]);
    }

    #[test]
    fn test_trailing_block_has_no_break() {
        let text = parse("<blockquote>q</blockquote>");
        assert_eq!(text.text(), "q");
        assert_eq!(ranges_of(&text, StyleKind::Quote), vec![0..1]);
    }

    #[test]
    fn test_line_breaks_and_raw_newlines() {
        let text = parse("a<br>b<br/>\nc");
        assert_eq!(text.text(), "a\nb\nc");
    }

    #[test]
    fn test_entities() {
        let text = parse("&lt;tag&gt; &amp; &#65;&#x42; &bogus; & x");
        assert_eq!(text.text(), "<tag> & AB &bogus; & x");
    }

    #[test]
    fn test_unclosed_and_unknown_tags() {
        let text = parse("<p>para <b>bold");
        assert_eq!(text.text(), "para bold");
        assert_eq!(ranges_of(&text, StyleKind::Emphasis), vec![5..9]);

        let text = parse("x</b>y<!-- note -->");
        assert_eq!(text.text(), "xy");
        assert!(text.spans().is_empty());
    }

    #[test]
    fn test_case_insensitive_tags() {
        let text = parse("<B>x</B><EM>y</EM>");
        assert_eq!(ranges_of(&text, StyleKind::Emphasis), vec![0..1, 1..2]);
    }

    #[test]
    fn test_image_is_resolved() {
        let bitmap = Bitmap::new(7u8);
        let mut resolver = |src: &str| (src == "cat.png").then(|| bitmap.clone());
        let text = HtmlCodec.parse(r#"<img src="cat.png"><br>"#, &mut resolver);

        assert_eq!(text.text(), "\u{FFFC}\n");
        let Payload::Image(image) = &text.spans()[0].payload else {
            panic!("expected image span");
        };
        assert_eq!(image.source, ImageSource::from_locator("cat.png"));
        assert_eq!(image.bitmap.as_ref(), Some(&bitmap));
    }

    #[test]
    fn test_serialize_plain_and_escaped() {
        let text = SpannedText::with_text("a < b & c\nnext");
        assert_eq!(HtmlCodec.serialize(&text), "a &lt; b &amp; c<br>next");
    }

    #[test]
    fn test_carriage_return_survives_round_trip() {
        let text = SpannedText::with_text("a\r\nb").with_span(0..1, Payload::Emphasis(Emphasis::Bold));
        let html = HtmlCodec.serialize(&text);
        assert_eq!(html, "<b>a</b>&#13;<br>b");

        let reparsed = parse(&html);
        assert_eq!(reparsed.text(), "a\r\nb");
        assert_eq!(HtmlCodec.serialize(&reparsed), html);
    }

    #[test]
    fn test_serialize_canonical_nesting() {
        let text = SpannedText::with_text("abcd")
            .with_span(0..4, Payload::Emphasis(Emphasis::Bold))
            .with_span(1..3, Payload::Color(Rgba::RED));
        assert_eq!(
            HtmlCodec.serialize(&text),
            r##"<b>a</b><font color="#ff0000"><b>bc</b></font><b>d</b>"##
        );
    }

    #[test]
    fn test_serialize_bold_italic_payload() {
        let text = SpannedText::with_text("x").with_span(0..1, Payload::Emphasis(Emphasis::BoldItalic));
        assert_eq!(HtmlCodec.serialize(&text), "<b><i>x</i></b>");
    }

    #[test]
    fn test_serialize_style_spanning_break() {
        let text = SpannedText::with_text("a\nb").with_span(0..3, Payload::Underline);
        let html = HtmlCodec.serialize(&text);
        assert_eq!(html, "<u>a<br>b</u>");
        assert_eq!(parse(&html), text);
    }

    #[test]
    fn test_serialize_blocks() {
        let text = SpannedText::with_text("one\ntwo\nsaid\nend")
            .with_span(0..3, Payload::Bullet(BulletStyle::default()))
            .with_span(4..7, Payload::Bullet(BulletStyle::default()))
            .with_span(8..12, Payload::Quote(QuoteStyle::default()));
        assert_eq!(
            HtmlCodec.serialize(&text),
            "<ul><li>one</li><li>two</li></ul><blockquote>said</blockquote>end"
        );
    }

    #[test]
    fn test_serialize_quoted_bullet() {
        let text = SpannedText::with_text("x")
            .with_span(0..1, Payload::Bullet(BulletStyle::default()))
            .with_span(0..1, Payload::Quote(QuoteStyle::default()));
        let html = HtmlCodec.serialize(&text);
        assert_eq!(html, "<blockquote><ul><li>x</li></ul></blockquote>");

        let parsed = parse(&html);
        assert_eq!(parsed.text(), "x");
        assert_eq!(ranges_of(&parsed, StyleKind::Bullet), vec![0..1]);
        assert_eq!(ranges_of(&parsed, StyleKind::Quote), vec![0..1]);
    }

    #[test]
    fn test_serialize_image_and_link() {
        let text = SpannedText::with_text("\u{FFFC}\nlink")
            .with_span(
                0..1,
                Payload::Image(InlineImage::new(ImageSource::from_locator("/img/a.png"), None)),
            )
            .with_span(2..6, Payload::Link(Link::new("https://x.y/\"q\"", LinkStyle::default())));
        assert_eq!(
            HtmlCodec.serialize(&text),
            r#"<img src="/img/a.png"><br><a href="https://x.y/&quot;q&quot;">link</a>"#
        );
    }
}
