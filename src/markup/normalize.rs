//! Post-parse normalization of block and link spans.

use crate::config::EditorConfig;
use crate::style::{Link, Payload, StyleKind};
use crate::text::SpannedText;
use std::collections::BTreeSet;

/// Rewrite parser output into the editor's span shapes.
///
/// - Bullet and quote spans lose a covered terminating `\n`, are split into
///   one span per non-empty line they touch, and take the configured
///   decoration.
/// - Link spans keep their range and URL but take the configured link
///   presentation.
///
/// Every other span is left alone.
pub fn normalize(text: &mut SpannedText, config: &EditorConfig) {
    let bullets = retag_block(text, StyleKind::Bullet, &Payload::Bullet(config.bullet));
    let quotes = retag_block(text, StyleKind::Quote, &Payload::Quote(config.quote));

    let links = text.take_spans_where(|span| span.kind() == StyleKind::Link);
    let link_count = links.len();
    for span in links {
        if let Payload::Link(link) = span.payload {
            text.add_span(span.range, Payload::Link(Link::new(link.url, config.link)));
        }
    }

    tracing::debug!(bullets, quotes, links = link_count, "normalized markup spans");
}

/// Replace every span of `kind` with per-line spans carrying `payload`.
///
/// Returns the number of line spans written.
fn retag_block(text: &mut SpannedText, kind: StyleKind, payload: &Payload) -> usize {
    let parsed = text.take_spans_where(|span| span.kind() == kind);
    if parsed.is_empty() {
        return 0;
    }

    let lines = text.line_intervals();
    let mut styled = BTreeSet::new();
    for span in parsed {
        let start = span.start();
        let mut end = span.end();
        if end > start && text.char_at(end - 1) == Some('\n') {
            end -= 1;
        }
        let range = start..end;
        for (idx, line) in lines.iter().enumerate() {
            if line.is_valid() && line.start < range.end && range.start < line.end {
                styled.insert(idx);
            }
        }
    }

    for &idx in &styled {
        if let Some(line) = lines.get(idx) {
            text.add_span(line.range(), payload.clone());
        }
    }
    styled.len()
}
