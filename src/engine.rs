//! Match-to-highlight mapping.
//!
//! A pass always starts with one clear-all span covering the whole text,
//! then emits, for each match in scan order, the match span followed by the
//! spans of its participating capture groups in ascending group order. When
//! the spans are applied in emitted order, group highlights land on top of
//! their enclosing match.
//!
//! Match colors are keyed by match ordinal and group colors by group index,
//! so group 1 of every match shares one color. Both pools outlive a pass.

use crate::color::{Color, ColorPool, Palette};
use crate::config::SessionConfig;
use crate::error::MatcherError;
use crate::matcher::{CompiledMatcher, Matches};
use crate::offsets::{OffsetMap, OffsetUnit};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpanKind {
    Clear,
    Match { ordinal: usize },
    Group { match_ordinal: usize, index: usize },
}

/// One highlight instruction. `color == None` means "clear formatting".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HighlightSpan {
    pub start: usize,
    pub end: usize,
    pub color: Option<Color>,
    pub kind: SpanKind,
}

impl HighlightSpan {
    pub fn clear(len: usize) -> Self {
        Self {
            start: 0,
            end: len,
            color: None,
            kind: SpanKind::Clear,
        }
    }

    pub fn is_clear(&self) -> bool {
        self.color.is_none()
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Result of one highlighting pass.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Highlights {
    spans: Vec<HighlightSpan>,
    match_count: usize,
    scan_error: Option<MatcherError>,
}

impl Highlights {
    pub fn spans(&self) -> &[HighlightSpan] {
        &self.spans
    }

    pub fn into_spans(self) -> Vec<HighlightSpan> {
        self.spans
    }

    pub fn match_count(&self) -> usize {
        self.match_count
    }

    /// Set when the scan stopped early; spans computed before that are kept.
    pub fn scan_error(&self) -> Option<&MatcherError> {
        self.scan_error.as_ref()
    }

    pub fn match_spans(&self) -> impl Iterator<Item = &HighlightSpan> {
        self.spans
            .iter()
            .filter(|span| matches!(span.kind, SpanKind::Match { .. }))
    }

    pub fn group_spans(&self, index: usize) -> impl Iterator<Item = &HighlightSpan> {
        self.spans.iter().filter(move |span| {
            matches!(span.kind, SpanKind::Group { index: group, .. } if group == index)
        })
    }
}

#[derive(Debug, Clone)]
pub struct HighlightEngine {
    text: String,
    offset_unit: OffsetUnit,
    palette: Palette,
    match_colors: ColorPool,
    group_colors: ColorPool,
}

impl Default for HighlightEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl HighlightEngine {
    pub fn new() -> Self {
        Self::with_config(&SessionConfig::default())
    }

    pub fn with_config(config: &SessionConfig) -> Self {
        Self {
            text: String::new(),
            offset_unit: config.offset_unit,
            palette: Palette::with_seed(config.color_seed),
            match_colors: ColorPool::default(),
            group_colors: ColorPool::default(),
        }
    }

    pub fn set_text(&mut self, text: &str) {
        if self.text != text {
            self.text.clear();
            self.text.push_str(text);
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn offset_unit(&self) -> OffsetUnit {
        self.offset_unit
    }

    /// Lazy scan of all non-overlapping matches of `matcher` in `text`.
    ///
    /// Empty when there is no matcher or the text is empty.
    pub fn find_matches<'r, 't>(
        matcher: Option<&'r CompiledMatcher>,
        text: &'t str,
    ) -> Matches<'r, 't> {
        match matcher {
            Some(matcher) if !text.is_empty() => matcher.captures_iter(text),
            _ => Matches::empty(),
        }
    }

    pub fn highlight_matches(&mut self, matcher: Option<&CompiledMatcher>) -> Highlights {
        let offsets = OffsetMap::new(&self.text, self.offset_unit);
        let mut spans = vec![HighlightSpan::clear(offsets.total())];
        let mut match_count = 0;
        let mut scan_error = None;

        let group_count = matcher.map_or(0, CompiledMatcher::group_count);
        for (ordinal, found) in Self::find_matches(matcher, &self.text).enumerate() {
            let captures = match found {
                Ok(captures) => captures,
                Err(err) => {
                    log::warn!("scan stopped after {ordinal} matches: {err}");
                    scan_error = Some(err);
                    break;
                }
            };
            match_count += 1;

            let color = self.match_colors.resolve(ordinal, &mut self.palette);
            spans.push(HighlightSpan {
                start: offsets.convert(captures.start()),
                end: offsets.convert(captures.end()),
                color: Some(color),
                kind: SpanKind::Match { ordinal },
            });

            for index in 1..=group_count {
                let Some(group) = captures.get(index) else {
                    continue;
                };
                let color = self.group_colors.resolve(index, &mut self.palette);
                spans.push(HighlightSpan {
                    start: offsets.convert(group.start()),
                    end: offsets.convert(group.end()),
                    color: Some(color),
                    kind: SpanKind::Group {
                        match_ordinal: ordinal,
                        index,
                    },
                });
            }
        }

        log::debug!(
            "highlight pass: {match_count} matches, {} spans",
            spans.len()
        );
        Highlights {
            spans,
            match_count,
            scan_error,
        }
    }

    pub fn match_color(&self, ordinal: usize) -> Option<Color> {
        self.match_colors.get(ordinal)
    }

    pub fn group_color(&self, index: usize) -> Option<Color> {
        self.group_colors.get(index)
    }

    /// Forgets every assigned color. The palette keeps advancing, so new
    /// assignments differ from the previous ones.
    pub fn reset_colors(&mut self) {
        self.match_colors.clear();
        self.group_colors.clear();
    }
}
