use common::{Highlight, HighlightType};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// Everything except single headshots and the match-wide headshot
    /// collection, those overlap with the other highlights.
    DefaultRecording,
    HeadshotMontage,
}

impl Selection {
    pub fn includes(&self, kind: HighlightType) -> bool {
        match self {
            Self::DefaultRecording => !matches!(
                kind,
                HighlightType::HeadshotCollection | HighlightType::Headshot
            ),
            Self::HeadshotMontage => kind == HighlightType::Headshot,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecordingSegment<'h> {
    pub index: usize,
    pub name: String,
    pub player_slot: i32,
    pub start_tick: i64,
    pub end_tick: i64,
    pub highlights: Vec<&'h Highlight>,
}

impl<'h> RecordingSegment<'h> {
    fn open(range: PaddedRange<'h>) -> Self {
        Self {
            index: 0,
            name: String::new(),
            player_slot: range.highlight.player_slot,
            start_tick: range.start,
            end_tick: range.end,
            highlights: vec![range.highlight],
        }
    }

    fn absorb(&mut self, range: PaddedRange<'h>) {
        self.end_tick = self.end_tick.max(range.end);
        if self.player_slot <= 0 && range.highlight.player_slot > 0 {
            self.player_slot = range.highlight.player_slot;
        }
        self.highlights.push(range.highlight);
    }

    fn build_name(&self) -> String {
        let first = match self.highlights.first() {
            Some(h) => h,
            None => return format!("hl_{:04}", self.index),
        };

        let mut token = sanitize_name_token(first.kind.as_str());
        if token.is_empty() {
            token = "highlight".to_owned();
        }
        if self.highlights.len() > 1 {
            token = format!("cluster_{}", token);
        }

        format!("hl_{:04}_r{}_{}", self.index, first.round, token)
    }
}

#[derive(Debug, Clone, Copy)]
struct PaddedRange<'h> {
    highlight: &'h Highlight,
    start: i64,
    end: i64,
}

/// Pads every selected highlight and merges overlapping ranges into
/// segments.
///
/// The returned segments are sorted by start tick and never overlap, every
/// segment ends strictly before the next one starts.
#[tracing::instrument(skip(highlights), fields(highlights = highlights.len()))]
pub fn resolve(
    highlights: &[Highlight],
    pre_roll: i64,
    post_roll: i64,
    selection: Selection,
) -> Vec<RecordingSegment<'_>> {
    let mut ranges: Vec<PaddedRange> = highlights
        .iter()
        .filter(|h| selection.includes(h.kind))
        .map(|highlight| {
            let start = highlight.segment_from.saturating_sub(pre_roll).max(0);
            let end = highlight.segment_to.saturating_add(post_roll).max(start);
            PaddedRange {
                highlight,
                start,
                end,
            }
        })
        .collect();
    ranges.sort_by_key(|r| (r.start, r.end));

    let mut segments: Vec<RecordingSegment> = Vec::with_capacity(ranges.len());
    for range in ranges {
        if let Some(last) = segments.last_mut() {
            if range.start <= last.end_tick {
                last.absorb(range);
                continue;
            }
        }
        segments.push(RecordingSegment::open(range));
    }

    for (i, segment) in segments.iter_mut().enumerate() {
        segment.index = i + 1;
        segment.name = segment.build_name();
    }

    tracing::debug!(segments = segments.len(), "Resolved segments");

    segments
}

/// Lowercases the value and keeps only `[a-z0-9_]`, separators like spaces,
/// slashes, dots and dashes become underscores first.
pub fn sanitize_name_token(value: &str) -> String {
    value
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| match c {
            ' ' | '/' | '\\' | ':' | '.' | '-' => '_',
            other => other,
        })
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '_')
        .collect()
}

pub fn sanitize_preset_token(value: &str) -> String {
    value
        .trim()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
        .collect()
}
