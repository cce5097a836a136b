use common::{Highlight, HighlightType, KillEvent};

use super::Source;

/// Checked in this order for every kill, each match produces its own
/// highlight.
static RULES: [(HighlightType, fn(&KillEvent) -> bool); 5] = [
    (HighlightType::KillInSmoke, |kill| kill.in_smoke),
    (HighlightType::KillBlinded, |kill| kill.blinded),
    (HighlightType::Wallbang, |kill| kill.wallbang),
    (HighlightType::NoScope, |kill| kill.noscope),
    (HighlightType::Headshot, |kill| kill.headshot),
];

pub fn highlights(source: Source<'_>, kills: &[KillEvent]) -> Vec<Highlight> {
    kills
        .iter()
        .flat_map(|kill| {
            RULES
                .iter()
                .filter(move |(_, matches)| matches(kill))
                .map(move |(kind, _)| super::single(source, *kind, kill))
        })
        .collect()
}
