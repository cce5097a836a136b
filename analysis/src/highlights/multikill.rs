use common::{Highlight, HighlightType, KillEvent};

use super::Source;

pub fn highlights(source: Source<'_>, kills: &[KillEvent]) -> Vec<Highlight> {
    group_by_round(kills)
        .into_iter()
        .filter(|group| group.len() >= 2)
        .filter_map(|group| {
            let mut highlight = super::spanning(source, HighlightType::MultiKill, group)?;
            highlight.kill_ticks = group.iter().map(|k| k.tick).collect();
            Some(highlight)
        })
        .collect()
}

/// Splits the kills into maximal runs of consecutive kills from the same round.
///
/// Runs follow the input order, a round that shows up twice with another round
/// in between yields two runs.
pub fn group_by_round(kills: &[KillEvent]) -> Vec<&[KillEvent]> {
    kills.chunk_by(|a, b| a.round == b.round).collect()
}
