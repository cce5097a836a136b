use common::{Highlight, HighlightType, KillEvent};

use super::Source;

pub fn highlights(source: Source<'_>, kills: &[KillEvent]) -> Vec<Highlight> {
    let headshots = kills.iter().filter(|kill| kill.headshot);

    let mut highlight = match super::spanning(source, HighlightType::HeadshotCollection, headshots) {
        Some(h) => h,
        None => return Vec::new(),
    };

    highlight.weapon = "mixed".to_owned();
    highlight
        .meta
        .insert("scope".to_owned(), "all_match_headshots".to_owned());

    vec![highlight]
}
