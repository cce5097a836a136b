use common::{Highlight, HighlightResult, HighlightType, KillEvent};

mod clutch;
mod headshots;
mod multikill;
mod singlekill;

pub use multikill::group_by_round;

#[derive(Debug, Clone, Copy)]
pub struct Source<'s> {
    pub demo: &'s str,
    pub steam_id: &'s str,
}

/// Runs every classification rule over the kills and concatenates the
/// results in rule order: single kills, multi kills, clutches, headshots.
#[tracing::instrument(skip(kills), fields(kills = kills.len()))]
pub fn build(demo: &str, steam_id: &str, tick_rate: f64, kills: &[KillEvent]) -> HighlightResult {
    let source = Source { demo, steam_id };

    let single = singlekill::highlights(source, kills);
    let multi = multikill::highlights(source, kills);
    let clutches = clutch::highlights(source, kills);
    let headshots = headshots::highlights(source, kills);

    tracing::debug!(
        single = single.len(),
        multi = multi.len(),
        clutches = clutches.len(),
        headshots = headshots.len(),
        "Classified kills"
    );

    let highlights = single
        .into_iter()
        .chain(multi)
        .chain(clutches)
        .chain(headshots)
        .collect();

    HighlightResult {
        demo: demo.to_owned(),
        steam_id: steam_id.to_owned(),
        tick_rate,
        highlights,
    }
}

fn single(source: Source<'_>, kind: HighlightType, kill: &KillEvent) -> Highlight {
    Highlight {
        kind,
        round: kill.round,
        tick_start: kill.tick,
        tick_end: kill.tick,
        time_start: kill.time,
        time_end: kill.time,
        kills: 0,
        kill_ticks: Vec::new(),
        meta: Default::default(),
        victims: vec![kill.victim_id.clone()],
        weapon: kill.weapon.clone(),
        player_slot: kill.killer_slot,
        steam_id: source.steam_id.to_owned(),
        demo: source.demo.to_owned(),
        segment_from: kill.tick,
        segment_to: kill.tick,
    }
}

/// A highlight covering `kills` from the first to the last one.
///
/// Round and slot come from the first kill, the weapon from the last one.
/// Returns `None` for an empty slice.
fn spanning<'k, I>(source: Source<'_>, kind: HighlightType, kills: I) -> Option<Highlight>
where
    I: IntoIterator<Item = &'k KillEvent>,
{
    let kills: Vec<&KillEvent> = kills.into_iter().collect();
    let first = kills.first()?;
    let last = kills.last()?;

    Some(Highlight {
        kind,
        round: first.round,
        tick_start: first.tick,
        tick_end: last.tick,
        time_start: first.time,
        time_end: last.time,
        kills: kills.len(),
        kill_ticks: Vec::new(),
        meta: Default::default(),
        victims: kills.iter().map(|k| k.victim_id.clone()).collect(),
        weapon: last.weapon.clone(),
        player_slot: first.killer_slot,
        steam_id: source.steam_id.to_owned(),
        demo: source.demo.to_owned(),
        segment_from: first.tick,
        segment_to: last.tick,
    })
}
