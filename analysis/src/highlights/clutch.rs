use common::{Highlight, HighlightType, KillEvent};

use super::Source;

#[derive(Debug, Default)]
struct RoundWindow<'k> {
    kills: Vec<&'k KillEvent>,
    first_clutch_kill: Option<usize>,
    max_enemies: u32,
    won: bool,
}

impl<'k> RoundWindow<'k> {
    fn push(&mut self, kill: &'k KillEvent) {
        self.kills.push(kill);
        self.won |= kill.round_won;

        if !is_clutch_start(kill) {
            return;
        }

        if self.first_clutch_kill.is_none() {
            self.first_clutch_kill = Some(self.kills.len() - 1);
        }
        self.max_enemies = self.max_enemies.max(kill.enemies_alive_before);
    }

    fn clutch_kills(&self) -> Option<&[&'k KillEvent]> {
        let first = self.first_clutch_kill?;
        self.kills.get(first..)
    }
}

/// Last player alive on the team, facing at least two enemies.
fn is_clutch_start(kill: &KillEvent) -> bool {
    kill.allies_alive_before == 1 && kill.enemies_alive_before >= 2
}

pub fn highlights(source: Source<'_>, kills: &[KillEvent]) -> Vec<Highlight> {
    let mut rounds = std::collections::BTreeMap::<i32, RoundWindow>::new();
    for kill in kills {
        rounds.entry(kill.round).or_default().push(kill);
    }

    rounds
        .into_iter()
        .filter(|(_, window)| window.won)
        .filter_map(|(round, window)| {
            let clutch_kills = window.clutch_kills()?;
            let mut highlight =
                super::spanning(source, HighlightType::ClutchWin, clutch_kills.iter().copied())?;

            tracing::trace!(round, enemies = window.max_enemies, "Clutch won");

            highlight
                .meta
                .insert("clutch".to_owned(), format!("1v{}", window.max_enemies));
            Some(highlight)
        })
        .collect()
}
