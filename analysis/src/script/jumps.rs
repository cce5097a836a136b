use common::HighlightType;

use super::commands::seek_tick_before;
use crate::segments::RecordingSegment;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordingJump {
    pub at_tick: i64,
    pub seek_tick: i64,
    pub player_slot: i32,
}

/// Finds the jumps over long gaps between the kills of the multi-kill
/// highlights in `segment`.
///
/// The returned jumps are ordered and strictly increasing, every jump starts
/// and lands after the previous jump's seek target.
pub fn intra_segment(
    segment: &RecordingSegment<'_>,
    pre_roll: i64,
    post_roll: i64,
    kill_gap: i64,
) -> Vec<RecordingJump> {
    if kill_gap <= 0 {
        return Vec::new();
    }

    let mut by_tick = std::collections::BTreeMap::<i64, RecordingJump>::new();
    for highlight in segment.highlights.iter() {
        if highlight.kind != HighlightType::MultiKill || highlight.kill_ticks.len() < 2 {
            continue;
        }

        let player_slot = if highlight.player_slot > 0 {
            highlight.player_slot
        } else {
            segment.player_slot
        };

        for pair in highlight.kill_ticks.windows(2) {
            let (prev, next) = (pair[0], pair[1]);
            if next.saturating_sub(prev) < kill_gap {
                continue;
            }

            let at_tick = prev
                .saturating_add(post_roll)
                .saturating_add(1)
                .max(segment.start_tick.saturating_add(1));
            if at_tick >= segment.end_tick {
                continue;
            }

            let seek_tick = seek_tick_before(next.saturating_sub(pre_roll).max(0));
            if seek_tick <= at_tick {
                continue;
            }

            let candidate = RecordingJump {
                at_tick,
                seek_tick,
                player_slot,
            };
            by_tick
                .entry(at_tick)
                .and_modify(|existing| {
                    if candidate.seek_tick > existing.seek_tick {
                        *existing = candidate;
                    }
                })
                .or_insert(candidate);
        }
    }

    let mut last_seek: Option<i64> = None;
    let jumps: Vec<RecordingJump> = by_tick
        .into_values()
        .filter(|jump| {
            if let Some(last) = last_seek {
                if jump.at_tick <= last || jump.seek_tick <= last {
                    return false;
                }
            }
            last_seek = Some(jump.seek_tick);
            true
        })
        .collect();

    tracing::trace!(segment = segment.index, jumps = jumps.len(), "Intra-segment jumps");

    jumps
}
