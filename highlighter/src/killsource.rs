//! Where the kills come from.
//!
//! A demo parser is just another [`KillSource`]. The one shipped here reads a
//! kill log, a JSON export of every kill in the match.

use futures::FutureExt;

use common::{KillLog, ParsedDemo};

use crate::error::{PathError, SourceError};

pub trait KillSource: Send + Sync {
    /// Loads the kills `steam_id` made, in the order they happened.
    fn load<'f, 'own>(
        &'own self,
        path: &'own std::path::Path,
        steam_id: &'own str,
    ) -> futures::future::BoxFuture<'f, Result<ParsedDemo, SourceError>>
    where
        'own: 'f;
}

#[derive(Debug, Default)]
pub struct KillLogSource {}

impl KillLogSource {
    pub fn new() -> Self {
        Self {}
    }
}

impl KillSource for KillLogSource {
    fn load<'f, 'own>(
        &'own self,
        path: &'own std::path::Path,
        steam_id: &'own str,
    ) -> futures::future::BoxFuture<'f, Result<ParsedDemo, SourceError>>
    where
        'own: 'f,
    {
        async move {
            validate_path(path)?;

            let raw = tokio::fs::read(path).await.map_err(SourceError::Io)?;
            let log: KillLog = serde_json::from_slice(&raw)?;

            tracing::debug!(?path, kills = log.kills.len(), "Read kill log");

            Ok(player_kills(log, path, steam_id))
        }
        .boxed()
    }
}

/// Keeps the kills of `steam_id` and settles for each of them whether their
/// team won the round.
pub fn player_kills(log: KillLog, path: &std::path::Path, steam_id: &str) -> ParsedDemo {
    let demo = demo_name(&log.demo, path);
    let round_winners = log.round_winners;

    let kills = log
        .kills
        .into_iter()
        .filter(|kill| kill.killer_id == steam_id)
        .map(|mut kill| {
            if let Some(winner) = round_winners.get(&kill.round) {
                kill.round_won = *winner == kill.killer_team;
            }
            kill
        })
        .collect();

    ParsedDemo {
        demo,
        tick_rate: log.tick_rate,
        kills,
    }
}

fn demo_name(demo: &str, path: &std::path::Path) -> String {
    let name = if demo.trim().is_empty() {
        path.file_name()
    } else {
        std::path::Path::new(demo.trim()).file_name()
    };

    name.map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| demo.trim().to_owned())
}

pub fn validate_path(path: &std::path::Path) -> Result<(), PathError> {
    if path.as_os_str().is_empty() {
        return Err(PathError::Required);
    }

    let is_json = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("json"))
        .unwrap_or(false);
    if !is_json {
        return Err(PathError::InvalidExtension(path.to_owned()));
    }

    let metadata = std::fs::metadata(path)?;
    if !metadata.is_file() {
        return Err(PathError::NotRegularFile(path.to_owned()));
    }
    if metadata.len() == 0 {
        return Err(PathError::Empty(path.to_owned()));
    }

    Ok(())
}
