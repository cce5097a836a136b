/// A single elimination, as reported by the demo source.
///
/// The source only hands over kills of the tracked player, in the order they
/// happened. Nothing downstream mutates them.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct KillEvent {
    pub tick: i64,
    #[serde(rename = "time_sec")]
    pub time: f64,
    pub round: i32,
    pub killer_id: String,
    /// Slot used by `spec_player`, `<= 0` if unknown
    #[serde(default)]
    pub killer_slot: i32,
    pub victim_id: String,
    #[serde(default)]
    pub weapon: String,
    #[serde(default)]
    pub in_smoke: bool,
    #[serde(default)]
    pub blinded: bool,
    #[serde(default)]
    pub wallbang: bool,
    #[serde(default)]
    pub noscope: bool,
    #[serde(default)]
    pub headshot: bool,
    #[serde(default)]
    pub killer_team: i32,
    #[serde(default)]
    pub round_won: bool,
    #[serde(default)]
    pub allies_alive_before: u32,
    #[serde(default)]
    pub enemies_alive_before: u32,
}

/// The document a kill source reads: every kill of the match plus the
/// information needed to decide who won each round.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct KillLog {
    pub demo: String,
    pub tick_rate: f64,
    #[serde(default)]
    pub kills: Vec<KillEvent>,
    /// Round number -> winning team number
    #[serde(default)]
    pub round_winners: std::collections::BTreeMap<i32, i32>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedDemo {
    pub demo: String,
    pub tick_rate: f64,
    pub kills: Vec<KillEvent>,
}
