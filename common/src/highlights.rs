#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
pub enum HighlightType {
    #[serde(rename = "kill_in_smoke")]
    KillInSmoke,
    #[serde(rename = "round_multikill")]
    MultiKill,
    #[serde(rename = "kill_blinded")]
    KillBlinded,
    #[serde(rename = "wallbang")]
    Wallbang,
    #[serde(rename = "noscope")]
    NoScope,
    #[serde(rename = "headshot_kill")]
    Headshot,
    #[serde(rename = "clutch_win")]
    ClutchWin,
    #[serde(rename = "headshot_collection")]
    HeadshotCollection,
}

impl HighlightType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::KillInSmoke => "kill_in_smoke",
            Self::MultiKill => "round_multikill",
            Self::KillBlinded => "kill_blinded",
            Self::Wallbang => "wallbang",
            Self::NoScope => "noscope",
            Self::Headshot => "headshot_kill",
            Self::ClutchWin => "clutch_win",
            Self::HeadshotCollection => "headshot_collection",
        }
    }
}

impl core::fmt::Display for HighlightType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `tick_start`/`tick_end` are the raw bounds of the moment itself, while
/// `segment_from`/`segment_to` are the bounds the recorder pads and merges.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Highlight {
    #[serde(rename = "type")]
    pub kind: HighlightType,
    pub round: i32,
    pub tick_start: i64,
    pub tick_end: i64,
    #[serde(rename = "time_start_sec")]
    pub time_start: f64,
    #[serde(rename = "time_end_sec")]
    pub time_end: f64,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub kills: usize,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub kill_ticks: Vec<i64>,
    #[serde(default, skip_serializing_if = "std::collections::BTreeMap::is_empty")]
    pub meta: std::collections::BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub victims: Vec<String>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub weapon: String,
    #[serde(default, skip_serializing_if = "is_unset_slot")]
    pub player_slot: i32,
    #[serde(rename = "steamid")]
    pub steam_id: String,
    pub demo: String,
    #[serde(rename = "segment_tick_start")]
    pub segment_from: i64,
    #[serde(rename = "segment_tick_end")]
    pub segment_to: i64,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct HighlightResult {
    pub demo: String,
    #[serde(rename = "steamid")]
    pub steam_id: String,
    pub tick_rate: f64,
    pub highlights: Vec<Highlight>,
}

fn is_zero(value: &usize) -> bool {
    *value == 0
}

fn is_unset_slot(value: &i32) -> bool {
    *value == 0
}
