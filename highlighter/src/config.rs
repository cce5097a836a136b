use analysis::script::{ScriptOptions, DEFAULT_FRAME_RATE, DEFAULT_MONTAGE_NAME, DEFAULT_PRESET};

use crate::error::ConfigError;

#[derive(Debug, Clone, clap::Parser)]
#[command(name = "highlighter")]
#[command(about = "Finds the highlights of one player in a CS2 match and writes HLAE scripts recording them")]
#[command(version)]
pub struct Cli {
    /// Kill log (.json) of the match
    #[arg(long = "kills", default_value = "")]
    pub kills: String,

    /// steamid64 of the player to find highlights for
    #[arg(long = "steamid", default_value = "")]
    pub steam_id: String,

    /// Output JSON path, empty to skip
    #[arg(long = "out", default_value = "highlights.json")]
    pub out: String,

    /// HLAE automation script path, empty to skip both scripts
    #[arg(long = "hlae", default_value = "highlights.cfg")]
    pub hlae: String,

    /// HLAE script path for the one-file headshot montage, empty to skip
    #[arg(long = "hlae-headshots", default_value = "headshots.cfg")]
    pub hlae_headshots: String,

    /// Recording name of the headshot montage
    #[arg(long = "hlae-headshots-name", default_value = DEFAULT_MONTAGE_NAME)]
    pub hlae_headshots_name: String,

    /// Recording framerate, at least 60
    #[arg(long = "hlae-fps", default_value_t = DEFAULT_FRAME_RATE)]
    pub hlae_fps: u32,

    /// Prefix for the recording names used by mirv_streams
    #[arg(long = "hlae-path", default_value = "highlights")]
    pub hlae_path: String,

    /// HLAE ffmpeg preset for mirv_streams
    #[arg(long = "hlae-preset", default_value = DEFAULT_PRESET)]
    pub hlae_preset: String,

    /// Seconds recorded before each highlight
    #[arg(long = "hlae-preroll", default_value_t = 3, allow_negative_numbers = true)]
    pub hlae_preroll: i64,

    /// Seconds recorded after each highlight
    #[arg(long = "hlae-postroll", default_value_t = 2, allow_negative_numbers = true)]
    pub hlae_postroll: i64,

    /// Seconds between two kills of a multi-kill after which the recording
    /// jumps ahead, 0 disables it
    #[arg(long = "hlae-kill-gap", default_value_t = 10, allow_negative_numbers = true)]
    pub hlae_kill_gap: i64,

    /// Log debug output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub kills_path: std::path::PathBuf,
    pub steam_id: String,
    pub output_path: String,
    pub script_path: String,
    pub headshot_script_path: String,
    pub script: ScriptOptions,
}

impl Config {
    pub fn from_cli(cli: Cli) -> Result<Self, ConfigError> {
        let mut config = Self {
            kills_path: std::path::PathBuf::from(cli.kills.trim()),
            steam_id: cli.steam_id.trim().to_owned(),
            output_path: cli.out.trim().to_owned(),
            script_path: cli.hlae.trim().to_owned(),
            headshot_script_path: cli.hlae_headshots.trim().to_owned(),
            script: ScriptOptions {
                frame_rate: cli.hlae_fps,
                output_path: cli.hlae_path.trim().to_owned(),
                ffmpeg_preset: cli.hlae_preset.trim().to_owned(),
                pre_roll_seconds: 0,
                post_roll_seconds: 0,
                kill_gap_seconds: 0,
                headshot_montage_name: cli.hlae_headshots_name.trim().to_owned(),
            },
        };

        config.validate()?;

        config.script.pre_roll_seconds = non_negative("hlae-preroll", cli.hlae_preroll)?;
        config.script.post_roll_seconds = non_negative("hlae-postroll", cli.hlae_postroll)?;
        config.script.kill_gap_seconds = non_negative("hlae-kill-gap", cli.hlae_kill_gap)?;

        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_steam_id(&self.steam_id)?;
        crate::killsource::validate_path(&self.kills_path)?;
        Ok(())
    }

    pub fn scripts_enabled(&self) -> bool {
        !self.script_path.trim().is_empty()
    }

    /// Only written together with the regular script
    pub fn headshot_montage_enabled(&self) -> bool {
        self.scripts_enabled() && !self.headshot_script_path.trim().is_empty()
    }
}

pub fn validate_steam_id(steam_id: &str) -> Result<(), ConfigError> {
    let trimmed = steam_id.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::SteamIdRequired);
    }
    if trimmed.len() != 17 {
        return Err(ConfigError::SteamIdLength);
    }
    if !trimmed.chars().all(|c| c.is_ascii_digit()) {
        return Err(ConfigError::SteamIdDigits);
    }
    Ok(())
}

fn non_negative(flag: &'static str, value: i64) -> Result<u32, ConfigError> {
    if value < 0 {
        return Err(ConfigError::Negative { flag });
    }
    u32::try_from(value).map_err(|_| ConfigError::OutOfRange { flag })
}
