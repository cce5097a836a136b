//! HLAE command scripts that record the resolved segments.
//!
//! The generated text is meant to be pasted into (or `exec`'d from) the CS2
//! console with HLAE attached. It arms `mirv_cmd addAtTick` triggers, seeks to
//! the first segment and lets demo playback do the rest.

use common::HighlightResult;

use crate::segments::{self, RecordingSegment, Selection};

mod commands;
mod jumps;

pub use commands::{escape_for_add_at_tick, join, seek_jump, seek_tick_before};
pub use jumps::{intra_segment, RecordingJump};

use commands::{pov_command, ScriptWriter};

pub const DEFAULT_FRAME_RATE: u32 = 60;
pub const DEFAULT_PRESET: &str = "afxFfmpegYuv420p";
pub const DEFAULT_MONTAGE_NAME: &str = "headshot_collection";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptOptions {
    pub frame_rate: u32,
    pub output_path: String,
    pub ffmpeg_preset: String,
    pub pre_roll_seconds: u32,
    pub post_roll_seconds: u32,
    /// Kills in a multi-kill further apart than this get skipped over, 0
    /// disables it
    pub kill_gap_seconds: u32,
    pub headshot_montage_name: String,
}

impl Default for ScriptOptions {
    fn default() -> Self {
        Self {
            frame_rate: DEFAULT_FRAME_RATE,
            output_path: "highlights".to_owned(),
            ffmpeg_preset: DEFAULT_PRESET.to_owned(),
            pre_roll_seconds: 3,
            post_roll_seconds: 2,
            kill_gap_seconds: 10,
            headshot_montage_name: DEFAULT_MONTAGE_NAME.to_owned(),
        }
    }
}

pub fn build_script(result: &HighlightResult, options: &ScriptOptions) -> String {
    let mut builder = ScriptBuilder::with_options(result.tick_rate, options);
    builder.kill_gap_ticks = seconds_to_ticks(result.tick_rate, options.kill_gap_seconds);
    builder.build(result)
}

pub fn build_headshot_montage_script(result: &HighlightResult, options: &ScriptOptions) -> String {
    let builder = ScriptBuilder::with_options(result.tick_rate, options);
    builder.build_headshot_montage(result, &options.headshot_montage_name)
}

pub fn montage_name_token(raw: &str) -> String {
    let token = segments::sanitize_name_token(raw);
    if token.is_empty() {
        return DEFAULT_MONTAGE_NAME.to_owned();
    }
    token
}

fn seconds_to_ticks(tick_rate: f64, seconds: u32) -> i64 {
    if tick_rate <= 0.0 || seconds == 0 {
        return 0;
    }
    (tick_rate * seconds as f64) as i64
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptBuilder {
    pub start_offset_ticks: i64,
    pub end_offset_ticks: i64,
    pub kill_gap_ticks: i64,
    pub frame_rate: u32,
    pub output_path: String,
    pub ffmpeg_preset: String,
}

impl Default for ScriptBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ScriptBuilder {
    pub fn new() -> Self {
        Self {
            start_offset_ticks: 0,
            end_offset_ticks: 0,
            kill_gap_ticks: 0,
            frame_rate: DEFAULT_FRAME_RATE,
            output_path: String::new(),
            ffmpeg_preset: DEFAULT_PRESET.to_owned(),
        }
    }

    pub fn with_options(tick_rate: f64, options: &ScriptOptions) -> Self {
        let mut builder = Self::new();
        builder.apply_offsets_seconds(tick_rate, options.pre_roll_seconds, options.post_roll_seconds);
        builder.frame_rate = options.frame_rate;
        builder.output_path = options.output_path.clone();
        builder.ffmpeg_preset = options.ffmpeg_preset.clone();
        builder
    }

    pub fn apply_offsets_seconds(&mut self, tick_rate: f64, pre_roll: u32, post_roll: u32) {
        if tick_rate <= 0.0 {
            return;
        }
        if pre_roll > 0 {
            self.start_offset_ticks = seconds_to_ticks(tick_rate, pre_roll);
        }
        if post_roll > 0 {
            self.end_offset_ticks = seconds_to_ticks(tick_rate, post_roll);
        }
    }

    pub fn frame_rate(&self) -> u32 {
        self.frame_rate.max(DEFAULT_FRAME_RATE)
    }

    pub fn ffmpeg_preset(&self) -> String {
        let preset = segments::sanitize_preset_token(&self.ffmpeg_preset);
        if preset.is_empty() {
            return DEFAULT_PRESET.to_owned();
        }
        preset
    }

    pub fn segments<'h>(&self, result: &'h HighlightResult) -> Vec<RecordingSegment<'h>> {
        segments::resolve(
            &result.highlights,
            self.start_offset_ticks,
            self.end_offset_ticks,
            Selection::DefaultRecording,
        )
    }

    pub fn headshot_segments<'h>(&self, result: &'h HighlightResult) -> Vec<RecordingSegment<'h>> {
        segments::resolve(
            &result.highlights,
            self.start_offset_ticks,
            self.end_offset_ticks,
            Selection::HeadshotMontage,
        )
    }

    pub fn intra_segment_jumps(&self, segment: &RecordingSegment<'_>) -> Vec<RecordingJump> {
        jumps::intra_segment(
            segment,
            self.start_offset_ticks,
            self.end_offset_ticks,
            self.kill_gap_ticks,
        )
    }

    #[tracing::instrument(skip(self, result), fields(demo = %result.demo))]
    pub fn build(&self, result: &HighlightResult) -> String {
        let segs = self.segments(result);

        let mut w = ScriptWriter::new();
        self.write_setup(&mut w, &result.steam_id);
        self.write_tick_commands(&mut w, &segs);
        self.write_footer(&mut w, &segs);

        w.finish()
    }

    #[tracing::instrument(skip(self, result), fields(demo = %result.demo))]
    pub fn build_headshot_montage(&self, result: &HighlightResult, montage_name: &str) -> String {
        let segs = self.headshot_segments(result);
        let name = montage_name_token(montage_name);

        let mut w = ScriptWriter::new();
        self.write_setup(&mut w, &result.steam_id);
        self.write_montage_commands(&mut w, &segs, &name);
        self.write_montage_footer(&mut w, &segs, &name);

        w.finish()
    }

    pub fn record_path(&self, name: &str) -> String {
        let base = segments::sanitize_name_token(&self.output_path.trim().replace('/', "_"));
        if base.is_empty() {
            return name.to_owned();
        }
        format!("{}_{}", base, name)
    }

    fn write_setup(&self, w: &mut ScriptWriter, steam_id: &str) {
        w.command("mirv_cvar_unhide_all");
        w.command("mirv_cmd clear");
        w.command("mirv_streams record end");
        w.command(&format!(
            "mirv_streams settings edit afxDefault settings {}",
            self.ffmpeg_preset()
        ));
        w.command("mirv_streams record screen enabled 1");
        w.command(&format!("mirv_streams record fps {}", self.frame_rate()));
        w.command("spec_show_xray 0");
        w.command("demoui 0");
        w.command("cl_truview_show_status 0");
        w.command("cl_drawhud 0");
        w.command("cl_drawhud_force_radar -1");
        w.command("cl_drawhud_force_deathnotices 1");
        w.command("mirv_deathmsg filter clear");
        if !steam_id.is_empty() {
            w.command(&format!("mirv_deathmsg localPlayer x{}", steam_id));
            w.command(&format!(
                "mirv_deathmsg filter add attackerMatch=!x{} block=1 lastRule=1",
                steam_id
            ));
        }
        w.command("toggleconsole");
        w.blank();
    }

    fn start_recording(&self, player_slot: i32, record_path: &str) -> String {
        join(
            pov_command(player_slot).into_iter().chain([
                format!("host_framerate {}", self.frame_rate()),
                format!("mirv_streams record name {}", record_path),
                "mirv_streams record start".to_owned(),
            ]),
        )
    }

    fn stop_recording(&self) -> String {
        join(["mirv_streams record end", "host_framerate 0"])
    }

    fn write_auto_seek(&self, w: &mut ScriptWriter, current: &RecordingSegment<'_>, next: &RecordingSegment<'_>) {
        let seek = seek_tick_before(next.start_tick);
        w.at_tick(current.end_tick.saturating_add(1), &seek_jump(seek, next.player_slot));
    }

    fn write_tick_commands(&self, w: &mut ScriptWriter, segs: &[RecordingSegment<'_>]) {
        let (first, last) = match (segs.first(), segs.last()) {
            (Some(f), Some(l)) => (f, l),
            _ => {
                w.command("echo \"No highlights found.\"");
                return;
            }
        };

        for (i, seg) in segs.iter().enumerate() {
            let record_path = self.record_path(&seg.name);
            w.at_tick(seg.start_tick, &self.start_recording(seg.player_slot, &record_path));
            w.at_tick(seg.end_tick, &self.stop_recording());

            for jump in self.intra_segment_jumps(seg) {
                w.at_tick(jump.at_tick, &seek_jump(jump.seek_tick, jump.player_slot));
            }

            if let Some(next) = segs.get(i + 1) {
                self.write_auto_seek(w, seg, next);
            }
        }

        let done_tick = last.end_tick.saturating_add(1);
        w.at_tick(
            done_tick,
            &format!("echo === All {} segments recorded ===", segs.len()),
        );
        w.at_tick(done_tick.saturating_add(1), "disconnect");
        w.blank();

        self.write_initial_seek(w, first, "Auto-seek to first segment");
    }

    fn write_montage_commands(&self, w: &mut ScriptWriter, segs: &[RecordingSegment<'_>], name: &str) {
        let (first, last) = match (segs.first(), segs.last()) {
            (Some(f), Some(l)) => (f, l),
            _ => {
                w.command("echo \"No headshot highlights found.\"");
                return;
            }
        };

        let record_path = self.record_path(name);
        w.at_tick(first.start_tick, &self.start_recording(first.player_slot, &record_path));

        for pair in segs.windows(2) {
            self.write_auto_seek(w, &pair[0], &pair[1]);
        }

        w.at_tick(last.end_tick, &self.stop_recording());
        w.at_tick(last.end_tick.saturating_add(1), "echo === Headshot montage recorded ===");
        w.at_tick(last.end_tick.saturating_add(2), "disconnect");
        w.blank();

        self.write_initial_seek(w, first, "Auto-seek to first headshot segment");
    }

    /// Playback has to be running for `demo_gototick` to take, so resume and
    /// wait a frame interval before seeking.
    fn write_initial_seek(&self, w: &mut ScriptWriter, seg: &RecordingSegment<'_>, label: &str) {
        let seek = seek_tick_before(seg.start_tick);
        w.command(&format!("echo \"{}: tick {}\"", label, seek));
        w.command(&join([
            "demo_resume".to_owned(),
            format!("wait {}", self.frame_rate()),
        ]));
        w.command(&seek_jump(seek, seg.player_slot));
        w.blank();
    }

    fn write_footer(&self, w: &mut ScriptWriter, segs: &[RecordingSegment<'_>]) {
        let first = match segs.first() {
            Some(f) => f,
            None => {
                w.command("echo \"Loaded 0 segments.\"");
                return;
            }
        };

        w.command(&format!(
            "echo \"Loaded {} recording segments via mirv_cmd.\"",
            segs.len()
        ));
        w.command("echo \"POV lock mode: spec_player by saved slot per highlight.\"");
        w.command(&format!(
            "echo \"Auto-skip enabled. First start tick: {}.\"",
            first.start_tick
        ));
    }

    fn write_montage_footer(&self, w: &mut ScriptWriter, segs: &[RecordingSegment<'_>], name: &str) {
        if segs.is_empty() {
            w.command("echo \"Loaded 0 headshot montage segments.\"");
            return;
        }

        w.command(&format!(
            "echo \"Loaded {} headshot montage segments into one recording.\"",
            segs.len()
        ));
        w.command(&format!("echo \"Output name: {}\"", self.record_path(name)));
    }
}
