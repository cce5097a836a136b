use analysis::script::{self, ScriptBuilder, ScriptOptions};
use common::{Highlight, HighlightResult, HighlightType};
use pretty_assertions::assert_eq;
use tracing_test::traced_test;

fn highlight(kind: HighlightType, round: i32, slot: i32, from: i64, to: i64) -> Highlight {
    Highlight {
        kind,
        round,
        tick_start: from,
        tick_end: to,
        time_start: 0.0,
        time_end: 0.0,
        kills: 0,
        kill_ticks: Vec::new(),
        meta: Default::default(),
        victims: Vec::new(),
        weapon: String::new(),
        player_slot: slot,
        steam_id: String::new(),
        demo: String::new(),
        segment_from: from,
        segment_to: to,
    }
}

fn result(steam_id: &str, tick_rate: f64, highlights: Vec<Highlight>) -> HighlightResult {
    HighlightResult {
        demo: "demo.dem".to_owned(),
        steam_id: steam_id.to_owned(),
        tick_rate,
        highlights,
    }
}

fn multikill(slot: i32, kill_ticks: Vec<i64>) -> Highlight {
    let mut h = highlight(
        HighlightType::MultiKill,
        10,
        slot,
        kill_ticks[0],
        kill_ticks[kill_ticks.len() - 1],
    );
    h.kills = kill_ticks.len();
    h.kill_ticks = kill_ticks;
    h
}

#[test]
#[traced_test]
fn preset_and_pov_lock() {
    let mut builder = ScriptBuilder::new();
    builder.ffmpeg_preset = "afxFfmpegYuv420p".to_owned();
    builder.output_path = "highlights".to_owned();
    builder.frame_rate = 120;

    let result = result(
        "76561197960266727",
        64.0,
        vec![highlight(HighlightType::Wallbang, 3, 7, 1000, 1020)],
    );

    let script = builder.build(&result);

    assert!(!script.contains("//"));
    assert!(script.contains("mirv_streams settings edit afxDefault settings afxFfmpegYuv420p;\n"));
    assert!(script.contains("mirv_streams record fps 120;\n"));
    assert!(script.contains("spec_player 7;"));
    assert!(script.contains("demo_resume; wait 120;\n"));
    assert!(script.contains("demo_pause; demo_gototick 999; spec_player 7; demo_resume;\n"));
    assert!(script.contains("mirv_streams record name highlights_hl_0001_r3_wallbang;"));
    assert!(script.contains(
        "mirv_deathmsg filter add attackerMatch=!x76561197960266727 block=1 lastRule=1;\n"
    ));
    assert!(script.contains("mirv_deathmsg localPlayer x76561197960266727;\n"));
    assert!(script.contains("demoui 0;\n"));
    assert!(script.contains("cl_truview_show_status 0;\n"));
    assert!(script.contains("echo \"Auto-seek to first segment: tick 999\";\n"));
    assert!(!script.contains("startmovie"));
}

#[test]
fn full_script_for_two_segments() {
    let builder = ScriptBuilder::new();
    let result = result(
        "",
        64.0,
        vec![
            highlight(HighlightType::Wallbang, 1, 4, 100, 120),
            highlight(HighlightType::NoScope, 2, 8, 300, 320),
        ],
    );

    let script = builder.build(&result);

    let expected = "\
mirv_cvar_unhide_all;
mirv_cmd clear;
mirv_streams record end;
mirv_streams settings edit afxDefault settings afxFfmpegYuv420p;
mirv_streams record screen enabled 1;
mirv_streams record fps 60;
spec_show_xray 0;
demoui 0;
cl_truview_show_status 0;
cl_drawhud 0;
cl_drawhud_force_radar -1;
cl_drawhud_force_deathnotices 1;
mirv_deathmsg filter clear;
toggleconsole;

mirv_cmd addAtTick 100 \"spec_player 4; host_framerate 60; mirv_streams record name hl_0001_r1_wallbang; mirv_streams record start\";
mirv_cmd addAtTick 120 \"mirv_streams record end; host_framerate 0\";
mirv_cmd addAtTick 121 \"demo_pause; demo_gototick 299; spec_player 8; demo_resume\";
mirv_cmd addAtTick 300 \"spec_player 8; host_framerate 60; mirv_streams record name hl_0002_r2_noscope; mirv_streams record start\";
mirv_cmd addAtTick 320 \"mirv_streams record end; host_framerate 0\";
mirv_cmd addAtTick 321 \"echo === All 2 segments recorded ===\";
mirv_cmd addAtTick 322 \"disconnect\";

echo \"Auto-seek to first segment: tick 99\";
demo_resume; wait 60;
demo_pause; demo_gototick 99; spec_player 4; demo_resume;

echo \"Loaded 2 recording segments via mirv_cmd.\";
echo \"POV lock mode: spec_player by saved slot per highlight.\";
echo \"Auto-skip enabled. First start tick: 100.\";
";

    assert_eq!(expected, script);
}

#[test]
fn empty_script() {
    let builder = ScriptBuilder::new();
    let result = result("76561197960266727", 64.0, Vec::new());

    let script = builder.build(&result);

    assert_eq!(1, script.matches("echo \"No highlights found.\";").count());
    assert!(script.ends_with("toggleconsole;\n\necho \"No highlights found.\";\necho \"Loaded 0 segments.\";\n"));
    assert!(!script.contains("addAtTick"));
    assert!(!script.contains("//"));
}

#[test]
fn slotless_segment_skips_pov_lock() {
    let builder = ScriptBuilder::new();
    let result = result(
        "",
        64.0,
        vec![highlight(HighlightType::Wallbang, 1, 0, 100, 120)],
    );

    let script = builder.build(&result);

    assert!(script
        .lines()
        .filter(|line| line.contains("addAtTick"))
        .all(|line| !line.contains("spec_player")));
    assert!(script.contains("mirv_cmd addAtTick 100 \"host_framerate 60; mirv_streams record name hl_0001_r1_wallbang; mirv_streams record start\";"));
}

#[test]
fn intra_segment_jump_for_multikill_gap() {
    let mut builder = ScriptBuilder::new();
    builder.start_offset_ticks = 10;
    builder.end_offset_ticks = 5;
    builder.kill_gap_ticks = 60;

    let result = result("", 64.0, vec![multikill(7, vec![100, 130, 240])]);

    let segs = builder.segments(&result);
    assert_eq!(1, segs.len());
    assert_eq!(
        vec![script::RecordingJump {
            at_tick: 136,
            seek_tick: 229,
            player_slot: 7,
        }],
        builder.intra_segment_jumps(&segs[0])
    );

    let script = builder.build(&result);
    assert!(script.contains(
        "mirv_cmd addAtTick 136 \"demo_pause; demo_gototick 229; spec_player 7; demo_resume\";"
    ));
    assert_eq!(1, script.matches("mirv_streams record start").count());
    assert!(!script.contains("mirv_cmd addAtTick 106 \"demo_pause; demo_gototick"));
}

#[test]
fn no_jumps_without_kill_gap() {
    let mut builder = ScriptBuilder::new();
    builder.start_offset_ticks = 10;
    builder.end_offset_ticks = 5;

    let result = result("", 64.0, vec![multikill(7, vec![100, 130, 240])]);
    let segs = builder.segments(&result);

    assert!(builder.intra_segment_jumps(&segs[0]).is_empty());
}

#[test]
fn overlapping_jumps_keep_furthest_and_move_forward() {
    let mut builder = ScriptBuilder::new();
    builder.start_offset_ticks = 10;
    builder.end_offset_ticks = 5;
    builder.kill_gap_ticks = 60;

    // Both multikills share the gap starting at 100, the longer one wins.
    // The gap 400 -> 470 of the third one lies inside the first jump.
    let result = result(
        "",
        64.0,
        vec![
            multikill(7, vec![100, 300]),
            multikill(0, vec![100, 500, 560, 1000]),
            multikill(3, vec![400, 470]),
        ],
    );

    let segs = builder.segments(&result);
    assert_eq!(1, segs.len());

    let jumps = builder.intra_segment_jumps(&segs[0]);
    let ticks: Vec<_> = jumps.iter().map(|j| (j.at_tick, j.seek_tick)).collect();
    assert_eq!(vec![(106, 489), (506, 549), (566, 989)], ticks);

    // Slot falls back to the segment when the highlight has none
    assert_eq!(7, jumps[0].player_slot);

    for pair in jumps.windows(2) {
        assert!(pair[1].at_tick > pair[0].seek_tick);
        assert!(pair[1].seek_tick > pair[0].seek_tick);
    }
}

#[test]
fn jump_into_next_pre_roll_is_dropped() {
    let mut builder = ScriptBuilder::new();
    builder.start_offset_ticks = 0;
    builder.end_offset_ticks = 200;
    builder.kill_gap_ticks = 60;

    // The first kill's post-roll window ends after the second kill's window starts
    let result = result("", 64.0, vec![multikill(7, vec![100, 180])]);
    let segs = builder.segments(&result);

    assert_eq!((100, 380), (segs[0].start_tick, segs[0].end_tick));
    assert!(builder.intra_segment_jumps(&segs[0]).is_empty());
}

#[test]
fn headshot_montage_single_output_file() {
    let mut builder = ScriptBuilder::new();
    builder.output_path = "highlights".to_owned();
    builder.frame_rate = 120;

    let result = result(
        "76561197960266727",
        64.0,
        vec![
            highlight(HighlightType::Headshot, 1, 4, 100, 110),
            highlight(HighlightType::Headshot, 3, 8, 300, 310),
        ],
    );

    let script = builder.build_headshot_montage(&result, "headshot_collection");

    assert!(script.contains("mirv_streams record name highlights_headshot_collection;"));
    assert_eq!(1, script.matches("mirv_streams record start").count());
    assert!(script.matches("mirv_streams record end").count() >= 2);
    assert!(script.contains(
        "mirv_cmd addAtTick 111 \"demo_pause; demo_gototick 299; spec_player 8; demo_resume\";"
    ));
    assert!(script.contains("mirv_cmd addAtTick 310 \"mirv_streams record end; host_framerate 0\";"));
    assert!(script.contains("mirv_cmd addAtTick 311 \"echo === Headshot montage recorded ===\";"));
    assert!(script.contains("mirv_cmd addAtTick 312 \"disconnect\";"));
    assert!(script.contains("echo \"Auto-seek to first headshot segment: tick 99\";"));
    assert!(script.contains("echo \"Loaded 2 headshot montage segments into one recording.\";"));
    assert!(script.contains("echo \"Output name: highlights_headshot_collection\";"));
}

#[test]
fn empty_headshot_montage() {
    let builder = ScriptBuilder::new();
    let result = result(
        "",
        64.0,
        vec![highlight(HighlightType::Wallbang, 1, 4, 100, 110)],
    );

    let script = builder.build_headshot_montage(&result, "");

    assert_eq!(1, script.matches("echo \"No headshot highlights found.\";").count());
    assert!(script.contains("echo \"Loaded 0 headshot montage segments.\";"));
    assert!(!script.contains("addAtTick"));
}

#[test]
fn options_convert_seconds_to_ticks() {
    let options = ScriptOptions {
        frame_rate: 30,
        output_path: " clips/cs2 ".to_owned(),
        ffmpeg_preset: "  ".to_owned(),
        pre_roll_seconds: 1,
        post_roll_seconds: 2,
        kill_gap_seconds: 1,
        headshot_montage_name: "My Mix".to_owned(),
    };
    let result = result(
        "",
        64.0,
        vec![
            multikill(5, vec![1000, 1100]),
            highlight(HighlightType::Headshot, 4, 5, 5000, 5000),
        ],
    );

    let script = script::build_script(&result, &options);

    // 1000 - 64 .. 1100 + 128
    assert!(script.contains("mirv_cmd addAtTick 936 \"spec_player 5; host_framerate 60; mirv_streams record name clips_cs2_hl_0001_r10_round_multikill; mirv_streams record start\";"));
    assert!(script.contains("mirv_cmd addAtTick 1228 \"mirv_streams record end; host_framerate 0\";"));
    assert!(script.contains("mirv_streams settings edit afxDefault settings afxFfmpegYuv420p;"));
    // Seek target 1035 would be behind the jump at 1129
    assert!(!script.contains("demo_gototick 1035"));

    let montage = script::build_headshot_montage_script(&result, &options);
    assert!(montage.contains("mirv_streams record name clips_cs2_my_mix;"));
    assert!(montage.contains("mirv_cmd addAtTick 4936 "));
}

#[test]
fn zero_tick_rate_disables_padding() {
    let options = ScriptOptions::default();
    let result = result(
        "",
        0.0,
        vec![highlight(HighlightType::Wallbang, 1, 2, 100, 120)],
    );

    let script = script::build_script(&result, &options);

    assert!(script.contains("mirv_cmd addAtTick 100 \"spec_player 2;"));
    assert!(script.contains("mirv_cmd addAtTick 120 \"mirv_streams record end"));
}

#[test]
fn fallbacks() {
    let mut builder = ScriptBuilder::new();

    assert_eq!("headshot_collection", script::montage_name_token("   "));
    assert_eq!(60, builder.frame_rate());
    builder.frame_rate = 120;
    assert_eq!(120, builder.frame_rate());
    builder.frame_rate = 24;
    assert_eq!(60, builder.frame_rate());
    assert_eq!("afxFfmpegYuv420p", builder.ffmpeg_preset());
    builder.ffmpeg_preset = "!!".to_owned();
    assert_eq!("afxFfmpegYuv420p", builder.ffmpeg_preset());
    assert_eq!("hl_0001", builder.record_path("hl_0001"));
    builder.output_path = "out/clips".to_owned();
    assert_eq!("out_clips_hl_0001", builder.record_path("hl_0001"));
}

#[test]
fn huge_tick_rate_saturates_ticks() {
    let result = result(
        "",
        1e300,
        vec![highlight(HighlightType::Wallbang, 1, 2, 100, 100)],
    );

    let script = script::build_script(&result, &ScriptOptions::default());

    assert!(script.contains("mirv_cmd addAtTick 0 \"spec_player 2; host_framerate 60;"));
    assert!(script.contains(&format!("mirv_cmd addAtTick {} \"disconnect\";", i64::MAX)));
    assert!(script.contains("echo \"Auto-seek to first segment: tick 0\";"));
}

#[test]
fn ticks_at_the_end_of_the_range() {
    let mut builder = ScriptBuilder::new();
    builder.start_offset_ticks = 10;
    builder.end_offset_ticks = 5;
    builder.kill_gap_ticks = 1;

    let last = i64::MAX;
    let late = result(
        "",
        64.0,
        vec![
            highlight(HighlightType::Wallbang, 1, 2, last - 60, last - 60),
            multikill(2, vec![last - 50, last - 3, last]),
        ],
    );

    let segs = builder.segments(&late);
    assert_eq!(1, segs.len());
    assert_eq!(last, segs[0].end_tick);
    // the jump after the final kill would start past the segment end
    assert_eq!(
        vec![script::RecordingJump {
            at_tick: last - 44,
            seek_tick: last - 14,
            player_slot: 2,
        }],
        builder.intra_segment_jumps(&segs[0])
    );

    let script = builder.build(&late);
    assert!(script.contains(&format!("mirv_cmd addAtTick {} \"disconnect\";", last)));

    let headshot = result("", 64.0, vec![highlight(HighlightType::Headshot, 1, 2, last, last)]);
    let montage = builder.build_headshot_montage(&headshot, "");
    assert!(montage.contains(&format!(
        "mirv_cmd addAtTick {} \"echo === Headshot montage recorded ===\";",
        last
    )));
}
