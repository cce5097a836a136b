/// Collects console commands, one per line and each terminated by `;`.
///
/// The CS2 console drops or mangles pasted blocks with comments in them, so
/// this only ever writes plain commands and blank lines.
#[derive(Debug, Default)]
pub struct ScriptWriter {
    buf: String,
}

impl ScriptWriter {
    pub fn new() -> Self {
        Self { buf: String::new() }
    }

    pub fn command(&mut self, command: &str) {
        let trimmed = command.trim();
        self.buf.push_str(trimmed);
        if !trimmed.ends_with(';') {
            self.buf.push(';');
        }
        self.buf.push('\n');
    }

    pub fn at_tick(&mut self, tick: i64, command: &str) {
        self.command(&format!(
            "mirv_cmd addAtTick {} \"{}\"",
            tick,
            escape_for_add_at_tick(command)
        ));
    }

    pub fn blank(&mut self) {
        self.buf.push('\n');
    }

    pub fn finish(self) -> String {
        self.buf
    }
}

pub fn join<I, S>(commands: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    commands
        .into_iter()
        .filter_map(|c| {
            let trimmed = c.as_ref().trim();
            (!trimmed.is_empty()).then(|| trimmed.to_owned())
        })
        .collect::<Vec<_>>()
        .join("; ")
}

pub fn escape_for_add_at_tick(command: &str) -> String {
    command.replace('\\', "\\\\").replace('"', "\\\"")
}

/// The tick to seek to so that `tick` itself still gets played.
pub fn seek_tick_before(tick: i64) -> i64 {
    tick.saturating_sub(1).max(0)
}

pub fn pov_command(player_slot: i32) -> Option<String> {
    (player_slot > 0).then(|| format!("spec_player {}", player_slot))
}

pub fn seek_jump(seek_tick: i64, player_slot: i32) -> String {
    join(
        [
            Some("demo_pause".to_owned()),
            Some(format!("demo_gototick {}", seek_tick)),
            pov_command(player_slot),
            Some("demo_resume".to_owned()),
        ]
        .into_iter()
        .flatten(),
    )
}
