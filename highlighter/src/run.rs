use crate::config::Config;
use crate::killsource::KillSource;
use crate::Error;

#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub demo: String,
    pub kills: usize,
    pub highlights: usize,
    pub written: Vec<std::path::PathBuf>,
}

#[derive(Debug)]
struct Built {
    result: common::HighlightResult,
    script: Option<String>,
    montage: Option<String>,
}

/// Loads the kills, builds highlights and scripts and writes them out.
///
/// `shutdown` only gets a say while the kills are loading. Once they are
/// loaded the run completes.
#[tracing::instrument(skip_all, fields(path = ?config.kills_path))]
pub async fn run<S, F>(config: &Config, source: &S, shutdown: F) -> Result<Summary, Error>
where
    S: KillSource + ?Sized,
    F: std::future::Future<Output = ()>,
{
    let parsed = tokio::select! {
        biased;
        _ = shutdown => {
            tracing::warn!("Cancelled while loading kills");
            return Err(Error::Cancelled);
        }
        parsed = source.load(&config.kills_path, &config.steam_id) => parsed?,
    };

    tracing::info!(
        demo = %parsed.demo,
        kills = parsed.kills.len(),
        tick_rate = parsed.tick_rate,
        "Loaded kills"
    );

    let kills = parsed.kills.len();
    let steam_id = config.steam_id.clone();
    let options = config.script.clone();
    let with_script = config.scripts_enabled();
    let with_montage = config.headshot_montage_enabled();

    let built = tokio::task::spawn_blocking(move || {
        let result = analysis::highlights::build(&parsed.demo, &steam_id, parsed.tick_rate, &parsed.kills);
        let script = with_script.then(|| analysis::script::build_script(&result, &options));
        let montage =
            with_montage.then(|| analysis::script::build_headshot_montage_script(&result, &options));

        Built {
            result,
            script,
            montage,
        }
    })
    .await?;

    tracing::info!(highlights = built.result.highlights.len(), "Built highlights");

    let mut written = Vec::new();
    written.extend(crate::output::save_result(&config.output_path, &built.result).await?);
    if let Some(script) = built.script.as_deref() {
        written.extend(crate::output::write_script(&config.script_path, script).await?);
    }
    if let Some(montage) = built.montage.as_deref() {
        written.extend(crate::output::write_script(&config.headshot_script_path, montage).await?);
    }

    Ok(Summary {
        demo: built.result.demo,
        kills,
        highlights: built.result.highlights.len(),
        written,
    })
}
