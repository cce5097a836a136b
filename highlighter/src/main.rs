use clap::Parser;
use tracing_subscriber::prelude::__tracing_subscriber_SubscriberExt;

#[tokio::main(flavor = "current_thread")]
async fn main() -> std::process::ExitCode {
    let cli = highlighter::config::Cli::parse();

    let max_level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    let registry = tracing_subscriber::Registry::default()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::filter::filter_fn(move |meta| {
            *meta.level() <= max_level
                && (meta.target().contains("highlighter") || meta.target().contains("analysis"))
        }));
    if let Err(e) = tracing::subscriber::set_global_default(registry) {
        eprintln!("Setting up logging: {}", e);
    }

    let config = match highlighter::config::Config::from_cli(cli) {
        Ok(c) => c,
        Err(e) => {
            tracing::error!("{}", e);
            return std::process::ExitCode::FAILURE;
        }
    };

    let source = highlighter::killsource::KillLogSource::new();
    let shutdown = async {
        if tokio::signal::ctrl_c().await.is_err() {
            std::future::pending::<()>().await;
        }
    };

    match highlighter::run(&config, &source, shutdown).await {
        Ok(summary) => {
            tracing::info!(
                demo = %summary.demo,
                kills = summary.kills,
                highlights = summary.highlights,
                "Done"
            );
            std::process::ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("{}", e);
            std::process::ExitCode::FAILURE
        }
    }
}
