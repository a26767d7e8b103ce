use anyhow::Result;
use chrono::Utc;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use personaprofiler::orchestration::{AnalysisOutcome, IgnoredReason};
use personaprofiler::reports::{self, ExportFormat};
use personaprofiler::{config, ProfilerSession};

#[derive(Parser)]
#[command(
    name = "personaprofiler",
    about = "Derive and export personality personas from profile activity"
)]
struct Cli {
    /// Log at debug level (RUST_LOG overrides).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Scrape a handle and derive its persona.
    Analyze {
        /// User name or profile URL.
        handle: String,
        /// Export the finished persona right away.
        #[arg(long, value_enum)]
        export: Option<FormatArg>,
    },
    /// List stored analyses, most recent first.
    History,
    /// Print the text report of a stored analysis.
    Show {
        index: usize,
        /// Print the raw scraped data instead.
        #[arg(long)]
        raw: bool,
    },
    /// Write a config file with every default spelled out.
    InitConfig,
    /// Export a stored analysis.
    Export {
        index: usize,
        #[arg(long, value_enum, default_value = "txt")]
        format: FormatArg,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum FormatArg {
    Txt,
    Pdf,
}

impl From<FormatArg> for ExportFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Txt => ExportFormat::PlainText,
            FormatArg::Pdf => ExportFormat::PrintableDocument,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let session = ProfilerSession::new()?;
    match cli.command {
        Command::Analyze { handle, export } => analyze(&session, &handle, export).await?,
        Command::InitConfig => {
            config::save(session.config())?;
            println!("Wrote {}", config::config_file_path()?.display());
        }
        Command::History => {
            for line in session.history_lines() {
                println!("{line}");
            }
        }
        Command::Show { index, raw } => {
            let selected = session.select(index)?;
            if raw {
                if let Some(json) = session.raw_data()? {
                    println!("{json}");
                }
            } else if let Some(report) =
                reports::to_plain_text(Some(&selected.persona), Utc::now())
            {
                print!("{report}");
            }
        }
        Command::Export { index, format } => {
            session.select(index)?;
            export(&session, format.into())?;
        }
    }
    Ok(())
}

async fn analyze(
    session: &ProfilerSession,
    handle: &str,
    export_as: Option<FormatArg>,
) -> Result<()> {
    let mut stages = session.orchestrator().subscribe_stage();
    let progress = tokio::spawn(async move {
        while stages.changed().await.is_ok() {
            let stage = *stages.borrow_and_update();
            if let Some(headline) = stage.headline() {
                println!("{headline}");
                for step in stage.steps() {
                    println!("  {step}");
                }
            }
        }
    });

    let outcome = session.analyze(handle).await;
    progress.abort();

    if let Some(notification) = session.orchestrator().notifications().current() {
        println!("{}", notification.message);
    }
    match outcome {
        AnalysisOutcome::Completed(completed) => {
            println!(
                "@{}: {} keywords, history now holds {} analyses",
                completed.handle,
                completed.persona.keywords.len(),
                session.orchestrator().history_len()
            );
            if let Some(format) = export_as {
                export(session, format.into())?;
            }
        }
        AnalysisOutcome::Failed(failure) => anyhow::bail!("Analysis failed: {failure}"),
        AnalysisOutcome::Ignored(IgnoredReason::EmptyHandle) => {
            anyhow::bail!("A handle is required")
        }
        AnalysisOutcome::Ignored(IgnoredReason::Busy) => {}
    }
    Ok(())
}

fn export(session: &ProfilerSession, format: ExportFormat) -> Result<()> {
    match session.export(format)? {
        Some(outcome) => println!("Wrote {} (sha256 {})", outcome.path.display(), outcome.hash),
        None => println!("Nothing to export"),
    }
    Ok(())
}

fn init_tracing(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
