mod report;
mod sources;

use std::process::ExitCode;

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use javelin_driver::{Analyzer, CONFIG_FILE, Config, FileOutcome, Mode, source_inputs};
use javelin_frontend::JavaFrontEnd;
use javelin_inputs::SourceFile;
use javelin_syntax::LanguageLevel;
use salsa::DatabaseImpl;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(version, about = "Lossless Java syntax trees with symbols and front-end warnings")]
enum Options {
    /// Report warnings, semantic errors and files that could not be converted.
    Check {
        #[command(flatten)]
        inputs: Inputs,
        /// One line per message instead of source snippets.
        #[arg(long)]
        short: bool,
    },
    /// Print the syntax tree of every file.
    Dump {
        #[command(flatten)]
        inputs: Inputs,
        /// Also list declarations and their usages.
        #[arg(long)]
        symbols: bool,
    },
}

#[derive(clap::Args)]
struct Inputs {
    /// Java files, or directories to search for them.
    #[arg(required = true)]
    paths: Vec<Utf8PathBuf>,
    /// Configuration file; `javelin.toml` in the working directory is used if present.
    #[arg(long)]
    config: Option<Utf8PathBuf>,
    /// Overrides `language_level`.
    #[arg(long)]
    level: Option<LanguageLevel>,
    /// Overrides `mode`.
    #[arg(long)]
    mode: Option<Mode>,
}

impl Inputs {
    fn config(&self) -> anyhow::Result<Config> {
        let path = match &self.config {
            Some(path) => Some(path.as_path()),
            None => Some(Utf8Path::new(CONFIG_FILE)).filter(|path| path.is_file()),
        };
        let mut config = match path {
            Some(path) => Config::load(path).with_context(|| format!("failed to load `{path}`"))?,
            None => Config::default(),
        };
        if let Some(level) = self.level {
            config.language_level = level;
        }
        if let Some(mode) = self.mode {
            config.mode = mode;
        }
        Ok(config)
    }

    fn analyze(&self, db: &DatabaseImpl) -> anyhow::Result<(Vec<SourceFile>, Vec<FileOutcome>)> {
        let config = self.config()?;
        let files = sources::load(db, &self.paths)?;
        let front_end = JavaFrontEnd::new();
        let analyzer = Analyzer::new(&front_end, &config);
        let outcomes = analyzer.analyze(&source_inputs(db, &files, config.language_level));

        let telemetry = analyzer.telemetry();
        tracing::info!(
            files = files.len(),
            elapsed = ?telemetry.total(),
            reprocessed = telemetry.reprocessed(),
            "analysis finished"
        );
        Ok((files, outcomes))
    }
}

fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_env("JAVELIN_LOG").unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let db = DatabaseImpl::default();
    match Options::parse() {
        Options::Check { inputs, short } => {
            let (files, outcomes) = inputs.analyze(&db)?;
            let summary = report::check(&db, &files, &outcomes, short);
            eprintln!("{summary}");
            Ok(if summary.skipped == 0 { ExitCode::SUCCESS } else { ExitCode::FAILURE })
        }
        Options::Dump { inputs, symbols } => {
            let (_, outcomes) = inputs.analyze(&db)?;
            print!("{}", report::Dump { outcomes: &outcomes, symbols });
            Ok(ExitCode::SUCCESS)
        }
    }
}
