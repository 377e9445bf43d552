//! Running the converter over many files.

mod analyzer;
mod config;
mod telemetry;

use javelin_frontend::SourceInput;
use javelin_inputs::SourceFile;
use javelin_syntax::LanguageLevel;

pub use crate::analyzer::{Analyzer, CancellationFlag, FileOutcome};
pub use crate::config::{CONFIG_FILE, Config, ConfigError, Mode};
pub use crate::telemetry::{Measurement, Telemetry};

/// Front-end inputs for `files`, in order.
pub fn source_inputs(db: &dyn salsa::Database, files: &[SourceFile], level: LanguageLevel) -> Vec<SourceInput> {
    files.iter().map(|file| SourceInput::new(file.path(db).clone(), file.text(db), level)).collect()
}
