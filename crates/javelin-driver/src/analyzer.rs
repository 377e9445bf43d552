use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use camino::{Utf8Path, Utf8PathBuf};
use javelin_convert::{ConvertError, FileContext, SyntaxPolicy, convert_file, parse_and_convert};
use javelin_frontend::{FrontEnd, SourceInput};

use crate::{Config, Mode, Telemetry};

/// Shared stop request, checked between files.
#[derive(Debug, Clone, Default)]
pub struct CancellationFlag(Arc<AtomicBool>);

impl CancellationFlag {
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

#[derive(Debug)]
pub enum FileOutcome {
    Converted(FileContext),
    /// The file could not be converted; the others are unaffected.
    Skipped { path: Utf8PathBuf, error: ConvertError },
    /// Not reached before cancellation.
    Cancelled { path: Utf8PathBuf },
}

impl FileOutcome {
    pub fn path(&self) -> &Utf8Path {
        match self {
            Self::Converted(context) => context.path(),
            Self::Skipped { path, .. } | Self::Cancelled { path } => path,
        }
    }

    pub fn context(&self) -> Option<&FileContext> {
        match self {
            Self::Converted(context) => Some(context),
            Self::Skipped { .. } | Self::Cancelled { .. } => None,
        }
    }
}

pub struct Analyzer<'f> {
    front_end: &'f dyn FrontEnd,
    policy: SyntaxPolicy,
    mode: Mode,
    cancellation: CancellationFlag,
    telemetry: Telemetry,
}

impl<'f> Analyzer<'f> {
    pub fn new(front_end: &'f dyn FrontEnd, config: &Config) -> Self {
        let policy = SyntaxPolicy::for_front_end(&config.exceptions, front_end.name(), front_end.version());
        Self {
            front_end,
            policy,
            mode: config.mode,
            cancellation: CancellationFlag::default(),
            telemetry: Telemetry::default(),
        }
    }

    #[must_use]
    pub fn with_cancellation(mut self, cancellation: CancellationFlag) -> Self {
        self.cancellation = cancellation;
        self
    }

    pub fn cancellation(&self) -> &CancellationFlag {
        &self.cancellation
    }

    pub fn telemetry(&self) -> &Telemetry {
        &self.telemetry
    }

    /// One outcome per input, in input order.
    pub fn analyze(&self, inputs: &[SourceInput]) -> Vec<FileOutcome> {
        let outcomes = match self.mode {
            Mode::Batch => self.batch(inputs),
            Mode::Single => inputs.iter().map(|input| self.single(input)).collect(),
        };

        inputs
            .iter()
            .zip(outcomes)
            .map(|(input, outcome)| outcome.unwrap_or_else(|| FileOutcome::Cancelled { path: input.path.clone() }))
            .collect()
    }

    /// Files the front-end never accepted are parsed again one at a time;
    /// accepted ones are kept.
    fn batch(&self, inputs: &[SourceInput]) -> Vec<Option<FileOutcome>> {
        let mut outcomes: Vec<Option<FileOutcome>> = inputs.iter().map(|_| None).collect();
        let result = self.front_end.parse_batch(inputs, &mut |index, parsed| {
            if self.cancellation.is_cancelled() {
                return;
            }
            let (Some(input), Some(slot)) = (inputs.get(index), outcomes.get_mut(index)) else {
                tracing::warn!(index, "front-end accepted a file it was not given");
                return;
            };
            let _measurement = self.telemetry.measure(&input.path);
            *slot = Some(outcome(input, convert_file(input, parsed, &self.policy)));
        });

        let missing = outcomes.iter().filter(|outcome| outcome.is_none()).count();
        if missing == 0 || self.cancellation.is_cancelled() {
            return outcomes;
        }
        match result {
            Err(error) => tracing::warn!(%error, missing, "batch parse failed, reprocessing files one at a time"),
            Ok(()) => tracing::warn!(missing, "batch parse left files out, reprocessing them one at a time"),
        }

        for (input, slot) in inputs.iter().zip(&mut outcomes) {
            if slot.is_some() {
                continue;
            }
            if self.cancellation.is_cancelled() {
                break;
            }
            self.telemetry.count_reprocessed();
            *slot = self.single(input);
        }
        outcomes
    }

    /// `None` once cancelled.
    fn single(&self, input: &SourceInput) -> Option<FileOutcome> {
        if self.cancellation.is_cancelled() {
            return None;
        }
        let _measurement = self.telemetry.measure(&input.path);
        Some(outcome(input, parse_and_convert(self.front_end, input, &self.policy)))
    }
}

fn outcome(input: &SourceInput, result: Result<FileContext, ConvertError>) -> FileOutcome {
    match result {
        Ok(context) => FileOutcome::Converted(context),
        Err(error) => {
            tracing::warn!(path = %input.path, %error, "skipping file");
            FileOutcome::Skipped { path: input.path.clone(), error }
        }
    }
}
