use std::cell::Cell;

use javelin_convert::ConvertError;
use javelin_driver::{Analyzer, CancellationFlag, Config, FileOutcome, Mode};
use javelin_frontend::{FrontEnd, FrontEndError, JavaFrontEnd, ParsedUnit, SourceInput};
use javelin_inputs::SourceFile;
use javelin_syntax::LanguageLevel;

/// Accepts `fail_after` files of a batch, then gives up. Counts single parses.
struct Flaky {
    inner: JavaFrontEnd,
    fail_after: usize,
    parses: Cell<usize>,
    cancel_on_parse: Option<CancellationFlag>,
}

impl Flaky {
    fn new(fail_after: usize) -> Self {
        Self { inner: JavaFrontEnd::new(), fail_after, parses: Cell::new(0), cancel_on_parse: None }
    }
}

impl FrontEnd for Flaky {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn version(&self) -> &str {
        self.inner.version()
    }

    fn parse(&self, input: &SourceInput) -> Result<ParsedUnit, FrontEndError> {
        self.parses.set(self.parses.get() + 1);
        if let Some(flag) = &self.cancel_on_parse {
            flag.cancel();
        }
        self.inner.parse(input)
    }

    fn parse_batch(
        &self,
        inputs: &[SourceInput],
        accept: &mut dyn FnMut(usize, ParsedUnit),
    ) -> Result<(), FrontEndError> {
        for (index, input) in inputs.iter().enumerate() {
            if index == self.fail_after {
                return Err(FrontEndError::BatchAborted { accepted: index, message: "out of memory".to_owned() });
            }
            accept(index, self.inner.parse(input)?);
        }
        Ok(())
    }
}

fn inputs(count: usize) -> Vec<SourceInput> {
    (0..count)
        .map(|index| {
            SourceInput::new(
                format!("C{index}.java"),
                format!("class C{index} {{ int f() {{ return {index}; }} }}\n"),
                LanguageLevel::default(),
            )
        })
        .collect()
}

fn summary(outcomes: &[FileOutcome]) -> Vec<(&str, &str)> {
    outcomes
        .iter()
        .map(|outcome| {
            let state = match outcome {
                FileOutcome::Converted(_) => "converted",
                FileOutcome::Skipped { .. } => "skipped",
                FileOutcome::Cancelled { .. } => "cancelled",
            };
            (outcome.path().as_str(), state)
        })
        .collect()
}

#[test]
fn failed_batch_reprocesses_only_unaccepted_files() {
    let front_end = Flaky::new(2);
    let analyzer = Analyzer::new(&front_end, &Config::default());
    let outcomes = analyzer.analyze(&inputs(5));

    assert_eq!(front_end.parses.get(), 3);
    assert_eq!(analyzer.telemetry().reprocessed(), 3);
    assert_eq!(
        summary(&outcomes),
        [
            ("C0.java", "converted"),
            ("C1.java", "converted"),
            ("C2.java", "converted"),
            ("C3.java", "converted"),
            ("C4.java", "converted"),
        ]
    );
}

#[test]
fn successful_batch_parses_nothing_twice() {
    let front_end = Flaky::new(usize::MAX);
    let analyzer = Analyzer::new(&front_end, &Config::default());
    let outcomes = analyzer.analyze(&inputs(3));

    assert_eq!(front_end.parses.get(), 0);
    assert_eq!(analyzer.telemetry().reprocessed(), 0);
    assert!(outcomes.iter().all(|outcome| outcome.context().is_some()));
}

#[test]
fn single_mode_never_batches() {
    let front_end = Flaky::new(0);
    let config = Config { mode: Mode::Single, ..Config::default() };
    let analyzer = Analyzer::new(&front_end, &config);
    let outcomes = analyzer.analyze(&inputs(4));

    assert_eq!(front_end.parses.get(), 4);
    assert_eq!(analyzer.telemetry().reprocessed(), 0);
    assert_eq!(outcomes.len(), 4);
}

#[test]
fn broken_file_is_skipped_and_the_rest_converted() {
    let mut inputs = inputs(3);
    inputs[1].text = "class Broken {\n    void m( {\n}\n".to_owned();

    let front_end = JavaFrontEnd::new();
    let analyzer = Analyzer::new(&front_end, &Config::default());
    let outcomes = analyzer.analyze(&inputs);

    assert_eq!(
        summary(&outcomes),
        [("C0.java", "converted"), ("C1.java", "skipped"), ("C2.java", "converted")]
    );
    let FileOutcome::Skipped { error, .. } = &outcomes[1] else { unreachable!() };
    assert!(matches!(error, ConvertError::Syntax { .. }), "{error:?}");
}

#[test]
fn cancellation_stops_between_files() {
    let flag = CancellationFlag::default();
    let front_end = Flaky { cancel_on_parse: Some(flag.clone()), ..Flaky::new(0) };
    let config = Config { mode: Mode::Single, ..Config::default() };
    let analyzer = Analyzer::new(&front_end, &config).with_cancellation(flag);
    let outcomes = analyzer.analyze(&inputs(3));

    assert!(analyzer.cancellation().is_cancelled());
    assert_eq!(front_end.parses.get(), 1);
    assert_eq!(
        summary(&outcomes),
        [("C0.java", "converted"), ("C1.java", "cancelled"), ("C2.java", "cancelled")]
    );
}

#[test]
fn cancelled_batch_converts_nothing() {
    let front_end = JavaFrontEnd::new();
    let flag = CancellationFlag::default();
    flag.cancel();
    let analyzer = Analyzer::new(&front_end, &Config::default()).with_cancellation(flag);
    let outcomes = analyzer.analyze(&inputs(2));

    assert_eq!(summary(&outcomes), [("C0.java", "cancelled"), ("C1.java", "cancelled")]);
    assert!(analyzer.telemetry().timings().is_empty());
}

#[test]
fn every_processed_file_is_timed() {
    let front_end = Flaky::new(1);
    let analyzer = Analyzer::new(&front_end, &Config::default());
    analyzer.analyze(&inputs(3));

    let timed: Vec<String> = analyzer.telemetry().timings().into_iter().map(|(path, _)| path.into_string()).collect();
    assert_eq!(timed, ["C0.java", "C1.java", "C2.java"]);
}

#[test]
fn source_files_become_inputs() {
    let db = salsa::DatabaseImpl::default();
    let files = [
        SourceFile::new(&db, "A.java".into(), "class A {}".to_owned()),
        SourceFile::new(&db, "B.java".into(), "class B {}".to_owned()),
    ];
    let inputs = javelin_driver::source_inputs(&db, &files, LanguageLevel::JAVA_17);

    assert_eq!(inputs[0], SourceInput::new("A.java", "class A {}", LanguageLevel::JAVA_17));
    assert_eq!(inputs[1].path.as_str(), "B.java");
}
