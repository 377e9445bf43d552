use std::cell::{Cell, RefCell};
use std::mem;
use std::time::{Duration, Instant};

use camino::{Utf8Path, Utf8PathBuf};
use indexmap::IndexMap;

/// Per-file timings of one analysis, in the order files were first measured.
#[derive(Debug, Default)]
pub struct Telemetry {
    timings: RefCell<IndexMap<Utf8PathBuf, Duration>>,
    reprocessed: Cell<usize>,
}

impl Telemetry {
    /// Starts timing `path`; the time is recorded when the guard is dropped.
    pub fn measure(&self, path: &Utf8Path) -> Measurement<'_> {
        Measurement { telemetry: self, path: path.to_owned(), start: Instant::now() }
    }

    pub fn timings(&self) -> Vec<(Utf8PathBuf, Duration)> {
        self.timings.borrow().iter().map(|(path, duration)| (path.clone(), *duration)).collect()
    }

    pub fn total(&self) -> Duration {
        self.timings.borrow().values().sum()
    }

    /// Files parsed one at a time after a failed batch.
    pub fn reprocessed(&self) -> usize {
        self.reprocessed.get()
    }

    pub(crate) fn count_reprocessed(&self) {
        self.reprocessed.set(self.reprocessed.get() + 1);
    }
}

#[must_use = "the measurement ends when the guard is dropped"]
pub struct Measurement<'t> {
    telemetry: &'t Telemetry,
    path: Utf8PathBuf,
    start: Instant,
}

impl Drop for Measurement<'_> {
    fn drop(&mut self) {
        let elapsed = self.start.elapsed();
        tracing::debug!(path = %self.path, ?elapsed, "file processed");
        let path = mem::take(&mut self.path);
        *self.telemetry.timings.borrow_mut().entry(path).or_default() += elapsed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn measurements_accumulate_per_path_in_first_seen_order() {
        let telemetry = Telemetry::default();
        for path in ["B.java", "A.java", "B.java"] {
            let _measurement = telemetry.measure(Utf8Path::new(path));
        }
        {
            let _measurement = telemetry.measure(Utf8Path::new("C.java"));
            assert_eq!(telemetry.timings().len(), 2);
        }

        let paths: Vec<String> = telemetry.timings().into_iter().map(|(path, _)| path.into_string()).collect();
        assert_eq!(paths, ["B.java", "A.java", "C.java"]);
        assert_eq!(telemetry.total(), telemetry.timings().iter().map(|(_, duration)| *duration).sum::<Duration>());
    }
}
