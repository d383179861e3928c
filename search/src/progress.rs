//! Progress reporting for search runs.

/// A progress report emitted during a search run.
///
/// `processed` is monotonically non-decreasing across a single run and
/// never exceeds `total`. A final report with `processed == total` is
/// always emitted on normal completion, never on a cancelled run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Progress {
    /// Candidates accounted for so far.
    pub processed: usize,
    /// Total candidates in the run.
    pub total: usize,
    /// Human-readable status line.
    pub message: String,
}

impl Progress {
    pub fn new(processed: usize, total: usize, message: impl Into<String>) -> Self {
        Self {
            processed,
            total,
            message: message.into(),
        }
    }
}

/// Callback sink for progress reports.
///
/// Implemented by any `Fn(&Progress)` closure. Reports arrive from the
/// task driving the run; sinks must not block for long.
pub trait ProgressSink: Send + Sync {
    fn report(&self, progress: &Progress);
}

impl<F> ProgressSink for F
where
    F: Fn(&Progress) + Send + Sync,
{
    fn report(&self, progress: &Progress) {
        self(progress)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closure_is_a_sink() {
        let sink = |p: &Progress| {
            assert_eq!(p.processed, 1);
            assert_eq!(p.total, 2);
        };
        sink.report(&Progress::new(1, 2, "halfway"));
    }
}
