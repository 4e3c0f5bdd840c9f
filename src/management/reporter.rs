use indicatif::ProgressBar;

use crate::warning;

/// Sink for human-readable failure messages of a library run.
pub trait ErrorReporter: Send + Sync {
    fn report(&self, message: &str);
}

/// Prints every report as a console warning.
///
/// With a progress bar attached the bar is hidden while the warning is
/// printed, so the two don't end up on the same line.
#[derive(Debug, Default, Clone)]
pub struct ConsoleReporter {
    progress: Option<ProgressBar>,
}

impl ConsoleReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_progress(progress: ProgressBar) -> Self {
        Self {
            progress: Some(progress),
        }
    }
}

impl ErrorReporter for ConsoleReporter {
    fn report(&self, message: &str) {
        match &self.progress {
            Some(pb) => pb.suspend(|| warning!("{}", message)),
            None => warning!("{}", message),
        }
    }
}
