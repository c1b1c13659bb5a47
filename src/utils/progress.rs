use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;
use tracing::debug;

/// Spinner shown while the dataset loads; silent mode only logs
pub struct ProgressReporter {
    spinner: Option<ProgressBar>,
}

impl ProgressReporter {
    pub fn new_spinner(message: &str, silent: bool) -> Self {
        if silent {
            debug!("{}", message);
            return Self { spinner: None };
        }

        let pb = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
            pb.set_style(style);
        }
        pb.set_message(message.to_string());
        pb.enable_steady_tick(Duration::from_millis(100));

        Self { spinner: Some(pb) }
    }

    pub fn silent() -> Self {
        Self { spinner: None }
    }

    pub fn set_message(&self, message: &str) {
        match self.spinner {
            Some(ref pb) => pb.set_message(message.to_string()),
            None => debug!("{}", message),
        }
    }

    pub fn finish_with_message(&self, message: &str) {
        match self.spinner {
            Some(ref pb) => pb.finish_with_message(message.to_string()),
            None => debug!("{}", message),
        }
    }
}

impl Drop for ProgressReporter {
    fn drop(&mut self) {
        if let Some(ref pb) = self.spinner {
            if !pb.is_finished() {
                pb.finish_and_clear();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_silent_reporter_is_inert() {
        let progress = ProgressReporter::silent();
        progress.set_message("Reading crime records...");
        progress.finish_with_message("done");
        assert!(progress.spinner.is_none());
    }
}
