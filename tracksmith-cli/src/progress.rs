// ============================================================================
// tracksmith-cli/src/progress.rs
// ============================================================================
//
// PROGRESS REPORTING: Transcode progress bar
//
// The core calls back with (index, total, file) before each transcode. The
// bar is created on the first callback, when the total is known. indicatif
// hides it automatically when stderr is not a terminal.

use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;

const TEMPLATE: &str = "{spinner:.green} [{bar:30.cyan/blue}] {pos}/{len} {msg}";

/// Progress bar over the files of one transcode batch.
#[derive(Default)]
pub struct TranscodeProgress {
    bar: Option<ProgressBar>,
}

impl TranscodeProgress {
    pub fn new() -> Self {
        Self::default()
    }

    fn bar(&mut self, total: usize) -> &ProgressBar {
        self.bar.get_or_insert_with(|| {
            let style = ProgressStyle::default_bar()
                .template(TEMPLATE)
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("=> ");
            ProgressBar::new(total as u64).with_style(style)
        })
    }

    /// Called before file `index` of `total` starts.
    pub fn update(&mut self, index: usize, total: usize, file: &Path) {
        let name = file
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let bar = self.bar(total);
        bar.set_position(index as u64);
        bar.set_message(name);
    }

    /// Completes the bar, if one was shown.
    pub fn finish(&self) {
        if let Some(bar) = &self.bar {
            bar.finish_and_clear();
        }
    }

    /// Position of the bar, for tests.
    pub fn position(&self) -> Option<u64> {
        self.bar.as_ref().map(ProgressBar::position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bar_created_lazily() {
        let mut progress = TranscodeProgress::new();
        assert_eq!(progress.position(), None);

        progress.update(0, 3, Path::new("/book/a.mp3"));
        progress.update(2, 3, Path::new("/book/c.mp3"));
        assert_eq!(progress.position(), Some(2));
        progress.finish();
    }
}
