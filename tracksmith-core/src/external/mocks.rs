// tracksmith-core/src/external/mocks.rs

// --- Mocking Infrastructure (for testing) ---

use super::*;
use crate::error::{CoreError, CoreResult};
use ffmpeg_sidecar::command::FfmpegCommand;
use ffmpeg_sidecar::event::FfmpegEvent;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::os::unix::process::ExitStatusExt; // For ExitStatus::from_raw
use std::path::{Path, PathBuf};
use std::process::ExitStatus;
use std::rc::Rc;

/// Mock implementation of FfmpegProcess.
#[derive(Clone)]
pub struct MockFfmpegProcess {
    /// Events to emit when handle_events is called.
    pub events_to_emit: Rc<RefCell<Vec<FfmpegEvent>>>,
    /// Exit status to return when wait is called.
    pub exit_status: ExitStatus,
}

impl MockFfmpegProcess {
    pub fn succeeding() -> Self {
        Self {
            events_to_emit: Rc::new(RefCell::new(Vec::new())),
            exit_status: ExitStatus::from_raw(0),
        }
    }

    /// A process that logs `message` as an error and exits with `exit_code`.
    pub fn failing(exit_code: i32, message: &str) -> Self {
        Self {
            events_to_emit: Rc::new(RefCell::new(vec![FfmpegEvent::Error(message.to_string())])),
            // Raw wait status: the exit code lives in the second byte
            exit_status: ExitStatus::from_raw(exit_code << 8),
        }
    }
}

impl FfmpegProcess for MockFfmpegProcess {
    fn handle_events<F>(&mut self, mut handler: F) -> CoreResult<()>
    where
        F: FnMut(FfmpegEvent) -> CoreResult<()>,
    {
        let events = self.events_to_emit.borrow().clone();
        for event in events {
            handler(event)?;
        }
        Ok(())
    }

    fn wait(&mut self) -> CoreResult<ExitStatus> {
        Ok(self.exit_status)
    }
}

enum MockFailure {
    Spawn { pattern: String },
    Exit { pattern: String, exit_code: i32, message: String },
}

impl MockFailure {
    fn pattern(&self) -> &str {
        match self {
            MockFailure::Spawn { pattern } | MockFailure::Exit { pattern, .. } => pattern,
        }
    }
}

/// Mock implementation of FfmpegSpawner.
///
/// Every spawn is recorded. Unless a registered failure matches one of the
/// command arguments, the call succeeds and a dummy output file of
/// `output_size` bytes is written to the last argument (the output path).
#[derive(Clone, Default)]
pub struct MockFfmpegSpawner {
    failures: Rc<RefCell<Vec<MockFailure>>>,
    received_calls: Rc<RefCell<Vec<Vec<String>>>>,
    output_size: Rc<Cell<u64>>,
}

impl MockFfmpegSpawner {
    pub fn new() -> Self {
        Default::default()
    }

    /// Size in bytes of the dummy outputs written on success.
    pub fn with_output_size(self, bytes: u64) -> Self {
        self.output_size.set(bytes);
        self
    }

    /// Makes spawning fail for commands with an argument containing `pattern`.
    pub fn add_spawn_error_expectation(&self, pattern: &str) {
        self.failures.borrow_mut().push(MockFailure::Spawn {
            pattern: pattern.to_string(),
        });
    }

    /// Makes commands with an argument containing `pattern` exit with `exit_code`.
    pub fn add_exit_error_expectation(&self, pattern: &str, exit_code: i32, message: &str) {
        self.failures.borrow_mut().push(MockFailure::Exit {
            pattern: pattern.to_string(),
            exit_code,
            message: message.to_string(),
        });
    }

    pub fn get_received_calls(&self) -> Vec<Vec<String>> {
        self.received_calls.borrow().clone()
    }

    fn write_dummy_output(&self, args: &[String]) -> CoreResult<()> {
        let Some(output_path) = args.last().map(PathBuf::from) else {
            log::warn!("MockFfmpegSpawner couldn't find output path in args to create dummy file.");
            return Ok(());
        };
        if let Some(parent) = output_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = vec![0u8; self.output_size.get() as usize];
        std::fs::write(&output_path, contents)?;
        log::debug!("MockFfmpegSpawner created dummy output file: {:?}", output_path);
        Ok(())
    }
}

impl FfmpegSpawner for MockFfmpegSpawner {
    type Process = MockFfmpegProcess;

    fn spawn(&self, mut cmd: FfmpegCommand) -> CoreResult<Self::Process> {
        let args: Vec<String> = cmd
            .as_inner()
            .get_args()
            .map(|s| s.to_string_lossy().into_owned())
            .collect();
        self.received_calls.borrow_mut().push(args.clone());

        let failures = self.failures.borrow();
        let matched = failures
            .iter()
            .find(|f| args.iter().any(|arg| arg.contains(f.pattern())));

        match matched {
            Some(MockFailure::Spawn { pattern }) => {
                log::warn!("MockFfmpegSpawner simulating spawn error for pattern '{}'", pattern);
                Err(CoreError::CommandStart(
                    "ffmpeg (mock)".to_string(),
                    std::io::Error::new(std::io::ErrorKind::NotFound, "mock spawn failure"),
                ))
            }
            Some(MockFailure::Exit { exit_code, message, .. }) => {
                Ok(MockFfmpegProcess::failing(*exit_code, message))
            }
            None => {
                self.write_dummy_output(&args)?;
                Ok(MockFfmpegProcess::succeeding())
            }
        }
    }
}

/// Mock implementation of TagReader keyed by file path.
#[derive(Clone, Default)]
pub struct MockTagReader {
    results: Rc<RefCell<HashMap<PathBuf, Result<RawTags, String>>>>,
    reads: Rc<Cell<usize>>,
}

impl MockTagReader {
    pub fn new() -> Self {
        Default::default()
    }

    /// Add the tags to return for `path`.
    pub fn expect_tags(&self, path: &Path, tags: RawTags) {
        self.results.borrow_mut().insert(path.to_path_buf(), Ok(tags));
    }

    /// Make reading `path` fail with `reason`.
    pub fn expect_failure(&self, path: &Path, reason: &str) {
        self.results
            .borrow_mut()
            .insert(path.to_path_buf(), Err(reason.to_string()));
    }

    /// Number of read_tags calls so far.
    pub fn reads(&self) -> usize {
        self.reads.get()
    }
}

impl TagReader for MockTagReader {
    fn read_tags(&self, path: &Path) -> CoreResult<RawTags> {
        self.reads.set(self.reads.get() + 1);
        match self.results.borrow().get(path) {
            Some(Ok(tags)) => Ok(tags.clone()),
            Some(Err(reason)) => Err(CoreError::TagRead {
                path: path.to_path_buf(),
                reason: reason.clone(),
            }),
            None => {
                log::error!("MockTagReader: No expectation set for path: {}", path.display());
                Err(CoreError::TagRead {
                    path: path.to_path_buf(),
                    reason: "MockTagReader: no expectation set".to_string(),
                })
            }
        }
    }
}

/// A complete, valid tag set for tests.
pub fn complete_tags(title: &str, track: u32, track_total: u32) -> RawTags {
    RawTags {
        title: Some(title.to_string()),
        album: Some("Test Album".to_string()),
        artist: Some("Test Artist".to_string()),
        comment: Some(format!("About {title}")),
        disc: Some(1),
        disc_total: Some(1),
        track: Some(track),
        track_total: Some(track_total),
        duration: Some(61.5),
    }
}
