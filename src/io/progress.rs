//! Terminal progress for the decode, composite and write stages

use crate::io::configuration::PROGRESS_BAR_WIDTH;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::sync::LazyLock;
use std::time::Duration;

static STAGE_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template(&format!(
            "{{prefix:>10}} [{{bar:{PROGRESS_BAR_WIDTH}.cyan/blue}}] {{pos}}/{{len}} {{msg}}"
        ))
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

static OVERALL_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("[{elapsed_precise}] Stages: {pos}/{len} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
});

/// Pipeline stages shown while exporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Decoding source files into slots
    Decode,
    /// Drawing grid rows, then serializing and tagging the PNG
    Composite,
    /// Writing files to disk
    Write,
}

impl Stage {
    /// Every stage, in pipeline order
    pub const ALL: [Self; 3] = [Self::Decode, Self::Composite, Self::Write];

    /// Short label shown next to the bar
    pub const fn label(self) -> &'static str {
        match self {
            Self::Decode => "decode",
            Self::Composite => "composite",
            Self::Write => "write",
        }
    }
}

/// Coordinates an overall stage counter and one bar for the active stage
pub struct ProgressManager {
    multi_progress: MultiProgress,
    overall_bar: Option<ProgressBar>,
    stage_bar: Option<ProgressBar>,
    current: Option<Stage>,
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressManager {
    /// Create a new progress manager
    pub fn new() -> Self {
        Self {
            multi_progress: MultiProgress::new(),
            overall_bar: None,
            stage_bar: None,
            current: None,
        }
    }

    /// Show the overall stage counter
    pub fn initialize(&mut self) {
        let overall = ProgressBar::new(Stage::ALL.len() as u64);
        overall.set_style(OVERALL_STYLE.clone());
        overall.enable_steady_tick(Duration::from_millis(200));
        self.overall_bar = Some(self.multi_progress.add(overall));
    }

    /// Begin a stage with `steps` units of work
    pub fn start_stage(&mut self, stage: Stage, steps: u64) {
        if let Some(ref previous) = self.stage_bar {
            previous.finish_and_clear();
        }
        let bar = ProgressBar::new(steps);
        bar.set_style(STAGE_STYLE.clone());
        bar.set_prefix(stage.label());
        self.stage_bar = Some(self.multi_progress.add(bar));
        self.current = Some(stage);
        if let Some(ref overall) = self.overall_bar {
            overall.set_message(stage.label());
        }
    }

    /// Report absolute progress within the active stage
    pub fn set_position(&self, position: u64) {
        if let Some(ref bar) = self.stage_bar {
            bar.set_position(position);
        }
    }

    /// Attach a short message to the active stage
    pub fn set_message(&self, message: impl Into<String>) {
        if let Some(ref bar) = self.stage_bar {
            bar.set_message(message.into());
        }
    }

    /// Mark the active stage as done
    pub fn complete_stage(&mut self) {
        if let Some(bar) = self.stage_bar.take() {
            bar.finish_and_clear();
        }
        if self.current.take().is_some() {
            if let Some(ref overall) = self.overall_bar {
                overall.inc(1);
            }
        }
    }

    /// Stage currently in progress
    pub const fn current_stage(&self) -> Option<Stage> {
        self.current
    }

    /// Clean up all progress displays
    pub fn finish(&mut self) {
        self.complete_stage();
        if let Some(ref overall) = self.overall_bar {
            overall.finish_with_message("done");
        }
        let _ = self.multi_progress.clear();
    }

    /// Clear every bar after a failed run, leaving the stage count as is
    pub fn abandon(&mut self) {
        if let Some(bar) = self.stage_bar.take() {
            bar.finish_and_clear();
        }
        self.current = None;
        if let Some(ref overall) = self.overall_bar {
            overall.finish_and_clear();
        }
        let _ = self.multi_progress.clear();
    }

    /// Whether any bar is still drawing
    pub fn is_active(&self) -> bool {
        self.stage_bar.is_some()
            || self
                .overall_bar
                .as_ref()
                .is_some_and(|overall| !overall.is_finished())
    }
}
