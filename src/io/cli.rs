//! Command-line interface for compositing source images into a DPI-tagged PNG

use crate::io::configuration::{
    DEFAULT_DPI, DEFAULT_GRID_COLS, DEFAULT_GRID_ROWS, MAX_IMAGE_SLOTS, PREVIEW_SUFFIX,
};
use crate::io::error::{PatternError, Result, invalid_parameter};
use crate::io::image::{encode_png, load_source_image, write_png};
use crate::io::preset::ExportPreset;
use crate::io::progress::{ProgressManager, Stage};
use crate::pattern::compositor::PatternConfig;
use crate::pattern::export::{
    CeilingPolicy, ExportSpec, Unit, render_png, render_surface, suggested_filename,
};
use crate::pattern::grid::GridSpec;
use crate::pattern::source::ImageSlots;
use crate::png::resolution::inject_resolution;
use clap::Parser;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "tilepress")]
#[command(
    author,
    version,
    about = "Composite images into a diagonal tile pattern and export a DPI-tagged PNG"
)]
/// Command-line arguments for the pattern export tool
// CLI tools commonly need multiple boolean flags for various features and user preferences
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Source images, filling slots in order (at most 4)
    #[arg(value_name = "IMAGES")]
    pub images: Vec<PathBuf>,

    /// Number of grid columns (1-50)
    #[arg(short, long, default_value_t = DEFAULT_GRID_COLS)]
    pub cols: u32,

    /// Number of grid rows (1-50)
    #[arg(short, long, default_value_t = DEFAULT_GRID_ROWS)]
    pub rows: u32,

    /// Use square cells instead of filling width and height independently
    #[arg(long)]
    pub square: bool,

    /// Disable per-cell rotation
    #[arg(long)]
    pub no_rotate: bool,

    /// Seed for per-cell rotation angles (random when omitted)
    #[arg(short, long)]
    pub seed: Option<u32>,

    /// Output width in the chosen unit
    #[arg(short = 'W', long)]
    pub width: Option<f64>,

    /// Output height in the chosen unit
    #[arg(short = 'H', long)]
    pub height: Option<f64>,

    /// Unit of width and height
    #[arg(short, long, value_enum)]
    pub unit: Option<Unit>,

    /// Output resolution written to the PNG
    #[arg(short, long)]
    pub dpi: Option<u32>,

    /// Start from a named export size
    #[arg(short, long, value_enum)]
    pub preset: Option<ExportPreset>,

    /// Scale oversized output down to the pixel limit instead of failing
    #[arg(long)]
    pub downscale: bool,

    /// Per-slot image scale percentages (1-100), comma separated
    #[arg(long = "scale", value_delimiter = ',')]
    pub scales: Vec<u8>,

    /// Directory the PNG is written to
    #[arg(short, long, default_value = ".")]
    pub output_dir: PathBuf,

    /// Also write a screen-sized preview
    #[arg(long)]
    pub preview: bool,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Log debug details
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Default log filter for the chosen verbosity
    pub const fn log_filter(&self) -> &'static str {
        if self.verbose { "debug" } else { "warn" }
    }

    /// Export spec from the preset and explicit size flags, flags winning
    pub fn export_spec(&self) -> ExportSpec {
        let dpi = self.dpi.unwrap_or(DEFAULT_DPI);
        let mut spec = self.preset.map_or_else(
            || ExportSpec {
                dpi,
                ..ExportSpec::default()
            },
            |preset| preset.apply(dpi),
        );
        if let Some(width) = self.width {
            spec.width = width;
        }
        if let Some(height) = self.height {
            spec.height = height;
        }
        if let Some(unit) = self.unit {
            spec.unit = unit;
        }
        if let Some(dpi) = self.dpi {
            spec.dpi = dpi;
        }
        spec
    }

    /// Pattern settings for a render with `seed`
    pub fn pattern_config(&self, seed: u32) -> PatternConfig {
        PatternConfig {
            grid: GridSpec::new(self.cols, self.rows, !self.square),
            rotation_enabled: !self.no_rotate,
            seed,
        }
    }

    /// Behaviour when the output exceeds the pixel limit
    pub const fn ceiling_policy(&self) -> CeilingPolicy {
        if self.downscale {
            CeilingPolicy::Downscale
        } else {
            CeilingPolicy::Reject
        }
    }
}

/// Runs one export: decode, composite, encode, tag and write
pub struct ExportProcessor {
    cli: Cli,
    progress_manager: Option<ProgressManager>,
    slots: ImageSlots,
}

impl ExportProcessor {
    /// Create a new export processor with the given CLI arguments
    pub fn new(cli: Cli) -> Self {
        let progress_manager = cli.should_show_progress().then(ProgressManager::new);

        Self {
            cli,
            progress_manager,
            slots: ImageSlots::new(),
        }
    }

    /// Images loaded so far
    pub const fn slots(&self) -> &ImageSlots {
        &self.slots
    }

    /// Progress display, absent in quiet mode
    pub const fn progress(&self) -> Option<&ProgressManager> {
        self.progress_manager.as_ref()
    }

    /// Run the export and return the path of the written PNG
    ///
    /// Progress bars are cleared whether or not the export succeeds.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - More images are given than there are slots
    /// - No image could be loaded
    /// - The export size is invalid or over the pixel limit
    /// - Encoding or writing the output fails
    pub fn process(&mut self) -> Result<PathBuf> {
        let result = self.run();
        if result.is_err() {
            if let Some(ref mut pm) = self.progress_manager {
                pm.abandon();
            }
        }
        result
    }

    fn run(&mut self) -> Result<PathBuf> {
        if self.cli.images.len() > MAX_IMAGE_SLOTS {
            return Err(invalid_parameter(
                "images",
                &self.cli.images.len(),
                &format!("at most {MAX_IMAGE_SLOTS} images are supported"),
            ));
        }
        let spec = self.cli.export_spec();
        // Reject bad sizes before spending time on decoding
        let size = spec.resolve(self.cli.ceiling_policy())?;
        log::debug!("export size {}x{}", size.width, size.height);

        if let Some(ref mut pm) = self.progress_manager {
            pm.initialize();
        }

        self.load_slots();
        if self.slots.is_empty() {
            return Err(PatternError::NoImages);
        }
        self.apply_scales();

        let seed = self.cli.seed.unwrap_or_else(rand::random);
        log::info!("using seed {seed}");
        let config = self.cli.pattern_config(seed);

        if let Some(ref mut pm) = self.progress_manager {
            pm.start_stage(Stage::Composite, u64::from(config.grid.rows()));
        }
        let progress = self.progress_manager.as_ref();
        let exported = render_png(
            &spec,
            self.cli.ceiling_policy(),
            &config,
            self.slots.as_slice(),
            |rows_done| {
                if let Some(pm) = progress {
                    pm.set_position(u64::from(rows_done));
                }
            },
        )?;
        self.finish_stage();

        self.start_stage(Stage::Write, if self.cli.preview { 2 } else { 1 });
        let output_path = self.cli.output_dir.join(&exported.filename);
        write_png(&exported.bytes, &output_path)?;
        self.advance(1);

        if self.cli.preview {
            let preview_path = self.write_preview(&spec, &config)?;
            log::info!("preview written to '{}'", preview_path.display());
            self.advance(2);
        }
        self.finish_stage();

        if let Some(ref mut pm) = self.progress_manager {
            pm.finish();
        }

        Ok(output_path)
    }

    // Decode failures leave the slot empty and are reported as warnings
    #[allow(clippy::print_stderr)]
    fn load_slots(&mut self) {
        let paths = self.cli.images.clone();
        self.start_stage(Stage::Decode, paths.len() as u64);
        for (slot, path) in paths.iter().enumerate() {
            if let Some(ref pm) = self.progress_manager {
                pm.set_message(path.display().to_string());
            }
            match load_source_image(path) {
                Ok(image) => {
                    if let Err(err) = self.slots.set(slot, image) {
                        log::warn!("{err}");
                    }
                }
                Err(err) => {
                    log::warn!("skipping slot {slot}: {err}");
                    if !self.cli.quiet {
                        eprintln!("Warning: {err}");
                    }
                }
            }
            self.advance(slot as u64 + 1);
        }
        self.finish_stage();
    }

    fn apply_scales(&mut self) {
        for (slot, percent) in self.cli.scales.iter().enumerate() {
            if let Some(image) = self.slots.get_mut(slot) {
                image.set_scale_percent(*percent);
            }
        }
    }

    fn write_preview(&self, spec: &ExportSpec, config: &PatternConfig) -> Result<PathBuf> {
        let size = spec.preview_size();
        let surface = render_surface(size, config, self.slots.as_slice(), |_| {});
        let bytes = inject_resolution(&encode_png(&surface)?, spec.dpi);
        let path = self
            .cli
            .output_dir
            .join(Self::preview_name(&suggested_filename(size, spec.dpi)));
        write_png(&bytes, &path)?;
        Ok(path)
    }

    fn preview_name(filename: &str) -> String {
        let stem = Path::new(filename)
            .file_stem()
            .unwrap_or_default()
            .to_string_lossy();
        format!("{stem}{PREVIEW_SUFFIX}.png")
    }

    fn start_stage(&mut self, stage: Stage, steps: u64) {
        if let Some(ref mut pm) = self.progress_manager {
            pm.start_stage(stage, steps);
        }
    }

    fn advance(&self, position: u64) {
        if let Some(ref pm) = self.progress_manager {
            pm.set_position(position);
        }
    }

    fn finish_stage(&mut self) {
        if let Some(ref mut pm) = self.progress_manager {
            pm.complete_stage();
        }
    }
}
