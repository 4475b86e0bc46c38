//! Built-in export presets

use clap::ValueEnum;

use crate::io::configuration::DEFAULT_DPI;
use crate::pattern::export::{ExportSpec, Unit};

/// Named export sizes selectable from the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportPreset {
    /// A4 portrait, 210x297 mm at 300 dpi
    #[value(name = "a4-300")]
    A4At300,
    /// 1024x1024 pixels, keeping the current DPI
    #[value(name = "square-1024")]
    Square1024,
    /// 2048x2048 pixels, keeping the current DPI
    #[value(name = "square-2048")]
    Square2048,
}

impl ExportPreset {
    /// Export spec for this preset, given the DPI currently selected
    pub const fn apply(self, current_dpi: u32) -> ExportSpec {
        match self {
            Self::A4At300 => ExportSpec {
                width: 210.0,
                height: 297.0,
                unit: Unit::Millimeter,
                dpi: DEFAULT_DPI,
            },
            Self::Square1024 => square(1024.0, current_dpi),
            Self::Square2048 => square(2048.0, current_dpi),
        }
    }
}

const fn square(side: f64, dpi: u32) -> ExportSpec {
    ExportSpec {
        width: side,
        height: side,
        unit: Unit::Pixel,
        dpi,
    }
}
