//! Drawing a tile plan onto an RGBA surface
//!
//! The compositor never clears or fills the surface: skipped cells, the
//! margin and any uncovered cell area keep whatever the caller put there,
//! which for a fresh surface is full transparency.

use image::RgbaImage;

use crate::math::interpolation::{Premultiplied, sample_bilinear};
use crate::math::transform::Rotation;
use crate::pattern::grid::{CellRect, GridSpec, TilePlan};
use crate::pattern::source::SourceImage;

/// Snapshot of the pattern settings used for one render
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PatternConfig {
    /// Grid dimensions and cell shape
    pub grid: GridSpec,
    /// Whether cells are turned by their deterministic angle
    pub rotation_enabled: bool,
    /// Seed for per-cell angles
    pub seed: u32,
}

impl Default for PatternConfig {
    fn default() -> Self {
        Self {
            grid: GridSpec::default(),
            rotation_enabled: true,
            seed: 0,
        }
    }
}

/// Draw the pattern for `images` onto `surface`
///
/// Holes in `images` are dropped before assignment, keeping slot order.
/// Nothing is drawn when no image is present.
pub fn composite(surface: &mut RgbaImage, config: &PatternConfig, images: &[Option<SourceImage>]) {
    composite_observed(surface, config, images, |_| {});
}

/// Same as [`composite`], reporting the number of finished rows after each row
pub fn composite_observed<F>(
    surface: &mut RgbaImage,
    config: &PatternConfig,
    images: &[Option<SourceImage>],
    mut on_row: F,
) where
    F: FnMut(u32),
{
    let present: Vec<&SourceImage> = images.iter().flatten().collect();
    if present.is_empty() {
        log::debug!("composite skipped: no images loaded");
        return;
    }

    let plan = TilePlan::build(surface.width(), surface.height(), config, present.len());
    let layout = *plan.layout();
    log::debug!(
        "composite {}x{} cells of {}x{} at ({}, {}), {} drawn from {} images",
        layout.cols,
        layout.rows,
        layout.cell_width,
        layout.cell_height,
        layout.start_x,
        layout.start_y,
        plan.drawn_count(),
        present.len()
    );

    for row in 0..layout.rows {
        for col in 0..layout.cols {
            let Some(tile) = plan.get(row, col) else {
                continue;
            };
            if let Some(image) = present.get(tile.image_index) {
                draw_cover(surface, image, layout.cell_rect(row, col), tile.angle);
            }
        }
        on_row(row + 1);
    }
}

/// Draw an image cover-fit into a cell, turned by `angle` about the cell center
///
/// The image is scaled to cover the cell, multiplied by its own scale, and
/// centered. Drawing is clipped to the cell so overflow is cropped. Images
/// with no area are skipped.
pub fn draw_cover(surface: &mut RgbaImage, image: &SourceImage, cell: CellRect, angle: f64) {
    if !image.is_drawable() || cell.is_empty() {
        return;
    }

    let source_width = f64::from(image.width());
    let source_height = f64::from(image.height());
    let ratio = (f64::from(cell.width) / source_width).max(f64::from(cell.height) / source_height)
        * image.scale_multiplier();
    let half_width = source_width * ratio / 2.0;
    let half_height = source_height * ratio / 2.0;
    let (center_x, center_y) = cell.center();
    let rotation = Rotation::new(angle);

    let x_start = cell.x.max(0);
    let y_start = cell.y.max(0);
    let x_end = (cell.x + i64::from(cell.width)).min(i64::from(surface.width()));
    let y_end = (cell.y + i64::from(cell.height)).min(i64::from(surface.height()));

    for y in y_start..y_end {
        for x in x_start..x_end {
            let (local_x, local_y) =
                rotation.unrotate(x as f64 + 0.5 - center_x, y as f64 + 0.5 - center_y);
            let u = (local_x + half_width) / ratio;
            let v = (local_y + half_height) / ratio;
            if u < 0.0 || v < 0.0 || u >= source_width || v >= source_height {
                continue;
            }
            let color = sample_bilinear(image.pixels(), u - 0.5, v - 0.5);
            blend_over(surface, x as u32, y as u32, color);
        }
    }
}

// Source-over with a premultiplied source onto a straight-alpha surface
fn blend_over(surface: &mut RgbaImage, x: u32, y: u32, source: Premultiplied) {
    let Some(pixel) = surface.get_pixel_mut_checked(x, y) else {
        return;
    };
    let [sr, sg, sb, sa] = source;
    if sa <= 0.0 {
        return;
    }

    let [dr, dg, db, da] = pixel.0.map(|channel| f64::from(channel) / 255.0);
    let keep = 1.0 - sa;
    let out_alpha = da.mul_add(keep, sa);
    if out_alpha <= 0.0 {
        pixel.0 = [0, 0, 0, 0];
        return;
    }

    let channel = |source: f64, destination: f64| {
        let premultiplied = (destination * da).mul_add(keep, source);
        to_byte(premultiplied / out_alpha)
    };
    pixel.0 = [
        channel(sr, dr),
        channel(sg, dg),
        channel(sb, db),
        to_byte(out_alpha),
    ];
}

fn to_byte(value: f64) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}
