//! Grid specification, cell geometry and the per-cell tile plan
//!
//! Cells are laid out inside the surface minus a fixed margin. Integer
//! flooring can leave unfilled space, so the tiled block is centered on the
//! full surface by half the remainder.

use ndarray::Array2;

use crate::io::configuration::{
    CELL_MARGIN, DEFAULT_GRID_COLS, DEFAULT_GRID_ROWS, MAX_GRID_DIMENSION, MIN_GRID_DIMENSION,
};
use crate::pattern::assignment::{TileAssignment, assign};
use crate::pattern::compositor::PatternConfig;

/// Column and row counts plus the cell shape
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridSpec {
    cols: u32,
    rows: u32,
    rect_cells: bool,
}

impl Default for GridSpec {
    fn default() -> Self {
        Self::new(DEFAULT_GRID_COLS, DEFAULT_GRID_ROWS, true)
    }
}

impl GridSpec {
    /// Create a grid, clamping both counts to 1..=50
    ///
    /// With `rect_cells` each cell fills its share of the width and height
    /// independently; otherwise cells are square and sized by the tighter axis.
    pub fn new(cols: u32, rows: u32, rect_cells: bool) -> Self {
        Self {
            cols: cols.clamp(MIN_GRID_DIMENSION, MAX_GRID_DIMENSION),
            rows: rows.clamp(MIN_GRID_DIMENSION, MAX_GRID_DIMENSION),
            rect_cells,
        }
    }

    /// Number of columns
    pub const fn cols(&self) -> u32 {
        self.cols
    }

    /// Number of rows
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Whether cells stretch independently along each axis
    pub const fn rect_cells(&self) -> bool {
        self.rect_cells
    }
}

/// Pixel rectangle of one cell in surface coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRect {
    /// Left edge, may be negative on tiny surfaces
    pub x: i64,
    /// Top edge, may be negative on tiny surfaces
    pub y: i64,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl CellRect {
    /// Center point of the rectangle
    pub fn center(&self) -> (f64, f64) {
        (
            self.x as f64 + f64::from(self.width) / 2.0,
            self.y as f64 + f64::from(self.height) / 2.0,
        )
    }

    /// Whether the rectangle has no area
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Cell size and origin of a grid on a particular surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellLayout {
    /// Width of every cell
    pub cell_width: u32,
    /// Height of every cell
    pub cell_height: u32,
    /// Left edge of the tiled block
    pub start_x: i64,
    /// Top edge of the tiled block
    pub start_y: i64,
    /// Number of columns
    pub cols: u32,
    /// Number of rows
    pub rows: u32,
}

impl CellLayout {
    /// Lay a grid out on a surface of the given size
    pub fn compute(surface_width: u32, surface_height: u32, grid: &GridSpec) -> Self {
        let available_width = surface_width.saturating_sub(CELL_MARGIN * 2).max(1);
        let available_height = surface_height.saturating_sub(CELL_MARGIN * 2).max(1);

        let fill_width = available_width / grid.cols();
        let fill_height = available_height / grid.rows();
        let (cell_width, cell_height) = if grid.rect_cells() {
            (fill_width, fill_height)
        } else {
            let side = fill_width.min(fill_height);
            (side, side)
        };

        let total_width = i64::from(grid.cols()) * i64::from(cell_width);
        let total_height = i64::from(grid.rows()) * i64::from(cell_height);

        Self {
            cell_width,
            cell_height,
            start_x: (i64::from(surface_width) - total_width).div_euclid(2),
            start_y: (i64::from(surface_height) - total_height).div_euclid(2),
            cols: grid.cols(),
            rows: grid.rows(),
        }
    }

    /// Width of the whole tiled block
    pub fn total_width(&self) -> u64 {
        u64::from(self.cols) * u64::from(self.cell_width)
    }

    /// Height of the whole tiled block
    pub fn total_height(&self) -> u64 {
        u64::from(self.rows) * u64::from(self.cell_height)
    }

    /// Rectangle of the cell at `row`, `col`
    pub fn cell_rect(&self, row: u32, col: u32) -> CellRect {
        CellRect {
            x: self.start_x + i64::from(col) * i64::from(self.cell_width),
            y: self.start_y + i64::from(row) * i64::from(self.cell_height),
            width: self.cell_width,
            height: self.cell_height,
        }
    }
}

/// Layout plus the assignment of every cell, indexed by `[row, col]`
#[derive(Debug, Clone)]
pub struct TilePlan {
    layout: CellLayout,
    cells: Array2<Option<TileAssignment>>,
}

impl TilePlan {
    /// Plan a surface for `image_count` loaded images
    pub fn build(
        surface_width: u32,
        surface_height: u32,
        config: &PatternConfig,
        image_count: usize,
    ) -> Self {
        let layout = CellLayout::compute(surface_width, surface_height, &config.grid);
        let cells = Array2::from_shape_fn(
            (layout.rows as usize, layout.cols as usize),
            |(row, col)| {
                assign(
                    row as u32,
                    col as u32,
                    image_count,
                    config.rotation_enabled,
                    config.seed,
                )
            },
        );
        Self { layout, cells }
    }

    /// Geometry the plan was built for
    pub const fn layout(&self) -> &CellLayout {
        &self.layout
    }

    /// Assignment of one cell, `None` for skipped or out-of-range cells
    pub fn get(&self, row: u32, col: u32) -> Option<&TileAssignment> {
        self.cells
            .get([row as usize, col as usize])
            .and_then(Option::as_ref)
    }

    /// Per-cell assignments
    pub const fn cells(&self) -> &Array2<Option<TileAssignment>> {
        &self.cells
    }

    /// Number of cells that draw an image
    pub fn drawn_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }
}
