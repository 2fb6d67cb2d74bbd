//! Sample grid over a geographic bounding box.
//!
//! A [`SampleGrid`] divides a bbox into `rows × cols` equal cells and yields
//! the center of each cell, row-major, starting in the north-west corner.
//! Centers sit half a cell away from every grid line, so no sample ever lands
//! on the bbox edge.

use crate::bbox::BoundingBox;
use crate::error::{FieldError, FieldResult};
use crate::geo::GeoPoint;

/// Immutable sampling configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampleGrid {
    rows: usize,
    cols: usize,
    bbox: BoundingBox,
}

/// One cell of a sample grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridCell {
    pub row: usize,
    pub col: usize,
    pub center: GeoPoint,
}

impl SampleGrid {
    /// Create a grid, rejecting zero rows/cols and invalid boxes.
    pub fn new(rows: usize, cols: usize, bbox: BoundingBox) -> FieldResult<Self> {
        if rows == 0 || cols == 0 {
            return Err(FieldError::InvalidGrid(format!(
                "grid needs at least one row and column, got {}x{}",
                rows, cols
            )));
        }
        bbox.validate()?;
        Ok(Self { rows, cols, bbox })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn bbox(&self) -> &BoundingBox {
        &self.bbox
    }

    /// Total number of cells.
    pub fn len(&self) -> usize {
        self.rows * self.cols
    }

    /// Always false for a constructed grid; present for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Cell height in degrees of latitude.
    pub fn lat_step(&self) -> f64 {
        self.bbox.lat_span() / self.rows as f64
    }

    /// Cell width in degrees of longitude.
    pub fn lon_step(&self) -> f64 {
        self.bbox.lon_span() / self.cols as f64
    }

    /// Center of the cell at `(row, col)`. Row 0 is the northern edge.
    pub fn cell_center(&self, row: usize, col: usize) -> GeoPoint {
        let lat_step = self.lat_step();
        let lon_step = self.lon_step();
        GeoPoint::new(
            self.bbox.lat_max - row as f64 * lat_step - lat_step / 2.0,
            self.bbox.lon_min + col as f64 * lon_step + lon_step / 2.0,
        )
    }

    /// Iterate over every cell, row-major.
    pub fn cells(&self) -> impl Iterator<Item = GridCell> + '_ {
        (0..self.rows).flat_map(move |row| {
            (0..self.cols).map(move |col| GridCell {
                row,
                col,
                center: self.cell_center(row, col),
            })
        })
    }

    /// All cell centers, row-major.
    pub fn centers(&self) -> Vec<GeoPoint> {
        self.cells().map(|cell| cell.center).collect()
    }
}

/// Cell centers of a `rows × cols` grid over `bbox`, row-major.
///
/// Zero rows or columns yield an empty list.
pub fn generate(bbox: &BoundingBox, rows: usize, cols: usize) -> Vec<GeoPoint> {
    if rows == 0 || cols == 0 {
        return Vec::new();
    }
    SampleGrid {
        rows,
        cols,
        bbox: *bbox,
    }
    .centers()
}
