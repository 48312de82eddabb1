//! Uniform-grid atlas geometry.
//!
//! Turns a sheet size and a cell size into normalized texture offsets, one per
//! cell, plus the UV scale that shows exactly one cell on a quad.

use glam::Vec2;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SheetError};

/// How strictly a sheet must tile into cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TilingPolicy {
    /// Sheet dimensions must be exact multiples of the cell dimensions.
    #[default]
    Exact,
    /// Exact tiling, and the column and row counts must both be powers of two.
    /// Needed by backends that pad textures up to power-of-two sizes.
    PowerOfTwo,
}

impl TilingPolicy {
    fn accepts(self, columns: u32, rows: u32) -> bool {
        match self {
            TilingPolicy::Exact => true,
            TilingPolicy::PowerOfTwo => columns.is_power_of_two() && rows.is_power_of_two(),
        }
    }
}

/// Validate that `sheet` cuts into `cell` sized pieces under `policy`.
/// Returns (columns, rows).
pub(crate) fn tile_counts(
    name: &str,
    sheet: [u32; 2],
    cell: [u32; 2],
    policy: TilingPolicy,
) -> Result<(u32, u32)> {
    let invalid = || SheetError::InvalidSpriteSize {
        name: name.to_string(),
        sheet,
        cell,
    };

    if cell[0] == 0 || cell[1] == 0 {
        return Err(invalid());
    }
    if sheet[0] % cell[0] != 0 || sheet[1] % cell[1] != 0 {
        return Err(invalid());
    }

    let columns = sheet[0] / cell[0];
    let rows = sheet[1] / cell[1];
    if columns == 0 || rows == 0 || !policy.accepts(columns, rows) {
        return Err(invalid());
    }
    Ok((columns, rows))
}

/// Resolved layout of a spritesheet.
///
/// Cell 0 is the top-left cell of the image; indices run left to right,
/// then top to bottom. Offsets live in bottom-left-origin UV space.
#[derive(Debug, Clone, PartialEq)]
pub struct AtlasGrid {
    name: String,
    sheet: [u32; 2],
    cell: [u32; 2],
    columns: u32,
    rows: u32,
    step: Vec2,
    offsets: Vec<Vec2>,
}

impl AtlasGrid {
    /// Resolve the grid for a `sheet` pixel size cut into `cell` pixel sized sprites.
    pub fn resolve(
        name: impl Into<String>,
        sheet: [u32; 2],
        cell: [u32; 2],
        policy: TilingPolicy,
    ) -> Result<Self> {
        let name = name.into();
        let (columns, rows) = tile_counts(&name, sheet, cell, policy)?;

        let step = Vec2::new(1.0 / columns as f32, 1.0 / rows as f32);

        // UV rows grow upwards, image rows grow downwards: walk rows backwards.
        let offsets: Vec<Vec2> = (0..rows)
            .rev()
            .flat_map(|row| {
                (0..columns).map(move |col| Vec2::new(col as f32 * step.x, row as f32 * step.y))
            })
            .collect();

        debug!(
            "{name}: {}x{} sheet resolved into {columns}x{rows} cells, step {step}",
            sheet[0], sheet[1]
        );

        Ok(Self {
            name,
            sheet,
            cell,
            columns,
            rows,
            step,
            offsets,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Sheet size in pixels.
    pub fn sheet_size(&self) -> [u32; 2] {
        self.sheet
    }

    /// Cell size in pixels.
    pub fn cell_size(&self) -> [u32; 2] {
        self.cell
    }

    pub fn columns(&self) -> u32 {
        self.columns
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    /// Normalized size of one cell (1/columns, 1/rows). Use as the UV scale.
    pub fn step(&self) -> Vec2 {
        self.step
    }

    /// All cell offsets, in cell index order.
    pub fn offsets(&self) -> &[Vec2] {
        &self.offsets
    }

    /// UV offset of a cell, or None if out of range.
    pub fn offset(&self, cell: usize) -> Option<Vec2> {
        self.offsets.get(cell).copied()
    }

    /// Cell index of the (column, row) position, counting rows from the top.
    pub fn cell_index(&self, column: u32, row: u32) -> Option<usize> {
        if column >= self.columns || row >= self.rows {
            return None;
        }
        Some((row * self.columns + column) as usize)
    }

    /// Number of cells.
    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }
}
