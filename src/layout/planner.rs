use serde::{Deserialize, Serialize};

use crate::{
    foundation::core::{Placement, Size},
    foundation::error::{ShowcaseError, ShowcaseResult},
    foundation::math::Rng64,
};

/// Top-left inset of the first grid cell.
pub const GRID_ORIGIN: i64 = 50;

/// Top-left corner of grid cell `index` (row-major, `columns` cells per row).
///
/// Rows grow without bound; nothing here clips to a canvas.
pub fn grid_position(index: u64, spacing: i64, columns: u32) -> ShowcaseResult<(i64, i64)> {
    if columns == 0 {
        return Err(ShowcaseError::validation("grid columns must be > 0"));
    }
    let columns = u64::from(columns);
    let row = (index / columns) as i64;
    let col = (index % columns) as i64;
    Ok((GRID_ORIGIN + col * spacing, GRID_ORIGIN + row * spacing))
}

/// Uniform position inside the canvas margins plus a uniform rotation in `[0, 360]`.
pub fn random_position(
    canvas: Size,
    icon_size: u32,
    margin: i64,
    rng: &mut Rng64,
) -> ShowcaseResult<((i64, i64), u32)> {
    random_placement(canvas, icon_size, margin, 360, rng).map(|p| (p.position(), p.rotation_deg))
}

fn random_placement(
    canvas: Size,
    icon_size: u32,
    margin: i64,
    max_rotation_deg: u32,
    rng: &mut Rng64,
) -> ShowcaseResult<Placement> {
    let x_hi = i64::from(canvas.width) - i64::from(icon_size) - margin;
    let y_hi = i64::from(canvas.height) - i64::from(icon_size) - margin;
    if margin > x_hi || margin > y_hi {
        return Err(ShowcaseError::range(format!(
            "canvas {}x{} too small for icon {icon_size} with margin {margin}: x in [{margin}, {x_hi}], y in [{margin}, {y_hi}]",
            canvas.width, canvas.height
        )));
    }

    let x = rng.range_inclusive(margin, x_hi)?;
    let y = rng.range_inclusive(margin, y_hi)?;
    let deg = rng.range_u32(0, max_rotation_deg)?;
    Ok(Placement::new((x, y), deg))
}

/// Named placement strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum LayoutStrategy {
    /// Deterministic row-major grid with a random rotation per cell.
    Grid {
        spacing: i64,
        columns: u32,
        max_rotation_deg: u32,
    },
    /// Uniform random positions inside the canvas margins.
    Random { margin: i64, max_rotation_deg: u32 },
}

impl Default for LayoutStrategy {
    fn default() -> Self {
        Self::grid()
    }
}

impl LayoutStrategy {
    /// Grid of 5 columns, 100 px apart, rotations in `[0, 270]`.
    pub fn grid() -> Self {
        Self::Grid {
            spacing: 100,
            columns: 5,
            max_rotation_deg: 270,
        }
    }

    /// Random scatter with a 50 px margin, rotations in `[0, 360]`.
    pub fn random() -> Self {
        Self::Random {
            margin: 50,
            max_rotation_deg: 360,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Grid { .. } => "grid",
            Self::Random { .. } => "random",
        }
    }

    pub fn validate(&self) -> ShowcaseResult<()> {
        match *self {
            Self::Grid { columns, .. } if columns == 0 => {
                Err(ShowcaseError::validation("grid columns must be > 0"))
            }
            Self::Random { margin, .. } if margin < 0 => {
                Err(ShowcaseError::validation("random margin must be >= 0"))
            }
            _ => Ok(()),
        }
    }

    /// Generate `count` placements. All of them are produced before any drawing happens.
    #[tracing::instrument(skip(self, rng), fields(strategy = self.name()))]
    pub fn plan(
        &self,
        count: usize,
        canvas: Size,
        icon_size: u32,
        rng: &mut Rng64,
    ) -> ShowcaseResult<Vec<Placement>> {
        self.validate()?;
        let mut out = Vec::with_capacity(count);
        for i in 0..count {
            let placement = match *self {
                Self::Grid {
                    spacing,
                    columns,
                    max_rotation_deg,
                } => {
                    let pos = grid_position(i as u64, spacing, columns)?;
                    Placement::new(pos, rng.range_u32(0, max_rotation_deg)?)
                }
                Self::Random {
                    margin,
                    max_rotation_deg,
                } => random_placement(canvas, icon_size, margin, max_rotation_deg, rng)?,
            };
            out.push(placement);
        }
        tracing::debug!(count = out.len(), "planned placements");
        Ok(out)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/planner.rs"]
mod tests;
