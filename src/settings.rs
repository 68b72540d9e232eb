use crate::deposit::DepositType;
use crate::error::{ModelError, Result};
use crate::grid::{Coordinate, Dimensions};
use serde::{Deserialize, Serialize};

/// How the acceptance probability shrinks after each rejection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DecayRule {
    /// Scale by the remaining fraction of the budget
    #[default]
    Proportional,
    /// Integer division of the remaining budget by the total, so the chance
    /// collapses to zero on the first rejection below the budget
    Truncated,
}

impl DecayRule {
    pub fn name(&self) -> &str {
        match self {
            DecayRule::Proportional => "Proportional",
            DecayRule::Truncated => "Truncated",
        }
    }

    /// Multiplier applied to the acceptance probability on rejection
    pub fn factor(&self, max_blocks: usize, blocks_coded: usize) -> f64 {
        let remaining = max_blocks as i64 - blocks_coded as i64;
        match self {
            DecayRule::Proportional => remaining as f64 / max_blocks as f64,
            DecayRule::Truncated => (remaining / max_blocks as i64) as f64,
        }
    }
}

/// Axis the default deposit boosts acceptance along, drawn once per wave
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub fn from_index(i: usize) -> Self {
        match i {
            0 => Axis::X,
            1 => Axis::Y,
            _ => Axis::Z,
        }
    }

    /// Whether a neighbor offset moves along this axis
    pub fn moves_along(&self, dx: i32, dy: i32, dz: i32) -> bool {
        match self {
            Axis::X => dx != 0,
            Axis::Y => dy != 0,
            Axis::Z => dz != 0,
        }
    }
}

/// Everything the growth needs besides the RNG seed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelParams {
    /// Grid size per axis (all > 0)
    pub dims: Dimensions,
    /// Mean of coded values
    pub average: f64,
    /// Standard deviation of coded values (>= 0)
    pub stdev: f64,
    /// Budget of coded cells including the seed (> 0)
    pub max_blocks: usize,
    /// Unchecked in-box neighbors are accepted outright until this many cells are coded
    #[serde(default)]
    pub min_blocks: Option<usize>,
    /// Acceptance probability for the first wave
    pub code_chance: f64,
    /// Added to the threshold for offsets the deposit type favours
    pub direction_boost: f64,
    /// Which offsets get the boost, and when that set is redrawn
    #[serde(default)]
    pub deposit: DepositType,
    /// Decay applied to the acceptance probability on rejection
    pub decay: DecayRule,
    /// Fixed 0-indexed seed cell; random placement when None
    pub seed_location: Option<Coordinate>,
}

impl Default for ModelParams {
    fn default() -> Self {
        Self {
            dims: Dimensions::new(20, 20, 20),
            average: 3.0,
            stdev: 0.25,
            max_blocks: 100,
            min_blocks: None,
            code_chance: 1.0,
            direction_boost: 0.1,
            deposit: DepositType::default(),
            decay: DecayRule::default(),
            seed_location: None,
        }
    }
}

impl ModelParams {
    /// Reject configurations the growth cannot run with.
    /// Must pass before any grid is allocated.
    pub fn validate(&self) -> Result<()> {
        let Dimensions { x, y, z } = self.dims;
        if x == 0 || y == 0 || z == 0 {
            return Err(ModelError::InvalidConfig(format!(
                "grid dimensions must be positive, got {}x{}x{}",
                x, y, z
            )));
        }
        if x.checked_mul(y).and_then(|n| n.checked_mul(z)).is_none() {
            return Err(ModelError::InvalidConfig(format!(
                "grid {}x{}x{} has too many cells",
                x, y, z
            )));
        }
        if self.max_blocks == 0 {
            return Err(ModelError::InvalidConfig(
                "maxblocks must be positive".to_string(),
            ));
        }
        if let Some(min) = self.min_blocks {
            if min > self.max_blocks {
                return Err(ModelError::InvalidConfig(format!(
                    "minblocks {} exceeds maxblocks {}",
                    min, self.max_blocks
                )));
            }
        }
        if !self.average.is_finite() {
            return Err(ModelError::InvalidConfig(format!(
                "average must be finite, got {}",
                self.average
            )));
        }
        if !self.stdev.is_finite() || self.stdev < 0.0 {
            return Err(ModelError::InvalidConfig(format!(
                "stdev must be finite and non-negative, got {}",
                self.stdev
            )));
        }
        if !self.code_chance.is_finite() {
            return Err(ModelError::InvalidConfig(format!(
                "code chance must be finite, got {}",
                self.code_chance
            )));
        }
        if !self.direction_boost.is_finite() {
            return Err(ModelError::InvalidConfig(format!(
                "direction boost must be finite, got {}",
                self.direction_boost
            )));
        }
        if let Some(loc) = self.seed_location {
            if !self.dims.contains(loc) {
                let (sx, sy, sz) = loc.one_indexed();
                return Err(ModelError::InvalidConfig(format!(
                    "seed location {}, {}, {} outside {}x{}x{} grid",
                    sx, sy, sz, x, y, z
                )));
            }
        }
        Ok(())
    }
}
