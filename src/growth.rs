use crate::bounds::BoundsPolicy;
use crate::deposit::{Bias, DepositType};
use crate::error::Result;
use crate::grid::{Cell, Coordinate, Grid};
use crate::random::RandomSource;
use crate::settings::ModelParams;
use crate::summary::ModelSummary;
use tracing::{debug, info, trace};

/// Mutable counters and RNG owned by a single run
struct RunState {
    rng: RandomSource,
    rng_seed: u64,
    seed: Coordinate,
    seed_value: f64,
    blocks_coded: usize,
    blocks_checked: usize,
    max_blocks: usize,
    code_chance: f64,
    waves: usize,
}

/// How a wave ended
enum WaveOutcome {
    /// Every frontier cell was expanded; these cells were newly coded
    Completed(Vec<Coordinate>),
    /// The budget was reached mid-wave
    BudgetExhausted,
}

/// A finished block model
#[derive(Debug, Clone)]
pub struct GeneratedModel {
    pub grid: Grid,
    pub bounds: BoundsPolicy,
    pub summary: ModelSummary,
}

/// Grows one deposit outward from a single seed cell.
///
/// Each wave evaluates the 26 neighbors of every cell coded in the previous wave.
/// A neighbor is coded when it is unchecked and a uniform draw falls under the
/// current acceptance probability, plus the boost for offsets the deposit's bias
/// favours. The default deposit draws a new preferential axis every wave. Every
/// rejection decays the probability. Growth stops when a wave codes nothing or the
/// moment the coded count reaches the budget.
pub struct SeedGrowthEngine {
    grid: Grid,
    bounds: BoundsPolicy,
    params: ModelParams,
    state: RunState,
    bias: Bias,
    frontier: Vec<Coordinate>,
}

impl SeedGrowthEngine {
    /// Validate params, allocate the grid and place the seed cell
    pub fn new(params: ModelParams, rng_seed: u64) -> Result<Self> {
        params.validate()?;

        let mut grid = Grid::new(params.dims);
        let bounds = BoundsPolicy::new(params.dims);
        let mut rng = RandomSource::new(rng_seed);

        let seed = match params.seed_location {
            Some(loc) => loc,
            None => place_seed(&mut rng, &bounds),
        };
        let seed_value = rng.draw_normal(params.average, params.stdev);
        grid.set(seed, Cell::coded(seed_value));

        let bias = if params.deposit.redraws_per_wave() {
            Bias::None
        } else {
            params.deposit.draw_bias(&mut rng)
        };

        info!(
            seed = %seed,
            seed_value,
            deposit = params.deposit.name(),
            growable_cells = bounds.volume(),
            "Placed seed"
        );

        let state = RunState {
            rng,
            rng_seed,
            seed,
            seed_value,
            blocks_coded: 1,
            blocks_checked: 1,
            max_blocks: params.max_blocks,
            code_chance: params.code_chance,
            waves: 0,
        };

        Ok(Self {
            grid,
            bounds,
            params,
            state,
            bias,
            frontier: vec![seed],
        })
    }

    /// Run one wave. Returns false once growth has terminated.
    pub fn advance_wave(&mut self) -> bool {
        if self.frontier.is_empty() {
            return false;
        }

        self.state.waves += 1;
        if self.params.deposit.redraws_per_wave() {
            self.bias = self.params.deposit.draw_bias(&mut self.state.rng);
        }
        let frontier = std::mem::take(&mut self.frontier);

        match self.expand_wave(&frontier) {
            WaveOutcome::Completed(next) => {
                debug!(
                    wave = self.state.waves,
                    bias = ?self.bias,
                    frontier = frontier.len(),
                    coded = next.len(),
                    code_chance = self.state.code_chance,
                    "Wave complete"
                );
                self.frontier = next;
                !self.frontier.is_empty()
            }
            WaveOutcome::BudgetExhausted => {
                trace!(wave = self.state.waves, "Budget reached mid-wave");
                false
            }
        }
    }

    /// Run waves until growth terminates
    pub fn grow(&mut self) {
        while self.advance_wave() {}
        info!(
            blocks_coded = self.state.blocks_coded,
            blocks_checked = self.state.blocks_checked,
            waves = self.state.waves,
            "Growth finished"
        );
    }

    fn expand_wave(&mut self, frontier: &[Coordinate]) -> WaveOutcome {
        let mut next = Vec::new();
        for &cell in frontier {
            for dx in -1..=1 {
                for dy in -1..=1 {
                    for dz in -1..=1 {
                        if self.state.blocks_coded >= self.state.max_blocks {
                            return WaveOutcome::BudgetExhausted;
                        }
                        if dx == 0 && dy == 0 && dz == 0 {
                            continue;
                        }
                        if let Some(coded) = self.evaluate_neighbor(cell, dx, dy, dz) {
                            next.push(coded);
                        }
                    }
                }
            }
        }
        WaveOutcome::Completed(next)
    }

    /// Evaluate one neighbor; returns it if it was newly coded
    fn evaluate_neighbor(
        &mut self,
        cell: Coordinate,
        dx: i32,
        dy: i32,
        dz: i32,
    ) -> Option<Coordinate> {
        let state = &mut self.state;

        let neighbor = match cell.offset(dx, dy, dz) {
            Some(n) if self.bounds.is_growable(n) => n,
            _ => {
                state.blocks_checked += 1;
                return None;
            }
        };

        let boost = if self.bias.favours(dx, dy, dz) {
            self.params.direction_boost
        } else {
            0.0
        };
        let below_minimum = self
            .params
            .min_blocks
            .is_some_and(|min| state.blocks_coded < min);

        // The uniform draw is only taken for unchecked neighbors
        let accepted = !self.grid.get(neighbor).checked
            && (state.rng.draw_uniform01() <= state.code_chance + boost || below_minimum);

        if accepted {
            let value = state.rng.draw_normal(self.params.average, self.params.stdev);
            self.grid.set(neighbor, Cell::coded(value));
            state.blocks_coded += 1;
            state.blocks_checked += 1;
            if self.params.deposit == DepositType::Vein
                && state.rng.draw_uniform01() > DepositType::VEIN_TURN_THRESHOLD
            {
                self.bias = self.params.deposit.draw_bias(&mut state.rng);
                trace!(bias = ?self.bias, "Vein turned");
            }
            Some(neighbor)
        } else {
            state.code_chance *= self
                .params
                .decay
                .factor(state.max_blocks, state.blocks_coded);
            self.grid.get_mut(neighbor).checked = true;
            state.blocks_checked += 1;
            None
        }
    }

    /// Current acceptance probability
    #[cfg(test)]
    fn code_chance(&self) -> f64 {
        self.state.code_chance
    }

    #[cfg(test)]
    fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn summary(&self) -> ModelSummary {
        ModelSummary {
            rng_seed: self.state.rng_seed,
            seed: self.state.seed,
            seed_value: self.state.seed_value,
            blocks_checked: self.state.blocks_checked,
            blocks_coded: self.state.blocks_coded,
            waves: self.state.waves,
        }
    }

    pub fn into_model(self) -> GeneratedModel {
        let summary = self.summary();
        GeneratedModel {
            grid: self.grid,
            bounds: self.bounds,
            summary,
        }
    }
}

/// Pick the seed cell as `lower + uniform(0..upper)` per axis.
///
/// This is additive rather than a draw inside `[lower, upper)`, so the seed can land
/// up to `lower` cells past the growable box. It always stays inside the grid.
fn place_seed(rng: &mut RandomSource, bounds: &BoundsPolicy) -> Coordinate {
    let x = bounds.lower.x + rng.draw_index(bounds.upper.x);
    let y = bounds.lower.y + rng.draw_index(bounds.upper.y);
    let z = bounds.lower.z + rng.draw_index(bounds.upper.z);
    Coordinate::new(x, y, z)
}

/// Validate, grow and return the finished model
pub fn generate(params: ModelParams, rng_seed: u64) -> Result<GeneratedModel> {
    let mut engine = SeedGrowthEngine::new(params, rng_seed)?;
    engine.grow();
    Ok(engine.into_model())
}
