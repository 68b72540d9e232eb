use crate::grid::Coordinate;

/// Read-only result of a finished growth run
#[derive(Debug, Clone, PartialEq)]
pub struct ModelSummary {
    /// RNG seed the run used
    pub rng_seed: u64,
    /// 0-indexed seed cell; use `Coordinate`'s Display for the 1-indexed form
    pub seed: Coordinate,
    pub seed_value: f64,
    pub blocks_checked: usize,
    pub blocks_coded: usize,
    /// Waves started, including one cut off by the budget
    pub waves: usize,
}

impl ModelSummary {
    /// Lines for the seed section of the report
    pub fn report_lines(&self) -> Vec<String> {
        vec![
            format!("Seed location: {}", self.seed),
            format!("Seed value: {:.6}", self.seed_value),
            format!("Blocks checked: {}", self.blocks_checked),
            format!("Blocks coded: {}", self.blocks_coded),
            format!("Waves: {}", self.waves),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_lines() {
        let summary = ModelSummary {
            rng_seed: 42,
            seed: Coordinate::new(0, 1, 2),
            seed_value: 3.125,
            blocks_checked: 30,
            blocks_coded: 5,
            waves: 2,
        };
        let lines = summary.report_lines();
        assert_eq!(lines[0], "Seed location: 1, 2, 3");
        assert_eq!(lines[1], "Seed value: 3.125000");
        assert_eq!(lines[2], "Blocks checked: 30");
        assert_eq!(lines[3], "Blocks coded: 5");
        assert_eq!(lines[4], "Waves: 2");
    }
}
