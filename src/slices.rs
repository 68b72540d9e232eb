use crate::error::Result;
use crate::grid::{Coordinate, Grid};
use image::{GrayImage, Luma};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Darkest shade used for coded cells, so low values stay visible against uncoded black
const MIN_CODED_SHADE: f64 = 48.0;

/// Shade for a coded value within `[lo, hi]`. A flat range maps to full white.
fn shade(value: f64, lo: f64, hi: f64) -> u8 {
    let t = if hi > lo { (value - lo) / (hi - lo) } else { 1.0 };
    (MIN_CODED_SHADE + t.clamp(0.0, 1.0) * (255.0 - MIN_CODED_SHADE)).round() as u8
}

/// Render one z level: x across, y down. Uncoded cells are black.
pub fn render_level(grid: &Grid, z: usize, range: (f64, f64)) -> GrayImage {
    let dims = grid.dims();
    let (lo, hi) = range;
    let mut img = GrayImage::new(dims.x as u32, dims.y as u32);
    for y in 0..dims.y {
        for x in 0..dims.x {
            let pixel = match grid.get(Coordinate::new(x, y, z)).coded_value() {
                Some(v) => shade(v, lo, hi),
                None => 0,
            };
            img.put_pixel(x as u32, y as u32, Luma([pixel]));
        }
    }
    img
}

/// Write `level_NNN.png` (1-indexed) for every z level into `dir`
pub fn export_slices(grid: &Grid, dir: &Path) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir)?;
    let range = grid.coded_range().unwrap_or((0.0, 0.0));
    let dims = grid.dims();
    let width = dims.z.to_string().len().max(3);

    let mut written = Vec::with_capacity(dims.z);
    for z in 0..dims.z {
        let path = dir.join(format!("level_{:0width$}.png", z + 1, width = width));
        render_level(grid, z, range).save(&path)?;
        written.push(path);
    }

    info!(dir = %dir.display(), levels = written.len(), "Wrote slice images");
    Ok(written)
}
