use crate::prelude::*;

/// Weight of a cell outside the hexagonal footprint.
pub(crate) const MASKED: f32 = 1.0;
/// Weight of a cell inside the footprint.
pub(crate) const PASSABLE: f32 = 0.0;

/// Square mask of binary weights approximating a hexagonal dilation footprint.
///
/// Stored row-major; `weight(row, col)` is subtracted from the neighbour at
/// `(x + col - center, y + row - center)` during dilation, so only passable cells can win.
#[derive(Clone, Debug, PartialEq)]
pub struct StructuringElement {
    size: u32,
    weights: Vec<f32>,
}

impl StructuringElement {
    /// Rasterizes a hexagon of apothem-ish extent `size / 4` into a `size` x `size` grid.
    ///
    /// With `v = floor(size / 4)` and `h = v * sqrt(3)`, a cell at distance `(x, y)` from the
    /// center is passable when `x <= h`, `y <= 2v` and `2vh - vx - hy >= 0`.
    /// The size must be odd so the grid has a center cell and stays 180° symmetric.
    pub fn hexagon(size: u32) -> Result<Self> {
        if size == 0 || size % 2 == 0 {
            return Err(Error::InvalidKernelSize(size));
        }

        let v = (size / 4) as f32;
        let h = v * 3f32.sqrt();
        let mid = ((size - 1) / 2) as f32;

        let mut weights = Vec::with_capacity((size * size) as usize);
        for i in 0..size {
            for j in 0..size {
                let x = (i as f32 - mid).abs();
                let y = (j as f32 - mid).abs();

                let weight = if x > h || y > 2.0 * v {
                    MASKED
                } else if 2.0 * v * h - v * x - h * y >= 0.0 {
                    PASSABLE
                } else {
                    MASKED
                };
                weights.push(weight);
            }
        }

        Ok(Self { size, weights })
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn center(&self) -> u32 {
        self.size / 2
    }

    pub fn weights(&self) -> &[f32] {
        &self.weights
    }

    pub fn weight(&self, row: u32, col: u32) -> f32 {
        self.weights[(row * self.size + col) as usize]
    }

    pub fn passable_count(&self) -> usize {
        self.weights.iter().filter(|&&w| w == PASSABLE).count()
    }
}
