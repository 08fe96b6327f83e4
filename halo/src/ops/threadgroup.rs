use crate::prelude::*;

/// Side used when no candidate fits the hardware constraints.
const FALLBACK_SIDE: u32 = 16;

/// Side of a square threadgroup for the composite kernel.
///
/// Scans `s` in `1..=floor(sqrt(max_threads))` and keeps the last one whose group size `s * s`
/// is a whole number of SIMD lanes (`execution_width`). Falls back to 16 when nothing
/// qualifies or the inputs are zero.
pub fn threadgroup_side(max_threads: u32, execution_width: u32) -> u32 {
    if max_threads == 0 || execution_width == 0 {
        return FALLBACK_SIDE;
    }

    let limit = max_threads.isqrt();
    let mut side = FALLBACK_SIDE;
    for s in 1..=limit {
        if (s * s) % execution_width == 0 {
            side = s;
        }
    }

    side
}

/// Threadgroup dimensions of the composite kernel, fixed when its pipeline is built.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ThreadgroupGeometry {
    pub width: u32,
    pub height: u32,
    pub depth: u32,
}

impl ThreadgroupGeometry {
    pub fn square(side: u32) -> Self {
        Self {
            width: side,
            height: side,
            depth: 1,
        }
    }

    pub fn for_gpu(gpu: &Gpu) -> Self {
        let side = threadgroup_side(gpu.max_threads_per_group(), gpu.thread_execution_width());
        tracing::info!(
            "Composite threadgroup {}x{} (max threads {}, execution width {})",
            side,
            side,
            gpu.max_threads_per_group(),
            gpu.thread_execution_width()
        );
        Self::square(side)
    }

    pub fn threads(&self) -> u32 {
        self.width * self.height * self.depth
    }

    /// Number of groups covering a `width` x `height` grid; partial edge groups are included.
    pub fn workgroups(&self, width: u32, height: u32) -> [u32; 3] {
        [width.div_ceil(self.width), height.div_ceil(self.height), 1]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typical_desktop_limits() {
        assert_eq!(threadgroup_side(1024, 32), 32);
        assert_eq!(threadgroup_side(256, 32), 16);
        assert_eq!(threadgroup_side(1024, 64), 32);
    }

    #[test]
    fn test_falls_back_when_nothing_fits() {
        assert_eq!(threadgroup_side(1, 32), 16);
        assert_eq!(threadgroup_side(0, 32), 16);
        assert_eq!(threadgroup_side(1024, 0), 16);
    }

    #[test]
    fn test_unit_execution_width_takes_largest_side() {
        assert_eq!(threadgroup_side(1000, 1), 31);
        assert_eq!(threadgroup_side(1024, 1), 32);
    }

    #[test]
    fn test_result_respects_constraints() {
        for max_threads in [1, 2, 16, 64, 100, 256, 300, 512, 768, 1024, 1536] {
            for width in [1, 4, 8, 16, 32, 64] {
                let side = threadgroup_side(max_threads, width);
                let fits = side * side <= max_threads && (side * side) % width == 0;
                assert!(
                    fits || side == FALLBACK_SIDE,
                    "max {max_threads} width {width} gave {side}"
                );
            }
        }
    }

    #[test]
    fn test_workgroups_cover_partial_tiles() {
        let geometry = ThreadgroupGeometry::square(32);
        assert_eq!(geometry.threads(), 1024);
        assert_eq!(geometry.workgroups(640, 640), [20, 20, 1]);
        assert_eq!(geometry.workgroups(641, 33), [21, 2, 1]);
        assert_eq!(geometry.workgroups(1, 1), [1, 1, 1]);
    }
}
