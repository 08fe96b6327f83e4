use crate::ops::kernel::{ComputeKernel, input_texture_entry, output_texture_entry, uniform_entry};
use crate::prelude::*;

const COMPOSITE_SHADER: &str = include_str!("composite.wgsl");

/// Compiled composite kernel and the threadgroup geometry it was specialized for.
///
/// The square group side is chosen once per device by [`threadgroup_side`] and baked into the
/// kernel source, so every dispatch of this pipeline uses the same geometry.
#[derive(Debug)]
pub struct GpuCompositePipeline {
    pub(super) kernel: ComputeKernel,
    geometry: ThreadgroupGeometry,
}

impl GpuCompositePipeline {
    pub fn new(gpu: &Gpu) -> Result<Self> {
        Self::with_geometry(gpu, ThreadgroupGeometry::for_gpu(gpu))
    }

    pub fn with_geometry(gpu: &Gpu, geometry: ThreadgroupGeometry) -> Result<Self> {
        let source = format!(
            "const GROUP_WIDTH: u32 = {}u;\nconst GROUP_HEIGHT: u32 = {}u;\n{}",
            geometry.width, geometry.height, COMPOSITE_SHADER
        );

        let kernel = ComputeKernel::new(
            gpu,
            "composite",
            &source,
            &[
                uniform_entry(0),
                input_texture_entry(1),
                input_texture_entry(2),
                output_texture_entry(3),
            ],
        )?;

        Ok(Self { kernel, geometry })
    }

    pub fn geometry(&self) -> ThreadgroupGeometry {
        self.geometry
    }
}
