use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

use super::Rescale;
use crate::ops::kernel::{ComputeKernel, input_texture_entry, output_texture_entry, uniform_entry};
use crate::prelude::*;

const RESCALE_SHADER: &str = include_str!("rescale.wgsl");

#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
struct RescaleParams {
    // Inverse transform matrix (2x2, column-major for WGSL mat2x2)
    inv_matrix: [f32; 4],
    inv_translation: [f32; 2],
    filter_mode: u32,
    _padding: u32,
}

/// Compiled resampling kernel with the inverse transform already on the GPU.
#[derive(Debug)]
pub struct GpuRescalePipeline {
    pub(super) kernel: ComputeKernel,
    pub(super) params_buffer: wgpu::Buffer,
}

impl GpuRescalePipeline {
    pub fn new(gpu: &Gpu, rescale: &Rescale) -> Result<Self> {
        let kernel = ComputeKernel::new(
            gpu,
            "rescale",
            RESCALE_SHADER,
            &[uniform_entry(0), input_texture_entry(1), output_texture_entry(2)],
        )?;

        // Backward mapping: every destination pixel looks up its preimage
        let inv = rescale.transform.inverse();
        let params = RescaleParams {
            inv_matrix: [
                inv.matrix2.x_axis.x,
                inv.matrix2.x_axis.y,
                inv.matrix2.y_axis.x,
                inv.matrix2.y_axis.y,
            ],
            inv_translation: [inv.translation.x, inv.translation.y],
            filter_mode: rescale.filter.shader_index(),
            _padding: 0,
        };
        let params_buffer = gpu
            .device()
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("rescale_params_buffer"),
                contents: bytemuck::bytes_of(&params),
                usage: wgpu::BufferUsages::UNIFORM,
            });

        Ok(Self {
            kernel,
            params_buffer,
        })
    }
}
