use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

use super::ThresholdBinary;
use crate::ops::kernel::{ComputeKernel, input_texture_entry, output_texture_entry, uniform_entry};
use crate::prelude::*;

const THRESHOLD_SHADER: &str = include_str!("threshold.wgsl");

#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
struct ThresholdParams {
    gray_weights: [f32; 4],
    threshold: f32,
    maximum: f32,
    _padding: [f32; 2],
}

/// Compiled threshold kernel with its parameters already on the GPU.
#[derive(Debug)]
pub struct GpuThresholdPipeline {
    pub(super) kernel: ComputeKernel,
    pub(super) params_buffer: wgpu::Buffer,
}

impl GpuThresholdPipeline {
    pub fn new(gpu: &Gpu, threshold: &ThresholdBinary) -> Result<Self> {
        let kernel = ComputeKernel::new(
            gpu,
            "threshold",
            THRESHOLD_SHADER,
            &[uniform_entry(0), input_texture_entry(1), output_texture_entry(2)],
        )?;

        let [r, g, b] = threshold.gray_weights;
        let params = ThresholdParams {
            gray_weights: [r, g, b, 0.0],
            threshold: threshold.threshold,
            maximum: threshold.maximum,
            _padding: [0.0; 2],
        };
        let params_buffer = gpu
            .device()
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("threshold_params_buffer"),
                contents: bytemuck::bytes_of(&params),
                usage: wgpu::BufferUsages::UNIFORM,
            });

        Ok(Self {
            kernel,
            params_buffer,
        })
    }
}
