use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

use super::GaussianBlur;
use crate::ops::kernel::{
    ComputeKernel, input_texture_entry, output_texture_entry, storage_buffer_entry,
    uniform_entry,
};
use crate::prelude::*;

const BLUR_SHADER: &str = include_str!("blur.wgsl");

#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
struct BlurParams {
    direction: [i32; 2],
    radius: i32,
    _padding: i32,
}

/// Compiled 1D convolution kernel with the Gaussian weights and both pass directions
/// uploaded once.
#[derive(Debug)]
pub struct GpuBlurPipeline {
    pub(super) kernel: ComputeKernel,
    pub(super) weights_buffer: wgpu::Buffer,
    pub(super) horizontal_params: wgpu::Buffer,
    pub(super) vertical_params: wgpu::Buffer,
}

impl GpuBlurPipeline {
    pub fn new(gpu: &Gpu, blur: &GaussianBlur) -> Result<Self> {
        let kernel = ComputeKernel::new(
            gpu,
            "blur",
            BLUR_SHADER,
            &[
                uniform_entry(0),
                input_texture_entry(1),
                storage_buffer_entry(2),
                output_texture_entry(3),
            ],
        )?;

        let device = gpu.device();
        let weights = blur.kernel_weights();
        let weights_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("blur_weights_buffer"),
            contents: bytemuck::cast_slice(&weights),
            usage: wgpu::BufferUsages::STORAGE,
        });

        let radius = blur.radius() as i32;
        let params_buffer = |label: &str, direction: [i32; 2]| {
            let params = BlurParams {
                direction,
                radius,
                _padding: 0,
            };
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(label),
                contents: bytemuck::bytes_of(&params),
                usage: wgpu::BufferUsages::UNIFORM,
            })
        };

        tracing::debug!("Gaussian blur sigma {} with {} taps", blur.sigma, weights.len());

        Ok(Self {
            kernel,
            horizontal_params: params_buffer("blur_horizontal_params", [1, 0]),
            vertical_params: params_buffer("blur_vertical_params", [0, 1]),
            weights_buffer,
        })
    }
}
