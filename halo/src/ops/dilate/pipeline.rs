use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

use super::StructuringElement;
use crate::ops::kernel::{
    ComputeKernel, input_texture_entry, output_texture_entry, storage_buffer_entry,
    uniform_entry,
};
use crate::prelude::*;

const DILATE_SHADER: &str = include_str!("dilate.wgsl");

#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
struct DilateParams {
    kernel_size: u32,
    _padding: [u32; 3],
}

/// Compiled dilation kernel plus the structuring element it was built for.
///
/// The element weights and kernel size are uploaded once and shared by every frame.
#[derive(Debug)]
pub struct GpuDilatePipeline {
    pub(super) kernel: ComputeKernel,
    pub(super) params_buffer: wgpu::Buffer,
    pub(super) weights_buffer: wgpu::Buffer,
}

impl GpuDilatePipeline {
    pub fn new(gpu: &Gpu, element: &StructuringElement) -> Result<Self> {
        let kernel = ComputeKernel::new(
            gpu,
            "dilate",
            DILATE_SHADER,
            &[
                uniform_entry(0),
                input_texture_entry(1),
                storage_buffer_entry(2),
                output_texture_entry(3),
            ],
        )?;

        let device = gpu.device();
        let params = DilateParams {
            kernel_size: element.size(),
            _padding: [0; 3],
        };
        let params_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("dilate_params_buffer"),
            contents: bytemuck::bytes_of(&params),
            usage: wgpu::BufferUsages::UNIFORM,
        });
        let weights_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("dilate_weights_buffer"),
            contents: bytemuck::cast_slice(element.weights()),
            usage: wgpu::BufferUsages::STORAGE,
        });

        tracing::debug!(
            "Dilation element {}x{} with {} passable cells",
            element.size(),
            element.size(),
            element.passable_count()
        );

        Ok(Self {
            kernel,
            params_buffer,
            weights_buffer,
        })
    }
}
