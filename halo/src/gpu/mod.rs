mod command_stream;
mod texture;

use std::future::Future;
use std::sync::Arc;

pub use self::command_stream::CommandStream;
pub use self::texture::GpuTexture;
pub(crate) use self::texture::{TEXTURE_FORMAT, texture_desc};

use crate::common::{Error, Result};

/// Subgroup width assumed when the adapter does not report one.
const DEFAULT_EXECUTION_WIDTH: u32 = 32;

/// GPU handle holding the wgpu device and its submission queue.
#[derive(Debug, Clone)]
pub struct Gpu {
    device: Arc<wgpu::Device>,
    queue: Arc<wgpu::Queue>,
    execution_width: u32,
}

impl Gpu {
    /// Creates a new GPU context, initializing wgpu with default settings.
    pub fn new() -> Result<Self> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: None,
            force_fallback_adapter: false,
        }))
        .map_err(|e| Error::Gpu(format!("failed to find suitable GPU adapter: {}", e)))?;

        let info = adapter.get_info();
        tracing::info!("Using GPU adapter: {} ({:?})", info.name, info.backend);

        let limits = adapter.limits();
        tracing::info!(
            "Compute limits: {} invocations per workgroup, subgroup size {}..{}",
            limits.max_compute_invocations_per_workgroup,
            limits.min_subgroup_size,
            limits.max_subgroup_size
        );

        let (device, queue) = pollster::block_on(adapter.request_device(&wgpu::DeviceDescriptor {
            label: Some("halo_device"),
            required_features: wgpu::Features::empty(),
            required_limits: wgpu::Limits {
                max_texture_dimension_2d: limits.max_texture_dimension_2d,
                max_compute_invocations_per_workgroup: limits
                    .max_compute_invocations_per_workgroup,
                max_compute_workgroup_size_x: limits.max_compute_workgroup_size_x,
                max_compute_workgroup_size_y: limits.max_compute_workgroup_size_y,
                max_compute_workgroups_per_dimension: limits.max_compute_workgroups_per_dimension,
                ..wgpu::Limits::downlevel_defaults()
            },
            ..Default::default()
        }))
        .map_err(|e| Error::Gpu(format!("failed to create device: {}", e)))?;

        let mut gpu = Self::from_parts(device, queue);
        if limits.min_subgroup_size != 0 {
            gpu.execution_width = limits.min_subgroup_size;
        }

        Ok(gpu)
    }

    /// Adopts a device and queue owned by the windowing layer.
    pub fn from_parts(device: wgpu::Device, queue: wgpu::Queue) -> Self {
        let execution_width = match device.limits().min_subgroup_size {
            0 => DEFAULT_EXECUTION_WIDTH,
            width => width,
        };

        Self {
            device: Arc::new(device),
            queue: Arc::new(queue),
            execution_width,
        }
    }

    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    pub fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }

    pub fn limits(&self) -> wgpu::Limits {
        self.device.limits()
    }

    /// Largest number of invocations a single square compute workgroup may hold.
    pub fn max_threads_per_group(&self) -> u32 {
        let limits = self.device.limits();
        let max_side = limits
            .max_compute_workgroup_size_x
            .min(limits.max_compute_workgroup_size_y);
        limits
            .max_compute_invocations_per_workgroup
            .min(max_side.saturating_mul(max_side))
    }

    /// SIMD width of the hardware; dispatches that are not a multiple of it idle lanes.
    pub fn thread_execution_width(&self) -> u32 {
        self.execution_width
    }

    /// Blocks until all submitted work has completed.
    pub fn wait(&self) -> Result<()> {
        self.device.poll(wgpu::PollType::Wait)?;
        Ok(())
    }

    /// Runs `f` inside a wgpu error scope and reports the captured error, if any.
    pub(crate) fn scoped<T>(
        &self,
        filter: wgpu::ErrorFilter,
        f: impl FnOnce(&wgpu::Device) -> T,
    ) -> std::result::Result<T, wgpu::Error> {
        self.device.push_error_scope(filter);
        let value = f(&self.device);
        match block_on(self.device.pop_error_scope()) {
            Some(error) => Err(error),
            None => Ok(value),
        }
    }

    /// Compiles a shader module and pipeline under a validation scope.
    ///
    /// Compilation failures are reported as [`Error::ShaderCompilation`] rather than
    /// reaching the uncaptured-error handler.
    pub(crate) fn compile<T>(
        &self,
        label: &str,
        f: impl FnOnce(&wgpu::Device) -> T,
    ) -> Result<T> {
        self.scoped(wgpu::ErrorFilter::Validation, f)
            .map_err(|e| Error::ShaderCompilation {
                label: label.to_string(),
                message: e.to_string(),
            })
    }
}

fn block_on<F: Future>(future: F) -> F::Output {
    pollster::block_on(future)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gpu_context_creation() {
        let result = Gpu::new();
        if let Err(e) = &result {
            eprintln!(
                "GPU context creation failed (expected on headless systems): {}",
                e
            );
            return;
        }
        let gpu = result.unwrap();
        assert!(gpu.max_threads_per_group() >= 1);
        assert!(gpu.thread_execution_width() >= 1);
    }

    #[test]
    fn test_invalid_shader_is_reported() {
        let Some(gpu) = crate::common::test_utils::test_gpu() else {
            return;
        };

        let result = gpu.compile("broken_shader", |device| {
            device.create_shader_module(wgpu::ShaderModuleDescriptor {
                label: Some("broken_shader"),
                source: wgpu::ShaderSource::Wgsl("fn main( {".into()),
            })
        });

        assert!(matches!(
            result,
            Err(Error::ShaderCompilation { label, .. }) if label == "broken_shader"
        ));
    }
}
