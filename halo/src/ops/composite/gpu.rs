use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

use super::Composite;
use super::pipeline::GpuCompositePipeline;
use crate::ops::kernel::view;
use crate::prelude::*;

#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
struct CompositeParams {
    brightness: f32,
    _padding: [f32; 3],
}

/// Records the composite dispatch. Dimensions have already been validated.
pub(super) fn encode(
    params: &Composite,
    gpu: &Gpu,
    pipeline: &GpuCompositePipeline,
    stream: &mut CommandStream,
    primary: &wgpu::Texture,
    secondary: &wgpu::Texture,
    destination: &wgpu::Texture,
) {
    let uniform_params = CompositeParams {
        brightness: params.brightness,
        _padding: [0.0; 3],
    };
    let params_buffer = gpu
        .device()
        .create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("composite_params_buffer"),
            contents: bytemuck::bytes_of(&uniform_params),
            usage: wgpu::BufferUsages::UNIFORM,
        });

    let primary_view = view(primary);
    let secondary_view = view(secondary);
    let destination_view = view(destination);

    let bind_group = pipeline.kernel.bind_group(
        gpu,
        "composite_bind_group",
        &[
            params_buffer.as_entire_binding(),
            wgpu::BindingResource::TextureView(&primary_view),
            wgpu::BindingResource::TextureView(&secondary_view),
            wgpu::BindingResource::TextureView(&destination_view),
        ],
    );

    stream.dispatch(
        "composite_pass",
        &pipeline.kernel.pipeline,
        &bind_group,
        pipeline
            .geometry()
            .workgroups(destination.width(), destination.height()),
    );
}

#[cfg(test)]
mod tests {
    use crate::common::test_utils::{solid_image, test_card, test_gpu};
    use crate::prelude::*;

    fn run(gpu: &Gpu, composite: &Composite, primary: &Image, secondary: &Image) -> Image {
        let pipeline = composite.create_pipeline(gpu).unwrap();
        let primary = GpuTexture::from_image(gpu, primary, "primary");
        let secondary = GpuTexture::from_image(gpu, secondary, "secondary");

        let mut stream = CommandStream::new(gpu, "composite_test");
        let output = composite
            .composite(gpu, &pipeline, &mut stream, &primary, &secondary)
            .unwrap();
        assert_eq!(stream.dispatch_count(), 1);
        stream.submit(gpu);

        output.to_image(gpu).unwrap()
    }

    #[test]
    fn test_white_over_white_is_white() {
        let Some(gpu) = test_gpu() else {
            return;
        };

        let white = solid_image(33, 17, [255, 255, 255, 255]);

        let result = run(&gpu, &Composite::new(0.4), &white, &white);

        let reference = Composite::new(0.4).composite_pixel([1.0; 4], [1.0; 4]);
        for y in 0..17 {
            for x in 0..33 {
                let pixel = result.pixel_f32(x, y);
                for c in 0..4 {
                    assert!((pixel[c] - reference[c]).abs() < 1e-5, "pixel ({x}, {y})");
                }
            }
        }
    }

    #[test]
    fn test_gpu_matches_cpu_reference() {
        let Some(gpu) = test_gpu() else {
            return;
        };

        let composite = Composite::new(0.4);
        let primary = test_card(45, 29);
        let mut secondary = solid_image(45, 29, [0, 0, 0, 255]);
        for x in 0..45 {
            secondary.set_pixel(x, 10, [255, 128, 64, 255]);
        }

        let gpu_result = run(&gpu, &composite, &primary, &secondary);
        let cpu_result = composite.apply_cpu(&primary, &secondary).unwrap();

        for (g, c) in gpu_result.bytes().iter().zip(cpu_result.bytes()) {
            assert!(g.abs_diff(*c) <= 1, "gpu {g} cpu {c}");
        }
    }

    #[test]
    fn test_partial_groups_cover_whole_image() {
        let Some(gpu) = test_gpu() else {
            return;
        };

        let composite = Composite::new(1.0);
        let pipeline =
            GpuCompositePipeline::with_geometry(&gpu, ThreadgroupGeometry::square(8)).unwrap();
        let black = solid_image(19, 11, [0, 0, 0, 255]);
        let white = solid_image(19, 11, [255, 255, 255, 255]);
        let primary = GpuTexture::from_image(&gpu, &black, "primary");
        let secondary = GpuTexture::from_image(&gpu, &white, "secondary");

        let mut stream = CommandStream::new(&gpu, "composite_test");
        let output = composite
            .composite(&gpu, &pipeline, &mut stream, &primary, &secondary)
            .unwrap();
        stream.submit(&gpu);

        let result = output.to_image(&gpu).unwrap();
        assert_eq!(result, white);
    }

    #[test]
    fn test_mismatched_inputs_record_nothing() {
        let Some(gpu) = test_gpu() else {
            return;
        };

        let composite = Composite::new(0.4);
        let pipeline = composite.create_pipeline(&gpu).unwrap();
        let primary = GpuTexture::new_empty(&gpu, ImageDesc::new(8, 8), "primary");
        let secondary = GpuTexture::new_empty(&gpu, ImageDesc::new(8, 9), "secondary");
        let output = GpuTexture::new_empty(&gpu, ImageDesc::new(8, 8), "output");

        let mut stream = CommandStream::new(&gpu, "composite_test");
        let result = composite.encode_composite(
            &gpu,
            &pipeline,
            &mut stream,
            primary.texture(),
            secondary.texture(),
            output.texture(),
        );

        assert!(matches!(
            result,
            Err(Error::DimensionMismatch {
                expected: (8, 8),
                actual: (8, 9)
            })
        ));
        assert_eq!(stream.dispatch_count(), 0);
    }

    #[test]
    fn test_geometry_fits_device() {
        let Some(gpu) = test_gpu() else {
            return;
        };

        let pipeline = GpuCompositePipeline::new(&gpu).unwrap();

        let geometry = pipeline.geometry();
        assert_eq!(geometry.width, geometry.height);
        assert_eq!(geometry.depth, 1);
        assert!(geometry.threads() <= gpu.max_threads_per_group());
    }
}
