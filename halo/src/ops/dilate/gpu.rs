use super::pipeline::GpuDilatePipeline;
use crate::ops::kernel::{FILTER_GROUP_SIDE, view, workgroup_count};
use crate::prelude::*;

pub(super) fn encode(
    gpu: &Gpu,
    pipeline: &GpuDilatePipeline,
    stream: &mut CommandStream,
    source: &wgpu::Texture,
    destination: &wgpu::Texture,
) {
    let source_view = view(source);
    let destination_view = view(destination);

    let bind_group = pipeline.kernel.bind_group(
        gpu,
        "dilate_bind_group",
        &[
            pipeline.params_buffer.as_entire_binding(),
            wgpu::BindingResource::TextureView(&source_view),
            pipeline.weights_buffer.as_entire_binding(),
            wgpu::BindingResource::TextureView(&destination_view),
        ],
    );

    stream.dispatch(
        "dilate_pass",
        &pipeline.kernel.pipeline,
        &bind_group,
        workgroup_count(destination.width(), destination.height(), FILTER_GROUP_SIDE),
    );
}

#[cfg(test)]
mod tests {
    use super::super::Dilate;
    use crate::common::test_utils::{run_filter, solid_image, test_gpu};

    #[test]
    fn test_single_highlight_grows_into_hexagon() {
        let Some(gpu) = test_gpu() else {
            return;
        };

        let dilate = Dilate::hexagon(45).unwrap();
        let mut image = solid_image(64, 64, [0, 0, 0, 255]);
        image.set_pixel(32, 32, [255, 255, 255, 255]);

        let result = run_filter(&gpu, &dilate, &image);

        let element = dilate.element();
        let center = element.center() as i32;
        let mut lit = 0;
        for y in 0..64i32 {
            for x in 0..64i32 {
                let row = 32 - y + center;
                let col = 32 - x + center;
                let inside = (0..element.size() as i32).contains(&row)
                    && (0..element.size() as i32).contains(&col)
                    && element.weight(row as u32, col as u32) == 0.0;

                let pixel = result.pixel(x as u32, y as u32);
                let expected = if inside { 255 } else { 0 };
                assert_eq!(pixel[0], expected, "pixel ({x}, {y})");
                assert_eq!(pixel[3], 255);
                if inside {
                    lit += 1;
                }
            }
        }
        assert_eq!(lit, element.passable_count());
    }

    #[test]
    fn test_flat_image_is_unchanged() {
        let Some(gpu) = test_gpu() else {
            return;
        };

        let dilate = Dilate::hexagon(5).unwrap();
        let image = solid_image(19, 7, [90, 120, 200, 255]);

        let result = run_filter(&gpu, &dilate, &image);

        assert_eq!(result, image);
    }
}
