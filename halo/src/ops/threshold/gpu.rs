use super::pipeline::GpuThresholdPipeline;
use crate::ops::kernel::{FILTER_GROUP_SIDE, view, workgroup_count};
use crate::prelude::*;

pub(super) fn encode(
    gpu: &Gpu,
    pipeline: &GpuThresholdPipeline,
    stream: &mut CommandStream,
    source: &wgpu::Texture,
    destination: &wgpu::Texture,
) {
    let source_view = view(source);
    let destination_view = view(destination);

    let bind_group = pipeline.kernel.bind_group(
        gpu,
        "threshold_bind_group",
        &[
            pipeline.params_buffer.as_entire_binding(),
            wgpu::BindingResource::TextureView(&source_view),
            wgpu::BindingResource::TextureView(&destination_view),
        ],
    );

    stream.dispatch(
        "threshold_pass",
        &pipeline.kernel.pipeline,
        &bind_group,
        workgroup_count(destination.width(), destination.height(), FILTER_GROUP_SIDE),
    );
}

#[cfg(test)]
mod tests {
    use super::super::ThresholdBinary;
    use crate::common::test_utils::{run_filter, test_card, test_gpu};
    use crate::prelude::*;

    #[test]
    fn test_only_highlights_survive() {
        let Some(gpu) = test_gpu() else {
            return;
        };

        let image = test_card(40, 24);
        let threshold = ThresholdBinary::new(0.99, 1.0);

        let result = run_filter(&gpu, &threshold, &image);

        let highlights = [(10, 6), (30, 12)];
        for y in 0..24 {
            for x in 0..40 {
                let expected = if highlights.contains(&(x, y)) { 255 } else { 0 };
                assert_eq!(
                    result.pixel(x, y),
                    [expected, expected, expected, 255],
                    "pixel ({x}, {y})"
                );
            }
        }
    }

    #[test]
    fn test_ceiling_scales_mask() {
        let Some(gpu) = test_gpu() else {
            return;
        };

        let mut image = Image::new_empty(ImageDesc::new(2, 1));
        image.set_pixel(0, 0, [255, 255, 255, 0]);
        image.set_pixel(1, 0, [100, 100, 100, 255]);
        let threshold = ThresholdBinary::new(0.5, 0.6);

        let result = run_filter(&gpu, &threshold, &image);

        assert_eq!(result.pixel(0, 0), [153, 153, 153, 255]);
        assert_eq!(result.pixel(1, 0), [0, 0, 0, 255]);
    }

    #[test]
    fn test_luminance_uses_bt601_weights() {
        let Some(gpu) = test_gpu() else {
            return;
        };

        let mut image = Image::new_empty(ImageDesc::new(2, 1));
        image.set_pixel(0, 0, [0, 255, 0, 255]);
        image.set_pixel(1, 0, [255, 255, 0, 255]);
        // green alone is 0.587, green plus red is 0.886
        let threshold = ThresholdBinary::new(0.6, 1.0);

        let result = run_filter(&gpu, &threshold, &image);

        assert_eq!(result.pixel(0, 0), [0, 0, 0, 255]);
        assert_eq!(result.pixel(1, 0), [255, 255, 255, 255]);
    }
}
