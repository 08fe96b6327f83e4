use super::pipeline::GpuBlurPipeline;
use crate::gpu::texture_desc;
use crate::ops::kernel::{FILTER_GROUP_SIDE, view, workgroup_count};
use crate::prelude::*;

pub(super) fn encode(
    gpu: &Gpu,
    pipeline: &GpuBlurPipeline,
    stream: &mut CommandStream,
    source: &wgpu::Texture,
    destination: &wgpu::Texture,
) {
    // Lives until the stream's command buffer retires; wgpu keeps it referenced.
    let scratch = GpuTexture::new_empty(gpu, texture_desc(source), "blur_scratch");

    pass(
        gpu,
        pipeline,
        stream,
        &pipeline.horizontal_params,
        source,
        scratch.texture(),
        "blur_horizontal_pass",
    );
    pass(
        gpu,
        pipeline,
        stream,
        &pipeline.vertical_params,
        scratch.texture(),
        destination,
        "blur_vertical_pass",
    );
}

fn pass(
    gpu: &Gpu,
    pipeline: &GpuBlurPipeline,
    stream: &mut CommandStream,
    params: &wgpu::Buffer,
    input: &wgpu::Texture,
    output: &wgpu::Texture,
    label: &str,
) {
    let input_view = view(input);
    let output_view = view(output);

    let bind_group = pipeline.kernel.bind_group(
        gpu,
        label,
        &[
            params.as_entire_binding(),
            wgpu::BindingResource::TextureView(&input_view),
            pipeline.weights_buffer.as_entire_binding(),
            wgpu::BindingResource::TextureView(&output_view),
        ],
    );

    stream.dispatch(
        label,
        &pipeline.kernel.pipeline,
        &bind_group,
        workgroup_count(output.width(), output.height(), FILTER_GROUP_SIDE),
    );
}
