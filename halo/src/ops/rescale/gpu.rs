use super::pipeline::GpuRescalePipeline;
use crate::ops::kernel::{FILTER_GROUP_SIDE, view, workgroup_count};
use crate::prelude::*;

pub(super) fn encode(
    gpu: &Gpu,
    pipeline: &GpuRescalePipeline,
    stream: &mut CommandStream,
    source: &wgpu::Texture,
    destination: &wgpu::Texture,
) {
    let source_view = view(source);
    let destination_view = view(destination);

    let bind_group = pipeline.kernel.bind_group(
        gpu,
        "rescale_bind_group",
        &[
            pipeline.params_buffer.as_entire_binding(),
            wgpu::BindingResource::TextureView(&source_view),
            wgpu::BindingResource::TextureView(&destination_view),
        ],
    );

    stream.dispatch(
        "rescale_pass",
        &pipeline.kernel.pipeline,
        &bind_group,
        workgroup_count(destination.width(), destination.height(), FILTER_GROUP_SIDE),
    );
}
