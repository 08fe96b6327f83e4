use crate::prelude::*;

/// One frame's ordered recording of GPU work.
///
/// Stages only record into the stream; nothing executes until [`CommandStream::submit`].
/// Command order is the only synchronization between stages.
#[derive(Debug)]
pub struct CommandStream {
    encoder: wgpu::CommandEncoder,
    dispatch_count: u32,
}

impl CommandStream {
    pub fn new(gpu: &Gpu, label: &str) -> Self {
        let encoder = gpu
            .device()
            .create_command_encoder(&wgpu::CommandEncoderDescriptor { label: Some(label) });

        Self {
            encoder,
            dispatch_count: 0,
        }
    }

    /// Records one compute pass with a single dispatch.
    pub fn dispatch(
        &mut self,
        label: &str,
        pipeline: &wgpu::ComputePipeline,
        bind_group: &wgpu::BindGroup,
        workgroups: [u32; 3],
    ) {
        {
            let mut pass = self.encoder.begin_compute_pass(&wgpu::ComputePassDescriptor {
                label: Some(label),
                timestamp_writes: None,
            });
            pass.set_pipeline(pipeline);
            pass.set_bind_group(0, bind_group, &[]);
            pass.dispatch_workgroups(workgroups[0], workgroups[1], workgroups[2]);
        }

        self.dispatch_count += 1;
    }

    /// Number of dispatches recorded so far.
    pub fn dispatch_count(&self) -> u32 {
        self.dispatch_count
    }

    /// Finishes the recording and hands it to the queue without waiting for completion.
    pub fn submit(self, gpu: &Gpu) -> wgpu::SubmissionIndex {
        gpu.queue().submit(std::iter::once(self.encoder.finish()))
    }
}
