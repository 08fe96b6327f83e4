mod frame;
mod resources;

pub use frame::{FrameTarget, OffscreenTarget};
pub use resources::PipelineResources;

use self::frame::check_target_texture;
use crate::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameState {
    Idle,
    Encoding,
    Submitted,
}

/// Why a frame was dropped without submitting any GPU work.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The drawable has zero width or height.
    DegenerateSurface,
    /// Frame-scoped textures could not be allocated; the next frame retries.
    AllocationFailed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrameOutcome {
    Presented { dispatches: u32 },
    Skipped(SkipReason),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub frames_presented: u64,
    pub frames_skipped: u64,
    /// Dispatches recorded by the most recent frame; zero for skipped frames.
    pub last_dispatch_count: u32,
}

/// Textures living for one frame, all at the source resolution.
struct FrameTextures {
    rotated: GpuTexture,
    thresholded: GpuTexture,
    dilated: GpuTexture,
    composited: GpuTexture,
}

impl FrameTextures {
    fn new(gpu: &Gpu, desc: ImageDesc) -> Self {
        Self {
            rotated: GpuTexture::new_empty(gpu, desc, "rotated"),
            thresholded: GpuTexture::new_empty(gpu, desc, "thresholded"),
            dilated: GpuTexture::new_empty(gpu, desc, "dilated"),
            composited: GpuTexture::new_empty(gpu, desc, "composited"),
        }
    }
}

/// Drives one frame at a time through rescale, threshold, dilate, composite and blur.
///
/// Each call to [`FrameRenderer::render`] records every stage into a single command stream,
/// submits it without waiting and presents the target. Intermediate textures are allocated
/// per frame and never shared between frames.
#[derive(Debug)]
pub struct FrameRenderer<'a> {
    resources: &'a PipelineResources,
    state: FrameState,
    stats: FrameStats,
}

impl<'a> FrameRenderer<'a> {
    pub fn new(resources: &'a PipelineResources) -> Self {
        Self {
            resources,
            state: FrameState::Idle,
            stats: FrameStats::default(),
        }
    }

    pub fn state(&self) -> FrameState {
        self.state
    }

    pub fn stats(&self) -> FrameStats {
        self.stats
    }

    /// Renders one frame into `target`.
    ///
    /// Degenerate surfaces and failed intermediate allocations skip the frame and return
    /// `Ok(FrameOutcome::Skipped(..))`. A target the pipeline cannot write into is an error;
    /// in every case nothing is submitted unless the whole frame was recorded.
    pub fn render<T: FrameTarget>(&mut self, target: T) -> Result<FrameOutcome> {
        let (width, height) = target.size();
        if width == 0 || height == 0 {
            tracing::debug!("Skipping frame for degenerate surface {}x{}", width, height);
            return Ok(self.skip(SkipReason::DegenerateSurface));
        }

        check_target_texture(target.texture())?;

        self.transition(FrameState::Encoding);
        let resources = self.resources;
        let gpu = resources.gpu();
        let mut stream = CommandStream::new(gpu, "frame_encoder");

        let recorded = gpu
            .scoped(wgpu::ErrorFilter::OutOfMemory, |_| {
                self.record(&mut stream, target.texture())
            })
            .map_err(|e| Error::TextureAllocation(e.to_string()));

        if let Some(skipped) = self.settle_recording(recorded)? {
            return Ok(skipped);
        }

        let dispatches = stream.dispatch_count();
        self.transition(FrameState::Submitted);
        stream.submit(gpu);
        target.present();

        self.stats.frames_presented += 1;
        self.stats.last_dispatch_count = dispatches;
        tracing::debug!(
            "Frame {} submitted with {} dispatches",
            self.stats.frames_presented,
            dispatches
        );

        self.transition(FrameState::Idle);

        Ok(FrameOutcome::Presented { dispatches })
    }

    /// Allocates the frame's intermediates and records every stage in dependency order.
    fn record(&self, stream: &mut CommandStream, destination: &wgpu::Texture) -> Result<()> {
        let resources = self.resources;
        let gpu = resources.gpu();
        let frame = FrameTextures::new(gpu, resources.source_desc());

        let rescale = &resources.rescale;
        rescale.stage.encode(
            gpu,
            &rescale.pipeline,
            stream,
            resources.source().texture(),
            frame.rotated.texture(),
        )?;

        let threshold = &resources.threshold;
        threshold.stage.encode(
            gpu,
            &threshold.pipeline,
            stream,
            frame.rotated.texture(),
            frame.thresholded.texture(),
        )?;

        let dilate = &resources.dilate;
        dilate.stage.encode(
            gpu,
            &dilate.pipeline,
            stream,
            frame.thresholded.texture(),
            frame.dilated.texture(),
        )?;

        let composite = &resources.composite;
        composite.stage.encode_composite(
            gpu,
            &composite.pipeline,
            stream,
            frame.rotated.texture(),
            frame.dilated.texture(),
            frame.composited.texture(),
        )?;

        let blur = &resources.blur;
        blur.stage.encode(
            gpu,
            &blur.pipeline,
            stream,
            frame.composited.texture(),
            destination,
        )?;

        Ok(())
    }

    /// Resolves the outcome of recording a frame.
    ///
    /// An allocation failure captured around the recording skips the frame, a stage error
    /// is returned as is. Either way the renderer is back to idle and the caller must drop
    /// the command stream without submitting it. `Ok(None)` means the frame is ready.
    fn settle_recording(
        &mut self,
        recorded: std::result::Result<Result<()>, Error>,
    ) -> Result<Option<FrameOutcome>> {
        match recorded {
            Ok(Ok(())) => Ok(None),
            Ok(Err(e)) => {
                self.transition(FrameState::Idle);
                Err(e)
            }
            Err(e) => {
                tracing::warn!("Frame skipped, will retry next frame: {}", e);
                self.transition(FrameState::Idle);
                Ok(Some(self.skip(SkipReason::AllocationFailed(e.to_string()))))
            }
        }
    }

    fn skip(&mut self, reason: SkipReason) -> FrameOutcome {
        self.stats.frames_skipped += 1;
        self.stats.last_dispatch_count = 0;
        FrameOutcome::Skipped(reason)
    }

    fn transition(&mut self, state: FrameState) {
        tracing::trace!("Frame state {:?} -> {:?}", self.state, state);
        self.state = state;
    }
}
