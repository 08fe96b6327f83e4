//! Renders the glow pipeline headlessly into an offscreen target and saves the last frame.
//!
//! Run with `cargo run -p halo --example offscreen [frames]`.

use anyhow::Context;
use common::test_utils::{test_output_path, test_resource_path};
use halo::prelude::*;

const MANIFEST_DIR: &str = env!("CARGO_MANIFEST_DIR");
const DEFAULT_FRAMES: u32 = 3;

fn main() -> anyhow::Result<()> {
    common::setup_logging("info")?;

    let frames = match std::env::args().nth(1) {
        Some(arg) => arg
            .parse::<u32>()
            .with_context(|| format!("invalid frame count `{}`", arg))?,
        None => DEFAULT_FRAMES,
    };

    let gpu = Gpu::new().context("no usable GPU adapter")?;

    let source_path = test_resource_path(MANIFEST_DIR, "source.png");
    let params = PipelineParameters::default();
    let resources = PipelineResources::from_file(&gpu, &source_path, params)
        .with_context(|| format!("failed to set up pipeline for {}", source_path.display()))?;

    let geometry = resources.composite_geometry();
    tracing::info!(
        "Composite threadgroup {}x{}x{}",
        geometry.width,
        geometry.height,
        geometry.depth
    );

    let mut renderer = FrameRenderer::new(&resources);
    let target = OffscreenTarget::new(&gpu, resources.source_desc());

    for frame in 0..frames {
        match renderer.render(&target)? {
            FrameOutcome::Presented { dispatches } => {
                tracing::info!("Frame {} presented ({} dispatches)", frame, dispatches)
            }
            FrameOutcome::Skipped(reason) => {
                tracing::warn!("Frame {} skipped: {:?}", frame, reason)
            }
        }
    }

    let output = target.to_image(&gpu)?;
    let output_path = test_output_path(MANIFEST_DIR, "halo_offscreen.png");
    output.save_file(&output_path)?;

    let stats = renderer.stats();
    tracing::info!(
        "Saved {} after {} presented / {} skipped frames",
        output_path.display(),
        stats.frames_presented,
        stats.frames_skipped
    );

    Ok(())
}
