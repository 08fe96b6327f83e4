mod gpu;
mod pipeline;

pub use pipeline::GpuThresholdPipeline;

use crate::prelude::*;

/// BT.601 luma coefficients.
pub const BT601_WEIGHTS: [f32; 3] = [0.299, 0.587, 0.114];

/// Binary threshold on luminance.
///
/// Pixels with luminance strictly above `threshold` become `maximum` in every color channel,
/// all others become zero. The output is opaque.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThresholdBinary {
    pub threshold: f32,
    pub maximum: f32,
    pub gray_weights: [f32; 3],
}

impl ThresholdBinary {
    pub fn new(threshold: f32, maximum: f32) -> Self {
        Self {
            threshold,
            maximum,
            gray_weights: BT601_WEIGHTS,
        }
    }

    /// Builder method to set the luminance weights.
    pub fn gray_weights(mut self, gray_weights: [f32; 3]) -> Self {
        self.gray_weights = gray_weights;
        self
    }

    /// Luminance of a normalized RGB color.
    pub fn luminance(&self, rgb: [f32; 3]) -> f32 {
        rgb.iter()
            .zip(self.gray_weights.iter())
            .map(|(c, w)| c * w)
            .sum()
    }
}

impl ImageStage for ThresholdBinary {
    type Pipeline = GpuThresholdPipeline;

    fn name(&self) -> &'static str {
        "threshold"
    }

    fn create_pipeline(&self, gpu: &Gpu) -> Result<GpuThresholdPipeline> {
        GpuThresholdPipeline::new(gpu, self)
    }
}

impl FilterStage for ThresholdBinary {
    fn encode(
        &self,
        gpu: &Gpu,
        pipeline: &GpuThresholdPipeline,
        stream: &mut CommandStream,
        source: &wgpu::Texture,
        destination: &wgpu::Texture,
    ) -> Result<()> {
        gpu::encode(gpu, pipeline, stream, source, destination);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_luminance_of_primaries() {
        let threshold = ThresholdBinary::new(0.5, 1.0);

        assert!((threshold.luminance([1.0, 1.0, 1.0]) - 1.0).abs() < 1e-6);
        assert!((threshold.luminance([0.0, 1.0, 0.0]) - 0.587).abs() < 1e-6);
        assert!((threshold.luminance([0.0, 0.0, 1.0]) - 0.114).abs() < 1e-6);
        assert_eq!(threshold.luminance([0.0, 0.0, 0.0]), 0.0);
    }

    #[test]
    fn test_builder_overrides_weights() {
        let threshold = ThresholdBinary::new(0.5, 1.0).gray_weights([1.0, 0.0, 0.0]);

        assert_eq!(threshold.luminance([0.25, 1.0, 1.0]), 0.25);
    }
}
