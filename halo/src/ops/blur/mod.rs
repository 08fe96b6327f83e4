mod gpu;
mod pipeline;

pub use pipeline::GpuBlurPipeline;

use crate::prelude::*;

/// Separable Gaussian blur; borders are clamped to the nearest edge pixel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GaussianBlur {
    pub sigma: f32,
}

impl GaussianBlur {
    pub fn new(sigma: f32) -> Self {
        Self { sigma }
    }

    /// Taps on each side of the center, `ceil(3 * sigma)`.
    pub fn radius(&self) -> u32 {
        if self.sigma > 0.0 && self.sigma.is_finite() {
            (3.0 * self.sigma).ceil() as u32
        } else {
            0
        }
    }

    /// Normalized 1D kernel of `2 * radius + 1` taps, center at index `radius`.
    pub fn kernel_weights(&self) -> Vec<f32> {
        let radius = self.radius() as i32;
        if radius == 0 {
            return vec![1.0];
        }

        let two_sigma_sq = 2.0 * self.sigma * self.sigma;
        let weights: Vec<f32> = (-radius..=radius)
            .map(|k| (-((k * k) as f32) / two_sigma_sq).exp())
            .collect();
        let sum: f32 = weights.iter().sum();

        weights.into_iter().map(|w| w / sum).collect()
    }
}

impl ImageStage for GaussianBlur {
    type Pipeline = GpuBlurPipeline;

    fn name(&self) -> &'static str {
        "blur"
    }

    fn create_pipeline(&self, gpu: &Gpu) -> Result<GpuBlurPipeline> {
        GpuBlurPipeline::new(gpu, self)
    }
}

impl FilterStage for GaussianBlur {
    /// Records a horizontal pass into a frame-scoped scratch texture of the source's size,
    /// then a vertical pass into `destination`.
    fn encode(
        &self,
        gpu: &Gpu,
        pipeline: &GpuBlurPipeline,
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
    fn test_kernel_is_normalized_and_symmetric() {
        let weights = GaussianBlur::new(5.0).kernel_weights();

        assert_eq!(weights.len(), 31);
        let sum: f32 = weights.iter().sum();
        assert!((sum - 1.0).abs() < 1e-5);
        for k in 0..15 {
            assert_eq!(weights[k], weights[30 - k]);
            assert!(weights[k] < weights[k + 1]);
        }
    }

    #[test]
    fn test_radius_covers_three_sigma() {
        assert_eq!(GaussianBlur::new(5.0).radius(), 15);
        assert_eq!(GaussianBlur::new(0.5).radius(), 2);
        assert_eq!(GaussianBlur::new(1.1).radius(), 4);
    }

    #[test]
    fn test_non_positive_sigma_is_identity() {
        assert_eq!(GaussianBlur::new(0.0).kernel_weights(), vec![1.0]);
        assert_eq!(GaussianBlur::new(-2.0).kernel_weights(), vec![1.0]);
        assert_eq!(GaussianBlur::new(f32::NAN).radius(), 0);
    }
}
