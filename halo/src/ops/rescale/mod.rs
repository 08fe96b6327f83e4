mod gpu;
mod pipeline;

pub use glam::{Affine2, Vec2};
pub use pipeline::GpuRescalePipeline;

use crate::prelude::*;

/// Filter used to resample the source.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FilterMode {
    /// Nearest neighbor sampling - fast but can produce aliasing.
    Nearest,
    /// Bilinear interpolation over the 2x2 neighbourhood.
    Bilinear,
    /// Windowed sinc over a 6x6 neighbourhood.
    #[default]
    Lanczos3,
}

impl FilterMode {
    pub(crate) fn shader_index(self) -> u32 {
        match self {
            FilterMode::Nearest => 0,
            FilterMode::Bilinear => 1,
            FilterMode::Lanczos3 => 2,
        }
    }
}

/// Resampling through an affine map from source to destination pixel coordinates.
///
/// Preimages outside the source are clamped to its nearest edge pixel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rescale {
    /// Maps source coordinates to destination coordinates.
    pub transform: Affine2,
    pub filter: FilterMode,
}

impl Default for Rescale {
    fn default() -> Self {
        Self {
            transform: Affine2::IDENTITY,
            filter: FilterMode::default(),
        }
    }
}

impl Rescale {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mirrors rows so that row 0 of the source lands on the last destination row.
    ///
    /// Loaded images put their origin at the top-left, render surfaces at the bottom-left.
    pub fn vertical_flip(height: u32) -> Self {
        Self::new()
            .translate(Vec2::new(0.0, height as f32))
            .scale(Vec2::new(1.0, -1.0))
    }

    pub fn scale(mut self, scale: Vec2) -> Self {
        self.transform *= Affine2::from_scale(scale);
        self
    }

    pub fn translate(mut self, translation: Vec2) -> Self {
        self.transform *= Affine2::from_translation(translation);
        self
    }

    pub fn filter(mut self, filter: FilterMode) -> Self {
        self.filter = filter;
        self
    }
}

impl ImageStage for Rescale {
    type Pipeline = GpuRescalePipeline;

    fn name(&self) -> &'static str {
        "rescale"
    }

    fn create_pipeline(&self, gpu: &Gpu) -> Result<GpuRescalePipeline> {
        GpuRescalePipeline::new(gpu, self)
    }
}

impl FilterStage for Rescale {
    fn encode(
        &self,
        gpu: &Gpu,
        pipeline: &GpuRescalePipeline,
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
    fn test_vertical_flip_maps_rows() {
        let flip = Rescale::vertical_flip(10);

        assert_eq!(
            flip.transform.transform_point2(Vec2::new(3.0, 0.0)),
            Vec2::new(3.0, 10.0)
        );
        assert_eq!(
            flip.transform.transform_point2(Vec2::new(3.0, 2.5)),
            Vec2::new(3.0, 7.5)
        );
        // a flip is its own inverse
        assert_eq!(flip.transform.inverse(), flip.transform);
    }

    #[test]
    fn test_default_is_identity_lanczos() {
        let rescale = Rescale::new();

        assert_eq!(rescale.transform, Affine2::IDENTITY);
        assert_eq!(rescale.filter, FilterMode::Lanczos3);
        assert_eq!(rescale.filter(FilterMode::Nearest).filter.shader_index(), 0);
    }
}
