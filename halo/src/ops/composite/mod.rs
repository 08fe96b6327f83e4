mod cpu;
mod gpu;
mod pipeline;

pub use pipeline::GpuCompositePipeline;

use crate::prelude::*;

/// Additive composite of a secondary image scaled by `brightness` over a primary one.
///
/// Per pixel: `rgb = clamp(primary.rgb + secondary.rgb * brightness, 0, 1)`, `a = primary.a`.
/// Both inputs and the output must have identical dimensions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Composite {
    /// Weight of the secondary image, expected in [0.0, 1.0].
    pub brightness: f32,
}

impl Default for Composite {
    fn default() -> Self {
        Self::new(Self::DEFAULT_BRIGHTNESS)
    }
}

impl Composite {
    pub const DEFAULT_BRIGHTNESS: f32 = 0.2;

    pub fn new(brightness: f32) -> Self {
        Self { brightness }
    }

    /// Composites one normalized RGBA pixel.
    pub fn composite_pixel(&self, primary: [f32; 4], secondary: [f32; 4]) -> [f32; 4] {
        let mut out = primary;
        for (o, s) in out.iter_mut().zip(secondary).take(3) {
            *o = (*o + s * self.brightness).clamp(0.0, 1.0);
        }
        out
    }

    /// Reference implementation on CPU images.
    pub fn apply_cpu(&self, primary: &Image, secondary: &Image) -> Result<Image> {
        check_dimensions(primary.desc().dimensions(), secondary.desc().dimensions())?;
        Ok(cpu::apply(self, primary, secondary))
    }
}

fn check_dimensions(expected: (u32, u32), actual: (u32, u32)) -> Result<()> {
    if expected != actual {
        return Err(Error::DimensionMismatch { expected, actual });
    }
    Ok(())
}

impl ImageStage for Composite {
    type Pipeline = GpuCompositePipeline;

    fn name(&self) -> &'static str {
        "composite"
    }

    fn create_pipeline(&self, gpu: &Gpu) -> Result<GpuCompositePipeline> {
        GpuCompositePipeline::new(gpu)
    }
}

impl CompositeStage for Composite {
    fn encode_composite(
        &self,
        gpu: &Gpu,
        pipeline: &GpuCompositePipeline,
        stream: &mut CommandStream,
        primary: &wgpu::Texture,
        secondary: &wgpu::Texture,
        destination: &wgpu::Texture,
    ) -> Result<()> {
        let dimensions = |texture: &wgpu::Texture| (texture.width(), texture.height());
        check_dimensions(dimensions(primary), dimensions(secondary))?;
        check_dimensions(dimensions(primary), dimensions(destination))?;

        gpu::encode(self, gpu, pipeline, stream, primary, secondary, destination);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_brightness_is_dim() {
        let composite = Composite::default();

        assert_eq!(composite.brightness, 0.2);
        let out = composite.composite_pixel([0.0, 0.0, 0.0, 1.0], [1.0, 0.5, 0.0, 0.0]);
        assert!((out[0] - 0.2).abs() < 1e-6);
        assert!((out[1] - 0.1).abs() < 1e-6);
        assert_eq!(out[2], 0.0);
        assert_eq!(out[3], 1.0);
    }

    #[test]
    fn test_white_over_white_saturates() {
        let composite = Composite::new(0.4);

        let out = composite.composite_pixel([1.0; 4], [1.0; 4]);

        assert_eq!(out, [1.0, 1.0, 1.0, 1.0]);
    }

    #[test]
    fn test_secondary_is_scaled_by_brightness() {
        let composite = Composite::new(0.4);

        let out = composite.composite_pixel([0.0, 0.1, 0.5, 0.25], [1.0, 1.0, 0.5, 0.0]);

        let expected = [0.4, 0.5, 0.7, 0.25];
        for (o, e) in out.iter().zip(expected.iter()) {
            assert!((o - e).abs() < 1e-5, "{out:?} != {expected:?}");
        }
    }

    #[test]
    fn test_cpu_rejects_mismatched_inputs() {
        let primary = Image::new_empty(ImageDesc::new(4, 4));
        let secondary = Image::new_empty(ImageDesc::new(4, 5));

        let result = Composite::new(0.4).apply_cpu(&primary, &secondary);

        assert!(matches!(
            result,
            Err(Error::DimensionMismatch {
                expected: (4, 4),
                actual: (4, 5)
            })
        ));
    }
}
