use crate::prelude::*;

/// Tunables of the glow pipeline, fixed once [`PipelineResources`] has been built.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PipelineParameters {
    /// Luminance a pixel must exceed to be kept by the threshold stage.
    pub threshold: f32,
    /// Value written for pixels above the threshold.
    pub threshold_ceiling: f32,
    /// Side of the hexagonal structuring element; must be odd.
    pub dilation_kernel_size: u32,
    pub blur_sigma: f32,
    /// Weight of the dilated highlights in the composite, expected in [0.0, 1.0].
    pub composite_brightness: f32,
}

impl PipelineParameters {
    pub const THRESHOLD: f32 = 0.99;
    pub const THRESHOLD_CEILING: f32 = 1.0;
    pub const DILATION_KERNEL_SIZE: u32 = 45;
    pub const BLUR_SIGMA: f32 = 5.0;
    pub const COMPOSITE_BRIGHTNESS: f32 = 0.4;

    pub fn new() -> Self {
        Self::default()
    }

    pub fn threshold(mut self, threshold: f32) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn threshold_ceiling(mut self, threshold_ceiling: f32) -> Self {
        self.threshold_ceiling = threshold_ceiling;
        self
    }

    pub fn dilation_kernel_size(mut self, size: u32) -> Self {
        self.dilation_kernel_size = size;
        self
    }

    pub fn blur_sigma(mut self, sigma: f32) -> Self {
        self.blur_sigma = sigma;
        self
    }

    pub fn composite_brightness(mut self, brightness: f32) -> Self {
        self.composite_brightness = brightness;
        self
    }

    pub fn threshold_stage(&self) -> ThresholdBinary {
        ThresholdBinary::new(self.threshold, self.threshold_ceiling)
    }

    /// Fails with [`Error::InvalidKernelSize`] for even or zero kernel sizes.
    pub fn dilate_stage(&self) -> Result<Dilate> {
        Dilate::hexagon(self.dilation_kernel_size)
    }

    pub fn composite_stage(&self) -> Composite {
        Composite::new(self.composite_brightness)
    }

    pub fn blur_stage(&self) -> GaussianBlur {
        GaussianBlur::new(self.blur_sigma)
    }
}

impl Default for PipelineParameters {
    fn default() -> Self {
        Self {
            threshold: Self::THRESHOLD,
            threshold_ceiling: Self::THRESHOLD_CEILING,
            dilation_kernel_size: Self::DILATION_KERNEL_SIZE,
            blur_sigma: Self::BLUR_SIGMA,
            composite_brightness: Self::COMPOSITE_BRIGHTNESS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let params = PipelineParameters::default();

        assert_eq!(params.threshold, 0.99);
        assert_eq!(params.threshold_ceiling, 1.0);
        assert_eq!(params.dilation_kernel_size, 45);
        assert_eq!(params.blur_sigma, 5.0);
        assert_eq!(params.composite_brightness, 0.4);
    }

    #[test]
    fn test_builders_feed_stages() {
        let params = PipelineParameters::new()
            .threshold(0.5)
            .threshold_ceiling(0.8)
            .dilation_kernel_size(7)
            .blur_sigma(2.0)
            .composite_brightness(0.25);

        assert_eq!(params.threshold_stage(), ThresholdBinary::new(0.5, 0.8));
        assert_eq!(params.dilate_stage().unwrap().element().size(), 7);
        assert_eq!(params.blur_stage().radius(), 6);
        assert_eq!(params.composite_stage().brightness, 0.25);
    }

    #[test]
    fn test_even_kernel_size_is_rejected() {
        let params = PipelineParameters::new().dilation_kernel_size(44);

        assert!(matches!(
            params.dilate_stage(),
            Err(Error::InvalidKernelSize(44))
        ));
    }
}
