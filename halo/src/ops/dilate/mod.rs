mod gpu;
mod pipeline;
mod structuring_element;

pub use pipeline::GpuDilatePipeline;
pub use structuring_element::StructuringElement;

use crate::prelude::*;

/// Grayscale-style morphological dilation with a weighted structuring element.
///
/// Each output channel is `max(src[neighbour] - weight)` over the element's cells; neighbours
/// past the image border are clamped to the nearest edge pixel.
#[derive(Debug, Clone, PartialEq)]
pub struct Dilate {
    element: StructuringElement,
}

impl Dilate {
    pub fn new(element: StructuringElement) -> Self {
        Self { element }
    }

    /// Dilation with a hexagonal footprint of the given odd size.
    pub fn hexagon(size: u32) -> Result<Self> {
        Ok(Self::new(StructuringElement::hexagon(size)?))
    }

    pub fn element(&self) -> &StructuringElement {
        &self.element
    }
}

impl ImageStage for Dilate {
    type Pipeline = GpuDilatePipeline;

    fn name(&self) -> &'static str {
        "dilate"
    }

    fn create_pipeline(&self, gpu: &Gpu) -> Result<GpuDilatePipeline> {
        GpuDilatePipeline::new(gpu, &self.element)
    }
}

impl FilterStage for Dilate {
    fn encode(
        &self,
        gpu: &Gpu,
        pipeline: &GpuDilatePipeline,
        stream: &mut CommandStream,
        source: &wgpu::Texture,
        destination: &wgpu::Texture,
    ) -> Result<()> {
        gpu::encode(gpu, pipeline, stream, source, destination);
        Ok(())
    }
}
