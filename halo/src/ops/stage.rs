use crate::prelude::*;

/// A configured image-processing step that can compile its GPU kernel.
///
/// Configuration is immutable once the pipeline has been created; everything a frame
/// needs besides its textures lives in [`ImageStage::Pipeline`].
pub trait ImageStage {
    type Pipeline: std::fmt::Debug;

    /// Short name used for GPU labels and logs.
    fn name(&self) -> &'static str;

    fn create_pipeline(&self, gpu: &Gpu) -> Result<Self::Pipeline>;
}

/// A stage reading one texture and writing another.
pub trait FilterStage: ImageStage {
    /// Records the stage into `stream`. Nothing runs until the stream is submitted.
    fn encode(
        &self,
        gpu: &Gpu,
        pipeline: &Self::Pipeline,
        stream: &mut CommandStream,
        source: &wgpu::Texture,
        destination: &wgpu::Texture,
    ) -> Result<()>;

    /// Records the stage into a freshly allocated texture of the source's size.
    fn apply(
        &self,
        gpu: &Gpu,
        pipeline: &Self::Pipeline,
        stream: &mut CommandStream,
        source: &GpuTexture,
    ) -> Result<GpuTexture> {
        let output = GpuTexture::new_empty(gpu, *source.desc(), self.name());
        self.encode(gpu, pipeline, stream, source.texture(), output.texture())?;
        Ok(output)
    }
}

/// A stage combining two same-sized textures into a third.
pub trait CompositeStage: ImageStage {
    fn encode_composite(
        &self,
        gpu: &Gpu,
        pipeline: &Self::Pipeline,
        stream: &mut CommandStream,
        primary: &wgpu::Texture,
        secondary: &wgpu::Texture,
        destination: &wgpu::Texture,
    ) -> Result<()>;

    /// Records the stage into a freshly allocated texture of the primary's size.
    fn composite(
        &self,
        gpu: &Gpu,
        pipeline: &Self::Pipeline,
        stream: &mut CommandStream,
        primary: &GpuTexture,
        secondary: &GpuTexture,
    ) -> Result<GpuTexture> {
        let output = GpuTexture::new_empty(gpu, *primary.desc(), self.name());
        self.encode_composite(
            gpu,
            pipeline,
            stream,
            primary.texture(),
            secondary.texture(),
            output.texture(),
        )?;
        Ok(output)
    }
}
