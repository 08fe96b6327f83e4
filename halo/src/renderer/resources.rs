use std::path::Path;

use crate::prelude::*;

/// A stage together with its compiled pipeline.
#[derive(Debug)]
pub(crate) struct Compiled<S: ImageStage> {
    pub(crate) stage: S,
    pub(crate) pipeline: S::Pipeline,
}

impl<S: ImageStage> Compiled<S> {
    fn new(gpu: &Gpu, stage: S) -> Result<Self> {
        let pipeline = stage.create_pipeline(gpu)?;
        Ok(Self { stage, pipeline })
    }
}

/// Everything the renderer needs that outlives a single frame.
///
/// Built once before the render loop; any failure here is fatal because no frame can be
/// drawn without the source texture, the compiled kernels and the structuring element.
#[derive(Debug)]
pub struct PipelineResources {
    gpu: Gpu,
    source: GpuTexture,
    pub(crate) rescale: Compiled<Rescale>,
    pub(crate) threshold: Compiled<ThresholdBinary>,
    pub(crate) dilate: Compiled<Dilate>,
    pub(crate) composite: Compiled<Composite>,
    pub(crate) blur: Compiled<GaussianBlur>,
}

impl PipelineResources {
    pub fn new(gpu: &Gpu, source: &Image, params: PipelineParameters) -> Result<Self> {
        let desc = *source.desc();
        if desc.is_empty() {
            return Err(Error::InvalidImage(format!(
                "source image is {}x{}",
                desc.width, desc.height
            )));
        }
        check_texture_size(gpu, desc)?;

        let resources = Self {
            gpu: gpu.clone(),
            source: GpuTexture::from_image(gpu, source, "source"),
            rescale: Compiled::new(gpu, Rescale::vertical_flip(desc.height))?,
            threshold: Compiled::new(gpu, params.threshold_stage())?,
            dilate: Compiled::new(gpu, params.dilate_stage()?)?,
            composite: Compiled::new(gpu, params.composite_stage())?,
            blur: Compiled::new(gpu, params.blur_stage())?,
        };

        tracing::info!(
            "Pipeline resources ready: source {}x{}, {:?}",
            desc.width,
            desc.height,
            params
        );

        Ok(resources)
    }

    /// Decodes the source asset from disk, then builds the bundle.
    pub fn from_file(
        gpu: &Gpu,
        path: impl AsRef<Path>,
        params: PipelineParameters,
    ) -> Result<Self> {
        let path = path.as_ref();
        let source = Image::read_file(path)?;
        tracing::info!("Loaded source image {}", path.display());

        Self::new(gpu, &source, params)
    }

    pub fn gpu(&self) -> &Gpu {
        &self.gpu
    }

    pub fn source(&self) -> &GpuTexture {
        &self.source
    }

    /// Working size of every frame-scoped texture.
    pub fn source_desc(&self) -> ImageDesc {
        *self.source.desc()
    }

    pub fn composite_geometry(&self) -> ThreadgroupGeometry {
        self.composite.pipeline.geometry()
    }
}

/// Rejects sizes the device cannot allocate as a 2D texture.
fn check_texture_size(gpu: &Gpu, desc: ImageDesc) -> Result<()> {
    let max = gpu.limits().max_texture_dimension_2d;
    if desc.width > max || desc.height > max {
        return Err(Error::TextureTooLarge {
            width: desc.width,
            height: desc.height,
            max,
        });
    }
    Ok(())
}
