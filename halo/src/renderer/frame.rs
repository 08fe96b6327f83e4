use std::cell::Cell;

use crate::gpu::TEXTURE_FORMAT;
use crate::prelude::*;

/// Drawable the pipeline writes its final output into, borrowed for one frame.
pub trait FrameTarget {
    /// Current drawable size in pixels; zero in either axis means nothing can be drawn.
    fn size(&self) -> (u32, u32);

    fn texture(&self) -> &wgpu::Texture;

    /// Hands the drawable back to the presentation layer after the frame was submitted.
    fn present(self);
}

impl FrameTarget for wgpu::SurfaceTexture {
    fn size(&self) -> (u32, u32) {
        (self.texture.width(), self.texture.height())
    }

    fn texture(&self) -> &wgpu::Texture {
        &self.texture
    }

    fn present(self) {
        wgpu::SurfaceTexture::present(self);
    }
}

/// Pipeline-owned texture standing in for a window surface.
#[derive(Debug)]
pub struct OffscreenTarget {
    texture: GpuTexture,
    presented: Cell<u64>,
}

impl OffscreenTarget {
    pub fn new(gpu: &Gpu, desc: ImageDesc) -> Self {
        Self {
            texture: GpuTexture::new_empty(gpu, desc, "offscreen_target"),
            presented: Cell::new(0),
        }
    }

    pub fn desc(&self) -> &ImageDesc {
        self.texture.desc()
    }

    /// Number of frames presented into this target so far.
    pub fn presented_count(&self) -> u64 {
        self.presented.get()
    }

    /// Reads the last presented frame back, waiting for the GPU.
    pub fn to_image(&self, gpu: &Gpu) -> Result<Image> {
        self.texture.to_image(gpu)
    }
}

impl FrameTarget for &OffscreenTarget {
    fn size(&self) -> (u32, u32) {
        self.texture.desc().dimensions()
    }

    fn texture(&self) -> &wgpu::Texture {
        self.texture.texture()
    }

    fn present(self) {
        self.presented.set(self.presented.get() + 1);
    }
}

/// Checks that the final stage can write into `texture`.
pub(crate) fn check_target_texture(texture: &wgpu::Texture) -> Result<()> {
    if texture.format() != TEXTURE_FORMAT {
        return Err(Error::IncompatibleTarget(format!(
            "format {:?}, expected {:?}",
            texture.format(),
            TEXTURE_FORMAT
        )));
    }
    if !texture
        .usage()
        .contains(wgpu::TextureUsages::STORAGE_BINDING)
    {
        return Err(Error::IncompatibleTarget(format!(
            "usage {:?} lacks STORAGE_BINDING",
            texture.usage()
        )));
    }

    Ok(())
}
