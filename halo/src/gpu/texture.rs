use crate::image::BYTES_PER_PIXEL;
use crate::prelude::*;

/// Pixel format shared by every texture in the pipeline.
pub const TEXTURE_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8Unorm;

/// Usage of pipeline-owned textures: sampled by one stage, written by another.
pub const TEXTURE_USAGE: wgpu::TextureUsages = wgpu::TextureUsages::TEXTURE_BINDING
    .union(wgpu::TextureUsages::STORAGE_BINDING)
    .union(wgpu::TextureUsages::COPY_SRC)
    .union(wgpu::TextureUsages::COPY_DST);

/// Image data stored on the GPU as an RGBA8 texture.
#[derive(Debug)]
pub struct GpuTexture {
    texture: wgpu::Texture,
    desc: ImageDesc,
}

impl GpuTexture {
    /// Creates an uninitialized texture with the given dimensions.
    pub fn new_empty(gpu: &Gpu, desc: ImageDesc, label: &str) -> Self {
        let texture = gpu.device().create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size: extent(desc),
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: TEXTURE_FORMAT,
            usage: TEXTURE_USAGE,
            view_formats: &[],
        });

        Self { texture, desc }
    }

    /// Creates a texture and uploads the image's pixels into it.
    pub fn from_image(gpu: &Gpu, image: &Image, label: &str) -> Self {
        let result = Self::new_empty(gpu, *image.desc(), label);
        let desc = image.desc();

        gpu.queue().write_texture(
            result.texture.as_image_copy(),
            image.bytes(),
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(desc.stride() as u32),
                rows_per_image: Some(desc.height),
            },
            extent(*desc),
        );

        result
    }

    pub fn desc(&self) -> &ImageDesc {
        &self.desc
    }

    pub fn texture(&self) -> &wgpu::Texture {
        &self.texture
    }

    /// Downloads the texture contents to CPU, waiting for the GPU to finish.
    pub fn to_image(&self, gpu: &Gpu) -> Result<Image> {
        read_texture(gpu, &self.texture)
    }
}

/// Descriptor of an arbitrary texture (pipeline-owned or borrowed from a surface).
pub fn texture_desc(texture: &wgpu::Texture) -> ImageDesc {
    ImageDesc::new(texture.width(), texture.height())
}

pub(crate) fn extent(desc: ImageDesc) -> wgpu::Extent3d {
    wgpu::Extent3d {
        width: desc.width,
        height: desc.height,
        depth_or_array_layers: 1,
    }
}

/// Copies an RGBA8 texture into a staging buffer and unpacks the padded rows.
pub(crate) fn read_texture(gpu: &Gpu, texture: &wgpu::Texture) -> Result<Image> {
    let desc = texture_desc(texture);
    let row_bytes = desc.stride() as u32;
    let padded_row_bytes = row_bytes.div_ceil(wgpu::COPY_BYTES_PER_ROW_ALIGNMENT)
        * wgpu::COPY_BYTES_PER_ROW_ALIGNMENT;
    let size = padded_row_bytes as u64 * desc.height as u64;

    let staging_buffer = gpu.device().create_buffer(&wgpu::BufferDescriptor {
        label: Some("texture_staging"),
        size,
        usage: wgpu::BufferUsages::MAP_READ | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    });

    let mut encoder = gpu
        .device()
        .create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("texture_download_encoder"),
        });
    encoder.copy_texture_to_buffer(
        texture.as_image_copy(),
        wgpu::TexelCopyBufferInfo {
            buffer: &staging_buffer,
            layout: wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(padded_row_bytes),
                rows_per_image: Some(desc.height),
            },
        },
        extent(desc),
    );
    gpu.queue().submit(std::iter::once(encoder.finish()));

    let (sender, receiver) = std::sync::mpsc::channel();
    let buffer_slice = staging_buffer.slice(..);
    buffer_slice.map_async(wgpu::MapMode::Read, move |result| {
        let _ = sender.send(result);
    });

    gpu.wait()?;

    receiver
        .recv()
        .map_err(|_| Error::Gpu("staging buffer map callback dropped".to_string()))??;

    let mut bytes = Vec::with_capacity(desc.size_in_bytes());
    {
        let data = buffer_slice.get_mapped_range();
        for row in data.chunks(padded_row_bytes as usize) {
            bytes.extend_from_slice(&row[..desc.width as usize * BYTES_PER_PIXEL]);
        }
    }
    staging_buffer.unmap();

    Image::new_with_data(desc, bytes)
}
