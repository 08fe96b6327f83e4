use std::io;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("Image decoding error: {0}")]
    Decode(String),
    #[error("Invalid file extension: {0}")]
    InvalidExtension(String),
    #[error("Invalid image: {0}")]
    InvalidImage(String),
    #[error("GPU error: {0}")]
    Gpu(String),
    #[error("Failed to compile `{label}`: {message}")]
    ShaderCompilation { label: String, message: String },
    #[error("Structuring element size must be odd and non-zero, got {0}")]
    InvalidKernelSize(u32),
    #[error("Texture dimensions mismatch: expected {expected:?}, got {actual:?}")]
    DimensionMismatch {
        expected: (u32, u32),
        actual: (u32, u32),
    },
    #[error("Incompatible render target: {0}")]
    IncompatibleTarget(String),
    #[error("Texture allocation failed: {0}")]
    TextureAllocation(String),
    #[error("Texture {width}x{height} exceeds device limit {max}")]
    TextureTooLarge { width: u32, height: u32, max: u32 },
}

impl From<image::ImageError> for Error {
    fn from(e: image::ImageError) -> Self {
        Error::Decode(e.to_string())
    }
}

impl From<wgpu::PollError> for Error {
    fn from(e: wgpu::PollError) -> Self {
        Error::Gpu(e.to_string())
    }
}

impl From<wgpu::BufferAsyncError> for Error {
    fn from(e: wgpu::BufferAsyncError) -> Self {
        Error::Gpu(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
