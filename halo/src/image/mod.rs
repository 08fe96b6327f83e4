mod io;

use std::path::Path;

use crate::common::{Error, Result};

/// Supported image file extensions for reading and writing.
pub const SUPPORTED_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "tiff", "tif"];

/// Bytes per pixel of the fixed 8-bit RGBA format.
pub const BYTES_PER_PIXEL: usize = 4;

#[derive(Clone, Copy, Eq, PartialEq, Debug, Hash)]
pub struct ImageDesc {
    pub width: u32,
    pub height: u32,
}

impl ImageDesc {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Row length in bytes; rows are tightly packed.
    pub fn stride(&self) -> usize {
        self.width as usize * BYTES_PER_PIXEL
    }

    pub fn size_in_bytes(&self) -> usize {
        self.stride() * self.height as usize
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

/// CPU-side RGBA8 (unorm) pixel buffer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Image {
    desc: ImageDesc,
    bytes: Vec<u8>,
}

impl Image {
    pub fn desc(&self) -> &ImageDesc {
        &self.desc
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn bytes_mut(&mut self) -> &mut [u8] {
        &mut self.bytes
    }

    pub fn new_empty(desc: ImageDesc) -> Image {
        Image {
            desc,
            bytes: vec![0; desc.size_in_bytes()],
        }
    }

    pub fn new_with_data(desc: ImageDesc, bytes: Vec<u8>) -> Result<Image> {
        if bytes.len() != desc.size_in_bytes() {
            return Err(Error::InvalidImage(format!(
                "bytes length {} does not match expected size {}",
                bytes.len(),
                desc.size_in_bytes()
            )));
        }

        Ok(Image { desc, bytes })
    }

    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let offset = self.offset(x, y);
        let mut px = [0u8; 4];
        px.copy_from_slice(&self.bytes[offset..offset + BYTES_PER_PIXEL]);
        px
    }

    pub fn set_pixel(&mut self, x: u32, y: u32, rgba: [u8; 4]) {
        let offset = self.offset(x, y);
        self.bytes[offset..offset + BYTES_PER_PIXEL].copy_from_slice(&rgba);
    }

    /// Pixel as normalized floats, the way kernels see it.
    pub fn pixel_f32(&self, x: u32, y: u32) -> [f32; 4] {
        self.pixel(x, y).map(|c| c as f32 / 255.0)
    }

    fn offset(&self, x: u32, y: u32) -> usize {
        assert!(
            x < self.desc.width && y < self.desc.height,
            "pixel ({}, {}) outside {}x{} image",
            x,
            y,
            self.desc.width,
            self.desc.height
        );
        y as usize * self.desc.stride() + x as usize * BYTES_PER_PIXEL
    }

    /// Decodes a file into RGBA8 regardless of its stored color type.
    pub fn read_file<P: AsRef<Path>>(filename: P) -> Result<Image> {
        let extension = file_extension(filename.as_ref())?;
        if !SUPPORTED_EXTENSIONS.contains(&extension.as_str()) {
            return Err(Error::InvalidExtension(extension));
        }

        io::load_rgba8(filename)
    }

    pub fn save_file<P: AsRef<Path>>(&self, filename: P) -> Result<()> {
        let extension = file_extension(filename.as_ref())?;
        if !SUPPORTED_EXTENSIONS.contains(&extension.as_str()) {
            return Err(Error::InvalidExtension(extension));
        }

        io::save_rgba8(self, filename)
    }
}

fn file_extension(path: &Path) -> Result<String> {
    Ok(path
        .extension()
        .and_then(|os_str| os_str.to_str())
        .ok_or_else(|| Error::InvalidExtension("missing extension".to_string()))?
        .to_ascii_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_with_data_rejects_wrong_length() {
        let desc = ImageDesc::new(3, 2);
        let result = Image::new_with_data(desc, vec![0; 23]);
        assert!(matches!(result, Err(Error::InvalidImage(_))));
    }

    #[test]
    fn test_pixel_roundtrip() {
        let mut image = Image::new_empty(ImageDesc::new(4, 3));
        image.set_pixel(2, 1, [10, 20, 30, 40]);
        assert_eq!(image.pixel(2, 1), [10, 20, 30, 40]);
        assert_eq!(image.pixel(1, 2), [0, 0, 0, 0]);
        assert_eq!(image.bytes()[(4 + 2) * 4], 10);
    }

    #[test]
    fn test_unknown_extension_rejected() {
        let image = Image::new_empty(ImageDesc::new(1, 1));
        let result = image.save_file("out.bmp");
        assert!(matches!(result, Err(Error::InvalidExtension(ext)) if ext == "bmp"));

        let result = Image::read_file("no_extension");
        assert!(matches!(result, Err(Error::InvalidExtension(_))));
    }

    #[test]
    fn test_png_roundtrip() {
        let path = std::env::temp_dir().join("halo_image_roundtrip.png");
        let mut image = Image::new_empty(ImageDesc::new(5, 4));
        image.set_pixel(4, 3, [255, 128, 1, 200]);

        image.save_file(&path).unwrap();
        let loaded = Image::read_file(&path).unwrap();

        assert_eq!(loaded, image);
        let _ = std::fs::remove_file(path);
    }
}
