use std::path::Path;

use ::image as image_lib;

use super::{Image, ImageDesc};
use crate::common::Result;

pub(crate) fn load_rgba8<P: AsRef<Path>>(filename: P) -> Result<Image> {
    let img = image_lib::open(filename)?.into_rgba8();
    let desc = ImageDesc::new(img.width(), img.height());

    Image::new_with_data(desc, img.into_raw())
}

pub(crate) fn save_rgba8<P: AsRef<Path>>(image: &Image, filename: P) -> Result<()> {
    let desc = image.desc();
    image_lib::save_buffer(
        filename,
        image.bytes(),
        desc.width,
        desc.height,
        image_lib::ExtendedColorType::Rgba8,
    )?;

    Ok(())
}
