use rayon::prelude::*;

use super::Composite;
use crate::image::BYTES_PER_PIXEL;
use crate::prelude::*;

pub(super) fn apply(params: &Composite, primary: &Image, secondary: &Image) -> Image {
    let mut output = Image::new_empty(*primary.desc());

    output
        .bytes_mut()
        .par_chunks_exact_mut(BYTES_PER_PIXEL)
        .zip(primary.bytes().par_chunks_exact(BYTES_PER_PIXEL))
        .zip(secondary.bytes().par_chunks_exact(BYTES_PER_PIXEL))
        .for_each(|((out, p), s)| {
            let result = params.composite_pixel(to_unit(p), to_unit(s));
            for (o, v) in out.iter_mut().zip(result) {
                *o = (v * 255.0).round() as u8;
            }
        });

    output
}

fn to_unit(pixel: &[u8]) -> [f32; 4] {
    [
        pixel[0] as f32 / 255.0,
        pixel[1] as f32 / 255.0,
        pixel[2] as f32 / 255.0,
        pixel[3] as f32 / 255.0,
    ]
}
