use crate::prelude::*;

/// Returns a GPU for tests, or `None` on machines without an adapter.
pub fn test_gpu() -> Option<Gpu> {
    match Gpu::new() {
        Ok(gpu) => Some(gpu),
        Err(e) => {
            eprintln!("GPU unavailable, skipping GPU test: {}", e);
            None
        }
    }
}

/// Solid-color RGBA8 image.
pub fn solid_image(width: u32, height: u32, rgba: [u8; 4]) -> Image {
    let desc = ImageDesc::new(width, height);
    let bytes = rgba
        .iter()
        .copied()
        .cycle()
        .take(desc.size_in_bytes())
        .collect();
    Image::new_with_data(desc, bytes).unwrap()
}

/// Deterministic gradient with a few saturated highlights, used as a stand-in photo.
pub fn test_card(width: u32, height: u32) -> Image {
    let desc = ImageDesc::new(width, height);
    let mut image = Image::new_empty(desc);
    for y in 0..height {
        for x in 0..width {
            let r = (x * 255 / width.max(1)) as u8;
            let g = (y * 255 / height.max(1)) as u8;
            let b = ((x + y) * 127 / (width + height).max(1)) as u8;
            image.set_pixel(x, y, [r, g, b, 255]);
        }
    }
    for (hx, hy) in [(width / 4, height / 4), (width * 3 / 4, height / 2)] {
        image.set_pixel(hx, hy, [255, 255, 255, 255]);
    }
    image
}

/// Runs one filter stage on `image` through a fresh command stream and reads the result back.
pub fn run_filter<S: FilterStage>(gpu: &Gpu, stage: &S, image: &Image) -> Image {
    let pipeline = stage.create_pipeline(gpu).unwrap();
    let source = GpuTexture::from_image(gpu, image, "test_source");

    let mut stream = CommandStream::new(gpu, "test_stream");
    let output = stage
        .apply(gpu, &pipeline, &mut stream, &source)
        .unwrap();
    stream.submit(gpu);

    output.to_image(gpu).unwrap()
}
