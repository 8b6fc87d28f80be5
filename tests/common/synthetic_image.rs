use levelset_speed::image::VectorImage;

/// Disc of colour `inside` on a background of colour `outside`.
pub fn colour_disc(
    width: usize,
    height: usize,
    center: [f32; 2],
    radius: f32,
    inside: [f32; 3],
    outside: [f32; 3],
) -> VectorImage {
    assert!(width > 0 && height > 0, "image dimensions must be positive");

    let mut img = VectorImage::new(width, height, 3);
    for y in 0..height {
        for x in 0..width {
            let dx = x as f32 - center[0];
            let dy = y as f32 - center[1];
            let colour = if dx * dx + dy * dy <= radius * radius {
                inside
            } else {
                outside
            };
            img.set_pixel(x, y, &colour);
        }
    }
    img
}

/// Single-channel horizontal ramp from 0 at x = 0 to 1 at the right edge.
pub fn horizontal_ramp(width: usize, height: usize) -> VectorImage {
    assert!(width > 1 && height > 0, "ramp needs at least two columns");

    let mut img = VectorImage::new(width, height, 1);
    for y in 0..height {
        for x in 0..width {
            img.set_pixel(x, y, &[x as f32 / (width - 1) as f32]);
        }
    }
    img
}
