//! Per-pixel map from feature vectors to speeds.
//!
//! Pixels are independent, so rows are processed in parallel when the
//! `parallel` feature is enabled. Results land in a scratch buffer first and
//! are committed to the output only when every pixel succeeded.
use super::provider::SpeedFieldProvider;
use crate::error::{Result, SpeedError};
use crate::image::{ImageF32, VectorImage};
use log::debug;
use std::time::Instant;

pub(crate) fn sweep_full<P>(provider: &P, feature: &VectorImage, out: &mut ImageF32) -> Result<()>
where
    P: SpeedFieldProvider + ?Sized,
{
    check_output(feature, out)?;
    provider.validate(feature)?;

    let t0 = Instant::now();
    let mut buffer = vec![0.0f32; feature.w * feature.h];
    if !buffer.is_empty() {
        fill_rows(provider, feature, &mut buffer)?;
    }
    out.data = buffer;
    out.stride = out.w;
    debug!(
        "speed sweep {}x{}x{} in {:.3} ms",
        feature.w,
        feature.h,
        feature.channels,
        t0.elapsed().as_secs_f64() * 1000.0
    );
    Ok(())
}

pub(crate) fn sweep_band<P>(
    provider: &P,
    feature: &VectorImage,
    band: &[(usize, usize)],
    out: &mut ImageF32,
) -> Result<()>
where
    P: SpeedFieldProvider + ?Sized,
{
    check_output(feature, out)?;
    provider.validate(feature)?;
    if let Some(&(x, y)) = band.iter().find(|&&(x, y)| !feature.contains(x, y)) {
        return Err(SpeedError::configuration(format!(
            "band position ({x}, {y}) lies outside the {}x{} image",
            feature.w, feature.h
        )));
    }

    let t0 = Instant::now();
    let values = band_values(provider, feature, band)?;
    for (&(x, y), v) in band.iter().zip(values) {
        out.set(x, y, v);
    }
    debug!(
        "speed band sweep of {} pixels in {:.3} ms",
        band.len(),
        t0.elapsed().as_secs_f64() * 1000.0
    );
    Ok(())
}

fn check_output(feature: &VectorImage, out: &ImageF32) -> Result<()> {
    if !out.same_grid(feature.w, feature.h, &feature.geometry) {
        return Err(SpeedError::configuration(format!(
            "speed image {}x{} does not share the grid of the {}x{} feature image",
            out.w, out.h, feature.w, feature.h
        )));
    }
    Ok(())
}

fn fill_row<P>(provider: &P, feature: &VectorImage, y: usize, row: &mut [f32]) -> Result<()>
where
    P: SpeedFieldProvider + ?Sized,
{
    for (x, out) in row.iter_mut().enumerate() {
        *out = provider.speed(feature.pixel(x, y))?;
    }
    Ok(())
}

#[cfg(feature = "parallel")]
fn fill_rows<P>(provider: &P, feature: &VectorImage, buffer: &mut [f32]) -> Result<()>
where
    P: SpeedFieldProvider + ?Sized,
{
    use rayon::prelude::*;

    buffer
        .par_chunks_mut(feature.w)
        .enumerate()
        .try_for_each(|(y, row)| fill_row(provider, feature, y, row))
}

#[cfg(not(feature = "parallel"))]
fn fill_rows<P>(provider: &P, feature: &VectorImage, buffer: &mut [f32]) -> Result<()>
where
    P: SpeedFieldProvider + ?Sized,
{
    buffer
        .chunks_mut(feature.w)
        .enumerate()
        .try_for_each(|(y, row)| fill_row(provider, feature, y, row))
}

#[cfg(feature = "parallel")]
fn band_values<P>(provider: &P, feature: &VectorImage, band: &[(usize, usize)]) -> Result<Vec<f32>>
where
    P: SpeedFieldProvider + ?Sized,
{
    use rayon::prelude::*;

    band.par_iter()
        .map(|&(x, y)| provider.speed(feature.pixel(x, y)))
        .collect()
}

#[cfg(not(feature = "parallel"))]
fn band_values<P>(provider: &P, feature: &VectorImage, band: &[(usize, usize)]) -> Result<Vec<f32>>
where
    P: SpeedFieldProvider + ?Sized,
{
    band.iter()
        .map(|&(x, y)| provider.speed(feature.pixel(x, y)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::levelset::{VectorThresholdParams, VectorThresholdSpeed};

    fn textured(w: usize, h: usize) -> VectorImage {
        let mut img = VectorImage::new(w, h, 3);
        for y in 0..h {
            for x in 0..w {
                let t = (x * 31 + y * 17) as f32;
                img.set_pixel(x, y, &[t.sin(), (0.3 * t).cos(), x as f32 / w as f32]);
            }
        }
        img
    }

    #[test]
    fn row_fill_is_bit_identical_to_serial_loop() {
        let feature = textured(61, 23);
        let speed = VectorThresholdSpeed::from_params(&VectorThresholdParams {
            mean: vec![0.1, -0.2, 0.5],
            covariance: vec![
                vec![0.5, 0.1, 0.0],
                vec![0.1, 0.4, 0.05],
                vec![0.0, 0.05, 0.2],
            ],
            threshold: 2.0,
        })
        .unwrap();

        let mut rows = vec![0.0f32; feature.w * feature.h];
        fill_rows(&speed, &feature, &mut rows).unwrap();

        let mut serial = Vec::with_capacity(feature.w * feature.h);
        for y in 0..feature.h {
            for x in 0..feature.w {
                serial.push(speed.speed(feature.pixel(x, y)).unwrap());
            }
        }

        let bits = |v: &[f32]| v.iter().map(|s| s.to_bits()).collect::<Vec<_>>();
        assert_eq!(bits(&rows[..]), bits(&serial[..]));

        let band: Vec<(usize, usize)> = (0..feature.h).map(|y| (y * 2 % feature.w, y)).collect();
        let values = band_values(&speed, &feature, &band).unwrap();
        let expected: Vec<f32> = band.iter().map(|&(x, y)| serial[y * feature.w + x]).collect();
        assert_eq!(bits(&values[..]), bits(&expected[..]));
    }
}
