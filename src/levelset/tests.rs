use super::*;
use crate::image::{ImageF32, ImageGeometry, VectorImage};
use nalgebra::{DMatrix, DVector};

fn identity_speed(mean: &[f64], threshold: f64) -> VectorThresholdSpeed {
    let n = mean.len();
    VectorThresholdSpeed::from_params(&VectorThresholdParams {
        mean: mean.to_vec(),
        covariance: (0..n)
            .map(|r| (0..n).map(|c| if r == c { 1.0 } else { 0.0 }).collect())
            .collect(),
        threshold,
    })
    .expect("valid params")
}

fn ramp_image(w: usize, h: usize) -> VectorImage {
    let mut img = VectorImage::new(w, h, 2);
    for y in 0..h {
        for x in 0..w {
            img.set_pixel(x, y, &[x as f32, y as f32]);
        }
    }
    img
}

#[test]
fn scalar_feature_on_iso_distance_has_zero_speed() {
    let speed = identity_speed(&[0.0], 1.8);
    let v = speed.speed(&[1.8]).unwrap();
    assert!(v.abs() < 1e-6, "expected ~0, got {v}");
}

#[test]
fn two_channel_scenario_speed() {
    let speed = identity_speed(&[0.0, 0.0], 2.0);
    assert_eq!(speed.speed(&[3.0, 4.0]).unwrap(), -3.0);
    assert_eq!(speed.speed(&[0.0, 0.0]).unwrap(), 2.0);
}

#[test]
fn default_speed_uses_documented_threshold_and_weights() {
    let mut speed = VectorThresholdSpeed::new(3);
    assert_eq!(speed.threshold(), DEFAULT_THRESHOLD);
    assert_eq!(speed.mean().len(), 3);
    assert_eq!(speed.covariance().shape(), (3, 3));
    assert_eq!(speed.weights(), TermWeights::threshold_locking());
    assert_eq!(speed.radius(), None);

    speed.initialize(NeighborhoodRadius([2, 3]));
    let w = speed.weights();
    assert_eq!((w.advection, w.propagation, w.curvature), (0.0, -1.0, 1.0));
    assert_eq!(speed.radius(), Some(NeighborhoodRadius([2, 3])));
}

#[test]
fn full_sweep_matches_per_pixel_formula_and_keeps_geometry() {
    let geometry = ImageGeometry::new([0.5, 2.0], [10.0, -4.0]);
    let feature = ramp_image(7, 5).with_geometry(geometry);
    let speed = identity_speed(&[3.0, 2.0], 2.5);
    let mut out = speed.allocate_speed_image(&feature);
    assert_eq!(out.geometry, geometry);

    speed.compute_speed_image(&feature, &mut out).unwrap();
    for y in 0..feature.h {
        for x in 0..feature.w {
            let dx = x as f64 - 3.0;
            let dy = y as f64 - 2.0;
            let expected = (2.5 - (dx * dx + dy * dy).sqrt()) as f32;
            assert!((out.get(x, y) - expected).abs() < 1e-6, "({x}, {y})");
        }
    }
}

#[test]
fn repeated_sweeps_are_bit_identical_and_overwrite() {
    let feature = ramp_image(33, 17);
    let mut speed = identity_speed(&[10.0, 8.0], 6.0);
    speed.set_covariance(DMatrix::from_row_slice(2, 2, &[9.0, 1.5, 1.5, 4.0]));

    let mut first = ImageF32::new_like(&feature);
    first.fill(100.0);
    speed.compute_speed_image(&feature, &mut first).unwrap();
    let mut second = first.clone();
    speed.compute_speed_image(&feature, &mut second).unwrap();

    assert!(first
        .data
        .iter()
        .zip(&second.data)
        .all(|(a, b)| a.to_bits() == b.to_bits()));
    assert!(first.data.iter().all(|&v| v < 100.0));
}

#[test]
fn mismatched_channels_fail_before_writing() {
    let feature = VectorImage::new(4, 4, 3);
    let speed = identity_speed(&[0.0, 0.0], 1.0);
    let mut out = ImageF32::new_like(&feature);
    out.fill(-7.0);

    let err = speed.compute_speed_image(&feature, &mut out).unwrap_err();
    assert!(err.is_configuration(), "unexpected error {err:?}");
    assert!(out.data.iter().all(|&v| v == -7.0));
}

#[test]
fn singular_covariance_aborts_the_sweep() {
    let feature = ramp_image(4, 4);
    let mut speed = identity_speed(&[0.0, 0.0], 1.0);
    speed.set_covariance(DMatrix::from_row_slice(2, 2, &[2.0, 2.0, 2.0, 2.0]));
    let mut out = ImageF32::new_like(&feature);
    out.fill(3.0);

    let err = speed.compute_speed_image(&feature, &mut out).unwrap_err();
    assert!(err.is_numerical(), "unexpected error {err:?}");
    assert!(out.data.iter().all(|&v| v == 3.0));
}

#[test]
fn one_bad_pixel_invalidates_the_whole_field() {
    let mut feature = ramp_image(6, 6);
    feature.set_pixel(5, 5, &[f32::NAN, 0.0]);
    let speed = identity_speed(&[0.0, 0.0], 1.0);
    let mut out = ImageF32::new_like(&feature);
    out.fill(9.0);

    let err = speed.compute_speed_image(&feature, &mut out).unwrap_err();
    assert!(err.is_numerical());
    assert!(out.data.iter().all(|&v| v == 9.0));
}

#[test]
fn output_on_another_grid_is_rejected() {
    let feature = ramp_image(5, 5);
    let speed = identity_speed(&[0.0, 0.0], 1.0);

    let mut wrong_size = ImageF32::new(5, 4);
    assert!(speed
        .compute_speed_image(&feature, &mut wrong_size)
        .unwrap_err()
        .is_configuration());

    let mut wrong_spacing = ImageF32::with_geometry(5, 5, ImageGeometry::new([2.0, 2.0], [0.0, 0.0]));
    assert!(speed
        .compute_speed_image(&feature, &mut wrong_spacing)
        .unwrap_err()
        .is_configuration());
}

#[test]
fn band_sweep_only_touches_band_pixels() {
    let feature = ramp_image(8, 8);
    let speed = identity_speed(&[0.0, 0.0], 3.0);
    let mut out = ImageF32::new_like(&feature);
    out.fill(42.0);

    let band = [(0, 0), (3, 4), (7, 7)];
    speed.compute_speed_band(&feature, &band, &mut out).unwrap();
    assert_eq!(out.get(0, 0), 3.0);
    assert_eq!(out.get(3, 4), -2.0);
    assert!((out.get(7, 7) - (3.0 - 98.0f32.sqrt())).abs() < 1e-5);
    assert_eq!(out.get(1, 0), 42.0);
    assert_eq!(out.get(4, 3), 42.0);

    let err = speed
        .compute_speed_band(&feature, &[(1, 1), (8, 0)], &mut out)
        .unwrap_err();
    assert!(err.is_configuration());
    assert_eq!(out.get(1, 1), 42.0);
}

#[test]
fn threshold_and_mean_updates_apply_to_next_sweep() {
    let mut speed = identity_speed(&[0.0, 0.0], 1.0);
    assert_eq!(speed.speed(&[0.0, 0.0]).unwrap(), 1.0);

    speed.set_threshold(4.0);
    speed.set_mean(DVector::from_column_slice(&[0.0, 3.0]));
    assert_eq!(speed.threshold(), 4.0);
    assert_eq!(speed.speed(&[0.0, 0.0]).unwrap(), 1.0);

    let params = speed.params();
    assert_eq!(params.mean, vec![0.0, 3.0]);
    assert_eq!(params.covariance, vec![vec![1.0, 0.0], vec![0.0, 1.0]]);
    assert_eq!(params.threshold, 4.0);
}

#[test]
fn ragged_covariance_params_are_rejected() {
    let err = VectorThresholdSpeed::from_params(&VectorThresholdParams {
        mean: vec![0.0, 0.0],
        covariance: vec![vec![1.0, 0.0], vec![0.0]],
        threshold: 1.0,
    })
    .unwrap_err();
    assert!(err.is_configuration());
}

#[test]
fn intensity_window_is_positive_inside_and_negative_outside() {
    let window = IntensityWindowSpeed::new(0.2, 0.6).unwrap();
    assert!((window.speed(&[0.3]).unwrap() - 0.1).abs() < 1e-6);
    assert!((window.speed(&[0.5]).unwrap() - 0.1).abs() < 1e-6);
    assert!(window.speed(&[0.0]).unwrap() < 0.0);
    assert!(window.speed(&[0.9]).unwrap() < 0.0);
    assert!(window.speed(&[0.2]).unwrap().abs() < 1e-6);

    let rgb = VectorImage::new(2, 2, 3);
    assert!(window.validate(&rgb).unwrap_err().is_configuration());
    assert!(IntensityWindowSpeed::new(1.0, 0.0).unwrap_err().is_configuration());
}

#[test]
fn segmentation_function_composes_any_provider() {
    let feature = VectorImage::from_scalar({
        let mut img = ImageF32::new(4, 1);
        img.data.copy_from_slice(&[0.0, 0.4, 0.8, 1.2]);
        img
    });

    let providers: Vec<Box<dyn SpeedFieldProvider>> = vec![
        Box::new(identity_speed(&[0.4], 0.5)),
        Box::new(IntensityWindowSpeed::new(0.0, 0.8).unwrap()),
    ];
    for provider in providers {
        let mut function = SegmentationFunction::new(provider, &feature);
        function.initialize(NeighborhoodRadius::default());
        function.calculate_speed_image().unwrap();
        assert!(function.propagation_speed(1, 0) > 0.0);
        assert!(function.propagation_speed(3, 0) < 0.0);
        assert_eq!(function.radius(), Some(NeighborhoodRadius([1, 1])));
        assert_eq!(function.weights(), TermWeights::threshold_locking());
    }
}

#[test]
fn reversed_direction_flips_only_propagation() {
    let feature = ramp_image(2, 2);
    let mut function = SegmentationFunction::new(identity_speed(&[0.0, 0.0], 1.0), &feature);
    function.reverse_expansion_direction();
    function.initialize(NeighborhoodRadius([1, 1]));
    let w = function.weights();
    assert!(function.is_reversed());
    assert_eq!((w.advection, w.propagation, w.curvature), (0.0, 1.0, 1.0));

    function.reverse_expansion_direction();
    assert_eq!(function.weights(), TermWeights::threshold_locking());
}

#[test]
fn propagation_speed_at_interpolates_in_physical_space() {
    let geometry = ImageGeometry::new([2.0, 2.0], [100.0, 0.0]);
    let feature = ramp_image(3, 1).with_geometry(geometry);
    let mut function = SegmentationFunction::new(identity_speed(&[0.0, 0.0], 5.0), &feature);
    function.calculate_speed_image().unwrap();
    function.provider_mut().set_threshold(6.0);

    // Speeds along the row are 5, 4, 3.
    let halfway = geometry.index_to_physical(0.5, 0.0);
    assert_eq!(halfway, [101.0, 0.0]);
    let v = function.propagation_speed_at(halfway).unwrap();
    assert!((v - 4.5).abs() < 1e-6, "v={v}");
    assert_eq!(function.propagation_speed(2, 0), 3.0);

    function.calculate_speed_image().unwrap();
    assert_eq!(function.propagation_speed(2, 0), 4.0);
}
