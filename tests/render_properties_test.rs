//! Rendering properties of the scatter renderer.
//!
//! Run: cargo test --test render_properties_test

#![allow(clippy::unwrap_used)]

use calib_plot::prelude::*;
use proptest::prelude::*;

const PNG_SIGNATURE: [u8; 8] = [137, 80, 78, 71, 13, 10, 26, 10];

fn cluster_size_spec() -> PlotSpec {
    PlotSpec::builder(AxisSpec::new("V_{thrs} (mV)", 194.22, 223.71), AxisSpec::new("Muon cluster size", 0.0, 4.0))
        .point(200.0, 2.350164, 0.1501929)
        .point(210.0, 2.51343, 0.1849057)
        .point(220.0, 2.43778, 0.1063492)
        .build()
        .unwrap()
}

fn count(haystack: &str, needle: &str) -> usize {
    haystack.matches(needle).count()
}

// ============================================================================
// Scenario: muon cluster size threshold scan
// ============================================================================

#[test]
fn scenario_three_markers_with_scaled_error_bars() {
    let spec = cluster_size_spec();
    let figure = ScatterRenderer::new(PlotStyle::report()).render(&spec).unwrap();
    let frame = figure.frame();
    let pixels_per_unit = frame.height / 4.0;

    assert_eq!(figure.markers().len(), 3);
    for (marker, bar) in figure.markers().iter().zip(figure.error_bars()) {
        assert!(frame.contains(marker.center));
        assert!(bar.is_visible());
        assert!((bar.x - marker.center.x).abs() < f32::EPSILON);
    }
    for (bar, point) in figure.error_bars().iter().zip(spec.points()) {
        let expected = point.y_error as f32 * pixels_per_unit;
        assert!((bar.half_height - expected).abs() < 1e-3, "{} vs {expected}", bar.half_height);
    }

    let svg = figure.to_svg();
    assert_eq!(count(&svg, r#"class="marker""#), 3);
    assert_eq!(count(&svg, r#"class="error-bar""#), 3);
    assert!(svg.contains("Muon cluster size"));
    assert!(svg.contains(r#"baseline-shift="sub""#));
}

#[test]
fn single_zero_error_point_has_no_visible_bar() {
    let spec = PlotSpec::builder(AxisSpec::new("x", 0.0, 10.0), AxisSpec::new("y", 0.0, 10.0))
        .point(5.0, 5.0, 0.0)
        .build()
        .unwrap();
    let figure = ScatterRenderer::default().render(&spec).unwrap();

    assert_eq!(figure.markers().len(), 1);
    assert_eq!(figure.error_bars().len(), 1);
    assert!(!figure.error_bars()[0].is_visible());

    let svg = figure.to_svg();
    assert_eq!(count(&svg, r#"class="marker""#), 1);
    assert_eq!(count(&svg, r#"class="error-bar""#), 0);

    let fb = figure.to_framebuffer().unwrap();
    let style = PlotStyle::report();
    let marker_pixels = fb.count_pixels(style.marker_color);
    assert!(marker_pixels > 0);
    // a filled circle of radius 4 covers at most a 9x9 square
    assert!(marker_pixels <= 81);
}

#[test]
fn validation_rejects_empty_and_negative() {
    let axes = || (AxisSpec::new("x", 0.0, 1.0), AxisSpec::new("y", 0.0, 1.0));

    let (x, y) = axes();
    assert!(matches!(PlotSpec::builder(x, y).build(), Err(Error::Validation(ValidationError::EmptyPoints))));

    let (x, y) = axes();
    let err = PlotSpec::builder(x, y).point(0.5, 0.5, -1.0).build().unwrap_err();
    assert!(matches!(err, Error::Validation(ValidationError::NegativeError { index: 0, .. })));
    assert!(err.to_string().contains("-1"));

    let (x, y) = axes();
    let err = PlotSpec::builder(x, y).point(f64::INFINITY, 0.5, 0.0).build().unwrap_err();
    assert!(matches!(err, Error::Validation(ValidationError::NonFinite { field: "x", .. })));

    let err = PlotSpec::builder(AxisSpec::new("x", 1.0, 1.0), AxisSpec::new("y", 0.0, 1.0))
        .point(1.0, 0.5, 0.0)
        .build()
        .unwrap_err();
    assert!(matches!(err, Error::Validation(ValidationError::InvalidAxisRange { .. })));
}

// ============================================================================
// Output backends
// ============================================================================

#[test]
fn png_output_has_signature_and_marker_pixels() {
    let figure = ScatterRenderer::default().render(&cluster_size_spec()).unwrap();

    let bytes = figure.to_png_bytes().unwrap();
    assert_eq!(&bytes[..8], &PNG_SIGNATURE);

    let fb = figure.to_framebuffer().unwrap();
    assert_eq!((fb.width(), fb.height()), (800, 776));
    let center = figure.markers()[0].center;
    assert_eq!(fb.get_pixel(center.x.round() as u32, center.y.round() as u32), Some(Rgba::BLUE));
    assert_eq!(fb.get_pixel(2, 2), Some(Rgba::WHITE));
}

#[test]
fn embedded_svg_has_raster_and_vector_text() {
    let spec = ThresholdScan::ClusterSize.spec().unwrap();
    let figure = ScatterRenderer::default().render(&spec).unwrap();
    let svg = figure.to_embedded_svg().unwrap();

    assert_eq!(count(&svg, "<image"), 1);
    assert!(svg.contains("data:image/png;base64,"));
    assert!(svg.contains(r#"<tspan font-weight="bold">CMS Front-End electronics</tspan>"#));
    assert_eq!(count(&svg, "<circle"), 0);
}

#[test]
fn write_picks_format_from_extension() {
    let dir = tempfile::tempdir().unwrap();
    let figure = ScatterRenderer::default().render(&cluster_size_spec()).unwrap();

    let svg_path = dir.path().join("thrs_CLS.svg");
    let png_path = dir.path().join("thrs_CLS.png");
    figure.write(&svg_path).unwrap();
    figure.write(&png_path).unwrap();

    assert!(std::fs::read_to_string(&svg_path).unwrap().starts_with("<svg"));
    assert_eq!(&std::fs::read(&png_path).unwrap()[..8], &PNG_SIGNATURE);

    let bad = figure.write(dir.path().join("thrs_CLS.pdf"));
    assert!(matches!(bad, Err(Error::UnsupportedFormat(_))));
}

#[test]
fn custom_style_changes_canvas_and_colors() {
    let style = PlotStyle { width: 400, height: 300, marker_color: Rgba::RED, ..PlotStyle::report() };
    let figure = ScatterRenderer::new(style).render(&cluster_size_spec()).unwrap();

    assert_eq!(figure.size(), (400, 300));
    let svg = figure.to_svg();
    assert!(svg.contains(r#"width="400""#));
    assert!(svg.contains(r#"class="marker" cx="#));
    assert!(svg.contains(r#"fill="rgb(255,0,0)""#));
}

#[test]
fn every_preset_renders() {
    let renderer = ScatterRenderer::default();
    for scan in ThresholdScan::ALL {
        let figure = renderer.render(&scan.spec().unwrap()).unwrap();
        let svg = figure.to_svg();
        assert_eq!(count(&svg, r#"class="marker""#), 3, "{}", scan.file_stem());
        assert!(svg.contains("Preliminary"));
    }
}

// ============================================================================
// Properties
// ============================================================================

fn point_strategy() -> impl Strategy<Value = DataPoint> {
    (1.0f64..99.0, 1.0f64..99.0, prop_oneof![Just(0.0), 0.01f64..10.0])
        .prop_map(|(x, y, err)| DataPoint::new(x, y, err))
}

/// Any finite value, from everyday magnitudes up to the edges of `f64`.
fn finite_value() -> impl Strategy<Value = f64> {
    use proptest::num::f64::{NEGATIVE, NORMAL, POSITIVE, SUBNORMAL, ZERO};
    prop_oneof![-1e3f64..1e3, POSITIVE | NEGATIVE | NORMAL | SUBNORMAL | ZERO]
}

fn wide_point_strategy() -> impl Strategy<Value = DataPoint> {
    use proptest::num::f64::{NORMAL, POSITIVE};
    let error = prop_oneof![Just(0.0), 0.0f64..1e3, POSITIVE | NORMAL];
    (finite_value(), finite_value(), error).prop_map(|(x, y, err)| DataPoint::new(x, y, err))
}

fn axis_strategy(title: &'static str) -> impl Strategy<Value = AxisSpec> {
    (finite_value(), finite_value())
        .prop_filter("bounds must differ", |(a, b)| a != b)
        .prop_map(move |(a, b)| AxisSpec::new(title, a.min(b), a.max(b)))
}

fn style_strategy() -> impl Strategy<Value = PlotStyle> {
    (1u32..1200, 1u32..1200, 0.0f32..2000.0, 0.0f32..500.0, 0.0f32..500.0, 1usize..=100).prop_map(
        |(width, height, marker_radius, error_bar_width, frame_width, tick_target)| PlotStyle {
            width,
            height,
            marker_radius,
            error_bar_width,
            frame_width,
            tick_target,
            cap_half_width: error_bar_width,
            ..PlotStyle::report()
        },
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_one_marker_and_bar_per_point(points in prop::collection::vec(point_strategy(), 1..30)) {
        let spec = PlotSpec::builder(AxisSpec::new("x", 0.0, 100.0), AxisSpec::new("y", 0.0, 100.0))
            .points(points.iter().copied())
            .build()
            .unwrap();
        let figure = ScatterRenderer::default().render(&spec).unwrap();

        prop_assert_eq!(figure.markers().len(), points.len());
        prop_assert_eq!(figure.error_bars().len(), points.len());

        let svg = figure.to_svg();
        prop_assert_eq!(count(&svg, r#"class="marker""#), points.len());

        let with_error = points.iter().filter(|p| p.y_error > 0.0).count();
        prop_assert_eq!(count(&svg, r#"class="error-bar""#), with_error);
        for (bar, point) in figure.error_bars().iter().zip(&points) {
            prop_assert_eq!(bar.is_visible(), point.y_error > 0.0);
        }
    }

    #[test]
    fn prop_rendering_is_idempotent(points in prop::collection::vec(point_strategy(), 1..10)) {
        let spec = PlotSpec::builder(AxisSpec::new("x", 0.0, 100.0), AxisSpec::new("y", 0.0, 100.0))
            .points(points)
            .annotation(Annotation::new("#bf{CMS} 904", 0.12, 0.96))
            .build()
            .unwrap();
        let renderer = ScatterRenderer::default();

        let first = renderer.render(&spec).unwrap();
        let second = renderer.render(&spec).unwrap();
        prop_assert_eq!(first.to_svg(), second.to_svg());
        prop_assert!(first.to_framebuffer().unwrap() == second.to_framebuffer().unwrap());
    }

    #[test]
    fn prop_any_valid_spec_renders(
        x_axis in axis_strategy("x"),
        y_axis in axis_strategy("y"),
        points in prop::collection::vec(wide_point_strategy(), 1..8),
    ) {
        let spec = PlotSpec::builder(x_axis, y_axis).points(points.iter().copied()).build().unwrap();
        let style = PlotStyle::report();
        let figure = ScatterRenderer::new(style.clone()).render(&spec).unwrap();

        prop_assert_eq!(figure.markers().len(), points.len());
        prop_assert_eq!(figure.error_bars().len(), points.len());
        for axis in [figure.x_axis(), figure.y_axis()] {
            prop_assert!(axis.ticks.len() <= 4 * style.tick_target + 2);
            prop_assert!(axis.ticks.windows(2).all(|w| w[0].value < w[1].value));
        }

        let svg = figure.to_svg();
        let drawn = figure.markers().iter().filter(|m| m.in_frame).count();
        prop_assert_eq!(count(&svg, r#"class="marker""#), drawn);
        prop_assert!(figure.to_framebuffer().is_ok());
    }

    #[test]
    fn prop_derived_range_contains_every_point(points in prop::collection::vec(wide_point_strategy(), 1..8)) {
        let yaml_points: Vec<String> = points.iter().map(|p| format!("{{x: {:e}, y: {:e}}}", p.x, p.y)).collect();
        let yaml = format!("points: [{}]", yaml_points.join(", "));
        let spec = calib_plot::config::FigureConfig::parse(&yaml).unwrap().into_spec().unwrap();

        for point in spec.points() {
            prop_assert!(spec.x_axis().min <= point.x && point.x <= spec.x_axis().max);
            prop_assert!(spec.y_axis().min <= point.y && point.y <= spec.y_axis().max);
        }
    }

    #[test]
    fn prop_negative_error_always_rejected(err in -1e6f64..-1e-9) {
        let result = PlotSpec::builder(AxisSpec::new("x", 0.0, 1.0), AxisSpec::new("y", 0.0, 1.0))
            .point(0.5, 0.5, err)
            .build();
        let is_negative_error = matches!(result, Err(Error::Validation(ValidationError::NegativeError { .. })));
        prop_assert!(is_negative_error);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn prop_in_range_style_rasterizes(style in style_strategy(), points in prop::collection::vec(point_strategy(), 1..5)) {
        let spec = PlotSpec::builder(AxisSpec::new("x", 0.0, 100.0), AxisSpec::new("y", 0.0, 100.0))
            .points(points)
            .build()
            .unwrap();
        let figure = ScatterRenderer::new(style).render(&spec).unwrap();
        let bytes = figure.to_png_bytes().unwrap();
        prop_assert_eq!(&bytes[..8], &PNG_SIGNATURE);
    }
}

#[test]
fn out_of_range_style_is_rejected_before_drawing() {
    let spec = cluster_size_spec();
    let styles = [
        PlotStyle { marker_radius: 3.0e9, ..PlotStyle::report() },
        PlotStyle { error_bar_width: f32::NAN, ..PlotStyle::report() },
        PlotStyle { tick_target: usize::MAX, ..PlotStyle::report() },
    ];
    for style in styles {
        let result = ScatterRenderer::new(style).render(&spec);
        assert!(matches!(result, Err(Error::InvalidStyle { .. })), "{result:?}");
    }

    let huge = ScatterRenderer::new(PlotStyle { width: 100_000, height: 100_000, ..PlotStyle::report() });
    assert!(matches!(huge.render(&spec), Err(Error::InvalidDimensions { .. })));
}

#[test]
fn extreme_axis_ranges_render_in_bounded_time() {
    let lo = 1e20_f64;
    let cases = [
        (AxisSpec::new("x", 0.0, 1.0), AxisSpec::new("y", -1e308, 1e308)),
        (AxisSpec::new("x", lo, f64::from_bits(lo.to_bits() + 1)), AxisSpec::new("y", 0.0, 1.0)),
        (AxisSpec::new("x", -f64::MAX, f64::MAX), AxisSpec::new("y", 1e-300, 2e-300)),
    ];
    for (x_axis, y_axis) in cases {
        let spec = PlotSpec::builder(x_axis, y_axis).point(0.5, 0.5, 0.1).build().unwrap();
        let figure = ScatterRenderer::default().render(&spec).unwrap();
        assert!(figure.x_axis().ticks.len() <= 22);
        assert!(figure.y_axis().ticks.len() <= 22);
        assert!(figure.to_png_bytes().is_ok());
    }
}
