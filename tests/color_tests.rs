use palette::{Hsl, IntoColor, Srgb};
use swatchboard::color::{Color, clamp, hsl_to_rgb, parse_rgb_triple, rgb_to_hsl};

/// Distance between two hues on the 360 degree circle.
fn hue_distance(a: u16, b: u16) -> u16 {
    let d = a.abs_diff(b) % 360;
    d.min(360 - d)
}

#[test]
fn test_primary_vectors() {
    assert_eq!(hsl_to_rgb(0, 100, 50), Srgb::new(255, 0, 0));
    assert_eq!(hsl_to_rgb(120, 100, 50), Srgb::new(0, 255, 0));
    assert_eq!(hsl_to_rgb(240, 100, 50), Srgb::new(0, 0, 255));
    assert_eq!(hsl_to_rgb(0, 0, 50), Srgb::new(128, 128, 128));
}

#[test]
fn test_lightness_survives_round_trip_everywhere() {
    for h in 0..=360u16 {
        for s in 0..=100u8 {
            for l in 0..=100u8 {
                let rgb = hsl_to_rgb(h, s, l);
                let back = rgb_to_hsl(rgb.red, rgb.green, rgb.blue);
                assert_eq!(back.lightness(), l, "hsl({h}, {s}, {l}) -> {rgb:?}");
            }
        }
    }
}

#[test]
fn test_round_trip_within_one_for_vivid_colors() {
    for h in 0..=360u16 {
        for s in 60..=100u8 {
            for l in 35..=65u8 {
                let rgb = hsl_to_rgb(h, s, l);
                let back = rgb_to_hsl(rgb.red, rgb.green, rgb.blue);
                assert!(
                    hue_distance(back.hue(), h) <= 1
                        && back.saturation().abs_diff(s) <= 1
                        && back.lightness().abs_diff(l) <= 1,
                    "hsl({h}, {s}, {l}) came back as {back}"
                );
            }
        }
    }
}

#[test]
fn test_low_chroma_loses_hue() {
    // Near-gray colors quantize to gray and lose their hue
    let rgb = hsl_to_rgb(200, 1, 1);
    let back = rgb_to_hsl(rgb.red, rgb.green, rgb.blue);
    assert_eq!(back.saturation(), 0);
    assert_eq!(back.hue(), 0);
}

#[test]
fn test_agrees_with_palette_hsl() {
    for h in (0..360u16).step_by(7) {
        for s in (0..=100u8).step_by(9) {
            for l in (0..=100u8).step_by(11) {
                let ours = hsl_to_rgb(h, s, l);
                let hsl: Hsl<palette::encoding::Srgb, f64> =
                    Hsl::new(f64::from(h), f64::from(s) / 100.0, f64::from(l) / 100.0);
                let theirs: Srgb<f64> = hsl.into_color();
                let channels = [
                    (ours.red, theirs.red),
                    (ours.green, theirs.green),
                    (ours.blue, theirs.blue),
                ];
                for (a, b) in channels {
                    let b = (b * 255.0).round() as i32;
                    assert!(
                        (i32::from(a) - b).abs() <= 1,
                        "hsl({h}, {s}, {l}): {ours:?} vs {theirs:?}"
                    );
                }
            }
        }
    }
}

#[test]
fn test_clamp_is_idempotent() {
    for v in [-1000.0, -10.4, 0.0, 0.5, 49.5, 99.9, 360.0, 370.0, 1e9] {
        let once = clamp(v, 0, 360).unwrap();
        assert_eq!(clamp(f64::from(once), 0, 360), Ok(once));
    }
    assert!(clamp(f64::NAN, 0, 100).is_err());
}

#[test]
fn test_parse_rgb_triple() {
    assert_eq!(parse_rgb_triple("rgb(10, 20, 30)"), Some(Srgb::new(10, 20, 30)));
    assert_eq!(parse_rgb_triple("rgba(1,2,3,0.5)"), Some(Srgb::new(1, 2, 3)));
    assert_eq!(parse_rgb_triple("rgb(300, 0, 99999999999)"), Some(Srgb::new(255, 0, 255)));
    assert_eq!(parse_rgb_triple("not a color"), None);
    assert_eq!(parse_rgb_triple("rgb(1, 2)"), None);
}

#[test]
fn test_color_new_clamps_and_defaults() {
    let c = Color::new(400.0, f64::NAN, -3.0);
    assert_eq!((c.hue(), c.saturation(), c.lightness()), (360, 100, 0));
}
