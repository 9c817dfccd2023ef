// Color conversions.
//
// RGB <-> HSV/HSL plus the sRGB -> linear -> XYZ -> L*a*b* pipeline backing
// the delta-E metric. The HSV/HSL -> RGB direction uses the triangle-wave
// formulation because the fragment shaders use the same expressions; keeping
// both sides identical makes boundary pixels agree between CPU readback and
// the GPU framebuffer.

use super::value::{HslColor, HsvColor, RgbColor};

// D65 reference white in XYZ.
const D65_WHITE: [f32; 3] = [0.95047, 1.00000, 1.08883];

// sRGB -> XYZ (D65), rows are X, Y, Z.
const SRGB_TO_XYZ: [[f32; 3]; 3] = [
    [0.4124564, 0.3575761, 0.1804375],
    [0.2126729, 0.7151522, 0.0721750],
    [0.0193339, 0.1191920, 0.9503041],
];

const LAB_EPSILON: f32 = 216.0 / 24389.0; // (6/29)^3
const LAB_KAPPA: f32 = 903.3;

fn fract(x: f32) -> f32 {
    x - x.floor()
}

// Triangle-wave hue ramp, one channel per offset k in (1, 2/3, 1/3).
fn hue_ramp(h: f32, k: f32) -> f32 {
    ((fract(h + k) * 6.0 - 3.0).abs() - 1.0).clamp(0.0, 1.0)
}

pub fn hue_to_rgb(h: f32) -> RgbColor {
    RgbColor::clamped(
        hue_ramp(h, 1.0),
        hue_ramp(h, 2.0 / 3.0),
        hue_ramp(h, 1.0 / 3.0),
    )
}

pub fn hsv_to_rgb(color: HsvColor) -> RgbColor {
    let HsvColor { h, s, v } = color;
    let channel = |k: f32| v * (hue_ramp(h, k) * s - s + 1.0);
    RgbColor::clamped(channel(1.0), channel(2.0 / 3.0), channel(1.0 / 3.0))
}

pub fn hsl_to_rgb(color: HslColor) -> RgbColor {
    let HslColor { h, s, l } = color;
    let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let channel = |k: f32| l + c * (hue_ramp(h, k) - 0.5);
    RgbColor::clamped(channel(1.0), channel(2.0 / 3.0), channel(1.0 / 3.0))
}

// Shared min/max decomposition; hue is normalized to [0, 1) and achromatic
// inputs land on hue 0.
fn hue_min_max(color: RgbColor) -> (f32, f32, f32) {
    let RgbColor { r, g, b } = color;
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    let hue = if delta <= f32::EPSILON {
        0.0
    } else if max == r {
        (((g - b) / delta).rem_euclid(6.0)) / 6.0
    } else if max == g {
        ((b - r) / delta + 2.0) / 6.0
    } else {
        ((r - g) / delta + 4.0) / 6.0
    };

    (fract(hue), min, max)
}

pub fn rgb_to_hsv(color: RgbColor) -> HsvColor {
    let (h, min, max) = hue_min_max(color);
    let s = if max <= f32::EPSILON {
        0.0
    } else {
        (max - min) / max
    };
    HsvColor { h, s, v: max }
}

pub fn rgb_to_hsl(color: RgbColor) -> HslColor {
    let (h, min, max) = hue_min_max(color);
    let l = (max + min) / 2.0;
    let delta = max - min;
    let s = if delta <= f32::EPSILON {
        0.0
    } else {
        delta / (1.0 - (2.0 * l - 1.0).abs())
    };
    HslColor { h, s, l }
}

pub fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

pub fn rgb_to_xyz(color: RgbColor) -> [f32; 3] {
    let linear = [
        srgb_to_linear(color.r),
        srgb_to_linear(color.g),
        srgb_to_linear(color.b),
    ];
    let mut xyz = [0.0f32; 3];
    for (row, out) in SRGB_TO_XYZ.iter().zip(xyz.iter_mut()) {
        *out = row[0] * linear[0] + row[1] * linear[1] + row[2] * linear[2];
    }
    xyz
}

fn lab_f(t: f32) -> f32 {
    if t > LAB_EPSILON {
        t.cbrt()
    } else {
        (LAB_KAPPA * t + 16.0) / 116.0
    }
}

pub fn rgb_to_lab(color: RgbColor) -> [f32; 3] {
    let xyz = rgb_to_xyz(color);
    let fx = lab_f(xyz[0] / D65_WHITE[0]);
    let fy = lab_f(xyz[1] / D65_WHITE[1]);
    let fz = lab_f(xyz[2] / D65_WHITE[2]);
    [116.0 * fy - 16.0, 500.0 * (fx - fy), 200.0 * (fy - fz)]
}

// CIE76 delta-E: euclidean distance in L*a*b*.
pub fn delta_e_lab(a: [f32; 3], b: [f32; 3]) -> f32 {
    let dl = a[0] - b[0];
    let da = a[1] - b[1];
    let db = a[2] - b[2];
    (dl * dl + da * da + db * db).sqrt()
}

pub fn delta_e(a: RgbColor, b: RgbColor) -> f32 {
    delta_e_lab(rgb_to_lab(a), rgb_to_lab(b))
}

pub fn rgb_distance(a: RgbColor, b: RgbColor) -> f32 {
    let dr = a.r - b.r;
    let dg = a.g - b.g;
    let db = a.b - b.b;
    (dr * dr + dg * dg + db * db).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: f32, b: f32, tolerance: f32, what: &str) {
        assert!(
            (a - b).abs() <= tolerance,
            "{}: {} vs {} (tol {})",
            what,
            a,
            b,
            tolerance
        );
    }

    #[test]
    fn primary_colors_convert_to_expected_hsv() {
        let red = RgbColor::new(1.0, 0.0, 0.0).unwrap();
        let hsv = rgb_to_hsv(red);
        assert_eq!((hsv.h, hsv.s, hsv.v), (0.0, 1.0, 1.0));

        let green = RgbColor::new(0.0, 1.0, 0.0).unwrap();
        assert_close(rgb_to_hsv(green).h, 1.0 / 3.0, 1e-6, "green hue");

        let blue = RgbColor::new(0.0, 0.0, 1.0).unwrap();
        assert_close(rgb_to_hsv(blue).h, 2.0 / 3.0, 1e-6, "blue hue");
    }

    #[test]
    fn achromatic_inputs_have_hue_zero() {
        for value in [0.0, 0.25, 0.5, 1.0] {
            let gray = RgbColor::new(value, value, value).unwrap();
            assert_eq!(rgb_to_hsv(gray).h, 0.0);
            assert_eq!(rgb_to_hsl(gray).h, 0.0);
            assert_eq!(rgb_to_hsv(gray).s, 0.0);
            assert_eq!(rgb_to_hsl(gray).s, 0.0);
        }
    }

    #[test]
    fn hsv_round_trip_is_tight() {
        let mut worst = 0.0f32;
        for i in 0..12 {
            for j in 0..12 {
                for k in 0..12 {
                    let rgb = RgbColor::new(i as f32 / 11.0, j as f32 / 11.0, k as f32 / 11.0)
                        .unwrap();
                    let back = hsv_to_rgb(rgb_to_hsv(rgb));
                    worst = worst
                        .max((back.r - rgb.r).abs())
                        .max((back.g - rgb.g).abs())
                        .max((back.b - rgb.b).abs());
                }
            }
        }
        assert!(worst < 1e-6, "hsv round trip error {}", worst);
    }

    #[test]
    fn hsl_round_trip_is_tight() {
        let mut worst = 0.0f32;
        for i in 0..12 {
            for j in 0..12 {
                for k in 0..12 {
                    let rgb = RgbColor::new(i as f32 / 11.0, j as f32 / 11.0, k as f32 / 11.0)
                        .unwrap();
                    let back = hsl_to_rgb(rgb_to_hsl(rgb));
                    worst = worst
                        .max((back.r - rgb.r).abs())
                        .max((back.g - rgb.g).abs())
                        .max((back.b - rgb.b).abs());
                }
            }
        }
        assert!(worst < 1e-6, "hsl round trip error {}", worst);
    }

    #[test]
    fn hue_ramp_hits_the_six_primaries() {
        let cases = [
            (0.0, [1.0, 0.0, 0.0]),
            (1.0 / 6.0, [1.0, 1.0, 0.0]),
            (1.0 / 3.0, [0.0, 1.0, 0.0]),
            (0.5, [0.0, 1.0, 1.0]),
            (2.0 / 3.0, [0.0, 0.0, 1.0]),
            (5.0 / 6.0, [1.0, 0.0, 1.0]),
        ];
        for (h, expected) in cases {
            let rgb = hue_to_rgb(h);
            for (actual, want) in rgb.components().into_iter().zip(expected) {
                assert_close(actual, want, 1e-5, "hue ramp");
            }
        }
    }

    #[test]
    fn lab_reference_points() {
        let white = rgb_to_lab(RgbColor::new(1.0, 1.0, 1.0).unwrap());
        assert_close(white[0], 100.0, 0.01, "white L*");
        assert_close(white[1], 0.0, 0.01, "white a*");
        assert_close(white[2], 0.0, 0.01, "white b*");

        let black = rgb_to_lab(RgbColor::new(0.0, 0.0, 0.0).unwrap());
        assert_close(black[0], 0.0, 0.01, "black L*");

        let white_rgb = RgbColor::new(1.0, 1.0, 1.0).unwrap();
        let black_rgb = RgbColor::new(0.0, 0.0, 0.0).unwrap();
        assert_close(delta_e(white_rgb, black_rgb), 100.0, 0.01, "black-white dE");
    }

    #[test]
    fn rgb_distance_matches_hand_computation() {
        let a = RgbColor::new(0.0, 0.0, 0.0).unwrap();
        let b = RgbColor::new(1.0, 1.0, 1.0).unwrap();
        assert_close(rgb_distance(a, b), 3.0f32.sqrt(), 1e-6, "corner distance");
        assert_eq!(rgb_distance(a, a), 0.0);
    }
}
