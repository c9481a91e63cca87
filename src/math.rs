//! Color math: direct conversions without external dependencies.
//!
//! Hue is in degrees `[0, 360)`, saturation/value/lightness in `0.0–1.0` and
//! RGB channels in unrounded `0.0–255.0`. Rounding to 8-bit channels is the
//! caller's business.

use crate::constants::{CHANNEL_MAX, HUE_RANGE, HUE_SECTOR, MAX_DECIMALS, TEXT_DARK, TEXT_LIGHT};

/// Wrap a hue in degrees into `[0, 360)`.
pub(crate) fn normalize_hue(h: f64) -> f64 {
    let wrapped = h.rem_euclid(HUE_RANGE);
    // rem_euclid can round up to exactly the modulus for tiny negative inputs
    if wrapped >= HUE_RANGE {
        0.0
    } else {
        wrapped
    }
}

pub(crate) fn clamp_unit(x: f64) -> f64 {
    x.clamp(0.0, 1.0)
}

pub(crate) fn clamp_channel(x: f64) -> f64 {
    x.clamp(0.0, CHANNEL_MAX)
}

/// Round a real channel to an 8-bit value, clamping first.
pub(crate) fn to_channel(x: f64) -> u8 {
    clamp_channel(x).round() as u8
}

/// Round to `decimals` decimal places, at most [`MAX_DECIMALS`].
pub(crate) fn round_to(x: f64, decimals: u32) -> f64 {
    let scale = 10f64.powi(decimals.min(MAX_DECIMALS) as i32);
    (x * scale).round() / scale
}

/// HSV → RGB, standard sector decomposition.
pub(crate) fn hsv_to_rgb(h: f64, s: f64, v: f64) -> [f64; 3] {
    let v255 = v * CHANNEL_MAX;
    if s == 0.0 {
        return [v255; 3];
    }
    let h6 = normalize_hue(h) / HUE_SECTOR;
    let i = h6.floor();
    let f = h6 - i;
    let p = v255 * (1.0 - s);
    let q = v255 * (1.0 - s * f);
    let t = v255 * (1.0 - s * (1.0 - f));
    match (i as u32) % 6 {
        0 => [v255, t, p],
        1 => [q, v255, p],
        2 => [p, v255, t],
        3 => [p, q, v255],
        4 => [t, p, v255],
        _ => [v255, p, q],
    }
}

/// RGB → HSV. The hue is `None` for greys, where it is undefined.
pub(crate) fn rgb_to_hsv(r: f64, g: f64, b: f64) -> (Option<f64>, f64, f64) {
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    let v = max / CHANNEL_MAX;
    let s = if max == 0.0 { 0.0 } else { delta / max };

    let h = if delta == 0.0 {
        None
    } else if max == r {
        Some((g - b) / delta)
    } else if max == g {
        Some((b - r) / delta + 2.0)
    } else {
        Some((r - g) / delta + 4.0)
    };

    (h.map(|sector| normalize_hue(sector * HUE_SECTOR)), s, v)
}

/// HSL → HSV. Hue passes through unchanged.
pub(crate) fn hsl_to_hsv(s_hsl: f64, l: f64) -> (f64, f64) {
    let v = l + s_hsl * l.min(1.0 - l);
    let s_hsv = if v == 0.0 { 0.0 } else { 2.0 * (1.0 - l / v) };
    (s_hsv, v)
}

/// HSV → HSL. Hue passes through unchanged.
pub(crate) fn hsv_to_hsl(s_hsv: f64, v: f64) -> (f64, f64) {
    let l = v * (1.0 - s_hsv / 2.0);
    let s_hsl = if l == 0.0 || l == 1.0 {
        0.0
    } else {
        (v - l) / l.min(1.0 - l)
    };
    (s_hsl, l)
}

fn linearize(channel: u8) -> f64 {
    let c = channel as f64 / CHANNEL_MAX;
    if c <= 0.039_28 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// WCAG relative luminance of an sRGB color.
pub(crate) fn relative_luminance(r: u8, g: u8, b: u8) -> f64 {
    0.2126 * linearize(r) + 0.7152 * linearize(g) + 0.0722 * linearize(b)
}

pub(crate) fn contrast_to_white(r: u8, g: u8, b: u8) -> f64 {
    1.05 / (relative_luminance(r, g, b) + 0.05)
}

pub(crate) fn contrast_to_black(r: u8, g: u8, b: u8) -> f64 {
    (relative_luminance(r, g, b) + 0.05) / 0.05
}

/// Gray level of the text that reads best on top of the given color.
pub(crate) fn contrast_flip(r: u8, g: u8, b: u8) -> u8 {
    if contrast_to_white(r, g, b) > contrast_to_black(r, g, b) {
        TEXT_LIGHT
    } else {
        TEXT_DARK
    }
}

/// Print a real number with at most `decimals` fractional digits and no
/// trailing zeros, e.g. `0.5`, `1`, `33.333`.
pub(crate) fn format_number(x: f64, decimals: u32) -> String {
    let rounded = round_to(x, decimals);
    // avoid "-0"
    let rounded = if rounded == 0.0 { 0.0 } else { rounded };
    let mut out = format!("{:.*}", decimals as usize, rounded);
    if out.contains('.') {
        let trimmed = out.trim_end_matches('0').trim_end_matches('.').len();
        out.truncate(trimmed);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use rand::{rngs::StdRng, Rng, SeedableRng};

    #[test]
    fn primary_colors() {
        assert_eq!(hsv_to_rgb(0.0, 1.0, 1.0), [255.0, 0.0, 0.0]);
        assert_eq!(hsv_to_rgb(120.0, 1.0, 1.0), [0.0, 255.0, 0.0]);
        assert_eq!(hsv_to_rgb(240.0, 1.0, 1.0), [0.0, 0.0, 255.0]);

        assert_eq!(rgb_to_hsv(255.0, 0.0, 0.0), (Some(0.0), 1.0, 1.0));
        assert_eq!(rgb_to_hsv(0.0, 0.0, 255.0), (Some(240.0), 1.0, 1.0));
    }

    #[test]
    fn greys_have_no_hue() {
        assert_eq!(rgb_to_hsv(0.0, 0.0, 0.0), (None, 0.0, 0.0));
        let (h, s, v) = rgb_to_hsv(128.0, 128.0, 128.0);
        assert_eq!(h, None);
        assert_eq!(s, 0.0);
        assert_relative_eq!(v, 128.0 / 255.0);
    }

    #[test]
    fn hue_wraps_into_range() {
        assert_eq!(normalize_hue(360.0), 0.0);
        assert_eq!(normalize_hue(-90.0), 270.0);
        assert_eq!(normalize_hue(725.0), 5.0);
        assert!(normalize_hue(-1e-15) < HUE_RANGE);
    }

    #[test]
    fn rgb_hsv_rgb_within_one_channel_step() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        for _ in 0..1000 {
            let rgb = [rng.gen_range(0..=255u8), rng.gen_range(0..=255u8), rng.gen_range(0..=255u8)];
            let (h, s, v) = rgb_to_hsv(rgb[0] as f64, rgb[1] as f64, rgb[2] as f64);
            let back = hsv_to_rgb(h.unwrap_or(0.0), s, v);
            for (orig, round_trip) in rgb.iter().zip(back) {
                let diff = (*orig as i32 - to_channel(round_trip) as i32).abs();
                assert!(diff <= 1, "{rgb:?} came back as {back:?}");
            }
        }
    }

    #[test]
    fn hsv_rgb_hsv_within_tolerance() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..1000 {
            let h = rng.gen_range(0.0..360.0);
            let s = rng.gen_range(0.01..=1.0);
            let v = rng.gen_range(0.01..=1.0);
            let [r, g, b] = hsv_to_rgb(h, s, v);
            let (h2, s2, v2) = rgb_to_hsv(r, g, b);
            let h2 = h2.expect("saturated colors have a hue");

            let hue_diff = (h - h2).abs();
            assert!(hue_diff.min(HUE_RANGE - hue_diff) <= 1.0, "hue {h} came back as {h2}");
            assert!((s - s2).abs() <= 0.01, "saturation {s} came back as {s2}");
            assert!((v - v2).abs() <= 0.01, "value {v} came back as {v2}");
        }
    }

    #[test]
    fn hsl_and_hsv_are_distinct() {
        // hsl(0, 100%, 50%) is pure red, which in HSV has full value
        let (s, v) = hsl_to_hsv(1.0, 0.5);
        assert_relative_eq!(s, 1.0);
        assert_relative_eq!(v, 1.0);

        let (s, v) = hsl_to_hsv(0.5, 0.25);
        let (s_hsl, l) = hsv_to_hsl(s, v);
        assert_relative_eq!(s_hsl, 0.5, epsilon = 1e-12);
        assert_relative_eq!(l, 0.25, epsilon = 1e-12);

        assert_eq!(hsl_to_hsv(0.3, 0.0), (0.0, 0.0));
        assert_eq!(hsv_to_hsl(0.0, 1.0), (0.0, 1.0));
    }

    #[test]
    fn text_color_contrasts_with_background() {
        assert_eq!(contrast_flip(0, 0, 0), TEXT_LIGHT);
        assert_eq!(contrast_flip(255, 255, 255), TEXT_DARK);
        assert_eq!(contrast_flip(255, 255, 0), TEXT_DARK);
        assert_eq!(contrast_flip(0, 0, 128), TEXT_LIGHT);
    }

    #[test]
    fn rounding_caps_the_precision() {
        assert_eq!(round_to(0.666, 2), 0.67);
        assert_eq!(round_to(0.5, u32::MAX), 0.5);
        assert_eq!(round_to(0.25, 1 << 31), 0.25);
        assert!(round_to(1.0 / 3.0, 400).is_finite());
    }

    #[test]
    fn numbers_print_without_trailing_zeros() {
        assert_eq!(format_number(0.5, 3), "0.5");
        assert_eq!(format_number(1.0, 3), "1");
        assert_eq!(format_number(100.0 / 3.0, 3), "33.333");
        assert_eq!(format_number(-0.0001, 3), "0");
        assert_eq!(format_number(120.0, 3), "120");
    }
}
