//! Chart colors shared by the interactive viewer and the PNG export.

use crate::dashboard::EnergySource;

pub type Rgb = (u8, u8, u8);

/// Categorical palette for per-country series
pub const PALETTE: [Rgb; 10] = [
    (231, 76, 60),  // Red
    (46, 204, 113), // Green
    (155, 89, 182), // Purple
    (243, 156, 18), // Orange
    (26, 188, 156), // Teal
    (233, 30, 99),  // Pink
    (0, 188, 212),  // Cyan
    (255, 87, 34),  // Deep Orange
    (121, 85, 72),  // Brown
    (96, 125, 139), // Blue Grey
];

/// Donut slices, red-to-blue diverging
pub const MIX_COLORS: [Rgb; 3] = [(178, 24, 43), (244, 165, 130), (67, 147, 195)];

pub const BEFORE_COLOR: Rgb = (146, 197, 222);
pub const AFTER_COLOR: Rgb = (33, 102, 172);
pub const BAR_COLOR: Rgb = (52, 152, 219);
pub const INFO_COLOR: Rgb = (100, 149, 237);

/// Plasma color map stops, evenly spaced over 0..=1.
const PLASMA: [Rgb; 9] = [
    (13, 8, 135),
    (75, 3, 161),
    (125, 3, 168),
    (168, 34, 150),
    (203, 70, 121),
    (229, 107, 93),
    (248, 148, 65),
    (253, 195, 40),
    (240, 249, 33),
];

pub fn source_color(source: EnergySource) -> Rgb {
    match source {
        EnergySource::Solar => (255, 165, 0),  // orange
        EnergySource::Wind => (173, 216, 230), // light blue
        EnergySource::Hydro => (0, 0, 255),    // blue
    }
}

pub fn series_color(index: usize) -> Rgb {
    PALETTE[index % PALETTE.len()]
}

/// Linear interpolation along the plasma map; `t` is clamped to 0..=1.
pub fn plasma(t: f64) -> Rgb {
    let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
    let scaled = t * (PLASMA.len() - 1) as f64;
    let lower = scaled.floor() as usize;
    let upper = (lower + 1).min(PLASMA.len() - 1);
    let frac = scaled - lower as f64;

    let lerp = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * frac).round() as u8;
    let (a, b) = (PLASMA[lower], PLASMA[upper]);
    (lerp(a.0, b.0), lerp(a.1, b.1), lerp(a.2, b.2))
}

/// Text color readable on top of `background`.
pub fn contrast_text(background: Rgb) -> Rgb {
    let luma = 0.299 * background.0 as f64 + 0.587 * background.1 as f64 + 0.114 * background.2 as f64;
    if luma > 150.0 {
        (0, 0, 0)
    } else {
        (255, 255, 255)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plasma_hits_endpoints_and_clamps() {
        assert_eq!(plasma(0.0), (13, 8, 135));
        assert_eq!(plasma(1.0), (240, 249, 33));
        assert_eq!(plasma(0.5), (203, 70, 121));
        assert_eq!(plasma(-3.0), plasma(0.0));
        assert_eq!(plasma(7.0), plasma(1.0));
        assert_eq!(plasma(f64::NAN), plasma(0.0));
    }

    #[test]
    fn contrast_text_flips_on_bright_tiles() {
        assert_eq!(contrast_text(plasma(1.0)), (0, 0, 0));
        assert_eq!(contrast_text(plasma(0.0)), (255, 255, 255));
    }
}
