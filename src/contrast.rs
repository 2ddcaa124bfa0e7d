//! WCAG relative luminance and contrast ratio.
//!
//! See <https://www.w3.org/TR/WCAG21/#dfn-relative-luminance>.

use lazy_static::lazy_static;
use crate::color::RGBColor;

/// Minimum contrast for normal text (WCAG AA).
pub const MIN_CONTRAST: f64 = 4.5;

/// Contrast between black and white, the largest possible.
pub const MAX_CONTRAST: f64 = 21.;

lazy_static! {
    /// Linearized value of each 8-bit sRGB level.
    static ref SRGB_LINEAR: [f64; 256] = {
        let mut lut = [0.; 256];
        for (i, l) in lut.iter_mut().enumerate() {
            *l = srgb_to_linear(i as f64 / 255.);
        }
        lut
    };
}

/// sRGB transfer function: map a component in \[0, 1\] to linear
/// light.
#[inline]
pub fn srgb_to_linear(c: f64) -> f64 {
    if c <= 0.03928 { c / 12.92 } else { ((c + 0.055) / 1.055).powf(2.4) }
}

#[inline]
pub(crate) fn srgb_to_linear_u8(c: u8) -> f64 { SRGB_LINEAR[c as usize] }

/// Relative luminance of the color, in \[0, 1\] for in-range colors.
/// Only the first three channels are read.
///
/// ```
/// use contrast_patch::{luminance, Color};
/// assert_eq!(luminance(&Color::BLACK), 0.);
/// assert!((luminance(&Color::WHITE) - 1.).abs() < 1e-12);
/// ```
pub fn luminance<C: RGBColor + ?Sized>(color: &C) -> f64 {
    let [r, g, b] = color.to_linear();
    0.2126 * r + 0.7152 * g + 0.0722 * b
}

/// WCAG contrast ratio of two colors, in \[1, 21\].  The argument
/// order does not matter.
///
/// ```
/// use contrast_patch::{contrast_ratio, Color};
/// let r = contrast_ratio(&Color::WHITE, &Color::BLACK);
/// assert!((r - 21.).abs() < 1e-9);
/// ```
pub fn contrast_ratio<A, B>(a: &A, b: &B) -> f64
where A: RGBColor + ?Sized, B: RGBColor + ?Sized {
    ratio_of_luminances(luminance(a), luminance(b))
}

/// Combine two luminances into a contrast ratio.
#[inline]
pub fn ratio_of_luminances(l0: f64, l1: f64) -> f64 {
    let (lighter, darker) = if l0 >= l1 { (l0, l1) } else { (l1, l0) };
    (lighter + 0.05) / (darker + 0.05)
}
