//! Colors as 3 or 4 channels of 8 bits.

use rgb::{RGB, RGBA, RGB8, RGBA8};
use crate::contrast::srgb_to_linear_u8;
use crate::error::{Error, Result};

/// Specifies the methods a RGB color encoding must provide to take
/// part in contrast computations.
pub trait RGBColor {
    /// Return the red, green, blue and alpha components of the color
    /// (in \[0, 255\]).  Encodings without alpha report `255.`.
    fn to_rgba(&self) -> RGBA<f64>;

    /// Return the linearized red, green and blue components (in
    /// \[0, 1\]).  Alpha never takes part.
    fn to_linear(&self) -> [f64; 3] {
        let RGBA { r, g, b, .. } = self.to_rgba();
        [r, g, b].map(|c| crate::contrast::srgb_to_linear(c / 255.))
    }
}

/// An sRGB color, with or without an alpha channel.
///
/// Alpha is carried along but never read by the contrast
/// computations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Color {
    Rgb(RGB8),
    Rgba(RGBA8),
}

impl Color {
    pub const BLACK: Color = Color::Rgb(RGB8 { r: 0, g: 0, b: 0 });
    pub const WHITE: Color = Color::Rgb(RGB8 { r: 255, g: 255, b: 255 });

    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color::Rgb(RGB8 { r, g, b })
    }

    #[inline]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Color::Rgba(RGBA8 { r, g, b, a })
    }

    /// The first three channels.
    #[inline]
    pub fn to_rgb8(self) -> RGB8 {
        match self {
            Color::Rgb(c) => c,
            Color::Rgba(RGBA8 { r, g, b, .. }) => RGB8 { r, g, b },
        }
    }

    /// The color as four channels, opaque if no alpha was given.
    #[inline]
    pub fn to_rgba8(self) -> RGBA8 {
        match self {
            Color::Rgb(RGB8 { r, g, b }) => RGBA8 { r, g, b, a: 255 },
            Color::Rgba(c) => c,
        }
    }

    /// The alpha channel, if the color has one.
    #[inline]
    pub fn alpha(self) -> Option<u8> {
        match self {
            Color::Rgb(_) => None,
            Color::Rgba(c) => Some(c.a),
        }
    }

    /// Number of channels: 3 or 4.
    #[inline]
    pub fn channels(self) -> usize {
        if self.alpha().is_some() { 4 } else { 3 }
    }

    /// Drop the alpha channel, if any.
    #[inline]
    pub fn strip_alpha(self) -> Self { Color::Rgb(self.to_rgb8()) }

    /// Give the color the alpha channel of `like`: `self` keeps its
    /// RGB channels, and becomes a 4-channel color exactly when `like`
    /// is one.
    ///
    /// ```
    /// use contrast_patch::Color;
    /// let c = Color::rgb(10, 20, 30).with_alpha_of(Color::rgba(0, 0, 0, 7));
    /// assert_eq!(c, Color::rgba(10, 20, 30, 7));
    /// ```
    pub fn with_alpha_of(self, like: Color) -> Self {
        let RGB8 { r, g, b } = self.to_rgb8();
        match like.alpha() {
            Some(a) => Color::Rgba(RGBA8 { r, g, b, a }),
            None => Color::Rgb(RGB8 { r, g, b }),
        }
    }

    /// Create a color from components normalized to \[0, 1\].  Values
    /// are rounded to the nearest 8-bit level and clamped.
    ///
    /// ```
    /// use contrast_patch::Color;
    /// let c = Color::from_unit(&[0., 0., 0., 1.]).unwrap();
    /// assert_eq!(c, Color::rgba(0, 0, 0, 255));
    /// ```
    pub fn from_unit(c: &[f64]) -> Result<Self> {
        let mut u = [0u8; 4];
        for (u, &c) in u.iter_mut().zip(c) { *u = unit_to_u8(c) }
        match c.len() {
            3 => Ok(Color::rgb(u[0], u[1], u[2])),
            4 => Ok(Color::rgba(u[0], u[1], u[2], u[3])),
            n => Err(Error::InvalidColor(n)),
        }
    }

    /// Return the components normalized to \[0, 1\] (3 or 4 of them).
    pub fn to_unit(self) -> Vec<f64> {
        let RGBA8 { r, g, b, a } = self.to_rgba8();
        let mut v: Vec<f64> = [r, g, b].iter()
            .map(|&c| f64::from(c) / 255.).collect();
        if self.alpha().is_some() { v.push(f64::from(a) / 255.) }
        v
    }

    /// Round a color with fractional components in \[0, 255\] (such as
    /// an average) to 8 bits, keeping alpha.
    pub fn from_rgba_f64(c: RGBA<f64>) -> Self {
        Color::rgba(level(c.r), level(c.g), level(c.b), level(c.a))
    }
}

#[inline]
fn unit_to_u8(c: f64) -> u8 { level(255. * c) }

#[inline]
fn level(c: f64) -> u8 { c.round().clamp(0., 255.) as u8 }

impl From<RGB8> for Color {
    #[inline]
    fn from(c: RGB8) -> Self { Color::Rgb(c) }
}

impl From<RGBA8> for Color {
    #[inline]
    fn from(c: RGBA8) -> Self { Color::Rgba(c) }
}

impl From<[u8; 3]> for Color {
    #[inline]
    fn from([r, g, b]: [u8; 3]) -> Self { Color::rgb(r, g, b) }
}

impl From<[u8; 4]> for Color {
    #[inline]
    fn from([r, g, b, a]: [u8; 4]) -> Self { Color::rgba(r, g, b, a) }
}

impl From<(u8, u8, u8)> for Color {
    #[inline]
    fn from((r, g, b): (u8, u8, u8)) -> Self { Color::rgb(r, g, b) }
}

impl From<(u8, u8, u8, u8)> for Color {
    #[inline]
    fn from((r, g, b, a): (u8, u8, u8, u8)) -> Self { Color::rgba(r, g, b, a) }
}

impl TryFrom<&[u8]> for Color {
    type Error = Error;

    fn try_from(c: &[u8]) -> Result<Self> {
        match *c {
            [r, g, b] => Ok(Color::rgb(r, g, b)),
            [r, g, b, a] => Ok(Color::rgba(r, g, b, a)),
            _ => Err(Error::InvalidColor(c.len())),
        }
    }
}

impl From<Color> for image::Rgba<u8> {
    #[inline]
    fn from(c: Color) -> Self {
        let RGBA8 { r, g, b, a } = c.to_rgba8();
        image::Rgba([r, g, b, a])
    }
}

impl RGBColor for Color {
    #[inline]
    fn to_rgba(&self) -> RGBA<f64> { self.to_rgba8().to_rgba() }

    #[inline]
    fn to_linear(&self) -> [f64; 3] { self.to_rgb8().to_linear() }
}

impl RGBColor for RGB8 {
    #[inline]
    fn to_rgba(&self) -> RGBA<f64> {
        RGBA{ r: self.r as f64, g: self.g as f64, b: self.b as f64, a: 255. }
    }

    #[inline]
    fn to_linear(&self) -> [f64; 3] {
        [self.r, self.g, self.b].map(srgb_to_linear_u8)
    }
}

impl RGBColor for RGBA8 {
    #[inline]
    fn to_rgba(&self) -> RGBA<f64> {
        RGBA{ r: self.r as f64, g: self.g as f64, b: self.b as f64,
              a: self.a as f64 }
    }

    #[inline]
    fn to_linear(&self) -> [f64; 3] {
        [self.r, self.g, self.b].map(srgb_to_linear_u8)
    }
}

/// Components in \[0, 255\], possibly fractional (e.g. a mean color).
impl RGBColor for RGB<f64> {
    #[inline]
    fn to_rgba(&self) -> RGBA<f64> {
        RGBA{ r: self.r, g: self.g, b: self.b, a: 255. }
    }
}

/// Components in \[0, 255\], possibly fractional (e.g. a mean color).
impl RGBColor for RGBA<f64> {
    #[inline]
    fn to_rgba(&self) -> RGBA<f64> { *self }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alpha_is_carried() {
        let c = Color::rgba(1, 2, 3, 4);
        assert_eq!(c.alpha(), Some(4));
        assert_eq!(c.channels(), 4);
        assert_eq!(c.strip_alpha(), Color::rgb(1, 2, 3));
        assert_eq!(Color::rgb(1, 2, 3).to_rgba8().a, 255);
        assert_eq!(Color::rgb(9, 9, 9).with_alpha_of(Color::BLACK),
                   Color::rgb(9, 9, 9));
    }

    #[test]
    fn unit_round_trip_keeps_channel_count() {
        let c = Color::from_unit(&[1., 0.5, 0.]).unwrap();
        assert_eq!(c, Color::rgb(255, 128, 0));
        let u = Color::rgba(0, 0, 0, 255).to_unit();
        assert_eq!(u, vec![0., 0., 0., 1.]);
        assert!(matches!(Color::from_unit(&[0.5; 5]),
                         Err(Error::InvalidColor(5))));
    }

    #[test]
    fn slices_need_three_or_four_channels() {
        let c: &[u8] = &[7, 8, 9, 10];
        assert_eq!(Color::try_from(c).unwrap(), Color::rgba(7, 8, 9, 10));
        let c: &[u8] = &[7, 8];
        assert!(matches!(Color::try_from(c), Err(Error::InvalidColor(2))));
    }

    #[test]
    fn mean_colors_round_to_nearest_level() {
        let c = Color::from_rgba_f64(RGBA { r: 127.5, g: 0.4, b: 300.,
                                            a: 254.6 });
        assert_eq!(c, Color::rgba(128, 0, 255, 255));
    }

    #[test]
    fn lut_matches_formula() {
        for v in [0u8, 10, 11, 128, 254, 255] {
            let direct = RGB { r: v as f64, g: v as f64, b: v as f64 };
            let lut = RGB8 { r: v, g: v, b: v };
            for (a, b) in direct.to_linear().iter().zip(lut.to_linear()) {
                assert!((a - b).abs() < 1e-12, "{v}: {a} ≠ {b}");
            }
        }
    }
}
