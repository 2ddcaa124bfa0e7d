//! Placing a text patch on a background raster.

use image::{imageops, RgbaImage};
use log::{debug, warn};
use rand::Rng;
use rgb::RGBA;
use crate::color::Color;
use crate::contrast::contrast_ratio;
use crate::options::PlacementOptions;
use crate::sampler::{ensure_readable_colors, Anchor};

/// Margins, in pixels, left around a placed patch.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Padding {
    pub left: u32,
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
}

impl Padding {
    #[inline]
    pub const fn new(left: u32, top: u32, right: u32, bottom: u32) -> Self {
        Padding { left, top, right, bottom }
    }

    #[inline]
    pub const fn uniform(p: u32) -> Self { Padding::new(p, p, p, p) }

    /// Draw each margin uniformly in `0 ..= max`.
    pub fn random<R: Rng + ?Sized>(rng: &mut R, max: u32) -> Self {
        Padding::new(rng.gen_range(0 ..= max), rng.gen_range(0 ..= max),
                     rng.gen_range(0 ..= max), rng.gen_range(0 ..= max))
    }

    /// `left + right`.
    #[inline]
    pub fn horizontal(&self) -> u64 { self.left as u64 + self.right as u64 }

    /// `top + bottom`.
    #[inline]
    pub fn vertical(&self) -> u64 { self.top as u64 + self.bottom as u64 }

    /// Size of a `(w, h)` patch once padded, saturating at `u32::MAX`.
    #[inline]
    pub fn outer_size(&self, (w, h): (u32, u32)) -> (u32, u32) {
        (w.saturating_add(self.left).saturating_add(self.right),
         h.saturating_add(self.top).saturating_add(self.bottom))
    }
}

impl From<[u32; 4]> for Padding {
    #[inline]
    fn from([left, top, right, bottom]: [u32; 4]) -> Self {
        Padding { left, top, right, bottom }
    }
}

/// A rectangle of a raster: `left ≤ x < right`, `top ≤ y < bottom`.
/// The width and height are derived from the bounds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Patch {
    pub left: u32,
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
}

impl Patch {
    /// The patch of size `(w, h)` whose top left corner is `(left, top)`.
    #[inline]
    pub fn at(left: u32, top: u32, (w, h): (u32, u32)) -> Self {
        Patch { left, top, right: left + w, bottom: top + h }
    }

    #[inline]
    pub fn width(&self) -> u32 { self.right - self.left }

    #[inline]
    pub fn height(&self) -> u32 { self.bottom - self.top }

    #[inline]
    pub fn size(&self) -> (u32, u32) { (self.width(), self.height()) }

    /// The patch grown by `pad` on each side.  Saturates at 0 on the
    /// left and top and at `u32::MAX` on the right and bottom.
    pub fn extend(&self, pad: &Padding) -> Self {
        Patch { left: self.left.saturating_sub(pad.left),
                top: self.top.saturating_sub(pad.top),
                right: self.right.saturating_add(pad.right),
                bottom: self.bottom.saturating_add(pad.bottom) }
    }

    /// Whether the patch lies inside a `(w, h)` raster.
    #[inline]
    pub fn fits(&self, (w, h): (u32, u32)) -> bool {
        self.right <= w && self.bottom <= h
    }

    /// Copy the patch out of `img`.  Parts outside `img` are dropped.
    pub fn crop(&self, img: &RgbaImage) -> RgbaImage {
        imageops::crop_imm(img, self.left, self.top,
                           self.width(), self.height()).to_image()
    }
}

/// Per channel average of the pixels of `img` (in \[0, 255\]).  An
/// empty image averages to transparent black.
pub fn mean_color(img: &RgbaImage) -> RGBA<f64> {
    let n = img.width() as u64 * img.height() as u64;
    if n == 0 {
        return RGBA { r: 0., g: 0., b: 0., a: 0. }
    }
    let mut sum = [0u64; 4];
    for px in img.pixels() {
        for (s, &c) in sum.iter_mut().zip(&px.0) { *s += c as u64 }
    }
    let n = n as f64;
    RGBA { r: sum[0] as f64 / n, g: sum[1] as f64 / n,
           b: sum[2] as f64 / n, a: sum[3] as f64 / n }
}

/// Where the pixels of a [`BackgroundSample`] come from.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SampleOrigin {
    /// Cut out of the background at this place.
    Cropped(Patch),
    /// No place was legible: solid fill of this color.
    Generated(Color),
}

/// Background for a text patch, with and without the padding.
#[derive(Clone, Debug)]
pub struct BackgroundSample {
    /// Exactly the size of the text patch.
    pub crop: RgbaImage,
    /// `crop` with the padding around it.
    pub extended: RgbaImage,
    pub origin: SampleOrigin,
    /// Number of contrast evaluations made (at most
    /// `options.max_attempts`).
    pub attempts: u32,
}

/// Fill a `size` canvas and its `padding`-extended version with
/// `color`.
pub fn solid_canvases(size: (u32, u32), padding: &Padding, color: Color)
                      -> (RgbaImage, RgbaImage) {
    let px: image::Rgba<u8> = color.into();
    let (w, h) = size;
    let (ew, eh) = padding.outer_size(size);
    (RgbaImage::from_pixel(w, h, px), RgbaImage::from_pixel(ew, eh, px))
}

/// Look for a place of `background` where a `text_size` patch,
/// surrounded by `options.padding`, is legible in `text_color`.
///
/// Up to `options.max_attempts` places are drawn uniformly; a place is
/// accepted when the average color of the patch reaches
/// `options.min_contrast` against `text_color`.  If none is accepted,
/// the background content is dropped and a solid color readable
/// under `text_color` is generated instead.
///
/// Returns `None` when the background is too small to hold the patch
/// with its padding.
pub fn sample_from_background<R: Rng + ?Sized>(
    rng: &mut R, background: &RgbaImage, text_size: (u32, u32),
    text_color: Color, options: &PlacementOptions,
) -> Option<BackgroundSample> {
    let pad = &options.padding;
    let (img_w, img_h) = background.dimensions();
    let (w, h) = text_size;
    let width_range = img_w as i64 - w as i64 - pad.horizontal() as i64;
    let height_range = img_h as i64 - h as i64 - pad.vertical() as i64;
    // The left (top) edge is drawn in `pad.left ..= width_range`
    // (`pad.top ..= height_range`); that must not be empty.
    if width_range <= 0 || height_range <= 0
        || width_range < pad.left as i64 || height_range < pad.top as i64 {
        debug!("{img_w}×{img_h} background too small for a {w}×{h} \
                patch padded with {pad:?}");
        return None
    }
    let (width_range, height_range) = (width_range as u32, height_range as u32);

    let max_attempts = options.max_attempts.max(1);
    let mut mean = RGBA { r: 0., g: 0., b: 0., a: 0. };
    for attempt in 1 ..= max_attempts {
        let left = rng.gen_range(pad.left ..= width_range);
        let top = rng.gen_range(pad.top ..= height_range);
        let patch = Patch::at(left, top, text_size);
        let crop = patch.crop(background);
        mean = mean_color(&crop);
        let ratio = contrast_ratio(&text_color, &mean);
        if ratio >= options.min_contrast {
            // `left - pad.left ≥ 0` and `right + pad.right ≤ img_w -
            // pad.left`, same vertically.
            let outer = patch.extend(pad);
            debug_assert!(outer.fits((img_w, img_h)));
            return Some(BackgroundSample {
                crop, extended: outer.crop(background),
                origin: SampleOrigin::Cropped(patch), attempts: attempt })
        }
        debug!("attempt {attempt}: {patch:?} has contrast {ratio:.2} \
                < {}", options.min_contrast);
    }

    warn!("background does not contrast with text color {text_color:?} \
           after {max_attempts} attempts, generating a solid one");
    let (_, fill, _) = ensure_readable_colors(
        rng, text_color, Color::from_rgba_f64(mean), options.min_contrast,
        Anchor::Text);
    let (crop, extended) = solid_canvases(text_size, pad, fill);
    Some(BackgroundSample { crop, extended,
                            origin: SampleOrigin::Generated(fill),
                            attempts: max_attempts })
}
