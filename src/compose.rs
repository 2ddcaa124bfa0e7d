//! Putting a rendered text over its background.
//!
//! [`compose`] reports every failure.  [`overlay_on_background`] and
//! [`generate_sample`] are meant for batch generation: a sample that
//! cannot be composed or saved is logged and skipped.

use std::path::{Path, PathBuf};
use image::{imageops, RgbaImage};
use log::{error, info};
use rand::Rng;
use crate::color::Color;
use crate::error::{Error, Result};
use crate::options::PlacementOptions;
use crate::patch::{sample_from_background, solid_canvases};
use crate::sampler::{ensure_readable_colors, Anchor};
use crate::typeset::{TextSpec, Typesetter};

/// What goes behind the text.
#[derive(Clone, Debug)]
pub enum Background {
    /// A plain color.
    Solid(Color),
    /// A picture, a legible part of which is cut out.
    Image(RgbaImage),
    /// A picture to load.
    File(PathBuf),
}

impl Default for Background {
    fn default() -> Self { Background::Solid(Color::WHITE) }
}

/// Compose the `text` raster (drawn in `text_color`) over
/// `background` and return the padded image.
///
/// A solid color is first made readable under `text_color` when
/// `options.enforce_solid_contrast` is set (the text being already
/// drawn, only the background may change).  A picture is sampled with
/// [`sample_from_background`].
pub fn compose<R: Rng + ?Sized>(
    rng: &mut R, text: &RgbaImage, text_color: Color,
    background: Background, options: &PlacementOptions,
) -> Result<RgbaImage> {
    let size = text.dimensions();
    let pad = &options.padding;
    let (mut canvas, mut extended) = match background {
        Background::Solid(mut fill) => {
            if options.enforce_solid_contrast {
                fill = ensure_readable_colors(
                    rng, text_color, fill, options.min_contrast,
                    Anchor::Text).1;
            }
            solid_canvases(size, pad, fill)
        }
        Background::Image(img) => sample(rng, &img, size, text_color,
                                         options)?,
        Background::File(path) => {
            let img = image::open(&path)?.to_rgba8();
            sample(rng, &img, size, text_color, options)?
        }
    };
    imageops::overlay(&mut canvas, text, 0, 0);
    imageops::replace(&mut extended, &canvas, pad.left as i64,
                      pad.top as i64);
    Ok(extended)
}

fn sample<R: Rng + ?Sized>(
    rng: &mut R, img: &RgbaImage, size: (u32, u32), text_color: Color,
    options: &PlacementOptions,
) -> Result<(RgbaImage, RgbaImage)> {
    match sample_from_background(rng, img, size, text_color, options) {
        Some(s) => Ok((s.crop, s.extended)),
        None => Err(Error::NoUsableRegion {
            background: img.dimensions(), patch: size,
            padding: options.padding }),
    }
}

/// Log the outcome of composing and saving to `output`.
fn report(result: Result<RgbaImage>, output: &Path)
          -> Option<(u32, u32)> {
    match result.and_then(|img| { img.save(output)?; Ok(img) }) {
        Ok(img) => {
            info!("combined image saved to {}", output.display());
            Some(img.dimensions())
        }
        Err(e) => {
            error!("error overlaying images for {}: {e}", output.display());
            None
        }
    }
}

/// Load the text image at `text_path` (converted to RGBA if needed),
/// [`compose`] it over `background` and save the result to `output`.
///
/// Returns the size of the saved image, or `None` if anything failed,
/// in which case the error has been logged.
pub fn overlay_on_background<R: Rng + ?Sized>(
    rng: &mut R, text_path: &Path, output: &Path, text_color: Color,
    background: Background, options: &PlacementOptions,
) -> Option<(u32, u32)> {
    let result = image::open(text_path).map_err(Error::from)
        .and_then(|text| compose(rng, &text.to_rgba8(), text_color,
                                 background, options));
    report(result, output)
}

/// Render `text` with `typesetter`, compose it over `background` and
/// save it to `output`.
///
/// With a solid background and `options.enforce_solid_contrast`, the
/// pair (text color, background) is made readable before rendering,
/// keeping the side given by `options.anchor`; so the text color may
/// change.
///
/// Rendering errors (e.g. an unusable font) are returned.  Failures
/// to compose or save are logged and give `Ok(None)`.
pub fn generate_sample<T, R>(
    typesetter: &T, rng: &mut R, text: &TextSpec, background: Background,
    options: &PlacementOptions, output: &Path,
) -> Result<Option<(u32, u32)>>
where T: Typesetter + ?Sized, R: Rng + ?Sized {
    let mut text = text.clone();
    let background = match background {
        Background::Solid(bg) if options.enforce_solid_contrast => {
            let (t, bg, _) = ensure_readable_colors(
                rng, text.color, bg, options.min_contrast, options.anchor);
            text.color = t;
            Background::Solid(bg)
        }
        b => b,
    };
    let raster = typesetter.render(&text)?;
    let result = compose(rng, &raster, text.color, background, options);
    Ok(report(result, output))
}


#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;
    use rand::{SeedableRng, rngs::StdRng};
    use crate::contrast::contrast_ratio;
    use crate::patch::Padding;
    use crate::typeset::FontSpec;

    fn rng() -> StdRng { StdRng::seed_from_u64(7) }

    /// Draws each character as a 6×10 block inside an 8×12 cell.
    struct BlockTypesetter;

    impl Typesetter for BlockTypesetter {
        fn render(&self, text: &TextSpec) -> Result<RgbaImage> {
            if let FontSpec::File(p) = &text.font {
                return Err(Error::InvalidFontSpec(p.display().to_string()))
            }
            let n = text.markup().chars().count() as u32;
            let ink: Rgba<u8> = text.color.into();
            Ok(RgbaImage::from_fn(8 * n, 12, |x, y| {
                if (1 .. 7).contains(&(x % 8)) && (1 .. 11).contains(&y) {
                    ink
                } else {
                    Rgba([0, 0, 0, 0])
                }
            }))
        }
    }

    fn text_raster(color: Color) -> RgbaImage {
        BlockTypesetter.render(&TextSpec { color, ..TextSpec::new("ab") })
            .unwrap()
    }

    #[test]
    fn solid_background_is_made_readable() {
        let black = Color::rgba(0, 0, 0, 255);
        let opts = PlacementOptions::builder()
            .padding([5, 5, 10, 10]).build();
        let img = compose(&mut rng(), &text_raster(black), black,
                          Background::Solid(Color::rgb(10, 10, 10)),
                          &opts).unwrap();
        assert_eq!(img.dimensions(), (16 + 15, 12 + 15));
        let corner = img.get_pixel(0, 0).0;
        let fill = Color::rgba(corner[0], corner[1], corner[2], corner[3]);
        assert!(contrast_ratio(&black, &fill) >= 4.5);
        // Transparent parts of the text show the fill, ink covers it.
        assert_eq!(img.get_pixel(5, 5), img.get_pixel(0, 0));
        assert_eq!(img.get_pixel(6, 6), &Rgba([0, 0, 0, 255]));
    }

    #[test]
    fn solid_background_can_be_kept() {
        let black = Color::rgb(0, 0, 0);
        let opts = PlacementOptions::builder()
            .enforce_solid_contrast(false).build();
        let img = compose(&mut rng(), &text_raster(black), black,
                          Background::Solid(Color::rgb(10, 10, 10)),
                          &opts).unwrap();
        assert_eq!(img.dimensions(), (16, 12));
        assert_eq!(img.get_pixel(0, 0), &Rgba([10, 10, 10, 255]));
    }

    #[test]
    fn picture_background_is_sampled() {
        let black = Color::rgb(0, 0, 0);
        let bg = RgbaImage::from_pixel(100, 80, Rgba([250, 240, 230, 255]));
        let opts = PlacementOptions::builder()
            .padding(Padding::uniform(4)).build();
        let img = compose(&mut rng(), &text_raster(black), black,
                          Background::Image(bg), &opts).unwrap();
        assert_eq!(img.dimensions(), (24, 20));
        assert_eq!(img.get_pixel(0, 0), &Rgba([250, 240, 230, 255]));
        assert_eq!(img.get_pixel(4, 4), &Rgba([250, 240, 230, 255]));
        assert_eq!(img.get_pixel(5, 5), &Rgba([0, 0, 0, 255]));
    }

    #[test]
    fn small_picture_has_no_usable_region() {
        let black = Color::rgb(0, 0, 0);
        let text = RgbaImage::from_pixel(20, 20, Rgba([0, 0, 0, 255]));
        let bg = RgbaImage::from_pixel(10, 10, Rgba([255; 4]));
        let r = compose(&mut rng(), &text, black, Background::Image(bg),
                        &PlacementOptions::default());
        assert!(matches!(r, Err(Error::NoUsableRegion {
            background: (10, 10), patch: (20, 20), .. })));
    }

    #[test]
    fn overlay_writes_the_padded_image() {
        let dir = tempfile::tempdir().unwrap();
        let text_path = dir.path().join("text.png");
        let bg_path = dir.path().join("bg.png");
        let out = dir.path().join("out.png");
        text_raster(Color::BLACK).save(&text_path).unwrap();
        RgbaImage::from_pixel(64, 64, Rgba([255, 255, 255, 255]))
            .save(&bg_path).unwrap();
        let opts = PlacementOptions::builder().padding([5, 5, 10, 10])
            .build();
        let size = overlay_on_background(
            &mut rng(), &text_path, &out, Color::BLACK,
            Background::File(bg_path), &opts);
        assert_eq!(size, Some((31, 27)));
        assert_eq!(image::open(&out).unwrap().to_rgba8().dimensions(),
                   (31, 27));
    }

    #[test]
    fn overlay_failures_are_swallowed() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("out.png");
        let missing = dir.path().join("missing.png");
        assert_eq!(overlay_on_background(
            &mut rng(), &missing, &out, Color::BLACK,
            Background::default(), &PlacementOptions::default()), None);
        assert!(!out.exists());
        // Too small a background is no exception.
        let text_path = dir.path().join("text.png");
        text_raster(Color::BLACK).save(&text_path).unwrap();
        let bg = RgbaImage::from_pixel(4, 4, Rgba([255; 4]));
        assert_eq!(overlay_on_background(
            &mut rng(), &text_path, &out, Color::BLACK,
            Background::Image(bg), &PlacementOptions::default()), None);
        assert!(!out.exists());
    }

    #[test]
    fn sample_keeps_background_when_anchored_on_it() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("sample.png");
        let bg = Color::rgb(30, 30, 30);
        let text = TextSpec { color: Color::rgba(40, 40, 40, 255),
                              ..TextSpec::new("x").superscript("2") };
        let opts = PlacementOptions::builder()
            .anchor(Anchor::Background).padding([1, 1, 1, 1]).build();
        let size = generate_sample(&BlockTypesetter, &mut rng(), &text,
                                   Background::Solid(bg), &opts, &out)
            .unwrap();
        // "x$^{2}$" is 7 characters.
        assert_eq!(size, Some((8 * 7 + 2, 14)));
        let img = image::open(&out).unwrap().to_rgba8();
        assert_eq!(img.get_pixel(0, 0), &Rgba([30, 30, 30, 255]));
        let ink = img.get_pixel(2, 2).0;
        let ink = Color::rgba(ink[0], ink[1], ink[2], ink[3]);
        assert_eq!(ink.alpha(), Some(255));
        assert!(contrast_ratio(&ink, &bg) >= 4.5);
    }

    #[test]
    fn rendering_errors_are_returned() {
        let dir = tempfile::tempdir().unwrap();
        let text = TextSpec { font: FontSpec::File("nope.ttf".into()),
                              ..TextSpec::default() };
        let r = generate_sample(&BlockTypesetter, &mut rng(), &text,
                                Background::default(),
                                &PlacementOptions::default(),
                                &dir.path().join("x.png"));
        assert!(matches!(r, Err(Error::InvalidFontSpec(_))));
    }
}
