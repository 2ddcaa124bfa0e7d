//! Legible text on random backgrounds.
//!
//! Building blocks to synthesize text images for training data while
//! guaranteeing the text stays readable, in the sense of the [WCAG
//! contrast ratio](https://www.w3.org/TR/WCAG21/#dfn-contrast-ratio):
//!
//! - [`luminance`] and [`contrast_ratio`] of sRGB colors;
//! - [`generate_contrasting_colors`] and [`ensure_readable_colors`] to
//!   draw or fix a (text, background) pair;
//! - [`sample_from_background`] to find a legible place for the text
//!   on a picture, with a generated solid background as fallback;
//! - [`compose`], [`overlay_on_background`] and [`generate_sample`]
//!   to put everything together.
//!
//! All sampling functions take the random generator as argument.
//!
//! ```
//! use contrast_patch::{compose, Background, Color, PlacementOptions};
//! use image::{Rgba, RgbaImage};
//! let text = RgbaImage::from_pixel(30, 12, Rgba([0, 0, 0, 255]));
//! let options = PlacementOptions::builder().padding([5, 5, 10, 10]).build();
//! let img = compose(&mut rand::thread_rng(), &text, Color::BLACK,
//!                   Background::Solid(Color::rgb(20, 20, 20)), &options)?;
//! assert_eq!(img.dimensions(), (45, 27));
//! # Ok::<(), contrast_patch::Error>(())
//! ```

mod color;
mod compose;
mod contrast;
mod error;
mod font_size;
mod options;
mod patch;
mod sampler;
mod typeset;

pub use color::{Color, RGBColor};
pub use compose::{compose, generate_sample, overlay_on_background,
                  Background};
pub use contrast::{contrast_ratio, luminance, ratio_of_luminances,
                   srgb_to_linear, MAX_CONTRAST, MIN_CONTRAST};
pub use error::{Error, Result};
pub use font_size::FontSizeDistribution;
pub use options::{PlacementOptions, PlacementOptionsBuilder,
                  MAX_PATCH_ATTEMPTS};
pub use patch::{mean_color, sample_from_background, solid_canvases,
                BackgroundSample, Padding, Patch, SampleOrigin};
pub use sampler::{ensure_readable_colors, generate_contrasting_colors,
                  try_generate_contrasting_colors, Anchor};
pub use typeset::{escape_markup, FontSpec, GenericFamily, TextSpec,
                  Typesetter};
