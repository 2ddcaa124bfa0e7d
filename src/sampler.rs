//! Random search for color pairs meeting a minimum contrast.

use rand::Rng;
use crate::color::Color;
use crate::contrast::contrast_ratio;
use crate::error::{Error, Result};

/// Which side of a (text, background) pair stays put when the pair
/// has to be regenerated.  The other side is drawn anew.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Anchor {
    /// Keep the text color, draw a new background.
    #[default]
    Text,
    /// Keep the background color, draw a new text color.
    Background,
}

#[inline]
fn random_rgb<R: Rng + ?Sized>(rng: &mut R) -> Color {
    Color::rgb(rng.gen(), rng.gen(), rng.gen())
}

/// Draw colors uniformly in the sRGB cube until one reaches
/// `min_contrast` against `fixed`.  Returns `fixed`, the 3-channel
/// candidate and their contrast ratio.
///
/// There is no bound on the number of draws: the loop never ends
/// when `min_contrast` exceeds what `fixed` can reach (at most 21,
/// against black or white).  Use [`try_generate_contrasting_colors`]
/// for a bounded search.
///
/// ```
/// use contrast_patch::{generate_contrasting_colors, contrast_ratio, Color};
/// let mut rng = rand::thread_rng();
/// let (fixed, c, r) = generate_contrasting_colors(&mut rng, Color::WHITE, 4.5);
/// assert!(r >= 4.5 && contrast_ratio(&fixed, &c) == r);
/// ```
pub fn generate_contrasting_colors<R: Rng + ?Sized>(
    rng: &mut R, fixed: Color, min_contrast: f64) -> (Color, Color, f64) {
    loop {
        let candidate = random_rgb(rng);
        let ratio = contrast_ratio(&fixed, &candidate);
        if ratio >= min_contrast {
            return (fixed, candidate, ratio)
        }
    }
}

/// Same as [`generate_contrasting_colors`] but give up after
/// `max_attempts` draws (at least one), reporting the best candidate
/// seen.
pub fn try_generate_contrasting_colors<R: Rng + ?Sized>(
    rng: &mut R, fixed: Color, min_contrast: f64, max_attempts: u32,
) -> Result<(Color, Color, f64)> {
    let max_attempts = max_attempts.max(1);
    let mut draw = || {
        let candidate = random_rgb(rng);
        (candidate, contrast_ratio(&fixed, &candidate))
    };
    let (mut best, mut best_ratio) = draw();
    for _ in 1 .. max_attempts {
        if best_ratio >= min_contrast { break }
        let (candidate, ratio) = draw();
        if ratio > best_ratio { (best, best_ratio) = (candidate, ratio) }
    }
    if best_ratio >= min_contrast {
        return Ok((fixed, best, best_ratio))
    }
    Err(Error::ContrastUnattainable {
        fixed, min_contrast, attempts: max_attempts, best, best_ratio })
}

/// Make sure `text` is readable on `bg`.
///
/// If the pair already reaches `min_contrast`, it is returned
/// untouched (alpha channels included).  Otherwise the side named by
/// `anchor` is kept and the other one is replaced by a random color
/// meeting the threshold; the replacement gets the alpha channel of
/// the color it replaces, if that one had any.  Only RGB channels
/// take part in the contrast.
///
/// ```
/// use contrast_patch::{ensure_readable_colors, Anchor, Color};
/// let mut rng = rand::thread_rng();
/// let text = Color::rgb(200, 50, 50);
/// let (t, _bg, r) = ensure_readable_colors(
///     &mut rng, text, Color::rgb(180, 70, 80), 4.5, Anchor::Text);
/// assert_eq!(t, text);
/// assert!(r >= 4.5);
/// ```
pub fn ensure_readable_colors<R: Rng + ?Sized>(
    rng: &mut R, text: Color, bg: Color, min_contrast: f64, anchor: Anchor,
) -> (Color, Color, f64) {
    let ratio = contrast_ratio(&text.strip_alpha(), &bg.strip_alpha());
    if ratio >= min_contrast {
        return (text, bg, ratio)
    }
    match anchor {
        Anchor::Text => {
            let (_, new_bg, ratio) = generate_contrasting_colors(
                rng, text.strip_alpha(), min_contrast);
            (text, new_bg.with_alpha_of(bg), ratio)
        }
        Anchor::Background => {
            let (_, new_text, ratio) = generate_contrasting_colors(
                rng, bg.strip_alpha(), min_contrast);
            (new_text.with_alpha_of(text), bg, ratio)
        }
    }
}
