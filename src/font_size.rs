//! Random font sizes, concentrated on common body text sizes.

use rand::Rng;
use rand::distributions::Distribution;
use rand_distr::{Exp1, StandardNormal};

/// √(2π)
const SQRT_2PI: f64 = 2.5066282746310002;

/// A normal law restricted to `[min, max]`.
#[derive(Clone, Copy, Debug, PartialEq)]
struct Truncated {
    peak: f64,
    concentration: f64,
    min: f64,
    max: f64,
}

impl Truncated {
    const fn body(min: f64, max: f64) -> Self {
        Truncated { peak: 11.5, concentration: 1.5, min, max }
    }

    const fn large(min: f64, max: f64) -> Self {
        Truncated { peak: 25., concentration: 10., min, max }
    }

    fn new(min: u32, max: u32, peak: f64, concentration: f64)
           -> Option<Self> {
        if min > max || !concentration.is_finite() || concentration <= 0.
            || !peak.is_finite() {
            return None
        }
        let t = Truncated { peak, concentration,
                            min: min as f64, max: max as f64 };
        let (a, b) = t.standard_bounds();
        if !a.is_finite() || !b.is_finite() { return None }
        Some(t)
    }

    /// The bounds in units of standard deviation from the peak.
    fn standard_bounds(&self) -> (f64, f64) {
        ((self.min - self.peak) / self.concentration,
         (self.max - self.peak) / self.concentration)
    }

    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> u32 {
        let (a, b) = self.standard_bounds();
        let z = if a >= 0. { standard_tail(rng, a, b) }
                else if b <= 0. { - standard_tail(rng, -b, -a) }
                else { standard_central(rng, a, b) };
        // Rounding stays in range: the bounds are integers.
        (self.peak + self.concentration * z)
            .clamp(self.min, self.max).round() as u32
    }
}

/// Standard normal restricted to `[a, b]` with `a < 0 < b`.
fn standard_central<R: Rng + ?Sized>(rng: &mut R, a: f64, b: f64) -> f64 {
    if b - a < SQRT_2PI {
        // Uniform proposal, accepted with probability exp(-z²/2).
        loop {
            let z = a + (b - a) * rng.gen::<f64>();
            if rng.gen::<f64>() <= (-0.5 * z * z).exp() { return z }
        }
    }
    // [a, b] holds at least the mass of [0, √(2π)]: about one half.
    loop {
        let z: f64 = rng.sample(StandardNormal);
        if (a ..= b).contains(&z) { return z }
    }
}

/// Standard normal restricted to `[a, b]` with `0 ≤ a ≤ b`
/// (C. P. Robert, Simulation of truncated normal variables, 1995).
fn standard_tail<R: Rng + ?Sized>(rng: &mut R, a: f64, b: f64) -> f64 {
    let w = b - a;
    if w <= 0. { return a }
    if w * (a + 0.5 * w) <= 1. {
        // Narrow interval: the density varies by a factor e at most.
        loop {
            let z = a + w * rng.gen::<f64>();
            if rng.gen::<f64>() <= (0.5 * (a * a - z * z)).exp() {
                return z
            }
        }
    }
    // Translated exponential proposal with the optimal rate.
    let rate = 0.5 * (a + (a * a + 4.).sqrt());
    loop {
        let e: f64 = rng.sample(Exp1);
        let z = a + e / rate;
        if z <= b && rng.gen::<f64>() <= (-0.5 * (z - rate).powi(2)).exp() {
            return z
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Law {
    Single(Truncated),
    /// Draw from `body` with probability `p_body`, else from `large`.
    Mixture { body: Truncated, large: Truncated, p_body: f64 },
}

/// Distribution of font sizes (in points).
///
/// ```
/// use rand::distributions::Distribution;
/// use contrast_patch::FontSizeDistribution;
/// let d = FontSizeDistribution::default();
/// let size = d.sample(&mut rand::thread_rng());
/// assert!((5 ..= 60).contains(&size));
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FontSizeDistribution(Law);

impl FontSizeDistribution {
    /// Sizes in `min ..= max` following a normal law centered at
    /// `peak` with standard deviation `concentration` (the smaller,
    /// the more concentrated around `peak`).  Returns `None` if
    /// `min > max` or the normal law is degenerate.
    ///
    /// The peak may lie outside `[min, max]`, even far away: sizes then
    /// pile up on the bound closest to the peak.
    pub fn truncated_normal(min: u32, max: u32, peak: f64,
                            concentration: f64) -> Option<Self> {
        Truncated::new(min, max, peak, concentration)
            .map(|t| FontSizeDistribution(Law::Single(t)))
    }

    /// Sizes in `min ..= max`: 80% of them around 11.5 (mostly 8 to
    /// 14), 20% spread around 25.  Returns `None` if `min > max`.
    pub fn mixture(min: u32, max: u32) -> Option<Self> {
        if min > max { return None }
        let (min, max) = (min as f64, max as f64);
        Some(FontSizeDistribution(Law::Mixture {
            body: Truncated::body(min, max),
            large: Truncated::large(min, max),
            p_body: 0.8,
        }))
    }
}

impl Default for FontSizeDistribution {
    /// The mixture on `5 ..= 60`.
    fn default() -> Self {
        FontSizeDistribution(Law::Mixture {
            body: Truncated::body(5., 60.),
            large: Truncated::large(5., 60.),
            p_body: 0.8,
        })
    }
}

impl Distribution<u32> for FontSizeDistribution {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> u32 {
        match &self.0 {
            Law::Single(t) => t.sample(rng),
            Law::Mixture { body, large, p_body } => {
                if rng.gen_bool(*p_body) { body.sample(rng) }
                else { large.sample(rng) }
            }
        }
    }
}
