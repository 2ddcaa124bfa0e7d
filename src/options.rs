//! Settings for placing text on a background.

use crate::contrast::MIN_CONTRAST;
use crate::patch::Padding;
use crate::sampler::Anchor;

/// Number of places tried on a background before generating one.
pub const MAX_PATCH_ATTEMPTS: u32 = 21;

/// How a text patch is placed on its background.
#[derive(Clone, Debug, PartialEq)]
pub struct PlacementOptions {
    /// Contrast the text must reach against its background.
    pub min_contrast: f64,
    /// Places drawn on a background image before falling back to a
    /// solid color.  Values below 1 count as 1.
    pub max_attempts: u32,
    /// Margins added around the text.
    pub padding: Padding,
    /// Side kept when a solid background must be made readable.
    pub anchor: Anchor,
    /// Make a solid background color readable before using it.
    pub enforce_solid_contrast: bool,
}

impl Default for PlacementOptions {
    fn default() -> Self {
        Self {
            min_contrast: MIN_CONTRAST,
            max_attempts: MAX_PATCH_ATTEMPTS,
            padding: Padding::default(),
            anchor: Anchor::Text,
            enforce_solid_contrast: true,
        }
    }
}

impl PlacementOptions {
    /// Create a new options builder.
    pub fn builder() -> PlacementOptionsBuilder {
        PlacementOptionsBuilder::default()
    }
}

/// Builder for [`PlacementOptions`].
#[derive(Debug, Default)]
pub struct PlacementOptionsBuilder {
    options: PlacementOptions,
}

impl PlacementOptionsBuilder {
    #[must_use]
    pub fn min_contrast(mut self, min_contrast: f64) -> Self {
        self.options.min_contrast = min_contrast;
        self
    }

    #[must_use]
    pub fn max_attempts(mut self, max_attempts: u32) -> Self {
        self.options.max_attempts = max_attempts;
        self
    }

    #[must_use]
    pub fn padding(mut self, padding: impl Into<Padding>) -> Self {
        self.options.padding = padding.into();
        self
    }

    #[must_use]
    pub fn anchor(mut self, anchor: Anchor) -> Self {
        self.options.anchor = anchor;
        self
    }

    #[must_use]
    pub fn enforce_solid_contrast(mut self, yes: bool) -> Self {
        self.options.enforce_solid_contrast = yes;
        self
    }

    pub fn build(self) -> PlacementOptions { self.options }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let o = PlacementOptions::default();
        assert_eq!(o.min_contrast, 4.5);
        assert_eq!(o.max_attempts, 21);
        assert_eq!(o.padding, Padding::new(0, 0, 0, 0));
        assert_eq!(o.anchor, Anchor::Text);
        assert!(o.enforce_solid_contrast);
        assert_eq!(PlacementOptions::builder().build(), o);
    }

    #[test]
    fn builder_sets_fields() {
        let o = PlacementOptions::builder()
            .min_contrast(7.)
            .max_attempts(3)
            .padding([5, 5, 10, 10])
            .anchor(Anchor::Background)
            .enforce_solid_contrast(false)
            .build();
        assert_eq!(o.min_contrast, 7.);
        assert_eq!(o.max_attempts, 3);
        assert_eq!(o.padding, Padding::new(5, 5, 10, 10));
        assert_eq!(o.anchor, Anchor::Background);
        assert!(!o.enforce_solid_contrast);
    }
}
