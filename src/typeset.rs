//! What the text renderer is asked to draw.
//!
//! Rasterizing the text is left to an implementation of
//! [`Typesetter`]; this module fixes the request it receives.

use std::path::{Path, PathBuf};
use image::RgbaImage;
use crate::color::Color;
use crate::error::{Error, Result};

/// Font families every renderer knows.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GenericFamily {
    Serif,
    SansSerif,
    Monospace,
}

impl GenericFamily {
    pub fn name(self) -> &'static str {
        match self {
            GenericFamily::Serif => "serif",
            GenericFamily::SansSerif => "sans-serif",
            GenericFamily::Monospace => "monospace",
        }
    }

    fn from_name(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "serif" => Some(GenericFamily::Serif),
            "sans-serif" => Some(GenericFamily::SansSerif),
            "monospace" => Some(GenericFamily::Monospace),
            _ => None,
        }
    }
}

/// The font to draw with.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FontSpec {
    Family(GenericFamily),
    /// A font file (TTF, OTF,…).
    File(PathBuf),
}

impl Default for FontSpec {
    fn default() -> Self { FontSpec::Family(GenericFamily::Serif) }
}

impl FontSpec {
    /// Interpret `s` as a generic family name (case insensitive) or,
    /// failing that, as the path of an existing font file.
    ///
    /// ```
    /// use contrast_patch::{FontSpec, GenericFamily};
    /// assert_eq!(FontSpec::parse("Sans-Serif").unwrap(),
    ///            FontSpec::Family(GenericFamily::SansSerif));
    /// assert!(FontSpec::parse("/no/such/font.ttf").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self> {
        if let Some(f) = GenericFamily::from_name(s) {
            return Ok(FontSpec::Family(f))
        }
        let path = Path::new(s);
        if path.is_file() {
            Ok(FontSpec::File(path.to_path_buf()))
        } else {
            Err(Error::InvalidFontSpec(s.to_string()))
        }
    }
}

/// A piece of text with an optional superscript or subscript.
#[derive(Clone, Debug, PartialEq)]
pub struct TextSpec {
    pub main: String,
    pub superscript: Option<String>,
    pub subscript: Option<String>,
    pub font: FontSpec,
    /// In points.
    pub font_size: f64,
    pub color: Color,
    pub dpi: u32,
}

impl Default for TextSpec {
    fn default() -> Self {
        TextSpec {
            main: "Text".to_string(),
            superscript: None,
            subscript: None,
            font: FontSpec::default(),
            font_size: 22.,
            color: Color::rgba(0, 0, 0, 255),
            dpi: 300,
        }
    }
}

/// Characters with a meaning in math markup.
const MARKUP_SPECIALS: [char; 4] = ['$', '%', '#', '&'];

/// Backslash-escape the markup characters of `s`.
pub fn escape_markup(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        if MARKUP_SPECIALS.contains(&c) { out.push('\\') }
        out.push(c);
    }
    out
}

impl TextSpec {
    pub fn new(main: impl Into<String>) -> Self {
        TextSpec { main: main.into(), ..Default::default() }
    }

    #[must_use]
    pub fn superscript(mut self, s: impl Into<String>) -> Self {
        self.superscript = Some(s.into());
        self
    }

    #[must_use]
    pub fn subscript(mut self, s: impl Into<String>) -> Self {
        self.subscript = Some(s.into());
        self
    }

    /// The text in math markup: `main$^{sup}$` or `main$_{sub}$`.  A
    /// superscript takes precedence over a subscript.
    ///
    /// ```
    /// use contrast_patch::TextSpec;
    /// let t = TextSpec::new("100%").superscript("2");
    /// assert_eq!(t.markup(), r"100\%$^{2}$");
    /// ```
    pub fn markup(&self) -> String {
        let main = escape_markup(&self.main);
        match (&self.superscript, &self.subscript) {
            (Some(sup), _) => format!("{main}$^{{{sup}}}$"),
            (None, Some(sub)) => format!("{main}$_{{{sub}}}$"),
            (None, None) => main,
        }
    }
}

/// Renders text to a raster with an alpha channel, cut tight around
/// the glyphs.
pub trait Typesetter {
    fn render(&self, text: &TextSpec) -> Result<RgbaImage>;
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generic_families() {
        for (s, f) in [("serif", GenericFamily::Serif),
                       ("SERIF", GenericFamily::Serif),
                       ("sans-serif", GenericFamily::SansSerif),
                       ("Monospace", GenericFamily::Monospace)] {
            assert_eq!(FontSpec::parse(s).unwrap(), FontSpec::Family(f));
            assert_eq!(FontSpec::parse(f.name()).unwrap(),
                       FontSpec::Family(f));
        }
    }

    #[test]
    fn font_files_must_exist() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("georgia.ttf");
        let s = path.to_str().unwrap();
        assert!(matches!(FontSpec::parse(s), Err(Error::InvalidFontSpec(_))));
        std::fs::write(&path, b"not really a font").unwrap();
        assert_eq!(FontSpec::parse(s).unwrap(), FontSpec::File(path.clone()));
        // A directory is not a font.
        let d = dir.path().to_str().unwrap();
        assert!(matches!(FontSpec::parse(d), Err(Error::InvalidFontSpec(_))));
    }

    #[test]
    fn markup_escapes_and_scripts() {
        assert_eq!(TextSpec::new("a$b#c&d").markup(), r"a\$b\#c\&d");
        assert_eq!(TextSpec::new("H").subscript("2").markup(), "H$_{2}$");
        assert_eq!(TextSpec::new("x").superscript("n").subscript("i")
                   .markup(), "x$^{n}$");
        assert_eq!(TextSpec::default().markup(), "Text");
    }
}
