// Put a rendered text image over a background:
//
//   overlay TEXT.png OUT.png [BACKGROUND] [LEFT TOP RIGHT BOTTOM]
//
// BACKGROUND is an image file or a color "#rrggbb" (black if absent:
// it is then changed to contrast with the text).  Set RUST_LOG=debug
// to follow the search for a legible place.

use std::{env, error::Error, path::{Path, PathBuf}, process::ExitCode};
use contrast_patch::{overlay_on_background, Background, Color,
                     PlacementOptions, Padding};

type Err = Box<dyn Error>;

/// Parse "#rrggbb".
fn parse_color(s: &str) -> Option<Color> {
    let hex = s.strip_prefix('#')?;
    if hex.len() != 6 { return None }
    let c = |i: usize| u8::from_str_radix(hex.get(i .. i + 2)?, 16).ok();
    Some(Color::rgb(c(0)?, c(2)?, c(4)?))
}

fn background(arg: Option<&String>) -> Result<Background, Err> {
    match arg {
        None => Ok(Background::Solid(Color::BLACK)),
        Some(s) if s.starts_with('#') => parse_color(s)
            .map(Background::Solid)
            .ok_or_else(|| format!("overlay: not a color “{s}”").into()),
        Some(s) => Ok(Background::File(PathBuf::from(s))),
    }
}

fn padding(args: &[String]) -> Result<Padding, Err> {
    match args {
        [] => Ok(Padding::default()),
        [l, t, r, b] => Ok(Padding::new(l.parse()?, t.parse()?,
                                        r.parse()?, b.parse()?)),
        _ => Err("overlay: give 4 padding values".into()),
    }
}

fn run(args: &[String]) -> Result<bool, Err> {
    let [text, out, rest @ ..] = args else {
        return Err("usage: overlay TEXT.png OUT.png [BACKGROUND] \
                    [LEFT TOP RIGHT BOTTOM]".into())
    };
    let (bg, pad) = match rest {
        [] => (None, &rest[..]),
        [bg, pad @ ..] => (Some(bg), pad),
    };
    let options = PlacementOptions::builder().padding(padding(pad)?).build();
    // Text drawn in opaque black.
    let text_color = Color::from_unit(&[0., 0., 0., 1.])?;
    let size = overlay_on_background(
        &mut rand::thread_rng(), Path::new(text), Path::new(out),
        text_color, background(bg)?, &options);
    if let Some((w, h)) = size {
        println!("{out}: {w}×{h}");
    }
    Ok(size.is_some())
}

fn main() -> ExitCode {
    env_logger::init();
    let args: Vec<String> = env::args().skip(1).collect();
    match run(&args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
