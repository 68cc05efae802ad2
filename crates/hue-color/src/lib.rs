//! # hue-color — color model for the hue explorer
//!
//! One tagged [`Color`] value covers every representation the explorer
//! shows: the named terminal slots, the 256-color palette, 24-bit RGB,
//! fixed-point HSL, OKLCH, and colors decoded from free-form text.
//!
//! ```text
//! decode.rs   text ──► Color            (the only fallible step)
//! model.rs    Color ──► Rgb ──► CellColor / swatch
//!             Rgb ◄──► Hsl, Rgb ◄──► Oklch
//! palette.rs  basic slots, 256 → RGB, nearest 256 in Oklab
//! format.rs   Color ──► hsl(…) / oklch(…) text
//! oklab.rs    the underlying Oklab math
//! ```
//!
//! Conversions are pure and total. Terminal output is always through
//! [`hue_term::color::CellColor`].

// Single-char math variables are standard in color science.
#![allow(clippy::many_single_char_names)]
// Quantizing to 8/10/12-bit channels is the point of several conversions.
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
// Hue/lightness/chroma variable names are inherently similar.
#![allow(clippy::similar_names)]

pub mod decode;
pub mod format;
pub mod model;
pub mod oklab;
pub mod palette;

pub use decode::{DecodeError, decode_color};
pub use format::{web_hsl, web_oklch};
pub use model::{Color, Hsl, Oklch, Rgb};
pub use palette::BasicColor;
