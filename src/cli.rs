// SPDX-License-Identifier: MIT
//
// Command-line parsing.
//
//   hue [--fps N] [--truecolor | --256] [--rounding N] [colors...]
//
// Positional arguments switch to batch decoding. Options accept both
// `--flag value` and `--flag=value`; `--` ends option parsing so colors
// that start with `-` can still be passed.

use std::fmt;
use std::str::FromStr;

use hue_term::event_loop::DEFAULT_FPS;

pub const USAGE: &str = "\
hue - explore terminal colors

Usage: hue [OPTIONS] [COLORS...]

With no COLORS, opens the interactive explorer. Otherwise each COLOR is
decoded and printed (names, #rgb, #rrggbb, rgb(), hsl(), oklch(), 256:N).

Options:
  --fps N           Redraw cadence in frames per second [default: 60]
  --truecolor       Paint with 24-bit color
  --256             Paint with the 256-color palette
  --rounding N      Fractional digits for hsl()/oklch() text, -1 for full
                    precision [default: -1]
  -h, --help        Show this help message
  -V, --version     Show the version

Environment:
  COLORTERM         `truecolor` or `24bit` selects 24-bit color by default
  RUST_LOG          Log filter [default: info]";

/// Everything the program runs with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Redraw cadence.
    pub fps: u32,
    /// 24-bit color rather than the 256-color palette.
    pub true_color: bool,
    /// Fractional digits for web HSL/OKLCH text, negative for full precision.
    pub rounding: i32,
    /// Colors to decode; empty means interactive.
    pub colors: Vec<String>,
}

impl Config {
    /// Defaults, with true color taken from `COLORTERM`.
    #[must_use]
    pub fn new(colorterm: Option<&str>) -> Self {
        Self {
            fps: DEFAULT_FPS,
            true_color: detect_true_color(colorterm),
            rounding: -1,
            colors: Vec::new(),
        }
    }

    #[must_use]
    pub fn is_interactive(&self) -> bool {
        self.colors.is_empty()
    }
}

/// Whether a `COLORTERM` value announces 24-bit support.
#[must_use]
pub fn detect_true_color(colorterm: Option<&str>) -> bool {
    matches!(colorterm, Some("truecolor" | "24bit"))
}

/// What the command line asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Run(Config),
    Help,
    Version,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliError {
    UnknownFlag(String),
    MissingValue(&'static str),
    InvalidValue { flag: &'static str, value: String },
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownFlag(flag) => write!(f, "unknown flag: {flag} (use --help for usage)"),
            Self::MissingValue(flag) => write!(f, "{flag} requires a value"),
            Self::InvalidValue { flag, value } => write!(f, "invalid value for {flag}: {value}"),
        }
    }
}

impl std::error::Error for CliError {}

/// Parse arguments (without the program name).
///
/// # Errors
///
/// Returns a [`CliError`] for unknown flags and missing or malformed values.
pub fn parse<I>(args: I, colorterm: Option<&str>) -> Result<Command, CliError>
where
    I: IntoIterator<Item = String>,
{
    let mut config = Config::new(colorterm);
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        let (flag, inline) = match arg.split_once('=') {
            Some((flag, value)) if flag.starts_with("--") => (flag.to_owned(), Some(value.to_owned())),
            _ => (arg.clone(), None),
        };

        match flag.as_str() {
            "-h" | "--help" => return Ok(Command::Help),
            "-V" | "--version" => return Ok(Command::Version),
            "--truecolor" => config.true_color = true,
            "--256" => config.true_color = false,
            "--fps" => {
                let fps: u32 = value("--fps", inline, &mut args)?;
                if fps == 0 {
                    return Err(CliError::InvalidValue {
                        flag: "--fps",
                        value: fps.to_string(),
                    });
                }
                config.fps = fps;
            }
            "--rounding" => config.rounding = value("--rounding", inline, &mut args)?,
            "--" => {
                config.colors.extend(args);
                break;
            }
            f if f.starts_with('-') && f.len() > 1 => {
                return Err(CliError::UnknownFlag(arg));
            }
            _ => config.colors.push(arg),
        }
    }

    Ok(Command::Run(config))
}

/// The value for `flag`: inline after `=`, or the next argument.
fn value<T: FromStr>(
    flag: &'static str,
    inline: Option<String>,
    args: &mut impl Iterator<Item = String>,
) -> Result<T, CliError> {
    let raw = inline
        .or_else(|| args.next())
        .ok_or(CliError::MissingValue(flag))?;
    raw.parse()
        .map_err(|_| CliError::InvalidValue { flag, value: raw })
}

// ─── Tests ──────────────────────────────────────────────────────────────────
