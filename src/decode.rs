// SPDX-License-Identifier: MIT
//
// Batch decoding: each command-line color is parsed and printed as one line
//
//   <swatch>    <label> <canonical> <hsl> <oklch>
//
// A color that fails to parse is logged and skipped; the batch goes on.

use std::io::{self, Write};

use hue_color::{decode_color, web_hsl, web_oklch};
use hue_term::ansi::RESET;
use tracing::{info, warn};

/// How a batch went.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecodeSummary {
    pub decoded: usize,
    pub failed: usize,
}

/// Decode and print every color in `colors` to `out`.
///
/// # Errors
///
/// Returns an error only if writing to `out` fails.
pub fn run(
    colors: &[String],
    rounding: i32,
    true_color: bool,
    out: &mut impl Write,
) -> io::Result<DecodeSummary> {
    info!(
        "Decoding {} colors mode (pass no argument for interactive)",
        colors.len()
    );
    let mut summary = DecodeSummary::default();

    for arg in colors {
        let color = match decode_color(arg) {
            Ok(color) => color,
            Err(err) => {
                warn!("Invalid color '{arg}': {err}");
                summary.failed += 1;
                continue;
            }
        };
        writeln!(
            out,
            " {}    {RESET} {} {} {} {}",
            color.swatch(true_color),
            color.label(),
            color.canonical(),
            web_hsl(&color, rounding),
            web_oklch(&color, rounding),
        )?;
        summary.decoded += 1;
    }

    out.flush()?;
    Ok(summary)
}

// ─── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::sync::{Arc, Mutex, PoisonError};

    // ── Helpers ───────────────────────────────────────────────────────────

    /// Log sink shared between the subscriber and the test.
    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl Captured {
        fn text(&self) -> String {
            let buf = self.0.lock().unwrap_or_else(PoisonError::into_inner);
            String::from_utf8_lossy(&buf).into_owned()
        }
    }

    impl Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    /// Run `f` with every event at INFO and above written to the returned sink.
    fn with_logs<T>(f: impl FnOnce() -> T) -> (T, String) {
        let sink = Captured::default();
        let writer = sink.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_max_level(tracing::Level::INFO)
            .with_ansi(false)
            .without_time()
            .with_target(false)
            .finish();
        let result = tracing::subscriber::with_default(subscriber, f);
        (result, sink.text())
    }

    fn decode(colors: &[&str], rounding: i32) -> (DecodeSummary, Vec<String>) {
        let colors: Vec<String> = colors.iter().map(|&s| s.to_owned()).collect();
        let mut out = Vec::new();
        let summary = run(&colors, rounding, true, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        (summary, text.lines().map(str::to_owned).collect())
    }

    #[test]
    fn bad_colors_are_skipped() {
        let (summary, lines) = decode(&["red", "#zzzzzz", "blue"], -1);
        assert_eq!(summary, DecodeSummary { decoded: 2, failed: 1 });
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains(" Red Red hsl("));
        assert!(lines[1].contains(" Blue Blue hsl("));
    }

    // ── Logging ───────────────────────────────────────────────────────────

    #[test]
    fn each_bad_color_logs_one_warning() {
        let ((summary, _), logs) = with_logs(|| decode(&["red", "#zzzzzz", "blue"], -1));
        assert_eq!(summary.failed, 1);

        let warnings: Vec<_> = logs.lines().filter(|l| l.contains("WARN")).collect();
        assert_eq!(warnings.len(), 1, "{logs}");
        assert!(warnings[0].contains("Invalid color '#zzzzzz': unrecognized color syntax"));
        assert!(logs.contains("Decoding 3 colors mode"));
    }

    #[test]
    fn good_batch_logs_no_warning() {
        let (_, logs) = with_logs(|| decode(&["red", "blue"], -1));
        assert!(!logs.contains("WARN"), "{logs}");
    }

    #[test]
    fn line_layout() {
        let (_, lines) = decode(&["#ff0000"], 0);
        assert_eq!(
            lines,
            [format!(
                " \x1b[48;2;255;0;0m    {RESET} #ff0000 #ff0000 hsl(0 100% 50%) oklch(63% 0 29)"
            )]
        );
    }

    #[test]
    fn functional_syntax_keeps_its_text() {
        let (summary, lines) = decode(&["rgb(0 128 255)"], 1);
        assert_eq!(summary.decoded, 1);
        assert!(lines[0].contains(" rgb(0 128 255) #0080ff hsl("));
    }

    #[test]
    fn empty_batch() {
        let (summary, lines) = decode(&[], -1);
        assert_eq!(summary, DecodeSummary::default());
        assert!(lines.is_empty());
    }
}
