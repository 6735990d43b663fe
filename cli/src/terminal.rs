use std::env;

use settracker_core::report::{TerminalSize, TerminalSizeProvider};
use tracing::debug;

const FALLBACK: TerminalSize = TerminalSize { width: 80, height: 24 };

/// Size of the attached terminal. `COLUMNS` and `LINES` take precedence over what the terminal
/// reports; 80x24 is assumed when neither is available.
pub struct ConsoleTerminal;

impl TerminalSizeProvider for ConsoleTerminal {
    fn terminal_size(&self) -> TerminalSize {
        let detected = crossterm::terminal::size().ok();
        let size = resolve_size(
            env::var("COLUMNS").ok().as_deref(),
            env::var("LINES").ok().as_deref(),
            detected,
        );
        debug!(width = size.width, height = size.height, "terminal size");
        size
    }
}

fn resolve_size(
    columns: Option<&str>,
    lines: Option<&str>,
    detected: Option<(u16, u16)>,
) -> TerminalSize {
    let parse = |value: Option<&str>| {
        value.and_then(|v| v.trim().parse::<u16>().ok()).filter(|v| *v > 0)
    };
    let detected = detected.filter(|(w, h)| *w > 0 && *h > 0);

    TerminalSize {
        width: parse(columns)
            .or(detected.map(|(w, _)| w))
            .unwrap_or(FALLBACK.width),
        height: parse(lines)
            .or(detected.map(|(_, h)| h))
            .unwrap_or(FALLBACK.height),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_overrides_detected() {
        let size = resolve_size(Some("120"), None, Some((90, 40)));
        assert_eq!(size, TerminalSize { width: 120, height: 40 });
    }

    #[test]
    fn test_detected_size() {
        let size = resolve_size(None, None, Some((90, 40)));
        assert_eq!(size, TerminalSize { width: 90, height: 40 });
    }

    #[test]
    fn test_fallback() {
        assert_eq!(resolve_size(Some("wide"), Some("0"), None), FALLBACK);
        assert_eq!(resolve_size(None, None, Some((0, 0))), FALLBACK);
    }
}
