// ============================================================================
// backdrop-cli/src/terminal.rs
// ============================================================================
//
// TERMINAL OUTPUT: UI Components and Styling
//
// This module renders everything the user sees besides log records: section
// headers, processing steps, key-value status lines, and the per-variant
// sampling progress bar.
//
// KEY COMPONENTS:
// - print_* functions: Styled output primitives
// - CliReporter: ProgressReporter installed into backdrop-core
// - prompt_* functions: Interactive questions on the terminal
//
// Output hierarchy:
//
//   ===== SECTION =====
//     » Processing step
//         Label:          value
//     ✓ Success

// ---- External crate imports ----
use backdrop_core::progress_reporting::{OutputLevel, ProgressReporter};
use console::{Term, style};
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use owo_colors::OwoColorize;
use unicode_width::UnicodeWidthStr;

// ---- Standard library imports ----
use std::io::{self, IsTerminal};
use std::sync::Mutex;
use std::time::Duration;

const STATUS_INDENT: &str = "      ";
const STATUS_LABEL_WIDTH: usize = 15;

/// Check if color should be used (respects NO_COLOR environment variable)
fn should_use_color() -> bool {
    std::env::var_os("NO_COLOR").is_none()
}

fn write_line(text: &str) {
    // Output is best effort; a closed stdout must not abort a run
    let _ = Term::stdout().write_line(text);
}

/// Print a section header for major workflow phases
pub fn print_section(title: &str) {
    write_line("");
    if should_use_color() {
        write_line(&format!("===== {} =====", title.to_uppercase().cyan()));
    } else {
        write_line(&format!("===== {} =====", title.to_uppercase()));
    }
    write_line("");
}

/// Print a subsection or processing step
pub fn print_processing(message: &str) {
    if should_use_color() {
        write_line(&format!("  » {}", style(message).bold()));
    } else {
        write_line(&format!("  » {message}"));
    }
}

/// Print a success message
pub fn print_success(message: &str) {
    if should_use_color() {
        write_line(&format!("  ✓ {}", message.green()));
    } else {
        write_line(&format!("  ✓ {message}"));
    }
}

/// Print a warning message
pub fn print_warning(message: &str) {
    if should_use_color() {
        write_line(&format!("  ⚠ {}", message.yellow()));
    } else {
        write_line(&format!("  ⚠ {message}"));
    }
}

/// Print an error message under the current step
pub fn print_error(message: &str) {
    if should_use_color() {
        write_line(&format!("  ✗ {}", message.red().bold()));
    } else {
        write_line(&format!("  ✗ {message}"));
    }
}

/// Print a plain indented line
pub fn print_info(message: &str) {
    write_line(&format!("    {message}"));
}

/// Formats a key-value status line with the label padded to a fixed width.
pub fn format_status(label: &str, value: &str) -> String {
    let padding = STATUS_LABEL_WIDTH.saturating_sub(label.width()).max(1);
    format!("{STATUS_INDENT}{label}:{} {value}", " ".repeat(padding))
}

/// Print a status line (key-value pair)
pub fn print_status(label: &str, value: &str, highlight: bool) {
    if should_use_color() && highlight {
        write_line(&format_status(label, &value.bold().to_string()));
    } else {
        write_line(&format_status(label, value));
    }
}

/// Print the final error line on stderr.
pub fn print_fatal(message: &str) {
    if should_use_color() {
        eprintln!("{} {}", "Error:".red().bold(), message);
    } else {
        eprintln!("Error: {message}");
    }
}

// ============================================================================
// PROMPTS
// ============================================================================

/// Asks for a line of input. `Ok(None)` when there is no interactive terminal.
pub fn prompt_line(question: &str) -> io::Result<Option<String>> {
    let term = Term::stdout();
    if !term.is_term() || !io::stdin().is_terminal() {
        return Ok(None);
    }
    term.write_str(question)?;
    term.read_line().map(Some)
}

/// Interprets an answer to a `[y]/n` question. Empty means yes.
pub fn parse_confirmation(answer: &str) -> bool {
    let answer = answer.trim().to_lowercase();
    answer.is_empty() || answer == "y" || answer == "yes"
}

/// Asks a `[y]/n` question. No terminal or a read error counts as "no".
pub fn confirm(question: &str) -> bool {
    match prompt_line(&format!("{question} [y]/n ")) {
        Ok(Some(answer)) => parse_confirmation(&answer),
        Ok(None) => {
            log::warn!("No interactive terminal; treating '{}' as declined", question);
            false
        }
        Err(e) => {
            log::warn!("Could not read answer: {}", e);
            false
        }
    }
}

// ============================================================================
// PROGRESS REPORTER
// ============================================================================

/// Renders core progress events on the terminal.
pub struct CliReporter {
    progress: Mutex<Option<ProgressBar>>,
}

impl CliReporter {
    pub fn new() -> Self {
        Self {
            progress: Mutex::new(None),
        }
    }

    fn new_bar(total: usize) -> ProgressBar {
        let pb = ProgressBar::new(total as u64);
        let term_width = Term::stderr().size().1 as usize;
        let template = if term_width >= 80 {
            "    ⧖ Sampling: {pos:>3}/{len:3} [{bar:30}] ({elapsed_precise})"
        } else {
            "    ⧖ {pos}/{len} [{bar:10}]"
        };
        if let Ok(style) = ProgressStyle::default_bar().template(template) {
            pb.set_style(style.progress_chars("##."));
        }
        if !io::stderr().is_terminal() {
            pb.set_draw_target(ProgressDrawTarget::hidden());
        }
        pb.enable_steady_tick(Duration::from_millis(100));
        pb
    }

    fn take_bar(&self) -> Option<ProgressBar> {
        self.progress.lock().ok().and_then(|mut bar| bar.take())
    }
}

impl Default for CliReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressReporter for CliReporter {
    fn output(&self, level: OutputLevel, text: &str) {
        match level {
            OutputLevel::Processing => print_processing(text),
            OutputLevel::Success => print_success(text),
            OutputLevel::Error => print_error(text),
            OutputLevel::Warning => {
                // Keep the bar intact; skipped frames are also logged
                if let Ok(bar) = self.progress.lock() {
                    match bar.as_ref() {
                        Some(pb) => pb.suspend(|| print_warning(text)),
                        None => print_warning(text),
                    }
                }
            }
            OutputLevel::Info => print_info(text),
        }
    }

    fn output_status(&self, label: &str, value: &str, highlight: bool) {
        print_status(label, value, highlight);
    }

    fn sample_progress(&self, completed: usize, total: usize) {
        if let Ok(mut bar) = self.progress.lock() {
            let pb = bar.get_or_insert_with(|| Self::new_bar(total));
            pb.set_length(total as u64);
            pb.set_position(completed as u64);
        }
    }

    fn finish_progress(&self) {
        if let Some(pb) = self.take_bar() {
            pb.finish();
        }
    }

    fn clear_progress(&self) {
        if let Some(pb) = self.take_bar() {
            pb.finish_and_clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_status_pads_label() {
        assert_eq!(format_status("Samples", "15"), "      Samples:         15");
        let long = format_status("A very long label here", "x");
        assert!(long.ends_with("here:  x"));
    }

    #[test]
    fn test_parse_confirmation() {
        assert!(parse_confirmation(""));
        assert!(parse_confirmation("  \n"));
        assert!(parse_confirmation("y"));
        assert!(parse_confirmation("YES"));
        assert!(!parse_confirmation("n"));
        assert!(!parse_confirmation("no"));
        assert!(!parse_confirmation("whatever"));
    }

    #[test]
    fn test_reporter_progress_lifecycle() {
        let reporter = CliReporter::new();
        reporter.sample_progress(1, 4);
        reporter.sample_progress(4, 4);
        assert!(reporter.progress.lock().unwrap().is_some());
        reporter.finish_progress();
        assert!(reporter.progress.lock().unwrap().is_none());
        reporter.clear_progress();
    }
}
