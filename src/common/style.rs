//! Terminal styling for user-facing progress lines.

use colored::Colorize;

/// How a message should be rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    /// No decoration
    Plain,
    /// Stage headers and banners
    Bold,
    /// Success
    Pass,
    /// Recoverable problems
    Warn,
    /// Failures
    Fail,
}

/// Render `msg` in `style`.
pub fn paint(style: Style, msg: &str) -> String {
    match style {
        Style::Plain => msg.to_string(),
        Style::Bold => msg.bold().to_string(),
        Style::Pass => msg.bright_green().to_string(),
        Style::Warn => msg.bright_yellow().to_string(),
        Style::Fail => msg.bright_red().to_string(),
    }
}

/// Print `msg` in `style` on stdout.
pub fn say(style: Style, msg: &str) {
    println!("{}", paint(style, msg));
}

/// Print `msg` in `style` on stderr.
pub fn complain(style: Style, msg: &str) {
    eprintln!("{}", paint(style, msg));
}
