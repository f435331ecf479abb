use crate::application::Reporter;
use crate::common::style::{say, Style};

/// Prints progress lines to stdout
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleReporter;

impl Reporter for ConsoleReporter {
    fn report(&self, style: Style, message: &str) {
        say(style, message);
    }
}
