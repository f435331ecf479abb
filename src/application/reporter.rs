use crate::common::style::Style;

/// Receives user-facing progress lines from the use cases.
pub trait Reporter {
    fn report(&self, style: Style, message: &str);
}
