//! Rendering of the view state for terminal and markdown output

pub mod formatter;

pub use formatter::{Formatter, FormatterFactory, MarkdownFormatter, OutputStyle, TextFormatter};
