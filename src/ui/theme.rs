//! Consistent styling utilities for CLI output.
//!
//! Provides color and formatting helpers using owo-colors.

use owo_colors::OwoColorize;
use std::fmt::Display;

use crate::output;

/// Styles for different semantic elements.
pub struct Style;

impl Style {
    /// Style for echoed command lines
    pub fn command<T: Display>(text: T) -> String {
        if output::is_no_color() {
            return text.to_string();
        }
        format!("{}", text.dimmed())
    }

    /// Style for error messages
    pub fn error<T: Display>(text: T) -> String {
        if output::is_no_color() {
            return text.to_string();
        }
        format!("{}", text.red().bold())
    }

    /// Style for warning messages
    pub fn warning<T: Display>(text: T) -> String {
        if output::is_no_color() {
            return text.to_string();
        }
        format!("{}", text.yellow())
    }
}
