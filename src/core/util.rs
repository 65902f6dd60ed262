//! Common utilities

use chrono::Datelike;

use crate::core::error::ExportError;

/// Current calendar year, used as the example in year prompts
pub fn current_year() -> i32 {
    chrono::Local::now().year()
}

/// Parse a year entered by the user
pub fn parse_year(input: &str) -> Result<i32, ExportError> {
    input
        .trim()
        .parse::<i32>()
        .map_err(|_| ExportError::InvalidYear {
            input: input.to_string(),
            example: current_year(),
        })
}
