//! Interactive prompts
//!
//! Collects the year and filter values as free text. Empty answers mean
//! "no constraint".

use std::io::{BufRead, Write};

use crate::core::error::ExportError;
use crate::core::filter::FilterCriteria;
use crate::core::util::{current_year, parse_year};

/// Line-oriented prompter over any reader/writer pair
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Print `label` and read one trimmed line; `None` on empty input or EOF
    pub fn ask(&mut self, label: &str) -> Result<Option<String>, ExportError> {
        write!(self.output, "{}", label)?;
        self.output.flush()?;

        let mut line = String::new();
        self.input.read_line(&mut line)?;

        let answer = line.trim();
        if answer.is_empty() {
            Ok(None)
        } else {
            Ok(Some(answer.to_string()))
        }
    }

    /// Ask for a mandatory year
    pub fn prompt_year(&mut self) -> Result<i32, ExportError> {
        let answer = self.ask(&format!("Enter GSOC year (e.g. {}): ", current_year()))?;
        parse_year(answer.as_deref().unwrap_or_default())
    }

    /// Ask for every filter, all optional
    pub fn prompt_filters(&mut self) -> Result<FilterCriteria, ExportError> {
        let year = self.ask("Filter by year (optional): ")?;
        let organization = self.ask("Filter by organization (optional): ")?;
        let student = self.ask("Filter by student name (optional): ")?;
        let category = self.ask("Filter by category (optional): ")?;
        let technology = self.ask("Filter by technology (optional): ")?;
        let topic = self.ask("Filter by topic (optional): ")?;

        Ok(FilterCriteria::new(
            year,
            organization,
            student,
            category,
            technology,
            topic,
        ))
    }
}

/// Fill in criteria the user left unset on the command line.
///
/// Values given as flags are kept; prompted answers only fill gaps.
pub fn merge_criteria(flags: FilterCriteria, prompted: FilterCriteria) -> FilterCriteria {
    FilterCriteria {
        year: flags.year.or(prompted.year),
        organization: flags.organization.or(prompted.organization),
        student: flags.student.or(prompted.student),
        category: flags.category.or(prompted.category),
        technology: flags.technology.or(prompted.technology),
        topic: flags.topic.or(prompted.topic),
    }
}
