//! Renderer module
//!
//! Writes record sequences to csv, jsonl or json with a fixed column order

use serde::Serialize;
use std::io::Write;

use crate::core::error::ExportError;
use crate::core::model::{scalar_text, OrganizationRecord, StudentRecord};

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Csv,
    Jsonl,
    Json,
}

impl OutputFormat {
    /// File extension for this format
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv",
            OutputFormat::Jsonl => "jsonl",
            OutputFormat::Json => "json",
        }
    }

    /// Human label used in status messages
    pub fn label(&self) -> &'static str {
        match self {
            OutputFormat::Csv => "CSV",
            OutputFormat::Jsonl => "JSONL",
            OutputFormat::Json => "JSON",
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(OutputFormat::Csv),
            "jsonl" => Ok(OutputFormat::Jsonl),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown format: {}", s)),
        }
    }
}

/// Render configuration combining format and options
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderConfig {
    pub format: OutputFormat,
    pub pretty: bool,
}

impl RenderConfig {
    #[allow(dead_code)]
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            pretty: false,
        }
    }

    /// Create a new render config with pretty option
    pub fn with_pretty(format: OutputFormat, pretty: bool) -> Self {
        Self { format, pretty }
    }
}

/// A record with a fixed column layout
pub trait Tabular: Serialize {
    /// Column names, in output order
    const HEADERS: &'static [&'static str];

    /// Cell values in `HEADERS` order
    fn values(&self) -> Vec<String>;
}

impl Tabular for OrganizationRecord {
    const HEADERS: &'static [&'static str] = &[
        "year",
        "name",
        "category",
        "description",
        "url",
        "num_projects",
        "projects_url",
        "contact_email",
        "mailing_list",
        "irc_channel",
        "twitter_url",
        "blog_url",
        "topics",
        "technologies",
    ];

    fn values(&self) -> Vec<String> {
        vec![
            self.year.clone(),
            self.name.clone(),
            self.category.clone(),
            self.description.clone(),
            self.url.clone(),
            scalar_text(&self.num_projects),
            self.projects_url.clone(),
            self.contact_email.clone(),
            self.mailing_list.clone(),
            self.irc_channel.clone(),
            self.twitter_url.clone(),
            self.blog_url.clone(),
            self.topics.clone(),
            self.technologies.clone(),
        ]
    }
}

impl Tabular for StudentRecord {
    const HEADERS: &'static [&'static str] = &[
        "year",
        "organization_name",
        "organization_category",
        "student_name",
        "project_title",
        "project_short_description",
        "project_description",
        "project_url",
        "code_url",
        "organization_topics",
        "organization_technologies",
    ];

    fn values(&self) -> Vec<String> {
        vec![
            self.year.clone(),
            self.organization_name.clone(),
            self.organization_category.clone(),
            self.student_name.clone(),
            self.project_title.clone(),
            self.project_short_description.clone(),
            self.project_description.clone(),
            self.project_url.clone(),
            self.code_url.clone(),
            self.organization_topics.clone(),
            self.organization_technologies.clone(),
        ]
    }
}

/// Renderer for record sequences
pub struct Renderer {
    config: RenderConfig,
}

impl Renderer {
    #[allow(dead_code)]
    pub fn new(format: OutputFormat) -> Self {
        Self {
            config: RenderConfig::new(format),
        }
    }

    /// Create a new renderer with render config
    pub fn with_config(config: RenderConfig) -> Self {
        Self { config }
    }

    /// Write all rows, returning how many were written
    pub fn write_rows<T, I, W>(&self, rows: I, writer: W) -> Result<usize, ExportError>
    where
        T: Tabular,
        I: IntoIterator<Item = T>,
        W: Write,
    {
        match self.config.format {
            OutputFormat::Csv => self.write_csv(rows, writer),
            OutputFormat::Jsonl => self.write_jsonl(rows, writer),
            OutputFormat::Json => self.write_json(rows, writer),
        }
    }

    /// Render rows to a string
    #[allow(dead_code)]
    pub fn render<T, I>(&self, rows: I) -> Result<String, ExportError>
    where
        T: Tabular,
        I: IntoIterator<Item = T>,
    {
        let mut buf = Vec::new();
        self.write_rows(rows, &mut buf)?;
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }

    /// CSV with a header line, written even when no rows follow
    fn write_csv<T, I, W>(&self, rows: I, writer: W) -> Result<usize, ExportError>
    where
        T: Tabular,
        I: IntoIterator<Item = T>,
        W: Write,
    {
        let mut csv_writer = csv::Writer::from_writer(writer);
        csv_writer.write_record(T::HEADERS)?;

        let mut count = 0;
        for row in rows {
            csv_writer.write_record(row.values())?;
            count += 1;
        }

        csv_writer.flush()?;
        Ok(count)
    }

    /// One JSON object per line
    fn write_jsonl<T, I, W>(&self, rows: I, mut writer: W) -> Result<usize, ExportError>
    where
        T: Tabular,
        I: IntoIterator<Item = T>,
        W: Write,
    {
        let mut count = 0;
        for row in rows {
            if self.config.pretty {
                serde_json::to_writer_pretty(&mut writer, &row)?;
                writer.write_all(b"\n\n")?;
            } else {
                serde_json::to_writer(&mut writer, &row)?;
                writer.write_all(b"\n")?;
            }
            count += 1;
        }

        writer.flush()?;
        Ok(count)
    }

    /// A single JSON array
    fn write_json<T, I, W>(&self, rows: I, mut writer: W) -> Result<usize, ExportError>
    where
        T: Tabular,
        I: IntoIterator<Item = T>,
        W: Write,
    {
        let rows: Vec<T> = rows.into_iter().collect();
        if self.config.pretty {
            serde_json::to_writer_pretty(&mut writer, &rows)?;
        } else {
            serde_json::to_writer(&mut writer, &rows)?;
        }
        writer.write_all(b"\n")?;
        writer.flush()?;
        Ok(rows.len())
    }
}
