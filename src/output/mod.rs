//
//  argocd-rs
//  output/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Output Formatting Module
//!
//! Renders command results as tables for people or as JSON / YAML for
//! scripts. Every command funnels its result through an [`OutputWriter`] so
//! `-o json` behaves the same everywhere.
//!
//! ## Formats
//!
//! | Format | Lists | Single resource |
//! |--------|-------|-----------------|
//! | [`OutputFormat::Table`] | one row per item | `Label: value` lines |
//! | [`OutputFormat::Json`] | pretty JSON array | pretty JSON object |
//! | [`OutputFormat::Yaml`] | YAML sequence | YAML mapping |
//!
//! JSON and YAML output is the API object itself, so it can be piped back
//! into other tools unchanged.
//!
//! ## Example
//!
//! ```rust
//! use argocd_rs::output::{OutputFormat, OutputWriter, TableOutput};
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct Row { name: String }
//!
//! impl TableOutput for Row {
//!     fn headers() -> Vec<&'static str> { vec!["NAME"] }
//!     fn row(&self, _color: bool) -> Vec<String> { vec![self.name.clone()] }
//! }
//!
//! let writer = OutputWriter::new(OutputFormat::Json).with_color(false);
//! let rendered = writer.render_list(&[Row { name: "guestbook".into() }]).unwrap();
//! assert!(rendered.contains("\"guestbook\""));
//! ```

mod json;
mod table;
mod yaml;

pub use json::*;
pub use table::*;
pub use yaml::*;

use clap::ValueEnum;
use serde::Serialize;

/// Output format selected with `-o/--output`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table.
    #[default]
    Table,
    /// Pretty-printed JSON.
    Json,
    /// YAML.
    Yaml,
}

/// A value that can be shown as a table row and as a detail view.
pub trait TableOutput: Sized {
    /// Column headers for list output.
    fn headers() -> Vec<&'static str>;

    /// Cells for this value, in [`headers`](TableOutput::headers) order.
    fn row(&self, color: bool) -> Vec<String>;

    /// `(label, value)` pairs for single-resource output.
    ///
    /// Defaults to the list columns.
    fn detail(&self, color: bool) -> Vec<(&'static str, String)> {
        Self::headers().into_iter().zip(self.row(color)).collect()
    }
}

/// Writes command results in the selected [`OutputFormat`].
#[derive(Debug, Clone, Copy)]
pub struct OutputWriter {
    format: OutputFormat,
    color: bool,
}

impl OutputWriter {
    /// Creates a writer, enabling color when the terminal supports it.
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            color: console::colors_enabled(),
        }
    }

    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    pub fn color_enabled(&self) -> bool {
        self.color
    }

    /// Renders one value.
    pub fn render<T: Serialize + TableOutput>(&self, value: &T) -> anyhow::Result<String> {
        match self.format {
            OutputFormat::Json => to_json_string(value),
            OutputFormat::Yaml => to_yaml_string(value),
            OutputFormat::Table => Ok(render_detail(&value.detail(self.color))),
        }
    }

    /// Renders a list of values.
    ///
    /// An empty list renders as a notice in table format and as an empty
    /// array in JSON and YAML.
    pub fn render_list<T: Serialize + TableOutput>(&self, values: &[T]) -> anyhow::Result<String> {
        match self.format {
            OutputFormat::Json => to_json_string(values),
            OutputFormat::Yaml => to_yaml_string(values),
            OutputFormat::Table if values.is_empty() => Ok("No resources found.".to_string()),
            OutputFormat::Table => Ok(TableBuilder::new()
                .color(self.color)
                .headers(T::headers())
                .rows(values.iter().map(|v| v.row(self.color)))
                .build()
                .to_string()),
        }
    }

    /// Writes one value to stdout.
    pub fn write<T: Serialize + TableOutput>(&self, value: &T) -> anyhow::Result<()> {
        println!("{}", self.render(value)?);
        Ok(())
    }

    /// Writes a list of values to stdout.
    pub fn write_list<T: Serialize + TableOutput>(&self, values: &[T]) -> anyhow::Result<()> {
        println!("{}", self.render_list(values)?);
        Ok(())
    }

    /// Writes a raw serializable value, ignoring table format.
    ///
    /// Used for payloads without a sensible table shape, such as manifests.
    pub fn write_value<T: Serialize + ?Sized>(&self, value: &T) -> anyhow::Result<()> {
        let rendered = match self.format {
            OutputFormat::Yaml => to_yaml_string(value)?,
            OutputFormat::Json | OutputFormat::Table => to_json_string(value)?,
        };
        println!("{}", rendered);
        Ok(())
    }

    pub fn write_error(&self, msg: &str) {
        use console::style;
        if self.color {
            eprintln!("{} {}", style("error:").red().bold(), msg);
        } else {
            eprintln!("error: {}", msg);
        }
    }

    pub fn write_warning(&self, msg: &str) {
        use console::style;
        if self.color {
            eprintln!("{} {}", style("warning:").yellow().bold(), msg);
        } else {
            eprintln!("warning: {}", msg);
        }
    }

    /// Writes a confirmation line. Suppressed for JSON and YAML so their
    /// output stays machine-readable.
    pub fn write_success(&self, msg: &str) {
        use console::style;
        if self.format != OutputFormat::Table {
            return;
        }
        if self.color {
            println!("{} {}", style("✓").green().bold(), msg);
        } else {
            println!("✓ {}", msg);
        }
    }
}

fn render_detail(fields: &[(&'static str, String)]) -> String {
    let width = fields.iter().map(|(label, _)| label.len()).max().unwrap_or(0) + 1;
    fields
        .iter()
        .map(|(label, value)| format!("{:<width$} {}", format!("{label}:"), value))
        .collect::<Vec<_>>()
        .join("\n")
}
