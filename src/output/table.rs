//
//  argocd-rs
//  output/table.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Table Formatting
//!
//! Table construction on top of `comfy-table`, plus the cell formatters
//! shared by every command: colored sync and health states, yes/no flags,
//! truncation, and resource ages.
//!
//! ```rust
//! use argocd_rs::output::TableBuilder;
//!
//! let table = TableBuilder::new()
//!     .color(false)
//!     .headers(["NAME", "STATUS"])
//!     .row(["guestbook", "Synced"])
//!     .build();
//! assert!(table.to_string().contains("guestbook"));
//! ```

use chrono::{DateTime, Utc};
use comfy_table::{presets::UTF8_FULL, Cell, Color, ContentArrangement, Table};

/// Creates an empty table with the shared preset.
pub fn create_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// Fluent builder for tables with an optionally colored header.
pub struct TableBuilder {
    table: Table,
    color: bool,
}

impl TableBuilder {
    pub fn new() -> Self {
        Self {
            table: create_table(),
            color: console::colors_enabled(),
        }
    }

    pub fn color(mut self, enabled: bool) -> Self {
        self.color = enabled;
        self
    }

    pub fn headers<I, S>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let headers: Vec<String> = headers.into_iter().map(Into::into).collect();
        if self.color {
            self.table
                .set_header(headers.iter().map(|h| Cell::new(h).fg(Color::Cyan)));
        } else {
            self.table.set_header(headers);
        }
        self
    }

    pub fn row<I, S>(mut self, cells: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let row: Vec<String> = cells.into_iter().map(Into::into).collect();
        self.table.add_row(row);
        self
    }

    pub fn rows<I, R, S>(mut self, rows: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for row in rows {
            self = self.row(row);
        }
        self
    }

    pub fn build(self) -> Table {
        self.table
    }
}

impl Default for TableBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Colors an Argo CD sync, health or connection state.
///
/// Unknown states are returned unchanged; an empty state renders as `-`.
pub fn format_status(status: &str, color: bool) -> String {
    if status.is_empty() {
        return "-".to_string();
    }
    if !color {
        return status.to_string();
    }

    use console::style;
    match status {
        "Synced" | "Healthy" | "Successful" | "Succeeded" => style(status).green().to_string(),
        "OutOfSync" | "Progressing" | "Running" | "Suspended" => {
            style(status).yellow().to_string()
        }
        "Degraded" | "Missing" | "Failed" | "Error" => style(status).red().to_string(),
        "Unknown" => style(status).dim().to_string(),
        _ => status.to_string(),
    }
}

pub fn format_bool(value: bool, color: bool) -> String {
    let text = if value { "Yes" } else { "No" };
    if !color {
        return text.to_string();
    }

    use console::style;
    if value {
        style(text).green().to_string()
    } else {
        style(text).dim().to_string()
    }
}

/// Shortens `s` to at most `max_len` characters, ending in `...` when cut.
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        return s.to_string();
    }
    if max_len > 3 {
        let kept: String = s.chars().take(max_len - 3).collect();
        format!("{kept}...")
    } else {
        s.chars().take(max_len).collect()
    }
}

/// Formats an RFC 3339 timestamp as a compact age such as `5m` or `3d`.
///
/// Missing or unparsable timestamps render as `-`.
pub fn format_age(timestamp: Option<&str>, now: DateTime<Utc>) -> String {
    let Some(then) = timestamp.and_then(|ts| DateTime::parse_from_rfc3339(ts).ok()) else {
        return "-".to_string();
    };

    let secs = (now - then.with_timezone(&Utc)).num_seconds().max(0);
    match secs {
        s if s < 60 => format!("{s}s"),
        s if s < 3_600 => format!("{}m", s / 60),
        s if s < 86_400 => format!("{}h", s / 3_600),
        s => format!("{}d", s / 86_400),
    }
}

/// Formats an optional timestamp for display, `-` when absent.
pub fn format_time(time: Option<DateTime<Utc>>) -> String {
    time.map(|t| t.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_else(|| "-".to_string())
}
