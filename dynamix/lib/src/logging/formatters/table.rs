use comfy_table::{Table, presets};

use crate::error::FormatError;
use crate::logging::formatter::{ContentCategory, ContentFormatter};

/// Renders CSV bodies as a markdown-style table, first row as header.
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvFormatter;

impl ContentFormatter for CsvFormatter {
    fn kind(&self) -> &'static str {
        "CSV"
    }

    fn category(&self) -> ContentCategory {
        ContentCategory::Structured
    }

    fn content_types(&self) -> &'static [&'static str] {
        &["text/csv"]
    }

    fn render(&self, body: &[u8]) -> Result<String, FormatError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(body);

        let mut rows = reader.records();
        let Some(header) = rows.next().transpose()? else {
            return Ok("[Empty CSV]".to_string());
        };

        let mut table = Table::new();
        table.load_preset(presets::ASCII_MARKDOWN);
        table.set_header(header.iter().map(str::to_string).collect::<Vec<_>>());
        for row in rows {
            let row = row?;
            table.add_row(row.iter().map(str::to_string).collect::<Vec<_>>());
        }

        Ok(table.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_renders_table() {
        let out = CsvFormatter.format(b"a,b\n1,2\n", None);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "| a | b |");
        assert_eq!(lines[2], "| 1 | 2 |");
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn test_empty_body() {
        assert_eq!(CsvFormatter.format(b"", None), "[Empty CSV]");
    }

    #[test]
    fn test_ragged_rows_accepted() {
        let out = CsvFormatter.format(b"a,b,c\n1\n", None);
        assert!(out.contains("| a | b | c |"));
    }
}
