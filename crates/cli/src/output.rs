//! Output formatting for CLI

use clap::ValueEnum;
use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use serde::Serialize;

/// Output format
#[derive(Debug, Clone, Copy, ValueEnum, Default)]
pub enum OutputFormat {
    /// Human-readable table format
    #[default]
    Table,
    /// JSON format
    Json,
    /// YAML format
    Yaml,
    /// Plain `key: value` lines
    Plain,
}

/// Trait for items that can be displayed in a table
pub trait TableDisplay {
    fn headers() -> Vec<&'static str>;
    fn row(&self) -> Vec<String>;
}

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// Serialized form of `value` for the machine-readable formats
fn structured<T: Serialize + ?Sized>(value: &T, format: OutputFormat) -> Option<String> {
    match format {
        OutputFormat::Json => Some(serde_json::to_string_pretty(value).unwrap_or_default()),
        OutputFormat::Yaml => Some(
            serde_yaml::to_string(value)
                .unwrap_or_default()
                .trim_end()
                .to_string(),
        ),
        OutputFormat::Table | OutputFormat::Plain => None,
    }
}

fn print_structured<T: Serialize + ?Sized>(value: &T, format: OutputFormat) -> bool {
    match structured(value, format) {
        Some(text) => {
            println!("{}", text);
            true
        }
        None => false,
    }
}

/// Print a single item
pub fn print_item<T: Serialize + TableDisplay>(item: &T, format: OutputFormat) {
    if print_structured(item, format) {
        return;
    }

    match format {
        OutputFormat::Plain => {
            for (header, value) in T::headers().iter().zip(item.row().iter()) {
                println!("{}: {}", header, value);
            }
        }
        _ => {
            let mut table = new_table();
            for (header, value) in T::headers().iter().zip(item.row()) {
                table.add_row(vec![header.to_string(), value]);
            }
            println!("{table}");
        }
    }
}

/// Print a list of items
pub fn print_list<T: Serialize + TableDisplay>(items: &[T], format: OutputFormat) {
    if print_structured(items, format) {
        return;
    }
    if items.is_empty() {
        println!("No reports found.");
        return;
    }

    match format {
        OutputFormat::Plain => {
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    println!("---");
                }
                for (header, value) in T::headers().iter().zip(item.row().iter()) {
                    println!("{}: {}", header, value);
                }
            }
        }
        _ => {
            let mut table = new_table();
            table.set_header(T::headers());
            for item in items {
                table.add_row(item.row());
            }
            println!("{table}");
        }
    }
}

/// Print an absent item: `null` for json/yaml, `message` otherwise
pub fn print_none(message: &str, format: OutputFormat) {
    if !print_structured(&(), format) {
        println!("{}", message);
    }
}

/// Print success message
pub fn print_success(message: &str) {
    println!("{} {}", "✅".green(), message);
}

/// Print error message
pub fn print_error(message: &str) {
    eprintln!("{} {}", "❌".red(), message.red());
}

/// Print info message
pub fn print_info(message: &str) {
    println!("{} {}", "ℹ️ ".blue(), message);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_list_is_valid_structured_output() {
        let empty: Vec<String> = Vec::new();
        assert_eq!(structured(&empty, OutputFormat::Json).as_deref(), Some("[]"));
        assert_eq!(structured(&empty, OutputFormat::Yaml).as_deref(), Some("[]"));
        assert_eq!(structured(&empty, OutputFormat::Table), None);
    }

    #[test]
    fn test_absent_item_is_null() {
        assert_eq!(structured(&(), OutputFormat::Json).as_deref(), Some("null"));
        assert_eq!(structured(&(), OutputFormat::Yaml).as_deref(), Some("null"));
        assert_eq!(structured(&(), OutputFormat::Plain), None);
    }
}
