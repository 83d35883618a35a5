//! Rendering of command results as tables or JSON.

use serde::Serialize;
use tabled::{Table, Tabled};

use storefront_core::types::PageResponse;

/// Selected with the global `--format` flag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

/// Rows as a table, or as a JSON array.
pub fn print_list<T: Serialize + Tabled>(items: &[T], format: OutputFormat) {
    match format {
        OutputFormat::Table => {
            if items.is_empty() {
                println!("(no rows)");
            } else {
                println!("{}", Table::new(items));
            }
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(items).unwrap_or_else(|_| "[]".to_string());
            println!("{json}");
        }
    }
}

/// Print one page of rows followed by the paging position.
pub fn print_page<T, R>(page: &PageResponse<T>, rows: &[R], format: OutputFormat)
where
    T: Serialize,
    R: Serialize + Tabled,
{
    match format {
        OutputFormat::Table => {
            print_list(rows, format);
            println!(
                "Page {} of {} ({} total)",
                page.page, page.total_pages, page.total_items
            );
        }
        OutputFormat::Json => print_item(page, format),
    }
}

/// Single records are always JSON; `table` mode pretty-prints it.
pub fn print_item<T: Serialize>(item: &T, format: OutputFormat) {
    let json = match format {
        OutputFormat::Table => serde_json::to_string_pretty(item),
        OutputFormat::Json => serde_json::to_string(item),
    };
    println!("{}", json.unwrap_or_else(|_| "{}".to_string()));
}

pub fn print_success(msg: &str) {
    println!("✓ {msg}");
}

pub fn print_warning(msg: &str) {
    println!("⚠ {msg}");
}

/// Written to stderr.
pub fn print_error(msg: &str) {
    eprintln!("✗ {msg}");
}

/// An indented `key: value` line with aligned values.
pub fn print_kv(key: &str, value: &str) {
    println!("  {:<24} {}", format!("{key}:"), value);
}
