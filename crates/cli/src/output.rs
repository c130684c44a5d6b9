//! CLI output formatting utilities.
//!
//! Provides consistent formatting for terminal output including colored status
//! messages and the store observation table.

use anyhow::Context;
use owo_colors::{OwoColorize, Stream};
use runscope_lib::stores::StoreSnapshot;

pub mod symbols {
  pub const SUCCESS: &str = "✓";
  pub const ERROR: &str = "✗";
  pub const WARNING: &str = "⚠";
  pub const INFO: &str = "•";
  pub const ARROW: &str = "→";
}

const TABLE_HEADER: [&str; 5] = ["RUNSPACE", "THREAD", "STATIC", "RUNSPACE VALUE", "THREAD VALUE"];

pub fn print_success(message: &str) {
  println!(
    "{} {}",
    symbols::SUCCESS.if_supports_color(Stream::Stdout, |s| s.green()),
    message
  );
}

pub fn print_error(message: &str) {
  eprintln!(
    "{} {}",
    symbols::ERROR.if_supports_color(Stream::Stderr, |s| s.red()),
    message.if_supports_color(Stream::Stderr, |s| s.red())
  );
}

pub fn print_warning(message: &str) {
  eprintln!(
    "{} {}",
    symbols::WARNING.if_supports_color(Stream::Stderr, |s| s.yellow()),
    message.if_supports_color(Stream::Stderr, |s| s.yellow())
  );
}

pub fn print_info(message: &str) {
  println!(
    "{} {}",
    symbols::INFO.if_supports_color(Stream::Stdout, |s| s.blue()),
    message
  );
}

pub fn print_stat(label: &str, value: &str) {
  println!(
    "  {}: {}",
    label.if_supports_color(Stream::Stdout, |s| s.dimmed()),
    value
  );
}

pub fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
  let json = serde_json::to_string_pretty(value).context("Failed to serialize to JSON")?;
  println!("{}", json);
  Ok(())
}

/// Render observations as an aligned, plain-text table.
pub fn format_snapshots(snapshots: &[StoreSnapshot]) -> Vec<String> {
  let rows: Vec<[String; 5]> = snapshots
    .iter()
    .map(|s| {
      [
        s.runspace.to_string(),
        s.thread.clone(),
        s.static_value.clone(),
        s.runspace_value.clone(),
        s.thread_value.clone(),
      ]
    })
    .collect();

  let mut widths = TABLE_HEADER.map(str::len);
  for row in &rows {
    for (width, cell) in widths.iter_mut().zip(row) {
      *width = (*width).max(cell.chars().count());
    }
  }

  let header = TABLE_HEADER.map(str::to_string);
  std::iter::once(&header)
    .chain(rows.iter())
    .map(|row| {
      row
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{:<width$}", cell, width = width))
        .collect::<Vec<_>>()
        .join("  ")
        .trim_end()
        .to_string()
    })
    .collect()
}

pub fn print_snapshots(snapshots: &[StoreSnapshot]) {
  let mut lines = format_snapshots(snapshots).into_iter();
  if let Some(header) = lines.next() {
    println!("  {}", header.if_supports_color(Stream::Stdout, |s| s.dimmed()));
  }
  for line in lines {
    println!("  {}", line);
  }
}
