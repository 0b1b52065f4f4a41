pub mod collector;
pub mod diagnostic_report;
pub mod message;

use colored::*;
use c1_type::file::SourceMap;
use diagnostic_report::{Diagnostic, Severity};

pub use collector::DiagnosticCollector;

pub fn render(
  diag: &Diagnostic,
  sm: &SourceMap,
) {
  print_header(diag);
  print_body(diag, sm);

  for note in &diag.notes {
    eprintln!("  {} {}", "note:".cyan().bold(), note);
  }

  eprintln!();
}

pub fn render_batch(
  diagnostics: &[Diagnostic],
  sm: &SourceMap,
) {
  for diag in diagnostics {
    render(diag, sm);
  }
}

/// One-line `file:line:col: severity[code]: message` form, without colors.
pub fn diagnostic_line(
  diag: &Diagnostic,
  sm: &SourceMap,
) -> String {
  let file = sm.get(&diag.primary_span.file);
  let (line, col) = sm.line_col(&diag.primary_span.file, diag.primary_span.start);
  let severity = match diag.severity {
    Severity::Warning => "warning",
    Severity::Error => "error",
  };

  format!(
    "{}:{}:{}: {}[{}]: {}",
    file.path.display(),
    line,
    col,
    severity,
    diag.error_code,
    diag.message
  )
}

fn print_header(diag: &Diagnostic) {
  let message = diag.message.bold();
  let code = diag.error_code.bold();

  match diag.severity {
    Severity::Warning => {
      eprintln!("{}[{}]: {}", "Warning".yellow().bold(), code.yellow(), message)
    },
    Severity::Error => {
      eprintln!("{}[{}]: {}", "Error".red().bold(), code.red().bold(), message)
    },
  }
}

fn print_body(
  diag: &Diagnostic,
  sm: &SourceMap,
) {
  let file = sm.get(&diag.primary_span.file);
  let (line, col) = sm.line_col(&diag.primary_span.file, diag.primary_span.start);
  let (end_line, end_col) = sm.line_col(&diag.primary_span.file, diag.primary_span.end);

  eprintln!(
    "{:2}{} {}:{}:{}",
    "",
    "-->".blue().bold(),
    file.path.display().to_string().bold(),
    line.to_string().bold(),
    col.to_string().bold(),
  );

  let pipe = "|".blue().bold();
  let lines: Vec<&str> = file.text.lines().collect();
  let line_idx = (line as usize).saturating_sub(1);

  if line_idx > 0 {
    eprintln!("{:3}{:3}", "", pipe);
    eprintln!(
      "{:3}{:3}{}",
      (line - 1).to_string().blue().bold(),
      pipe,
      lines.get(line_idx - 1).unwrap_or(&"").dimmed()
    );
  }

  eprintln!("{:3}{:3}", "", pipe);
  if let Some(error_line) = lines.get(line_idx) {
    eprintln!("{:3}{:3}{}", line.to_string().blue().bold(), pipe, error_line);

    let span_len = if line == end_line {
      (end_col.saturating_sub(col)).max(1) as usize
    } else {
      error_line.len().saturating_sub(col as usize).max(1)
    };

    let caret = "^".repeat(span_len).red().bold();
    eprintln!("{:3}{:3}{}{}", "", pipe, " ".repeat((col as usize).saturating_sub(1)), caret);
  }

  for label in &diag.labels {
    eprintln!();
    let (label_line, label_col) = sm.line_col(&label.span.file, label.span.start);
    eprintln!("  {} {}", "label:".yellow().bold(), label.message);

    if let Some(label_line_text) = lines.get((label_line as usize).saturating_sub(1)) {
      eprintln!("{:3}{:3}{}", label_line.to_string().blue().bold(), pipe, label_line_text);
      eprintln!(
        "{:3}{:3}{}{}",
        "",
        pipe,
        " ".repeat((label_col as usize).saturating_sub(1)),
        "^".yellow().bold()
      );
    }
  }
}
