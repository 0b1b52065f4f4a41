use std::path::{Path, PathBuf};

use colored::*;
use c1_config::{C1Config, DumpKind, EmitKind};
use c1_ir::{IrModule, display::print_module};

pub(crate) fn dump_requested(
  config: &C1Config,
  kind: DumpKind,
) -> bool {
  config
    .build_config
    .as_ref()
    .map(|bc| bc.dump.contains(&kind))
    .unwrap_or(false)
}

/// Writes a dump into the dump directory, or prints it to stdout when none
/// was configured.
pub(crate) fn write_dump_output(
  config: &C1Config,
  file_name: &str,
  content: &str,
) -> Result<(), ()> {
  let Some(dump_dir) = config.build_config.as_ref().and_then(|bc| bc.dump_dir.as_ref()) else {
    println!("\n{}", content);
    return Ok(());
  };

  let output_dir = Path::new(dump_dir);
  if let Err(e) = std::fs::create_dir_all(output_dir) {
    eprintln!(
      "{} Failed to create dump directory '{}': {}",
      "Error:".red().bold(),
      output_dir.display(),
      e
    );
    return Err(());
  }

  let output_path = output_dir.join(file_name);
  if let Err(e) = std::fs::write(&output_path, content) {
    eprintln!(
      "{} Failed to write dump file '{}': {}",
      "Error:".red().bold(),
      output_path.display(),
      e
    );
    return Err(());
  }

  Ok(())
}

/// Module name derived from the source path: `src/fib.c1` becomes `fib`.
pub(crate) fn module_name(file_path: &str) -> String {
  Path::new(file_path)
    .file_stem()
    .map(|stem| stem.to_string_lossy().into_owned())
    .unwrap_or_else(|| "main".to_string())
}

/// Writes the module in the requested form. Returns the written path, or
/// `None` for [`EmitKind::None`].
pub(crate) fn emit_module(
  module: &IrModule,
  emit: EmitKind,
  output_dir: &str,
) -> Result<Option<PathBuf>, ()> {
  let (extension, content) = match emit {
    EmitKind::None => return Ok(None),
    EmitKind::Ir => ("ll", print_module(module)),
    EmitKind::Json => match module.to_json() {
      Ok(json) => ("json", json),
      Err(e) => {
        eprintln!("{} Failed to serialize module '{}': {}", "Error:".red().bold(), module.name, e);
        return Err(());
      },
    },
  };

  let output_dir = Path::new(output_dir);
  if let Err(e) = std::fs::create_dir_all(output_dir) {
    eprintln!(
      "{} Failed to create output directory '{}': {}",
      "Error:".red().bold(),
      output_dir.display(),
      e
    );
    return Err(());
  }

  let output_path = output_dir.join(format!("{}.{}", module.name, extension));
  if let Err(e) = std::fs::write(&output_path, content) {
    eprintln!(
      "{} Failed to write '{}': {}",
      "Error:".red().bold(),
      output_path.display(),
      e
    );
    return Err(());
  }

  Ok(Some(output_path))
}
