mod cli;

use std::{path::Path, sync::Arc};

use clap::Parser as ClapParser;
use colored::*;
use c1_config::{C1BuildConfig, C1Config, C1ProjectConfig, EmitKind};
use c1_driver::compile_file;

use cli::{Cli, SubCommand};

const PROJECT_FILE: &str = "c1.toml";

fn fail(message: &str) -> ! {
  eprintln!("{} {}", "Error:".red().bold(), message);
  std::process::exit(1);
}

/// Reads `c1.toml` from the working directory, if there is one.
fn load_project_config() -> Option<C1ProjectConfig> {
  let file_path = Path::new(PROJECT_FILE);
  if !file_path.exists() {
    return None;
  }

  let content = match std::fs::read_to_string(file_path) {
    Ok(content) => content,
    Err(e) => fail(&format!("Failed to read {}: {}", PROJECT_FILE, e)),
  };

  match C1ProjectConfig::from_toml(&content) {
    Ok(config) => Some(config),
    Err(e) => fail(&format!("Invalid {}: {}", PROJECT_FILE, e)),
  }
}

fn entry_file(
  file_path: &Option<String>,
  project: &Option<C1ProjectConfig>,
) -> String {
  if let Some(file_path) = file_path {
    return file_path.clone();
  }

  match project {
    Some(project) => project.build.main_file.clone(),
    None => {
      eprintln!("No file path provided and no {} found in the current directory.", PROJECT_FILE);
      eprintln!("For more information, run `c1c --help`");
      std::process::exit(1);
    },
  }
}

fn parse_cli_to_config(cli: &Cli) -> Arc<C1Config> {
  let mut config = C1Config::new_basic(
    cli.debug,
    cli.debug_trace.iter().copied().map(Into::into).collect(),
    cli.quiet,
    cli.verbose,
  );

  let project = load_project_config();
  let dump = cli.dump.iter().copied().map(Into::into).collect();

  let build_config = match &cli.subcommand {
    SubCommand::Build(build) => {
      let file = entry_file(&build.file_path, &project);
      let output_dir = build
        .output_dir
        .clone()
        .or_else(|| project.as_ref().map(|p| p.build.output_dir.clone()))
        .unwrap_or_else(|| "build".to_string());
      let emit = build
        .emit
        .map(Into::into)
        .or_else(|| project.as_ref().map(|p| p.build.emit))
        .unwrap_or_default();

      C1BuildConfig::new(file, output_dir, emit, dump, cli.dump_dir.clone(), !build.no_verify, false)
    },
    SubCommand::Check(check) => {
      let file = entry_file(&check.file_path, &project);
      C1BuildConfig::new(
        file,
        "build".to_string(),
        EmitKind::None,
        dump,
        cli.dump_dir.clone(),
        true,
        true,
      )
    },
  };

  config.project_config = project;
  config.build_config = Some(build_config);

  Arc::new(config)
}

fn main() {
  let cli = Cli::parse();

  let config = parse_cli_to_config(&cli);
  let Some(file_path) = config.build_config.as_ref().map(|b| b.file.clone()) else {
    return;
  };

  match compile_file(config, &file_path) {
    Ok(()) => {},
    Err(()) => std::process::exit(1),
  }
}
