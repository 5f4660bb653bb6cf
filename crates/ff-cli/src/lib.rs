use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use clap::Parser;
use ff_api::{error_text, generate_diagram, try_generate_diagram};
use ff_core::{DiagramResult, FormFlowError};
use log::{debug, info, warn, LevelFilter};

mod cli_args;
#[cfg(test)]
mod cli_test_support;
mod config;
mod emit;
mod error_map;
mod snapshot_loader;

pub(crate) use cli_args::{BatchArgs, Cli, Mode, RenderArgs};
pub(crate) use config::{load_config, CliConfig};
pub(crate) use emit::{emit_lines, success_lines};
pub(crate) use error_map::{
    emit_error, error_lines, map_cli_config_invalid, map_cli_config_read, map_cli_output_write,
    map_cli_result_json, map_cli_snapshot_path, map_cli_snapshot_read, map_cli_snapshot_scan,
};
pub(crate) use snapshot_loader::{collect_snapshots, read_snapshot, resolve_snapshots_dir};

pub fn run_cli_from_args<I, T>(args: I) -> i32
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let cli = match Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(error) => {
            let _ = error.print();
            return error.exit_code();
        }
    };
    init_logger(&cli.log_level);
    match run(cli) {
        Ok(code) => code,
        Err(error) => emit_error(error),
    }
}

fn init_logger(raw_level: &str) {
    let log_level = LevelFilter::from_str(raw_level).unwrap_or_else(|_| {
        eprintln!("Invalid log level: {}. Using 'warn' instead.", raw_level);
        LevelFilter::Warn
    });
    // A logger may already be installed when the CLI runs inside tests.
    let _ = env_logger::Builder::from_env(env_logger::Env::default())
        .filter_level(log_level)
        .try_init();
}

fn run(cli: Cli) -> Result<i32, FormFlowError> {
    debug!(command:? = &cli.command; "Parsed arguments");
    match cli.command {
        Mode::Render(args) => run_render(args),
        Mode::Batch(args) => run_batch(args),
    }
}

fn run_render(args: RenderArgs) -> Result<i32, FormFlowError> {
    let config = load_config(args.config.as_deref())?;
    let options = config.generate_options();
    let snapshot = read_snapshot(&args.snapshot)?;

    if args.json {
        let result = generate_diagram(&snapshot, &options);
        if result.is_success() {
            write_decorated(&config, &result, args.out.as_deref())?;
        }
        let record = serde_json::to_string(&result).map_err(map_cli_result_json)?;
        println!("{}", record);
        return Ok(if result.is_success() { 0 } else { 1 });
    }

    let result = try_generate_diagram(&snapshot, &options)?;
    let (text, written_to) = write_decorated(&config, &result, args.out.as_deref())?;
    emit_lines(&success_lines(&result.diagram_title, &text, written_to.as_deref()));
    Ok(0)
}

/// Applies the configured front matter and writes the diagram when `out`
/// is given.
fn write_decorated(
    config: &CliConfig,
    result: &DiagramResult,
    out: Option<&str>,
) -> Result<(String, Option<PathBuf>), FormFlowError> {
    let text = config.decorate(result)?;
    let written_to = match out {
        Some(out) => {
            let path = PathBuf::from(out);
            write_diagram(&path, &text)?;
            Some(path)
        }
        None => None,
    };
    Ok((text, written_to))
}

fn run_batch(args: BatchArgs) -> Result<i32, FormFlowError> {
    let config = load_config(args.config.as_deref())?;
    let options = config.generate_options();
    let snapshots_root = resolve_snapshots_dir(&args.snapshots_dir)?;
    let snapshots = collect_snapshots(&snapshots_root)?;
    let out_dir = PathBuf::from(&args.out_dir);

    let mut failures = 0usize;
    for (relative, path) in &snapshots {
        println!("FILE:{}", relative);
        let rendered = path
            .to_str()
            .ok_or_else(|| {
                FormFlowError::new(
                    "CLI_SNAPSHOT_PATH",
                    format!("snapshot path is not valid UTF-8: {}", path.display()),
                )
            })
            .and_then(read_snapshot)
            .and_then(|snapshot| try_generate_diagram(&snapshot, &options))
            .and_then(|result| {
                let text = config.decorate(&result)?;
                let target = out_dir.join(relative).with_extension("mmd");
                write_diagram(&target, &text)?;
                Ok(success_lines(&result.diagram_title, &text, Some(target.as_path())))
            });

        match rendered {
            Ok(lines) => emit_lines(&lines),
            Err(error) => {
                warn!(
                    file = relative.as_str(),
                    code = error.code.as_str();
                    "{}",
                    error_text(&error)
                );
                failures += 1;
                emit_lines(&error_lines(&error));
            }
        }
    }

    info!(total = snapshots.len(), failures; "Batch finished");
    Ok(if failures == 0 { 0 } else { 1 })
}

fn write_diagram(path: &Path, text: &str) -> Result<(), FormFlowError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(map_cli_output_write)?;
        }
    }
    fs::write(path, text).map_err(map_cli_output_write)
}
