//! Argument handling and upload dispatch shared by the generator binaries.

use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::GeneratorConfig;
use crate::device::{DryRunUploader, UploadReceipt, Uploader, WavExportUploader};
use crate::waveform::Waveform;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct CliOptions {
    pub config_path: Option<PathBuf>,
    pub dry_run: bool,
    pub slot: Option<u8>,
    pub export_dir: Option<PathBuf>,
    pub message: Option<String>,
    pub help: bool,
}

/// Parses flags after the program name. `--message` is accepted only when
/// `with_message` is set.
pub fn parse_args(args: &[String], with_message: bool) -> Result<CliOptions> {
    let mut opts = CliOptions::default();

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => {
                opts.help = true;
            }
            "--config" => {
                i += 1;
                let raw = args.get(i).ok_or_else(|| anyhow!("missing config path"))?;
                opts.config_path = Some(PathBuf::from(raw));
            }
            "--dry-run" => {
                opts.dry_run = true;
            }
            "--slot" => {
                i += 1;
                opts.slot = Some(
                    args.get(i)
                        .ok_or_else(|| anyhow!("missing slot"))?
                        .parse::<u8>()?,
                );
            }
            "--export-dir" => {
                i += 1;
                let raw = args.get(i).ok_or_else(|| anyhow!("missing export dir"))?;
                opts.export_dir = Some(PathBuf::from(raw));
            }
            "--message" if with_message => {
                i += 1;
                opts.message = Some(args.get(i).cloned().ok_or_else(|| anyhow!("missing message"))?);
            }
            other => {
                return Err(anyhow!("unknown arg: {}", other));
            }
        }
        i += 1;
    }

    Ok(opts)
}

/// Reads the config file if one was given, then applies flag overrides.
pub fn resolve_config(opts: &CliOptions) -> Result<GeneratorConfig> {
    let mut config = match opts.config_path.as_ref() {
        Some(path) => GeneratorConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => GeneratorConfig::default(),
    };

    if opts.dry_run {
        config.dry_run = true;
    }
    if let Some(slot) = opts.slot {
        config.slot = Some(slot);
    }
    if let Some(dir) = opts.export_dir.as_ref() {
        config.export_dir = dir.clone();
    }
    if let Some(message) = opts.message.as_ref() {
        config.message = message.clone();
    }
    config.validate()?;
    Ok(config)
}

/// Picks the uploader the config asks for.
pub fn uploader_for(config: &GeneratorConfig) -> Box<dyn Uploader> {
    if config.dry_run {
        Box::new(DryRunUploader::new(config.port.clone()))
    } else {
        Box::new(WavExportUploader::new(config.export_dir.clone(), config.port.clone()))
    }
}

/// Hands the waveform to `uploader`. Returns the receipt for real transfers
/// and `None` for dry runs.
pub fn deliver(
    uploader: &mut dyn Uploader,
    slot: u8,
    waveform: Waveform,
) -> Result<Option<UploadReceipt>> {
    let receipt = uploader.upload(slot, waveform)?;
    Ok(uploader.transfers().then_some(receipt))
}

/// Installs the fmt subscriber, honouring `RUST_LOG` and defaulting to `info`.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = fmt().with_env_filter(filter).with_target(false).try_init();
}

pub fn print_usage(program: &str, with_message: bool) {
    let message = if with_message { " [--message TEXT]" } else { "" };
    eprintln!(
        "Usage: {} [--config sg.json] [--dry-run] [--slot N] [--export-dir DIR]{}",
        program, message
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn no_arguments_means_defaults() {
        let opts = parse_args(&[], true).unwrap();
        assert_eq!(opts, CliOptions::default());
        let config = resolve_config(&opts).unwrap();
        assert_eq!(config, GeneratorConfig::default());
    }

    #[test]
    fn flags_override_config() {
        let opts = parse_args(&args(&["--dry-run", "--slot", "4", "--message", "HELP"]), true).unwrap();
        let config = resolve_config(&opts).unwrap();
        assert!(config.dry_run);
        assert_eq!(config.slot, Some(4));
        assert_eq!(config.message, "HELP");
    }

    #[test]
    fn message_flag_rejected_where_unsupported() {
        assert!(parse_args(&args(&["--message", "SOS"]), false).is_err());
    }

    #[test]
    fn bad_slot_is_an_error() {
        assert!(parse_args(&args(&["--slot", "300"]), false).is_err());
        assert!(parse_args(&args(&["--slot"]), false).is_err());
    }

    #[test]
    fn dry_run_delivers_without_receipt() {
        let mut uploader = DryRunUploader::new("/dev/ttyUSB0");
        let out = deliver(&mut uploader, 1, Waveform::zeroed(16, 4095)).unwrap();
        assert!(out.is_none());
        assert_eq!(uploader.history().len(), 1);
    }
}
