use anyhow::{Context, Result};
use dropsweep::config::{load_config, validate_config, Config};
use std::fs::OpenOptions;
use std::sync::Mutex;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[cfg(windows)]
use dropsweep::FileId;
#[cfg(windows)]
use std::collections::BTreeSet;
#[cfg(windows)]
use tracing::warn;

fn main() -> Result<()> {
    let config = load_config().context("loading config.toml")?;
    validate_config(&config)?;
    init_logging(&config)?;

    info!("Starting dropsweep v{}", env!("CARGO_PKG_VERSION"));

    #[cfg(not(windows))]
    {
        anyhow::bail!("dropsweep only supports the Windows platform");
    }

    #[cfg(windows)]
    {
        let ids = dropsweep::core::types::read_file_ids(std::io::stdin().lock())?;
        info!("{} file IDs read, action: {:?}", ids.len(), config.run.action);
        let report = run(&config, ids)?;
        println!("{}", serde_json::to_string_pretty(&report)?);
        Ok(())
    }
}

/// Log to the configured file; `RUST_LOG` overrides the configured level
fn init_logging(config: &Config) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.logging.level.to_lowercase()));

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.logging.file)
        .with_context(|| format!("opening log file {}", config.logging.file))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .init();
    Ok(())
}

#[cfg(windows)]
#[derive(Debug, serde::Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
enum Report {
    List {
        drive: String,
        processed: usize,
        files: Vec<dropsweep::files::ResolvedFile>,
        unresolved: Vec<FileId>,
    },
    Delete {
        drive: String,
        strategy: dropsweep::DeletionStrategy,
        processed: usize,
        removed: Vec<(FileId, dropsweep::DeleteOutcome)>,
        remaining: Vec<FileId>,
    },
}

#[cfg(windows)]
fn run(config: &Config, mut ids: BTreeSet<FileId>) -> Result<Report> {
    use dropsweep::config::RunAction;
    use dropsweep::files::{delete_dropped_files_report, list_files, DeleteOptions, ResolvedFile};
    use dropsweep::process::set_debug_privilege;
    use dropsweep::windows::utils::string_conv::strip_verbatim_prefix;
    use dropsweep::Volume;

    if config.process.enable_debug_privilege {
        if let Err(err) = set_debug_privilege() {
            warn!("Continuing without SeDebugPrivilege: {}", err);
        }
    }

    let drive = config.volume.drive_letter.clone();
    let volume =
        Volume::open(&drive).with_context(|| format!("opening volume {}", drive))?;

    let report = match config.run.action {
        RunAction::List => {
            let listing = list_files(&volume, &ids);
            info!("{} of {} files resolved", listing.processed(), ids.len());
            Report::List {
                drive,
                processed: listing.processed(),
                files: listing
                    .resolved
                    .into_iter()
                    .map(|file| ResolvedFile {
                        id: file.id,
                        path: strip_verbatim_prefix(&file.path),
                    })
                    .collect(),
                unresolved: listing.unresolved,
            }
        }
        RunAction::Delete => {
            let options = DeleteOptions {
                strategy: config.deletion.strategy,
                spoil_suffix: config.deletion.spoil_suffix.clone(),
            };
            let report = delete_dropped_files_report(&volume, &mut ids, &options);
            info!(
                "{} files removed, {} remaining",
                report.processed(),
                report.remaining.len()
            );
            Report::Delete {
                drive,
                strategy: options.strategy,
                processed: report.processed(),
                removed: report.removed,
                remaining: report.remaining,
            }
        }
    };
    Ok(report)
}
