//! Main entry point for the select-files binary

use anyhow::Result;
use futures_util::StreamExt;
use select_core::{
    config::CliMode, init_i18n, AppConfig, FileValidation, SelectFiles, SelectedFile, StaticPickerHost,
};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let config = AppConfig::load()
        .map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))?;

    info!("Configuration loaded successfully");
    info!("Accept pattern: {}", config.selection.accept().unwrap_or("<any>"));
    info!("Maximum size (MB): {:?}", config.upload.maximum_size_mb);

    let i18n = init_i18n(&config.i18n)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to initialize messages: {}", e))?;
    info!("Upload messages: {}", i18n.current_locale());

    let paths: Vec<PathBuf> = std::env::args_os().skip(1).map(PathBuf::from).collect();
    if paths.is_empty() {
        anyhow::bail!("usage: select-files <PATH>...");
    }

    let mut files = Vec::with_capacity(paths.len());
    for path in &paths {
        let file = SelectedFile::from_path(path)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", path.display(), e))?;
        files.push(file);
    }

    let host = StaticPickerHost::new(Vec::new());
    let select = SelectFiles::new(host.clone(), &i18n).with_control_id(config.picker.control_id.clone());

    let validation = match config.cli.mode {
        CliMode::Drop => {
            info!("Validating {} dropped files", files.len());
            select.trigger_drop_files(&config.selection, &config.upload, files)
        }
        CliMode::Picker => {
            info!("Validating {} files through the picker", files.len());
            host.set_selection(files);
            select.trigger_select_files(&config.selection, &config.upload)
        }
    };

    let accepted = print_accepted(validation).await?;

    info!("{} files accepted", accepted);
    Ok(())
}

async fn print_accepted(mut validation: FileValidation<'_, SelectedFile>) -> Result<usize> {
    let mut accepted = 0;

    while let Some(result) = validation.next().await {
        let file = result.map_err(|e| anyhow::anyhow!("{}", e))?;
        println!("{}\t{}\t{}", file.name, file.size, file.mime_type);
        accepted += 1;
    }

    Ok(accepted)
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| {
            let default_level = if cfg!(debug_assertions) {
                "debug"
            } else {
                "info"
            };

            format!(
                "{}={},select_core={}",
                env!("CARGO_CRATE_NAME").replace('-', "_"),
                default_level,
                default_level
            ).into()
        });

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_file(true)
        .with_line_number(true);

    let is_json = std::env::var("LOG_FORMAT")
        .map(|v| v.to_lowercase() == "json")
        .unwrap_or(false);

    if is_json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer.json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer.pretty())
            .init();
    }
}
