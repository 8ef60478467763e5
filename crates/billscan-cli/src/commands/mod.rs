//! Subcommands and the helpers they share.

pub mod batch;
pub mod config;
pub mod detect;
pub mod output;
pub mod parse;

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use billscan_core::models::config::BillscanConfig;
use billscan_core::SourceKind;

/// Location of the per-user configuration file.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("billscan")
        .join("config.json")
}

/// Config file in effect: `--config` if given, else the per-user file.
pub fn config_path(explicit: Option<&str>) -> PathBuf {
    explicit.map(PathBuf::from).unwrap_or_else(default_config_path)
}

/// Load the configuration, falling back to defaults when no file exists.
pub fn load_config(explicit: Option<&str>) -> anyhow::Result<BillscanConfig> {
    let path = config_path(explicit);

    if explicit.is_none() && !path.exists() {
        return Ok(BillscanConfig::default());
    }

    debug!("Loading configuration from {}", path.display());
    BillscanConfig::from_file(&path)
        .map_err(|e| anyhow::anyhow!("Failed to load config {}: {}", path.display(), e))
}

/// An uploaded file and the route it takes.
pub struct Upload {
    pub data: Vec<u8>,
    pub mime: String,
    pub kind: SourceKind,
}

impl Upload {
    /// Read `path`; the MIME type comes from `mime` or the file extension.
    pub fn read(path: &Path, mime: Option<&str>) -> anyhow::Result<Self> {
        if !path.exists() {
            anyhow::bail!("Input file not found: {}", path.display());
        }

        let (mime, kind) = match mime {
            Some(mime) => {
                let kind = SourceKind::from_mime(mime)
                    .ok_or_else(|| anyhow::anyhow!("Unsupported MIME type: {}", mime))?;
                (mime.to_string(), kind)
            }
            None => {
                let kind = SourceKind::from_extension(path).ok_or_else(|| {
                    anyhow::anyhow!("Unsupported file format: {}", path.display())
                })?;
                (kind.mime().to_string(), kind)
            }
        };

        Ok(Self {
            data: fs::read(path)?,
            mime,
            kind,
        })
    }
}
