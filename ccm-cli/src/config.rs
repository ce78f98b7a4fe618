use anyhow::{Context, Result, bail};
use ccm_ingest::{LayoutConfig, OutputFormat};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::state::{ccm_home, ensure_ccm_home};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub layout: LayoutConfig,
    pub extractor: ExtractorSection,
    pub output: OutputSection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorSection {
    /// Text extraction command, resolved on PATH (default: "pdftotext")
    pub command: String,
    /// Arguments placed before `<input.pdf> <output.txt>`
    pub args: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSection {
    pub format: OutputFormat,
}

impl Default for ExtractorSection {
    fn default() -> Self {
        Self {
            command: "pdftotext".to_string(),
            args: vec!["-layout".to_string()],
        }
    }
}

pub fn default_config_path() -> Result<PathBuf> {
    Ok(ccm_home()?.join("config.toml"))
}

/// Load the config. An explicit path must exist; the default one may not.
pub fn load_config(explicit: Option<&Path>) -> Result<Config> {
    let p = match explicit {
        Some(p) => {
            if !p.exists() {
                bail!("config file not found: {}", p.display());
            }
            p.to_path_buf()
        }
        None => {
            let p = default_config_path()?;
            if !p.exists() {
                return Ok(Config::default());
            }
            p
        }
    };

    let s = fs::read_to_string(&p).with_context(|| format!("read {}", p.display()))?;
    let cfg: Config = toml::from_str(&s).with_context(|| format!("parse {}", p.display()))?;
    cfg.layout
        .validate()
        .with_context(|| format!("invalid layout in {}", p.display()))?;
    Ok(cfg)
}

pub fn save_config(cfg: &Config, path: &Path) -> Result<()> {
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(path, s).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}

/// Write the default config unless one already exists. Returns the path.
pub fn init_config(explicit: Option<&Path>) -> Result<PathBuf> {
    let p = match explicit {
        Some(p) => p.to_path_buf(),
        None => {
            ensure_ccm_home()?;
            default_config_path()?
        }
    };
    if p.exists() {
        println!("Config already exists: {}", p.display());
        return Ok(p);
    }
    save_config(&Config::default(), &p)?;
    println!("Wrote {}", p.display());
    Ok(p)
}
