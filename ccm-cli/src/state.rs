use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

pub fn ccm_home() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(".ccm2csv"))
}

pub fn ensure_ccm_home() -> Result<PathBuf> {
    let dir = ccm_home()?;
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir)
}
