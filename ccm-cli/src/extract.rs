//! Statement discovery and layout-preserving text extraction.

use anyhow::{Context, Result, ensure};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tracing::debug;

use crate::config::ExtractorSection;

/// Files in `dir` (not recursive) with extension `ext`, ignoring case,
/// sorted by file name.
pub fn list_documents(dir: &Path, ext: &str) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(dir).with_context(|| format!("read dir {}", dir.display()))?;

    let mut docs = Vec::new();
    for entry in entries {
        let path = entry
            .with_context(|| format!("read dir {}", dir.display()))?
            .path();
        let matches = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case(ext));
        if matches && path.is_file() {
            docs.push(path);
        }
    }

    docs.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(docs)
}

/// External command that renders a document to layout-preserving text.
#[derive(Debug, Clone)]
pub struct TextExtractor {
    program: PathBuf,
    args: Vec<String>,
}

impl TextExtractor {
    /// Resolve the configured command on PATH.
    pub fn locate(cfg: &ExtractorSection) -> Result<Self> {
        let program = which::which(&cfg.command).with_context(|| {
            format!(
                "{} not found on PATH (install poppler-utils or set [extractor].command)",
                cfg.command
            )
        })?;
        Ok(Self {
            program,
            args: cfg.args.clone(),
        })
    }

    /// Run the extractor into a scratch file and return its text.
    ///
    /// The scratch directory is removed when this returns, on success or error.
    pub fn extract(&self, document: &Path) -> Result<String> {
        let scratch = tempfile::tempdir().context("create scratch dir")?;
        let txt_path = scratch.path().join("statement.txt");

        let output = Command::new(&self.program)
            .args(&self.args)
            .arg(document)
            .arg(&txt_path)
            .stdin(Stdio::null())
            .output()
            .with_context(|| format!("running {}", self.program.display()))?;

        ensure!(
            output.status.success(),
            "{} failed on {} ({}): {}",
            self.program.display(),
            document.display(),
            output.status,
            String::from_utf8_lossy(&output.stderr).trim()
        );

        let bytes = fs::read(&txt_path)
            .with_context(|| format!("read extracted text for {}", document.display()))?;
        debug!(
            document = %document.display(),
            bytes = bytes.len(),
            "extracted text"
        );
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}
