//! Implementation of the `ccms-config scan` command.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;

use crate::cli::output::{output, CommandOutput};
use crate::domain::models::{Document, Settings};
use crate::services::{scan_tags, TagRef};

#[derive(Args, Debug)]
pub struct ScanArgs {
    /// Configuration file to scan
    pub file: PathBuf,

    /// Namespace marking indirection tags (overrides settings)
    #[arg(short, long)]
    pub tag: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ScanOutput {
    pub file: PathBuf,
    pub tag_name: String,
    pub tags: Vec<TagRef>,
}

impl CommandOutput for ScanOutput {
    fn to_human(&self) -> String {
        if self.tags.is_empty() {
            return format!("No '{}' tags in {}", self.tag_name, self.file.display());
        }

        let mut lines = vec![format!(
            "{} '{}' tag(s) in {}:",
            self.tags.len(),
            self.tag_name,
            self.file.display()
        )];
        for tag in &self.tags {
            lines.push(format!(
                "  {} -> {} ({})",
                tag.path,
                tag.key,
                tag.type_name.unwrap_or("string")
            ));
        }
        lines.join("\n")
    }
}

pub fn execute(args: ScanArgs, settings: &Settings, json_mode: bool) -> Result<()> {
    let tag_name = args.tag.unwrap_or_else(|| settings.tag_name.clone());

    let raw = std::fs::read(&args.file)
        .with_context(|| format!("Failed to read {}", args.file.display()))?;
    let tags = Document::from_yaml_slice(&raw)
        .and_then(|document| scan_tags(&document, &tag_name))
        .with_context(|| format!("Failed to scan {}", args.file.display()))?;

    output(
        &ScanOutput {
            file: args.file,
            tag_name,
            tags,
        },
        json_mode,
    );
    Ok(())
}
