//! Implementation of the `ccms-config resolve` command.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;

use crate::cli::output::{output, to_yaml, CommandOutput};
use crate::domain::models::{Document, LookupSettings, LookupSource, Settings};
use crate::infrastructure::lookup;
use crate::services::resolve_document;

#[derive(Args, Debug)]
pub struct ResolveArgs {
    /// Configuration file to resolve
    pub file: PathBuf,

    /// Namespace marking indirection tags (overrides settings)
    #[arg(short, long)]
    pub tag: Option<String>,

    /// Key source: env, file or map
    #[arg(short, long)]
    pub source: Option<LookupSource>,

    /// Key file to read keys from (implies --source file)
    #[arg(short, long, value_name = "PATH")]
    pub keys_file: Option<PathBuf>,

    /// Prefix prepended to keys when reading the environment
    #[arg(short, long, value_name = "PREFIX")]
    pub env_prefix: Option<String>,
}

impl ResolveArgs {
    /// Lookup settings with command-line overrides applied
    pub fn lookup_settings(&self, base: &LookupSettings) -> LookupSettings {
        let mut settings = base.clone();
        if let Some(ref keys_file) = self.keys_file {
            settings.keys_file = Some(keys_file.clone());
            settings.source = LookupSource::File;
        }
        if let Some(source) = self.source {
            settings.source = source;
        }
        if let Some(ref prefix) = self.env_prefix {
            settings.env_prefix.clone_from(prefix);
        }
        settings
    }
}

#[derive(Debug, Serialize)]
pub struct ResolveOutput {
    pub file: PathBuf,
    pub tag_name: String,
    pub source: LookupSource,
    pub document: Document,
}

impl CommandOutput for ResolveOutput {
    fn to_human(&self) -> String {
        to_yaml(&self.document)
    }
}

pub fn execute(args: ResolveArgs, settings: &Settings, json_mode: bool) -> Result<()> {
    let tag_name = args.tag.clone().unwrap_or_else(|| settings.tag_name.clone());
    let lookup_settings = args.lookup_settings(&settings.lookup);
    let lookup = lookup::from_settings(&lookup_settings)?;

    let raw = std::fs::read(&args.file)
        .with_context(|| format!("Failed to read {}", args.file.display()))?;
    let document = resolve_document(&raw, &tag_name, lookup.as_ref())
        .with_context(|| format!("Failed to resolve {}", args.file.display()))?;

    let output_data = ResolveOutput {
        file: args.file,
        tag_name,
        source: lookup_settings.source,
        document,
    };
    output(&output_data, json_mode);
    Ok(())
}
