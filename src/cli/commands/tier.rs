//! Implementation of the `ccms-config tier` command.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use crate::cli::output::{output, to_yaml, CommandOutput};
use crate::domain::models::{Document, Settings};
use crate::infrastructure::lookup;
use crate::infrastructure::tier::TierLoader;

#[derive(Args, Debug)]
pub struct TierArgs {
    /// Tier to load (defaults to $TIER, then the configured tier)
    #[arg(short, long, env = "TIER")]
    pub tier: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TierOutput {
    pub tier: String,
    pub path: PathBuf,
    pub local: bool,
    pub document: Document,
}

impl CommandOutput for TierOutput {
    fn to_human(&self) -> String {
        let kind = if self.local { "local" } else { "resolved" };
        format!(
            "# tier: {} ({kind}) from {}\n{}",
            self.tier,
            self.path.display(),
            to_yaml(&self.document)
        )
    }
}

pub fn execute(args: TierArgs, settings: &Settings, json_mode: bool) -> Result<()> {
    let loader = TierLoader::new(settings.clone());
    let tier = loader.select_tier(args.tier.as_deref());
    let lookup = lookup::from_settings(&settings.lookup)?;

    let document = loader.load_document(&tier, lookup.as_ref())?;

    let output_data = TierOutput {
        path: loader.tier_path(&tier),
        local: settings.is_local_tier(&tier),
        tier,
        document,
    };
    output(&output_data, json_mode);
    Ok(())
}
