//! Command-line parsing tests.

use std::path::PathBuf;

use ccms_config::cli::{Cli, Commands};
use ccms_config::domain::models::LookupSource;
use clap::Parser;

#[test]
fn test_resolve_with_all_options() {
    let cli = Cli::try_parse_from([
        "ccms-config",
        "resolve",
        "config/app.yaml",
        "--tag",
        "vault",
        "--source",
        "file",
        "--keys-file",
        "keys.yaml",
        "--env-prefix",
        "APP_",
    ])
    .unwrap();

    assert!(!cli.json);
    let Commands::Resolve(args) = cli.command else {
        panic!("Expected resolve command");
    };
    assert_eq!(args.file, PathBuf::from("config/app.yaml"));
    assert_eq!(args.tag.as_deref(), Some("vault"));
    assert_eq!(args.source, Some(LookupSource::File));
    assert_eq!(args.keys_file, Some(PathBuf::from("keys.yaml")));
    assert_eq!(args.env_prefix.as_deref(), Some("APP_"));
}

#[test]
fn test_global_flags_after_subcommand() {
    let cli =
        Cli::try_parse_from(["ccms-config", "scan", "app.yaml", "--json", "--config", "s.yaml"])
            .unwrap();

    assert!(cli.json);
    assert_eq!(cli.config, Some(PathBuf::from("s.yaml")));
    assert!(matches!(cli.command, Commands::Scan(ref args) if args.tag.is_none()));
}

#[test]
fn test_unknown_source_is_rejected() {
    let result = Cli::try_parse_from(["ccms-config", "resolve", "app.yaml", "--source", "vault"]);
    assert!(result.is_err());
}

#[test]
fn test_resolve_requires_file() {
    assert!(Cli::try_parse_from(["ccms-config", "resolve"]).is_err());
}

#[test]
fn test_tier_flag_and_environment() {
    temp_env::with_var("TIER", Some("staging"), || {
        let cli = Cli::try_parse_from(["ccms-config", "tier"]).unwrap();
        let Commands::Tier(args) = cli.command else {
            panic!("Expected tier command");
        };
        assert_eq!(args.tier.as_deref(), Some("staging"));

        let cli = Cli::try_parse_from(["ccms-config", "tier", "--tier", "production"]).unwrap();
        let Commands::Tier(args) = cli.command else {
            panic!("Expected tier command");
        };
        assert_eq!(args.tier.as_deref(), Some("production"));
    });

    temp_env::with_var_unset("TIER", || {
        let cli = Cli::try_parse_from(["ccms-config", "tier"]).unwrap();
        assert!(matches!(cli.command, Commands::Tier(ref args) if args.tier.is_none()));
    });
}

#[test]
fn test_cli_definition_is_consistent() {
    use clap::CommandFactory;
    Cli::command().debug_assert();
}
