use crate::cli::CLI;
use crate::error::Result;
use crate::git_client::parse_remote_url;
use crate::types::RemoteRepo;
use std::path::PathBuf;
use tracing::warn;

pub const DEFAULT_ENVIRONMENT: &str = "production";

#[derive(Debug, Clone)]
pub struct Config {
    pub owner: String,
    pub repo: String,
    pub git_ref: String,
    pub environment: String,
    pub dry_run: bool,
    pub verbose: u8,
    pub payload: Option<String>,
    pub manifest: PathBuf,
    pub api_url: String,
    pub token: Option<String>,
}

impl Config {
    /// Resolves the final parameters. CLI flags win over values derived from
    /// the checkout (`branch` and the `origin` remote URL).
    pub fn from_env_and_cli(cli: &CLI, branch: &str, origin: &str) -> Result<Self> {
        let remote = match (&cli.owner, &cli.repo) {
            (Some(owner), Some(repo)) => RemoteRepo {
                owner: owner.clone(),
                repo: repo.clone(),
            },
            (owner, repo) => {
                let parsed = parse_remote_url(origin)?;
                RemoteRepo {
                    owner: owner.clone().unwrap_or(parsed.owner),
                    repo: repo.clone().unwrap_or(parsed.repo),
                }
            }
        };

        let token = cli.token.clone().filter(|t| !t.is_empty());
        if token.is_none() && !cli.dry_run {
            warn!("GITHUB_TOKEN is not set, the request will be sent unauthenticated");
        }

        Ok(Config {
            owner: remote.owner,
            repo: remote.repo,
            git_ref: cli.git_ref.clone().unwrap_or_else(|| branch.to_string()),
            environment: cli
                .environment
                .clone()
                .unwrap_or_else(|| DEFAULT_ENVIRONMENT.to_string()),
            dry_run: cli.dry_run,
            verbose: cli.verbose,
            payload: cli.payload.clone(),
            manifest: cli.manifest.clone(),
            api_url: cli.api_url.clone(),
            token,
        })
    }

    pub fn show_configuration_help() {
        eprintln!("Configuration options:");
        eprintln!("  1. Run inside a git checkout whose 'origin' remote points at GitHub:");
        eprintln!("     git@github.com:owner/repo.git or https://github.com/owner/repo.git");
        eprintln!();
        eprintln!("  2. Or name the repository explicitly:");
        eprintln!("     gh-deploy --owner my-org --repo my-service -e staging");
        eprintln!();
        eprintln!("Command line flags take precedence over values read from git.");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DeployError;
    use clap::Parser;

    fn cli(args: &[&str]) -> CLI {
        CLI::try_parse_from(std::iter::once("gh-deploy").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_defaults_come_from_git() {
        let config = Config::from_env_and_cli(
            &cli(&["--token", "t"]),
            "feature/login",
            "git@github.com:octo/app.git",
        )
        .unwrap();
        assert_eq!(config.owner, "octo");
        assert_eq!(config.repo, "app");
        assert_eq!(config.git_ref, "feature/login");
        assert_eq!(config.environment, "production");
        assert_eq!(config.manifest, PathBuf::from("package.json"));
    }

    #[test]
    fn test_cli_precedence_over_git() {
        let config = Config::from_env_and_cli(
            &cli(&["-e", "staging", "-r", "v1.2.3", "-o", "other", "--token", "t"]),
            "main",
            "https://github.com/octo/app.git",
        )
        .unwrap();
        assert_eq!(config.owner, "other");
        assert_eq!(config.repo, "app");
        assert_eq!(config.git_ref, "v1.2.3");
        assert_eq!(config.environment, "staging");
    }

    #[test]
    fn test_full_override_skips_remote_parsing() {
        let config = Config::from_env_and_cli(
            &cli(&["-o", "octo", "--repo", "app", "--token", "t"]),
            "main",
            "not-a-remote",
        )
        .unwrap();
        assert_eq!((config.owner.as_str(), config.repo.as_str()), ("octo", "app"));
    }

    #[test]
    fn test_malformed_remote_without_override() {
        let err = Config::from_env_and_cli(&cli(&["--token", "t"]), "main", "not-a-remote")
            .unwrap_err();
        assert!(matches!(err, DeployError::MalformedRemoteUrl { .. }));
    }

    #[test]
    fn test_empty_token_is_treated_as_missing() {
        let config = Config::from_env_and_cli(
            &cli(&["--token", "", "-d"]),
            "main",
            "git@github.com:octo/app.git",
        )
        .unwrap();
        assert!(config.token.is_none());
    }
}
