use crate::config::Config;
use crate::deployment_manager::DeploymentManager;
use crate::error::Result;
use crate::git_client::GitClient;
use crate::github_client::{DEFAULT_API_URL, GitHubClient};
use crate::payload;
use crate::types::DeploymentRequest;
use clap::Parser;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "gh-deploy",
    about = "Create a GitHub deployment for the current git checkout"
)]
pub struct CLI {
    #[arg(short, long, help = "Deployment environment [default: production]")]
    pub environment: Option<String>,
    #[arg(
        short,
        long,
        help = "Dry run mode - print the request without calling the API"
    )]
    pub dry_run: bool,
    #[arg(
        short,
        long,
        value_name = "JSON",
        help = "Additional payload data as a JSON object"
    )]
    pub payload: Option<String>,
    #[arg(
        short = 'V',
        long,
        action = clap::ArgAction::Count,
        help = "Verbose output (-V, -VV, -VVV for increasing detail)"
    )]
    pub verbose: u8,
    #[arg(
        short = 'r',
        long = "ref",
        value_name = "REF",
        help = "Git ref to deploy [default: current branch]"
    )]
    pub git_ref: Option<String>,
    #[arg(short, long, help = "Repository owner [default: from the origin remote]")]
    pub owner: Option<String>,
    #[arg(long, help = "Repository name [default: from the origin remote]")]
    pub repo: Option<String>,
    #[arg(
        short,
        long,
        default_value = "package.json",
        help = "Manifest to read the payload version from"
    )]
    pub manifest: PathBuf,
    #[arg(long, env = "GITHUB_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true, help = "GitHub token")]
    pub token: Option<String>,
}

/// Resolves every input inside `work_dir` and creates (or, in dry-run mode,
/// prints) the deployment. Results are written to `out`.
pub async fn deploy(cli: &CLI, work_dir: &Path, out: &mut dyn Write) -> Result<()> {
    let git = GitClient::new(work_dir);
    let branch = git.current_branch().await?;
    let origin = git.origin_url().await?;

    let config = Config::from_env_and_cli(cli, &branch, &origin)?;
    info!(
        "Resolved {}/{} ref {} for environment {}",
        config.owner, config.repo, config.git_ref, config.environment
    );

    let version = payload::read_manifest_version(&git.repo_dir().join(&config.manifest))?;
    let custom = config
        .payload
        .as_deref()
        .filter(|raw| !raw.is_empty())
        .map(payload::parse_custom_payload)
        .transpose()?;

    let request = DeploymentRequest::new(
        config.owner.as_str(),
        config.repo.as_str(),
        config.git_ref.as_str(),
        config.environment.as_str(),
        payload::build_payload(version, custom),
    );

    let github = GitHubClient::new(&config.api_url, config.token.clone())?;
    DeploymentManager::new(github)
        .create_deployment(&request, config.dry_run, config.verbose, out)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DeployError;

    #[test]
    fn test_verbose_flag_counts() {
        let cli = CLI::try_parse_from(["gh-deploy", "-VVV"]).unwrap();
        assert_eq!(cli.verbose, 3);
        let cli = CLI::try_parse_from(["gh-deploy", "-V", "--verbose"]).unwrap();
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_short_flags() {
        let cli = CLI::try_parse_from([
            "gh-deploy",
            "-e",
            "staging",
            "-d",
            "-p",
            r#"{"a":1}"#,
        ])
        .unwrap();
        assert_eq!(cli.environment.as_deref(), Some("staging"));
        assert!(cli.dry_run);
        assert_eq!(cli.payload.as_deref(), Some(r#"{"a":1}"#));
        assert_eq!(cli.verbose, 0);
    }

    #[tokio::test]
    async fn test_deploy_outside_git_checkout() {
        let dir = tempfile::tempdir().unwrap();
        let cli = CLI::try_parse_from(["gh-deploy", "-d"]).unwrap();
        let mut out = Vec::new();
        let err = deploy(&cli, dir.path(), &mut out).await.unwrap_err();
        assert!(matches!(err, DeployError::GitCommand { .. }));
        assert!(out.is_empty());
    }
}
