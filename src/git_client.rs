use std::path::{Path, PathBuf};

use tokio::process::Command;
use tracing::{debug, info};

use crate::error::{DeployError, Result};
use crate::types::RemoteRepo;

pub struct GitClient {
    repo_dir: PathBuf,
}

impl GitClient {
    pub fn new(repo_dir: impl Into<PathBuf>) -> Self {
        Self {
            repo_dir: repo_dir.into(),
        }
    }

    pub fn repo_dir(&self) -> &Path {
        &self.repo_dir
    }

    /// Name of the checked-out branch (`HEAD` when detached).
    pub async fn current_branch(&self) -> Result<String> {
        let branch = self.run(&["rev-parse", "--abbrev-ref", "HEAD"]).await?;
        info!("Current branch is {}", branch);
        Ok(branch)
    }

    pub async fn origin_url(&self) -> Result<String> {
        let url = self.run(&["remote", "get-url", "origin"]).await?;
        info!("Origin remote is {}", url);
        Ok(url)
    }

    async fn run(&self, args: &[&str]) -> Result<String> {
        let command = args.join(" ");
        debug!("Running git {} in {}", command, self.repo_dir.display());

        let output = Command::new("git")
            .args(args)
            .current_dir(&self.repo_dir)
            .output()
            .await
            .map_err(|e| DeployError::GitCommand {
                command: command.clone(),
                message: e.to_string(),
            })?;

        if !output.status.success() {
            return Err(DeployError::GitCommand {
                command,
                message: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

/// Extracts owner and repository name from an HTTPS or SSH remote URL.
///
/// The last two `/`-separated segments are taken as owner and repo. A trailing
/// `.git` is stripped from the repo and, for the scp-like SSH form
/// (`git@host:owner/repo.git`), the owner is whatever follows the last `:`.
pub fn parse_remote_url(url: &str) -> Result<RemoteRepo> {
    let malformed = || DeployError::MalformedRemoteUrl {
        url: url.to_string(),
    };

    let mut segments = url.trim().rsplit('/');
    let base = segments.next().ok_or_else(malformed)?;
    let parent = segments.next().ok_or_else(malformed)?;

    let repo = base.strip_suffix(".git").unwrap_or(base);
    let owner = parent.rsplit(':').next().unwrap_or(parent);

    if owner.is_empty() || repo.is_empty() {
        return Err(malformed());
    }

    Ok(RemoteRepo {
        owner: owner.to_string(),
        repo: repo.to_string(),
    })
}
