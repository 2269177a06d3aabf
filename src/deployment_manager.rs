use std::io::Write;

use tracing::info;

use crate::error::Result;
use crate::github_client::GitHubClient;
use crate::output;
use crate::types::DeploymentRequest;

pub struct DeploymentManager {
    github: GitHubClient,
}

impl DeploymentManager {
    pub fn new(github: GitHubClient) -> Self {
        Self { github }
    }

    /// Prints the request in dry-run mode, otherwise sends it and prints the
    /// created deployment at the requested verbosity.
    pub async fn create_deployment(
        &self,
        request: &DeploymentRequest,
        dry_run: bool,
        verbosity: u8,
        out: &mut dyn Write,
    ) -> Result<()> {
        if verbosity > 0 {
            output::render_summary(request, out)?;
        }

        if dry_run {
            info!("Dry run, no request sent");
            return output::render_dry_run(request, out);
        }

        info!(
            "Creating deployment of {} to {} for {}/{}",
            request.git_ref, request.environment, request.owner, request.repo
        );
        let response = self.github.create_deployment(request).await?;
        info!("GitHub accepted the deployment with status {}", response.status);

        output::render_response(verbosity, &response, out)
    }
}
