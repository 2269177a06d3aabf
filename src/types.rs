use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteRepo {
    pub owner: String,
    pub repo: String,
}

/// Body of `POST /repos/{owner}/{repo}/deployments`.
#[derive(Debug, Clone, Serialize)]
pub struct DeploymentRequest {
    pub owner: String,
    pub repo: String,
    #[serde(rename = "ref")]
    pub git_ref: String,
    pub auto_merge: bool,
    pub required_contexts: Vec<String>,
    pub environment: String,
    pub description: String,
    pub payload: Map<String, Value>,
}

impl DeploymentRequest {
    pub fn new(
        owner: impl Into<String>,
        repo: impl Into<String>,
        git_ref: impl Into<String>,
        environment: impl Into<String>,
        payload: Map<String, Value>,
    ) -> Self {
        let git_ref = git_ref.into();
        let environment = environment.into();
        Self {
            owner: owner.into(),
            repo: repo.into(),
            description: format!("Deploy request for ref:{} on {}", git_ref, environment),
            git_ref,
            auto_merge: false,
            required_contexts: Vec::new(),
            environment,
            payload,
        }
    }

    pub fn endpoint(&self) -> String {
        format!("/repos/{}/{}/deployments", self.owner, self.repo)
    }
}

/// Parameter summary shown before the request at verbosity 1 and above.
#[derive(Debug, Serialize)]
pub struct DeploymentSummary<'a> {
    pub owner: &'a str,
    pub repo: &'a str,
    #[serde(rename = "ref")]
    pub git_ref: &'a str,
    pub environment: &'a str,
    pub payload: &'a Map<String, Value>,
}

impl<'a> From<&'a DeploymentRequest> for DeploymentSummary<'a> {
    fn from(request: &'a DeploymentRequest) -> Self {
        Self {
            owner: &request.owner,
            repo: &request.repo,
            git_ref: &request.git_ref,
            environment: &request.environment,
            payload: &request.payload,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Creator {
    pub login: String,
}

/// The fields of a created deployment that the output formats read.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Deployment {
    pub id: u64,
    pub url: String,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub environment: Option<String>,
    #[serde(rename = "ref", default)]
    pub git_ref: Option<String>,
    #[serde(default)]
    pub sha: Option<String>,
    #[serde(default)]
    pub creator: Option<Creator>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub payload: Option<Value>,
}

/// Full HTTP response of the create call, kept verbatim for `-VVV`.
#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse {
    pub status: u16,
    pub url: String,
    pub headers: BTreeMap<String, String>,
    pub data: Value,
}

impl ApiResponse {
    pub fn deployment(&self) -> Result<Deployment, serde_json::Error> {
        Deployment::deserialize(&self.data)
    }
}
