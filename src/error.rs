use thiserror::Error;

pub type Result<T> = std::result::Result<T, DeployError>;

#[derive(Debug, Error)]
pub enum DeployError {
    /// A git subprocess could not be spawned or exited non-zero.
    #[error("`git {command}` failed: {message}")]
    GitCommand { command: String, message: String },

    #[error("Cannot determine owner/repo from remote URL '{url}'")]
    MalformedRemoteUrl { url: String },

    #[error("Error parsing custom payload JSON: {0}")]
    InvalidPayloadJson(String),

    #[error("Failed to read manifest {path}: {source}")]
    Manifest {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("GitHub request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("GitHub API returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl DeployError {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> u8 {
        1
    }
}
