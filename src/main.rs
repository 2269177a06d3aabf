use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    gh_deploy::run().await
}
