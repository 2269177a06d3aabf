//! Console rendering for dry runs and created deployments.
//!
//! Verbosity selects one of four fixed response formats; levels above the
//! last one reuse it.

use std::io::Write;

use serde::Serialize;
use serde_json::json;

use crate::error::Result;
use crate::types::{ApiResponse, DeploymentRequest, DeploymentSummary};

const CREATED: &str = "✅ Deployment created";

type Renderer = fn(&ApiResponse, &mut dyn Write) -> Result<()>;

const RENDERERS: [Renderer; 4] = [render_brief, render_basic, render_detailed, render_raw];

pub fn render_response(verbosity: u8, response: &ApiResponse, out: &mut dyn Write) -> Result<()> {
    let level = usize::from(verbosity).min(RENDERERS.len() - 1);
    RENDERERS[level](response, out)
}

pub fn render_summary(request: &DeploymentRequest, out: &mut dyn Write) -> Result<()> {
    write_json(&DeploymentSummary::from(request), out)
}

pub fn render_dry_run(request: &DeploymentRequest, out: &mut dyn Write) -> Result<()> {
    writeln!(out)?;
    writeln!(out, "🏃 DRY RUN MODE - No API request will be made")?;
    writeln!(out)?;
    writeln!(out, "Request that would be sent:")?;
    write_json(request, out)?;
    writeln!(out)?;
    writeln!(out, "API endpoint:")?;
    writeln!(out, "POST {}", request.endpoint())?;
    Ok(())
}

fn render_brief(response: &ApiResponse, out: &mut dyn Write) -> Result<()> {
    let deployment = response.deployment()?;
    writeln!(out, "{}: {}", CREATED, deployment.id)?;
    writeln!(out, "URL: {}", deployment.url)?;
    Ok(())
}

fn render_basic(response: &ApiResponse, out: &mut dyn Write) -> Result<()> {
    let deployment = response.deployment()?;
    writeln!(out, "{}", CREATED)?;
    writeln!(out, "ID: {}", deployment.id)?;
    writeln!(out, "URL: {}", deployment.url)?;
    writeln!(out, "State: {}", deployment.state.as_deref().unwrap_or("-"))?;
    writeln!(
        out,
        "Created at: {}",
        deployment.created_at.as_deref().unwrap_or("-")
    )?;
    Ok(())
}

fn render_detailed(response: &ApiResponse, out: &mut dyn Write) -> Result<()> {
    let deployment = response.deployment()?;
    writeln!(out, "{}", CREATED)?;
    write_json(
        &json!({
            "id": deployment.id,
            "url": deployment.url,
            "state": deployment.state,
            "environment": deployment.environment,
            "ref": deployment.git_ref,
            "sha": deployment.sha,
            "creator": deployment.creator.map(|c| c.login),
            "created_at": deployment.created_at,
            "updated_at": deployment.updated_at,
            "payload": deployment.payload,
        }),
        out,
    )
}

fn render_raw(response: &ApiResponse, out: &mut dyn Write) -> Result<()> {
    writeln!(out, "{}", CREATED)?;
    write_json(response, out)
}

fn write_json<T: Serialize + ?Sized>(value: &T, out: &mut dyn Write) -> Result<()> {
    writeln!(out, "{}", serde_json::to_string_pretty(value)?)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Map, Value};
    use std::collections::BTreeMap;

    fn response() -> ApiResponse {
        ApiResponse {
            status: 201,
            url: "https://api.github.com/repos/octo/app/deployments".into(),
            headers: BTreeMap::from([("x-github-request-id".to_string(), "ABCD".to_string())]),
            data: json!({
                "id": 1337,
                "url": "https://api.github.com/repos/octo/app/deployments/1337",
                "sha": "a84d88e7554fc1fa21bcbc4efae3c782a70d2b9d",
                "ref": "main",
                "environment": "production",
                "creator": { "login": "octocat" },
                "created_at": "2024-01-01T00:00:00Z",
                "updated_at": "2024-01-01T00:00:00Z",
                "payload": { "version": "1.0.0" },
                "node_id": "MDEwOkRlcGxveW1lbnQx"
            }),
        }
    }

    fn rendered(verbosity: u8) -> String {
        let mut out = Vec::new();
        render_response(verbosity, &response(), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_level_zero_prints_id_and_url_only() {
        assert_eq!(
            rendered(0),
            "✅ Deployment created: 1337\n\
             URL: https://api.github.com/repos/octo/app/deployments/1337\n"
        );
    }

    #[test]
    fn test_level_one_prints_basic_fields() {
        let text = rendered(1);
        assert!(text.contains("ID: 1337\n"));
        assert!(text.contains("State: -\n"));
        assert!(text.contains("Created at: 2024-01-01T00:00:00Z\n"));
    }

    #[test]
    fn test_level_two_prints_structured_subset() {
        let text = rendered(2);
        let body = text.strip_prefix("✅ Deployment created\n").unwrap();
        let json: Value = serde_json::from_str(body).unwrap();
        assert_eq!(json["creator"], "octocat");
        assert_eq!(json["payload"]["version"], "1.0.0");
        assert!(json.get("node_id").is_none());
    }

    #[test]
    fn test_high_levels_print_raw_response() {
        for verbosity in [3, 7] {
            let text = rendered(verbosity);
            let body = text.strip_prefix("✅ Deployment created\n").unwrap();
            let json: Value = serde_json::from_str(body).unwrap();
            assert_eq!(json["status"], 201);
            assert_eq!(json["headers"]["x-github-request-id"], "ABCD");
            assert_eq!(json["data"]["node_id"], "MDEwOkRlcGxveW1lbnQx");
        }
    }

    #[test]
    fn test_dry_run_shows_request_and_endpoint() {
        let request = DeploymentRequest::new("octo", "app", "main", "production", Map::new());
        let mut out = Vec::new();
        render_dry_run(&request, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("🏃 DRY RUN MODE"));
        assert!(text.contains("\"description\": \"Deploy request for ref:main on production\""));
        assert!(text.ends_with("API endpoint:\nPOST /repos/octo/app/deployments\n"));
    }
}
