//! GitHub-backed file store
//!
//! Reads go to the raw-content host without authentication. Revisions and
//! writes use the REST contents API with the personal access token.

use base64::Engine as _;
use serde::Deserialize;
use serde_json::json;

use super::{validate_path, FileStore, Snapshot};
use crate::config::{Settings, Token};
use crate::error::{DashboardError, DashboardResult};

/// File store talking to github.com (or a compatible host)
pub struct GitHubStore {
    agent: ureq::Agent,
    owner: String,
    repo: String,
    branch: String,
    raw_host: String,
    api_host: String,
    bypass_cache: bool,
    token: Option<Token>,
}

/// Body of a contents-API GET for a file
#[derive(Debug, Deserialize)]
struct ContentsResponse {
    sha: String,
    #[serde(default)]
    content: String,
    #[serde(default)]
    encoding: String,
}

impl ContentsResponse {
    /// Decode the file text. The API wraps base64 at 60 columns.
    fn into_snapshot(self, path: &str) -> DashboardResult<Snapshot> {
        if self.encoding != "base64" {
            return Err(DashboardError::Storage(format!(
                "{} came back with encoding '{}'; files over 1 MB are not supported",
                path, self.encoding
            )));
        }
        let compact: String = self.content.split_whitespace().collect();
        let bytes = base64::engine::general_purpose::STANDARD
            .decode(compact)
            .map_err(|e| DashboardError::Storage(format!("Bad base64 for {}: {}", path, e)))?;
        let content = String::from_utf8(bytes).map_err(|e| {
            DashboardError::Storage(format!("{} is not valid UTF-8: {}", path, e))
        })?;
        Ok(Snapshot {
            content,
            revision: self.sha,
        })
    }
}

impl GitHubStore {
    pub fn new(settings: &Settings, token: Option<Token>) -> Self {
        let agent = ureq::AgentBuilder::new()
            .user_agent(&format!("findash/{}", env!("CARGO_PKG_VERSION")))
            .build();

        Self {
            agent,
            owner: settings.owner.clone(),
            repo: settings.repo.clone(),
            branch: settings.branch.clone(),
            raw_host: settings.raw_host.trim_end_matches('/').to_string(),
            api_host: settings.api_host.trim_end_matches('/').to_string(),
            bypass_cache: settings.bypass_cache,
            token,
        }
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    fn raw_url(&self, path: &str) -> String {
        format!(
            "{}/{}/{}/{}/{}",
            self.raw_host, self.owner, self.repo, self.branch, path
        )
    }

    fn contents_url(&self, path: &str) -> String {
        format!(
            "{}/repos/{}/{}/contents/{}",
            self.api_host, self.owner, self.repo, path
        )
    }

    fn token(&self) -> DashboardResult<&Token> {
        self.token.as_ref().ok_or(DashboardError::MissingToken)
    }

    fn authorized(&self, request: ureq::Request) -> DashboardResult<ureq::Request> {
        let token = self.token()?;
        Ok(request
            .set("Authorization", &format!("token {}", token.expose()))
            .set("Accept", "application/vnd.github+json"))
    }
}

impl FileStore for GitHubStore {
    fn describe(&self) -> String {
        format!("github:{}/{}@{}", self.owner, self.repo, self.branch)
    }

    fn read(&self, path: &str) -> DashboardResult<Option<String>> {
        validate_path(path)?;
        let mut request = self.agent.get(&self.raw_url(path));
        if self.bypass_cache {
            request = request.query("t", &chrono::Utc::now().timestamp_millis().to_string());
        }

        tracing::debug!(path, "raw read");
        match request.call() {
            Ok(response) => response
                .into_string()
                .map(Some)
                .map_err(|e| DashboardError::Network(format!("Failed to read body: {}", e))),
            Err(ureq::Error::Status(404, _)) => {
                tracing::debug!(path, "file not found");
                Ok(None)
            }
            Err(err) => Err(map_error(err)),
        }
    }

    fn read_for_update(&self, path: &str) -> DashboardResult<Option<Snapshot>> {
        validate_path(path)?;
        let request = self
            .authorized(self.agent.get(&self.contents_url(path)))?
            .query("ref", &self.branch);

        tracing::debug!(path, "contents read");
        match request.call() {
            Ok(response) => {
                let contents: ContentsResponse = response.into_json().map_err(|e| {
                    DashboardError::Json(format!("Unexpected contents response: {}", e))
                })?;
                contents.into_snapshot(path).map(Some)
            }
            Err(ureq::Error::Status(404, _)) => Ok(None),
            Err(err) => Err(map_error(err)),
        }
    }

    fn write(
        &self,
        path: &str,
        content: &str,
        message: &str,
        revision: Option<&str>,
    ) -> DashboardResult<()> {
        validate_path(path)?;
        let body = put_body(message, content, &self.branch, revision);
        let request = self.authorized(self.agent.put(&self.contents_url(path)))?;

        tracing::info!(path, message, "committing file");
        request.send_json(body).map_err(map_error)?;
        Ok(())
    }

    fn ensure_writable(&self) -> DashboardResult<()> {
        self.token().map(|_| ())
    }
}

/// JSON body of a contents-API PUT. `sha` is only sent for existing files.
fn put_body(message: &str, content: &str, branch: &str, revision: Option<&str>) -> serde_json::Value {
    let mut body = json!({
        "message": message,
        "content": base64::engine::general_purpose::STANDARD.encode(content.as_bytes()),
        "branch": branch,
    });
    if let Some(sha) = revision {
        body["sha"] = json!(sha);
    }
    body
}

fn map_error(err: ureq::Error) -> DashboardError {
    match err {
        ureq::Error::Status(status, response) => {
            let status_text = response.status_text().to_string();
            let body = response.into_string().unwrap_or_default();
            let message = api_message(&body).unwrap_or(status_text);
            tracing::warn!(status, %message, "request rejected");
            DashboardError::Http { status, message }
        }
        ureq::Error::Transport(transport) => DashboardError::Network(transport.to_string()),
    }
}

/// Extract the `message` field of a GitHub error body
fn api_message(body: &str) -> Option<String> {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()?
        .get("message")?
        .as_str()
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store(token: Option<&str>) -> GitHubStore {
        let settings = Settings {
            owner: "alice".into(),
            repo: "money".into(),
            raw_host: "https://raw.example.com/".into(),
            ..Settings::default()
        };
        GitHubStore::new(&settings, token.map(|t| Token::new(t).unwrap()))
    }

    #[test]
    fn test_urls() {
        let store = store(None);
        assert_eq!(
            store.raw_url("personal/Finances/2025/Plans/Plan_2025_03.md"),
            "https://raw.example.com/alice/money/main/personal/Finances/2025/Plans/Plan_2025_03.md"
        );
        assert_eq!(
            store.contents_url("a/b.md"),
            "https://api.github.com/repos/alice/money/contents/a/b.md"
        );
        assert_eq!(store.describe(), "github:alice/money@main");
    }

    #[test]
    fn test_writes_require_token() {
        let store = store(None);
        assert!(store.ensure_writable().unwrap_err().is_missing_token());
        assert!(store
            .read_for_update("a/b.md")
            .unwrap_err()
            .is_missing_token());
        assert!(store
            .write("a/b.md", "x", "msg", None)
            .unwrap_err()
            .is_missing_token());

        assert!(self::store(Some("ghp_abc")).ensure_writable().is_ok());
    }

    #[test]
    fn test_put_body() {
        let body = put_body("Added income: Зарплата - 1 000 ₽", "hi", "main", None);
        assert_eq!(body["content"], "aGk=");
        assert_eq!(body["branch"], "main");
        assert!(body.get("sha").is_none());

        let body = put_body("m", "hi", "main", Some("abc123"));
        assert_eq!(body["sha"], "abc123");
    }

    #[test]
    fn test_contents_response_decodes_wrapped_base64() {
        // "Транспорт\n" split across lines the way the API returns it
        let response: ContentsResponse = serde_json::from_str(
            r#"{"sha":"abc123","encoding":"base64","content":"0KLRgNCw0L3RgdC/\n0L7RgNGCCg==\n"}"#,
        )
        .unwrap();
        let snapshot = response.into_snapshot("a/b.md").unwrap();
        assert_eq!(snapshot.content, "Транспорт\n");
        assert_eq!(snapshot.revision, "abc123");

        let large: ContentsResponse =
            serde_json::from_str(r#"{"sha":"abc123","encoding":"none","content":""}"#).unwrap();
        assert!(large.into_snapshot("a/b.md").is_err());
    }

    #[test]
    fn test_api_message() {
        assert_eq!(
            api_message(r#"{"message":"sha does not match","documentation_url":"x"}"#).as_deref(),
            Some("sha does not match")
        );
        assert_eq!(api_message("<html>"), None);
    }
}
