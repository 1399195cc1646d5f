//! Blocking client for the FogBugz JSON API.
//!
//! The sync core talks to the tracker through the `RemoteTracker` trait;
//! this is the production implementation. One command endpoint
//! (`/f/api/json`) carries everything: `cmd=search` for lookups, `cmd=new`
//! and `cmd=edit` for writes (attachments ride along as `File1..Filen`
//! multipart parts), `cmd=listProjects` for installation.

use crate::attachment::AttachmentUpload;
use crate::case::{CaseFields, RemoteCase};
use crate::error::{Result, SyncError};
use crate::remote::{Project, RemoteTracker};
use serde::Deserialize;

/// Exactly the case columns the sync engine consumes downstream.
const SEARCH_COLS: &str = "sTitle,sLatestTextSummary,sStatus,ixBugParent,tags,events";

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct ApiEnvelope {
    #[serde(default)]
    data: Option<ApiData>,
    #[serde(default)]
    errors: Vec<ApiError>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    message: String,
}

#[derive(Debug, Default, Deserialize)]
struct ApiData {
    #[serde(default)]
    cases: Vec<WireCase>,
    #[serde(rename = "case", default)]
    single_case: Option<WireCase>,
    #[serde(default)]
    projects: Vec<WireProject>,
}

#[derive(Debug, Deserialize)]
struct WireCase {
    #[serde(rename = "ixBug")]
    id: u64,
    #[serde(rename = "sTitle", default)]
    title: String,
    #[serde(rename = "sLatestTextSummary", default)]
    latest_text: Option<String>,
    #[serde(rename = "sStatus", default)]
    status: String,
    #[serde(rename = "ixBugParent", default)]
    parent_id: Option<u64>,
    #[serde(default)]
    tags: Vec<String>,
    #[serde(default)]
    events: Vec<WireEvent>,
}

#[derive(Debug, Deserialize)]
struct WireEvent {
    #[serde(rename = "rgAttachments", default)]
    attachments: Vec<WireAttachment>,
}

#[derive(Debug, Deserialize)]
struct WireAttachment {
    #[serde(rename = "sFileName")]
    file_name: String,
}

#[derive(Debug, Deserialize)]
struct WireProject {
    #[serde(rename = "ixProject")]
    id: u64,
    #[serde(rename = "sProject")]
    name: String,
}

impl From<WireCase> for RemoteCase {
    fn from(wire: WireCase) -> Self {
        let attachments = wire
            .events
            .iter()
            .flat_map(|e| e.attachments.iter().map(|a| a.file_name.clone()))
            .collect();
        RemoteCase {
            id: wire.id,
            title: wire.title,
            latest_text: wire.latest_text,
            status: wire.status,
            // FogBugz reports "no parent" as ixBugParent=0.
            parent_id: wire.parent_id.filter(|&p| p != 0),
            tags: wire.tags,
            attachments,
        }
    }
}

// ---------------------------------------------------------------------------
// FogBugzClient
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub struct FogBugzClient {
    base_url: String,
    token: String,
    http: reqwest::blocking::Client,
}

impl FogBugzClient {
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: token.into(),
            http: reqwest::blocking::Client::new(),
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/f/api/json", self.base_url)
    }

    fn parse(&self, envelope: ApiEnvelope) -> Result<ApiData> {
        if !envelope.errors.is_empty() {
            let messages: Vec<_> = envelope.errors.into_iter().map(|e| e.message).collect();
            return Err(SyncError::RemoteApi(messages.join("; ")));
        }
        Ok(envelope.data.unwrap_or_default())
    }

    /// Issue a `cmd=new` or `cmd=edit` command with the given field payload
    /// and attachment parts.
    fn command(
        &self,
        cmd: &str,
        fields: &CaseFields,
        attachments: &[AttachmentUpload],
    ) -> Result<RemoteCase> {
        let mut form = reqwest::blocking::multipart::Form::new()
            .text("cmd", cmd.to_string())
            .text("token", self.token.clone())
            .text("ixProject", fields.project_id.to_string());
        if let Some(title) = &fields.title {
            form = form.text("sTitle", title.clone());
        }
        if let Some(body) = &fields.body {
            form = form.text("sEvent", body.clone());
        }
        // Always sent, even when empty, so tag removal reaches the tracker.
        form = form.text("sTags", fields.tags.join(","));
        if let Some(parent_id) = fields.parent_id {
            form = form.text("ixBugParent", parent_id.to_string());
        }
        if let Some(case_id) = fields.case_id {
            form = form.text("ixBug", case_id.to_string());
        }
        for (i, upload) in attachments.iter().enumerate() {
            let part = reqwest::blocking::multipart::Part::bytes(upload.content.clone())
                .file_name(upload.file_name.clone());
            form = form.part(format!("File{}", i + 1), part);
        }
        if !attachments.is_empty() {
            form = form.text("nFileCount", attachments.len().to_string());
        }

        let envelope: ApiEnvelope = self
            .http
            .post(self.endpoint())
            .multipart(form)
            .send()?
            .error_for_status()?
            .json()?;
        let data = self.parse(envelope)?;
        data.single_case
            .map(RemoteCase::from)
            .ok_or_else(|| SyncError::RemoteApi(format!("no case in {cmd} response")))
    }
}

impl RemoteTracker for FogBugzClient {
    fn search_case(&self, case_id: u64) -> Result<Option<RemoteCase>> {
        let query = format!("case:{case_id}");
        let envelope: ApiEnvelope = self
            .http
            .get(self.endpoint())
            .query(&[
                ("cmd", "search"),
                ("token", self.token.as_str()),
                ("q", query.as_str()),
                ("cols", SEARCH_COLS),
            ])
            .send()?
            .error_for_status()?
            .json()?;
        let data = self.parse(envelope)?;
        Ok(data.cases.into_iter().next().map(RemoteCase::from))
    }

    fn create_case(
        &self,
        fields: &CaseFields,
        attachments: &[AttachmentUpload],
    ) -> Result<RemoteCase> {
        self.command("new", fields, attachments)
    }

    fn update_case(
        &self,
        fields: &CaseFields,
        attachments: &[AttachmentUpload],
    ) -> Result<RemoteCase> {
        self.command("edit", fields, attachments)
    }

    fn list_projects(&self) -> Result<Vec<Project>> {
        let envelope: ApiEnvelope = self
            .http
            .get(self.endpoint())
            .query(&[("cmd", "listProjects"), ("token", self.token.as_str())])
            .send()?
            .error_for_status()?
            .json()?;
        let data = self.parse(envelope)?;
        Ok(data
            .projects
            .into_iter()
            .map(|p| Project {
                id: p.id,
                name: p.name,
            })
            .collect())
    }

    fn case_url(&self, case_id: u64) -> String {
        format!("{}/f/cases/{case_id}", self.base_url)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    fn search_matcher(case_id: u64) -> Matcher {
        Matcher::AllOf(vec![
            Matcher::UrlEncoded("cmd".into(), "search".into()),
            Matcher::UrlEncoded("q".into(), format!("case:{case_id}")),
            Matcher::UrlEncoded("cols".into(), SEARCH_COLS.into()),
        ])
    }

    #[test]
    fn search_parses_case_fields_and_attachment_history() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("GET", "/f/api/json")
            .match_query(search_matcher(42))
            .with_body(
                serde_json::json!({
                    "data": { "cases": [{
                        "ixBug": 42,
                        "sTitle": "Login flow",
                        "sLatestTextSummary": "Allow users to log in.",
                        "sStatus": "Active",
                        "ixBugParent": 0,
                        "tags": ["auth"],
                        "events": [
                            { "rgAttachments": [{ "sFileName": "a.png" }] },
                            { "rgAttachments": [{ "sFileName": "b.png" }] }
                        ]
                    }] },
                    "errors": []
                })
                .to_string(),
            )
            .create();

        let client = FogBugzClient::new(server.url(), "secret");
        let case = client.search_case(42).unwrap().unwrap();
        assert_eq!(case.id, 42);
        assert_eq!(case.title, "Login flow");
        assert_eq!(case.status, "Active");
        assert_eq!(case.parent_id, None);
        assert_eq!(case.attachments, vec!["a.png", "b.png"]);
        mock.assert();
    }

    #[test]
    fn search_miss_is_none() {
        let mut server = mockito::Server::new();
        server
            .mock("GET", "/f/api/json")
            .match_query(search_matcher(999))
            .with_body(r#"{"data":{"cases":[]},"errors":[]}"#)
            .create();

        let client = FogBugzClient::new(server.url(), "secret");
        assert!(client.search_case(999).unwrap().is_none());
    }

    #[test]
    fn api_errors_surface_as_remote_api() {
        let mut server = mockito::Server::new();
        server
            .mock("GET", "/f/api/json")
            .match_query(Matcher::Any)
            .with_body(r#"{"errors":[{"message":"Not logged in","code":"3"}]}"#)
            .create();

        let client = FogBugzClient::new(server.url(), "expired");
        let err = client.search_case(1).unwrap_err();
        assert!(matches!(err, SyncError::RemoteApi(ref m) if m.contains("Not logged in")));
    }

    #[test]
    fn create_returns_authoritative_case() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("POST", "/f/api/json")
            .with_body(
                serde_json::json!({
                    "data": { "case": {
                        "ixBug": 77,
                        "sTitle": "Login flow",
                        "sStatus": "Active"
                    } },
                    "errors": []
                })
                .to_string(),
            )
            .create();

        let client = FogBugzClient::new(server.url(), "secret");
        let fields = CaseFields {
            title: Some("Login flow".to_string()),
            body: Some("Allow users to log in.".to_string()),
            tags: vec!["auth".to_string()],
            project_id: 7,
            parent_id: None,
            case_id: None,
        };
        let uploads = vec![AttachmentUpload {
            file_name: "a.png".to_string(),
            content: vec![1, 2, 3],
        }];
        let case = client.create_case(&fields, &uploads).unwrap();
        assert_eq!(case.id, 77);
        assert!(case.attachments.is_empty());
        mock.assert();
    }

    #[test]
    fn edit_sends_tags_field_even_when_cleared() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("POST", "/f/api/json")
            .match_body(Matcher::Regex(r#"name="sTags""#.to_string()))
            .with_body(
                serde_json::json!({
                    "data": { "case": { "ixBug": 42, "sTitle": "Login flow", "sStatus": "Active" } },
                    "errors": []
                })
                .to_string(),
            )
            .create();

        let client = FogBugzClient::new(server.url(), "secret");
        let fields = CaseFields {
            title: None,
            body: None,
            tags: Vec::new(),
            project_id: 7,
            parent_id: None,
            case_id: Some(42),
        };
        client.update_case(&fields, &[]).unwrap();
        mock.assert();
    }

    #[test]
    fn list_projects_maps_wire_names() {
        let mut server = mockito::Server::new();
        server
            .mock("GET", "/f/api/json")
            .match_query(Matcher::UrlEncoded("cmd".into(), "listProjects".into()))
            .with_body(
                serde_json::json!({
                    "data": { "projects": [
                        { "ixProject": 1, "sProject": "Inbox" },
                        { "ixProject": 7, "sProject": "Product" }
                    ] },
                    "errors": []
                })
                .to_string(),
            )
            .create();

        let client = FogBugzClient::new(server.url(), "secret");
        let projects = client.list_projects().unwrap();
        assert_eq!(projects.len(), 2);
        assert_eq!(projects[1].name, "Product");
    }

    #[test]
    fn case_url_points_at_case_page() {
        let client = FogBugzClient::new("https://bigco.fogbugz.test", "secret");
        assert_eq!(
            client.case_url(42),
            "https://bigco.fogbugz.test/f/cases/42"
        );
    }
}
