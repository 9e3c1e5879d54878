//! Sheets/Drive HTTP client.
//!
//! Async reqwest client covering the three operations the writer
//! needs: find a spreadsheet by display name (a Drive title query,
//! since the Sheets API itself only speaks IDs), list worksheet
//! titles, and overwrite one cell.

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;
use tracing::debug;

use crate::auth::{self, AccessToken, ServiceAccountKey};
use crate::cell::CellRef;
use crate::error::SheetError;

const SHEETS_API_BASE: &str = "https://sheets.googleapis.com/v4/spreadsheets";
const DRIVE_API_BASE: &str = "https://www.googleapis.com/drive/v3/files";
const HTTP_TIMEOUT: Duration = Duration::from_secs(60);

/// The spreadsheet operations the writer depends on.
///
/// Kept as a trait so the write orchestration can be exercised against
/// a scripted implementation without network access.
#[async_trait]
pub trait SheetsApi: Send + Sync {
    /// Resolves a spreadsheet display name to its ID. `Ok(None)` means
    /// no spreadsheet by that name exists.
    async fn spreadsheet_id_by_name(&self, name: &str) -> Result<Option<String>, SheetError>;

    /// Whether the spreadsheet contains a worksheet with this title.
    async fn worksheet_exists(&self, spreadsheet_id: &str, title: &str)
    -> Result<bool, SheetError>;

    /// Overwrites exactly one cell of one worksheet with `value`.
    async fn write_cell(
        &self,
        spreadsheet_id: &str,
        worksheet: &str,
        cell: &CellRef,
        value: &str,
    ) -> Result<(), SheetError>;
}

/// Live implementation against the Google APIs.
pub struct SheetsClient {
    http: reqwest::Client,
    token: AccessToken,
}

impl SheetsClient {
    /// Authenticates with the key file at `credential_path` and returns
    /// a ready client.
    pub async fn connect(credential_path: &Path) -> Result<Self, SheetError> {
        let key = ServiceAccountKey::from_file(credential_path)?;

        let http = reqwest::Client::builder()
            .user_agent(format!("opskit/{}", env!("CARGO_PKG_VERSION")))
            .timeout(HTTP_TIMEOUT)
            .build()
            .map_err(|e| SheetError::Network(format!("failed to build HTTP client: {e}")))?;

        let token = auth::fetch_token(&http, &key).await?;
        Ok(Self { http, token })
    }

    async fn get_json(&self, url: reqwest::Url) -> Result<serde_json::Value, SheetError> {
        let response = self
            .http
            .get(url)
            .bearer_auth(&self.token.token)
            .send()
            .await
            .map_err(|e| SheetError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(status_error(status.as_u16(), &body));
        }

        response
            .json()
            .await
            .map_err(|e| SheetError::Parse(e.to_string()))
    }
}

#[async_trait]
impl SheetsApi for SheetsClient {
    async fn spreadsheet_id_by_name(&self, name: &str) -> Result<Option<String>, SheetError> {
        // Drive title query, the same route gspread's open-by-name takes.
        let escaped = name.replace('\\', "\\\\").replace('\'', "\\'");
        let query = format!(
            "name = '{escaped}' and mimeType = 'application/vnd.google-apps.spreadsheet' \
             and trashed = false"
        );

        let mut url = parse_base(DRIVE_API_BASE)?;
        url.query_pairs_mut()
            .append_pair("q", &query)
            .append_pair("fields", "files(id,name)")
            .append_pair("pageSize", "5");

        let body = self.get_json(url).await?;
        let id = body["files"]
            .as_array()
            .and_then(|files| files.first())
            .and_then(|file| file["id"].as_str())
            .map(String::from);

        debug!(name, found = id.is_some(), "spreadsheet lookup");
        Ok(id)
    }

    async fn worksheet_exists(
        &self,
        spreadsheet_id: &str,
        title: &str,
    ) -> Result<bool, SheetError> {
        let mut url = parse_base(SHEETS_API_BASE)?;
        url.path_segments_mut()
            .map_err(|_| SheetError::Parse("API base URL is not a base".to_string()))?
            .push(spreadsheet_id);
        url.query_pairs_mut()
            .append_pair("fields", "sheets.properties.title");

        let body = self.get_json(url).await?;
        let exists = body["sheets"]
            .as_array()
            .map(|sheets| {
                sheets
                    .iter()
                    .any(|sheet| sheet["properties"]["title"].as_str() == Some(title))
            })
            .unwrap_or(false);

        Ok(exists)
    }

    async fn write_cell(
        &self,
        spreadsheet_id: &str,
        worksheet: &str,
        cell: &CellRef,
        value: &str,
    ) -> Result<(), SheetError> {
        let range = format!("{worksheet}!{cell}");

        let mut url = parse_base(SHEETS_API_BASE)?;
        url.path_segments_mut()
            .map_err(|_| SheetError::Parse("API base URL is not a base".to_string()))?
            .push(spreadsheet_id)
            .push("values")
            .push(&range);
        url.query_pairs_mut()
            .append_pair("valueInputOption", "RAW");

        let payload = json!({
            "range": range,
            "majorDimension": "ROWS",
            "values": [[value]],
        });

        let response = self
            .http
            .put(url)
            .bearer_auth(&self.token.token)
            .json(&payload)
            .send()
            .await
            .map_err(|e| SheetError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SheetError::WriteFailed(format!(
                "HTTP {}: {}",
                status.as_u16(),
                body.trim()
            )));
        }

        debug!(range, "cell written");
        Ok(())
    }
}

fn parse_base(base: &str) -> Result<reqwest::Url, SheetError> {
    reqwest::Url::parse(base).map_err(|e| SheetError::Parse(format!("API base URL: {e}")))
}

fn status_error(status: u16, body: &str) -> SheetError {
    match status {
        401 | 403 => SheetError::Credential(format!(
            "API rejected the token (HTTP {status}): {}",
            body.trim()
        )),
        _ => SheetError::Http(status, body.trim().to_string()),
    }
}
