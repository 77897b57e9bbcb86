//! Google Sheets API client
//!
//! Reads a whole sheet through the `spreadsheets.values.get` endpoint.
//! Authentication is either a pre-issued OAuth access token or an API key
//! (publicly readable spreadsheets only). No retry.

use std::time::Duration;

use reqwest::Url;
use serde::Deserialize;
use serde_json::Value;

use super::{grid_from_values, FetchError, Grid, SheetSource};

const USER_AGENT: &str = concat!("oac-feed/", env!("CARGO_PKG_VERSION"));
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// 400 message the values endpoint returns when the named tab does not exist
const MISSING_RANGE_MESSAGE: &str = "Unable to parse range";

/// How requests are authorised
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Credentials {
    /// `Authorization: Bearer <token>`
    AccessToken(String),
    /// `?key=<key>` query parameter
    ApiKey(String),
    /// Unauthenticated (test servers, proxies that inject auth)
    Anonymous,
}

impl Credentials {
    /// Prefer an access token over an API key
    pub fn from_options(access_token: Option<String>, api_key: Option<String>) -> Self {
        match (access_token, api_key) {
            (Some(token), _) => Credentials::AccessToken(token),
            (None, Some(key)) => Credentials::ApiKey(key),
            (None, None) => Credentials::Anonymous,
        }
    }

    pub fn describe(&self) -> &'static str {
        match self {
            Credentials::AccessToken(_) => "access token",
            Credentials::ApiKey(_) => "API key",
            Credentials::Anonymous => "anonymous",
        }
    }
}

/// `ValueRange` response body; `values` is absent for an empty sheet
#[derive(Debug, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<Value>>,
}

/// Google Sheets API client
pub struct GoogleSheetsClient {
    http_client: reqwest::Client,
    api_base: Url,
    credentials: Credentials,
}

impl GoogleSheetsClient {
    pub fn new(api_base: &str, credentials: Credentials) -> Result<Self, FetchError> {
        let api_base = Url::parse(api_base)
            .map_err(|e| FetchError::InvalidRequest(format!("{}: {}", api_base, e)))?;
        if api_base.cannot_be_a_base() {
            return Err(FetchError::InvalidRequest(format!(
                "{} cannot be used as a base URL",
                api_base
            )));
        }

        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| FetchError::Network(e.to_string()))?;

        Ok(Self {
            http_client,
            api_base,
            credentials,
        })
    }

    /// `{base}/v4/spreadsheets/{id}/values/{sheet}`, segments percent-encoded
    pub fn values_url(&self, spreadsheet_id: &str, sheet_name: &str) -> Result<Url, FetchError> {
        let mut url = self.api_base.clone();
        url.path_segments_mut()
            .map_err(|_| FetchError::InvalidRequest(self.api_base.to_string()))?
            .pop_if_empty()
            .extend(["v4", "spreadsheets", spreadsheet_id, "values", sheet_name]);

        if let Credentials::ApiKey(key) = &self.credentials {
            url.query_pairs_mut().append_pair("key", key);
        }

        Ok(url)
    }
}

#[async_trait::async_trait]
impl SheetSource for GoogleSheetsClient {
    async fn fetch_sheet(&self, spreadsheet_id: &str, sheet_name: &str) -> Result<Grid, FetchError> {
        let url = self.values_url(spreadsheet_id, sheet_name)?;

        tracing::debug!(
            spreadsheet_id = %spreadsheet_id,
            sheet = %sheet_name,
            "Querying Google Sheets API"
        );

        let mut request = self.http_client.get(url);
        if let Credentials::AccessToken(token) = &self.credentials {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        let status = response.status();

        // 404 is reserved for the spreadsheet; a missing tab is a bad range
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(FetchError::SpreadsheetNotFound(spreadsheet_id.to_string()));
        }

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            if status == reqwest::StatusCode::BAD_REQUEST && error_text.contains(MISSING_RANGE_MESSAGE) {
                return Err(FetchError::SheetNotFound {
                    spreadsheet_id: spreadsheet_id.to_string(),
                    sheet: sheet_name.to_string(),
                });
            }
            return Err(FetchError::Api(status.as_u16(), error_text));
        }

        let body: ValueRange = response
            .json()
            .await
            .map_err(|e| FetchError::Parse(e.to_string()))?;

        Ok(grid_from_values(&body.values))
    }
}
