use std::path::Path;

use reqwest::blocking::{multipart, Client};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE, ORIGIN, REFERER, USER_AGENT};
use reqwest::StatusCode;
use serde_json::Value;
use tracing::debug;

use crate::{
    auth::{decode_identity, Identity},
    claim::ClaimPayload,
    config::ApiConfig,
    error::{ClaimError, Result},
};

const RECEIPT_PATH: &str = "/Claim/api/1.0/Claim/Receipt";
const CLAIM_PATH: &str = "/Claim/api/1.0/claim/claim";

/// The two calls the claim pipeline makes against the provider
#[cfg_attr(test, mockall::automock)]
pub trait ClaimsApi {
    /// Upload a receipt file for extraction, returning the decoded response body
    fn upload_receipt(&self, path: &Path) -> Result<Value>;

    /// Submit a built claim, returning the decoded response body
    fn submit_claim(&self, payload: &ClaimPayload) -> Result<Value>;
}

/// Authenticated client for the Edenred benefits API.
/// Built once per process; read-only afterwards.
pub struct EdenredClient {
    client: Client,
    base_url: String,
    headers: HeaderMap,
    identity: Identity,
}

impl EdenredClient {
    /// Decode the token and prepare the fixed header set.
    /// Fails with `InvalidCredential` if the token can't be decoded, and with
    /// `Config` if a configured header value isn't valid.
    pub fn new(token: &str, api: &ApiConfig) -> Result<Self> {
        let token = token.trim();
        let identity = decode_identity(token)?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        let bearer = HeaderValue::from_str(&format!("Bearer {}", token))
            .map_err(|e| ClaimError::InvalidCredential(format!("token not usable as a header: {}", e)))?;
        headers.insert(AUTHORIZATION, bearer);
        headers.insert(ORIGIN, config_header("api.origin", &api.origin)?);
        headers.insert(REFERER, config_header("api.origin", &api.referer())?);
        headers.insert(USER_AGENT, config_header("api.user_agent", &api.user_agent)?);

        let client = Client::builder().build()?;

        debug!(
            "Decoded identity for member {} (company {})",
            identity.member_id, identity.company_id
        );

        Ok(Self {
            client,
            base_url: api.base_url.trim_end_matches('/').to_string(),
            headers,
            identity,
        })
    }

    pub fn identity(&self) -> &Identity {
        &self.identity
    }
}

impl ClaimsApi for EdenredClient {
    fn upload_receipt(&self, path: &Path) -> Result<Value> {
        let url = format!("{}{}", self.base_url, RECEIPT_PATH);
        let bytes = std::fs::read(path)?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let mime = content_type_for(path);

        debug!("Uploading {} ({} bytes, {})", path.display(), bytes.len(), mime);

        let part = multipart::Part::bytes(bytes)
            .file_name(file_name)
            .mime_str(mime)?;
        let form = multipart::Form::new().part("file", part);

        // reqwest sets the multipart Content-Type with its boundary
        let response = self
            .client
            .post(&url)
            .headers(self.headers.clone())
            .multipart(form)
            .send()?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(ClaimError::UploadFailed(status.as_u16()));
        }

        Ok(response.json()?)
    }

    fn submit_claim(&self, payload: &ClaimPayload) -> Result<Value> {
        let url = format!("{}{}", self.base_url, CLAIM_PATH);

        let mut headers = self.headers.clone();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let response = self
            .client
            .post(&url)
            .headers(headers)
            .json(payload)
            .send()?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(ClaimError::SubmitFailed(status.as_u16()));
        }

        Ok(response.json()?)
    }
}

/// Content type for an upload, inferred from the file extension.
/// Unknown extensions are sent as JPEG.
pub fn content_type_for(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "pdf" => "application/pdf",
        _ => "image/jpeg",
    }
}

fn config_header(key: &str, value: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(value)
        .map_err(|e| ClaimError::Config(format!("{} not usable as a header: {}", key, e)))
}
