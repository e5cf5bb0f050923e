//! CloudStack query-API client
//!
//! Every call is a signed GET against the API endpoint: the parameters plus
//! the API key are sorted case-insensitively, URL-encoded, lowercased,
//! HMAC-SHA1-signed with the secret key, and the base64 digest is appended
//! as the `signature` parameter. Responses come wrapped in a
//! `<command>response` envelope which is unwrapped here, so callers only
//! ever see typed records.

use crate::error::{CloudStackError, Result};
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use hmac::{Hmac, Mac};
use serde::de::DeserializeOwned;
use serde_json::Value;
use sha1::Sha1;

type HmacSha1 = Hmac<Sha1>;

pub struct CloudStackClient {
    http: reqwest::Client,
    api_url: String,
    api_key: String,
    secret_key: String,
}

impl CloudStackClient {
    pub fn new(
        api_url: impl Into<String>,
        api_key: impl Into<String>,
        secret_key: impl Into<String>,
    ) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_url: api_url.into(),
            api_key: api_key.into(),
            secret_key: secret_key.into(),
        }
    }

    pub fn from_settings(settings: &stackpilot_core::Settings) -> Self {
        Self::new(&settings.api_url, &settings.api_key, &settings.secret_key)
    }

    /// Sign a parameter set per the CloudStack query-API scheme.
    pub(crate) fn sign(&self, params: &[(String, String)]) -> String {
        let canonical = canonical_query(params);
        let mut mac = HmacSha1::new_from_slice(self.secret_key.as_bytes())
            .expect("HMAC accepts any key size");
        mac.update(canonical.as_bytes());
        BASE64.encode(mac.finalize().into_bytes())
    }

    /// Issue one API command and return its unwrapped response envelope.
    pub(crate) async fn call(&self, command: &str, params: &[(&str, String)]) -> Result<Value> {
        let mut query: Vec<(String, String)> = vec![
            ("command".to_string(), command.to_string()),
            ("response".to_string(), "json".to_string()),
            ("apikey".to_string(), self.api_key.clone()),
        ];
        query.extend(params.iter().map(|(k, v)| (k.to_string(), v.clone())));
        let signature = self.sign(&query);
        query.push(("signature".to_string(), signature));

        tracing::debug!(command, "calling cloudstack api");
        let response = self.http.get(&self.api_url).query(&query).send().await?;
        let status = response.status();
        let body: Value = response.json().await?;

        let envelope = unwrap_envelope(&body, command)?;

        if let Some(text) = envelope.get("errortext").and_then(Value::as_str) {
            let code = envelope
                .get("errorcode")
                .and_then(Value::as_u64)
                .unwrap_or_else(|| status.as_u16() as u64);
            return Err(CloudStackError::Api {
                code,
                message: text.to_string(),
            });
        }
        if !status.is_success() {
            return Err(CloudStackError::Api {
                code: status.as_u16() as u64,
                message: format!("HTTP {} from {}", status, command),
            });
        }

        Ok(envelope)
    }

    /// Issue a list command, parsing the records under `list_key`.
    pub(crate) async fn list<T: DeserializeOwned>(
        &self,
        command: &str,
        list_key: &str,
        params: &[(&str, String)],
    ) -> Result<Vec<T>> {
        let envelope = self.call(command, params).await?;
        extract_list(&envelope, list_key)
    }
}

impl std::fmt::Debug for CloudStackClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // keys stay out of logs
        f.debug_struct("CloudStackClient")
            .field("api_url", &self.api_url)
            .finish_non_exhaustive()
    }
}

/// Canonical string for signing: keys sorted case-insensitively, values
/// URL-encoded, the whole thing lowercased.
fn canonical_query(params: &[(String, String)]) -> String {
    let mut sorted: Vec<_> = params.iter().collect();
    sorted.sort_by_key(|(k, _)| k.to_lowercase());
    sorted
        .iter()
        .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)).to_lowercase())
        .collect::<Vec<_>>()
        .join("&")
}

/// Pull the `<command>response` envelope out of a response body.
///
/// API-level failures can arrive under a generic `errorresponse` key
/// instead of the command's own envelope.
fn unwrap_envelope(body: &Value, command: &str) -> Result<Value> {
    let envelope_key = format!("{}response", command.to_lowercase());
    body.get(&envelope_key)
        .or_else(|| body.get("errorresponse"))
        .cloned()
        .ok_or_else(|| {
            CloudStackError::UnexpectedResponse(format!("missing {} envelope", envelope_key))
        })
}

/// Parse the record array under `list_key`. CloudStack omits the key
/// entirely when a listing is empty.
fn extract_list<T: DeserializeOwned>(envelope: &Value, list_key: &str) -> Result<Vec<T>> {
    match envelope.get(list_key) {
        None => Ok(Vec::new()),
        Some(records) => Ok(serde_json::from_value(records.clone())?),
    }
}
