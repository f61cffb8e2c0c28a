//! Wikibase Action API client
//!
//! Claims read (`wbgetclaims`), guarded claim overwrite
//! (`wbsetclaimvalue` behind a re-read-and-compare), and report page
//! read/write (`action=query` revisions / `action=edit`).

use std::collections::HashMap;

use serde::Deserialize;

use crate::error::{ClientError, Result};
use crate::http::{HttpClient, HttpResponse};

pub const DEFAULT_API_ENDPOINT: &str = "https://www.wikidata.org/w/api.php";

/// A current statement for (entity, property): its GUID and its string
/// value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Claim {
    pub guid: String,
    pub value: String,
}

/// Outcome of a guarded claim overwrite. Transport and API failures use
/// the error channel instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardedWrite {
    /// The claim still held the expected value and was overwritten.
    Applied,
    /// No claim held the expected value any more; nothing was written.
    SkippedStale,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    code: String,
    #[serde(default)]
    info: String,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: Option<ApiErrorBody>,
}

/// Surface the Action API's `{"error": {...}}` envelope as a typed
/// error. Bodies that are not JSON objects are left for the caller's
/// parser to reject.
pub fn check_api_error(json: &str) -> Result<()> {
    if let Ok(envelope) = serde_json::from_str::<ErrorEnvelope>(json) {
        if let Some(error) = envelope.error {
            return Err(ClientError::Api {
                code: error.code,
                info: error.info,
            });
        }
    }
    Ok(())
}

#[derive(Debug, Deserialize)]
struct ClaimsResponse {
    #[serde(default)]
    claims: HashMap<String, Vec<ClaimEntry>>,
}

#[derive(Debug, Deserialize)]
struct ClaimEntry {
    id: String,
    mainsnak: Snak,
}

#[derive(Debug, Deserialize)]
struct Snak {
    snaktype: String,
    datavalue: Option<DataValue>,
}

#[derive(Debug, Deserialize)]
struct DataValue {
    value: serde_json::Value,
}

/// Parse a `wbgetclaims` response, keeping only string-valued mainsnaks
/// for the requested property. Novalue/somevalue snaks have nothing to
/// compare against and are dropped.
pub fn parse_claims(json: &str, property: &str) -> Result<Vec<Claim>> {
    let mut response: ClaimsResponse =
        serde_json::from_str(json).map_err(|e| ClientError::Parse {
            message: format!("Invalid wbgetclaims JSON: {}", e),
        })?;

    let entries = response.claims.remove(property).unwrap_or_default();

    Ok(entries
        .into_iter()
        .filter(|entry| entry.mainsnak.snaktype == "value")
        .filter_map(|entry| {
            let value = entry.mainsnak.datavalue?.value.as_str()?.to_string();
            Some(Claim {
                guid: entry.id,
                value,
            })
        })
        .collect())
}

/// The guard itself: the claim whose current value still equals the one
/// the query saw, if any.
pub fn find_matching_claim<'a>(claims: &'a [Claim], value: &str) -> Option<&'a Claim> {
    claims.iter().find(|claim| claim.value == value)
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    query: TokenQuery,
}

#[derive(Debug, Deserialize)]
struct TokenQuery {
    tokens: Tokens,
}

#[derive(Debug, Deserialize)]
struct Tokens {
    csrftoken: String,
}

pub fn parse_csrf_token(json: &str) -> Result<String> {
    let response: TokenResponse = serde_json::from_str(json).map_err(|e| ClientError::Parse {
        message: format!("Invalid token JSON: {}", e),
    })?;
    Ok(response.query.tokens.csrftoken)
}

#[derive(Debug, Deserialize)]
struct PageResponse {
    query: PageQuery,
}

#[derive(Debug, Deserialize)]
struct PageQuery {
    pages: Vec<Page>,
}

#[derive(Debug, Deserialize)]
struct Page {
    #[serde(default)]
    missing: bool,
    #[serde(default)]
    revisions: Vec<Revision>,
}

#[derive(Debug, Deserialize)]
struct Revision {
    slots: Slots,
}

#[derive(Debug, Deserialize)]
struct Slots {
    main: SlotContent,
}

#[derive(Debug, Deserialize)]
struct SlotContent {
    content: String,
}

/// Parse a revisions query (formatversion=2) into the page's current
/// wikitext, `None` for a missing page.
pub fn parse_page_text(json: &str) -> Result<Option<String>> {
    let response: PageResponse = serde_json::from_str(json).map_err(|e| ClientError::Parse {
        message: format!("Invalid revisions JSON: {}", e),
    })?;

    let page = response.query.pages.into_iter().next();
    match page {
        None => Ok(None),
        Some(page) if page.missing => Ok(None),
        Some(page) => Ok(page
            .revisions
            .into_iter()
            .next()
            .map(|rev| rev.slots.main.content)),
    }
}

#[derive(Debug, Deserialize)]
struct SetClaimResponse {
    #[serde(default)]
    success: u8,
}

#[derive(Debug, Deserialize)]
struct EditResponse {
    edit: EditBody,
}

#[derive(Debug, Deserialize)]
struct EditBody {
    result: String,
}

pub struct WikibaseClient {
    http: HttpClient,
    api_url: String,
}

impl WikibaseClient {
    pub fn new(http: HttpClient, api_url: impl Into<String>) -> Self {
        Self {
            http,
            api_url: api_url.into(),
        }
    }

    /// Current claims for (entity, property).
    pub async fn claims(&self, qid: &str, property: &str) -> Result<Vec<Claim>> {
        let body = self
            .get(&[
                ("action", "wbgetclaims"),
                ("entity", qid),
                ("property", property),
                ("format", "json"),
            ])
            .await?;
        parse_claims(&body, property)
    }

    /// Compare-and-swap style claim overwrite: re-read the entity's
    /// claims, overwrite only the claim that still holds `old_value`.
    pub async fn replace_claim_value(
        &self,
        qid: &str,
        property: &str,
        old_value: &str,
        new_value: &str,
        summary: &str,
    ) -> Result<GuardedWrite> {
        let claims = self.claims(qid, property).await?;
        match find_matching_claim(&claims, old_value) {
            Some(claim) => {
                self.set_claim_value(&claim.guid, new_value, summary).await?;
                Ok(GuardedWrite::Applied)
            }
            None => Ok(GuardedWrite::SkippedStale),
        }
    }

    /// Overwrite one claim's value by GUID.
    pub async fn set_claim_value(&self, guid: &str, value: &str, summary: &str) -> Result<()> {
        let token = self.csrf_token().await?;
        let encoded = serde_json::to_string(value).map_err(|e| ClientError::Parse {
            message: format!("Could not encode claim value: {}", e),
        })?;

        let body = self
            .post(&[
                ("action", "wbsetclaimvalue"),
                ("claim", guid),
                ("snaktype", "value"),
                ("value", &encoded),
                ("summary", summary),
                ("token", &token),
                ("format", "json"),
            ])
            .await?;

        let response: SetClaimResponse =
            serde_json::from_str(&body).map_err(|e| ClientError::Parse {
                message: format!("Invalid wbsetclaimvalue JSON: {}", e),
            })?;
        if response.success != 1 {
            return Err(ClientError::Api {
                code: "unexpected-result".to_string(),
                info: "wbsetclaimvalue did not report success".to_string(),
            });
        }
        Ok(())
    }

    /// Current wikitext of a page, `None` when it does not exist.
    pub async fn page_text(&self, title: &str) -> Result<Option<String>> {
        let body = self
            .get(&[
                ("action", "query"),
                ("prop", "revisions"),
                ("rvprop", "content"),
                ("rvslots", "main"),
                ("rvlimit", "1"),
                ("titles", title),
                ("formatversion", "2"),
                ("format", "json"),
            ])
            .await?;
        parse_page_text(&body)
    }

    /// Replace a page's content wholesale.
    pub async fn save_page(&self, title: &str, text: &str, summary: &str) -> Result<()> {
        let token = self.csrf_token().await?;
        let body = self
            .post(&[
                ("action", "edit"),
                ("title", title),
                ("text", text),
                ("summary", summary),
                ("token", &token),
                ("format", "json"),
            ])
            .await?;

        let response: EditResponse = serde_json::from_str(&body).map_err(|e| ClientError::Parse {
            message: format!("Invalid edit JSON: {}", e),
        })?;
        if response.edit.result != "Success" {
            return Err(ClientError::Api {
                code: "edit-failed".to_string(),
                info: response.edit.result,
            });
        }
        Ok(())
    }

    async fn csrf_token(&self) -> Result<String> {
        if !self.http.has_token() {
            return Err(ClientError::AuthRequired);
        }
        let body = self
            .get(&[
                ("action", "query"),
                ("meta", "tokens"),
                ("type", "csrf"),
                ("format", "json"),
            ])
            .await?;
        parse_csrf_token(&body)
    }

    async fn get(&self, params: &[(&str, &str)]) -> Result<String> {
        let response = self.http.get_with_params(&self.api_url, params).await?;
        self.checked(response)
    }

    async fn post(&self, form: &[(&str, &str)]) -> Result<String> {
        let response = self.http.post_form(&self.api_url, form).await?;
        self.checked(response)
    }

    fn checked(&self, response: HttpResponse) -> Result<String> {
        if response.status != 200 {
            return Err(ClientError::Status {
                status: response.status,
                endpoint: self.api_url.clone(),
            });
        }
        check_api_error(&response.body)?;
        Ok(response.body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_CLAIMS: &str = r#"{
        "claims": {
            "P212": [
                {
                    "id": "Q42$F078E5B3-F9A8-480E-B7AC-D97778CBBEF9",
                    "mainsnak": {
                        "snaktype": "value",
                        "property": "P212",
                        "datavalue": {"value": "9780000000002", "type": "string"},
                        "datatype": "external-id"
                    },
                    "type": "statement",
                    "rank": "normal"
                },
                {
                    "id": "Q42$11111111-2222-3333-4444-555555555555",
                    "mainsnak": {
                        "snaktype": "novalue",
                        "property": "P212"
                    },
                    "type": "statement",
                    "rank": "normal"
                }
            ]
        }
    }"#;

    #[test]
    fn test_parse_claims() {
        let claims = parse_claims(SAMPLE_CLAIMS, "P212").unwrap();
        assert_eq!(claims.len(), 1);
        assert_eq!(claims[0].value, "9780000000002");
        assert!(claims[0].guid.starts_with("Q42$"));
    }

    #[test]
    fn test_parse_claims_missing_property() {
        let claims = parse_claims(SAMPLE_CLAIMS, "P957").unwrap();
        assert!(claims.is_empty());
    }

    #[test]
    fn test_find_matching_claim() {
        let claims = vec![
            Claim {
                guid: "Q1$a".to_string(),
                value: "978".to_string(),
            },
            Claim {
                guid: "Q1$b".to_string(),
                value: "979".to_string(),
            },
        ];
        assert_eq!(
            find_matching_claim(&claims, "979").map(|c| c.guid.as_str()),
            Some("Q1$b")
        );
        assert!(find_matching_claim(&claims, "980").is_none());
    }

    #[test]
    fn test_check_api_error() {
        let body = r#"{"error": {"code": "badtoken", "info": "Invalid CSRF token."}}"#;
        match check_api_error(body) {
            Err(ClientError::Api { code, .. }) => assert_eq!(code, "badtoken"),
            other => panic!("expected Api error, got {:?}", other),
        }
        assert!(check_api_error(r#"{"claims": {}}"#).is_ok());
    }

    #[test]
    fn test_parse_csrf_token() {
        let body = r#"{"batchcomplete": true, "query": {"tokens": {"csrftoken": "abc123+\\"}}}"#;
        assert_eq!(parse_csrf_token(body).unwrap(), "abc123+\\");
    }

    #[test]
    fn test_parse_page_text() {
        let body = r#"{
            "query": {
                "pages": [
                    {
                        "pageid": 1,
                        "title": "Test",
                        "revisions": [
                            {"slots": {"main": {"contentmodel": "wikitext", "content": "old report"}}}
                        ]
                    }
                ]
            }
        }"#;
        assert_eq!(parse_page_text(body).unwrap().as_deref(), Some("old report"));
    }

    #[test]
    fn test_parse_page_text_missing_page() {
        let body = r#"{"query": {"pages": [{"title": "Test", "missing": true}]}}"#;
        assert_eq!(parse_page_text(body).unwrap(), None);
    }
}
