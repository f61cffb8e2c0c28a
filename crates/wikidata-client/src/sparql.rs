//! WDQS SPARQL client
//!
//! One query shape is all the bot needs: every (entity, value) pair
//! stored under a given direct property, distinct, unordered.

use serde::Deserialize;

use crate::error::{ClientError, Result};
use crate::http::HttpClient;

pub const DEFAULT_QUERY_ENDPOINT: &str = "https://query.wikidata.org/sparql";

/// One row of the query result, with the QID already derived from the
/// entity URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyValue {
    pub qid: String,
    pub value: String,
}

#[derive(Debug, Deserialize)]
struct SparqlResponse {
    results: SparqlResults,
}

#[derive(Debug, Deserialize)]
struct SparqlResults {
    bindings: Vec<PropertyBinding>,
}

#[derive(Debug, Deserialize)]
struct PropertyBinding {
    item: SparqlValue,
    value: SparqlValue,
}

#[derive(Debug, Deserialize)]
struct SparqlValue {
    value: String,
}

/// Build the one-property query. The property id is the only variable
/// part.
pub fn property_value_query(property: &str) -> String {
    format!(
        "PREFIX wdt: <http://www.wikidata.org/prop/direct/>\n\
         SELECT DISTINCT ?item ?value {{\n\
           ?item wdt:{} ?value .\n\
         }}",
        property
    )
}

/// Last path segment of the entity URL form, e.g.
/// `http://www.wikidata.org/entity/Q42` -> `Q42`.
pub fn qid_from_entity_url(url: &str) -> String {
    url.rsplit('/').next().unwrap_or(url).to_string()
}

/// Parse a WDQS JSON result into (qid, value) pairs, preserving row
/// order.
pub fn parse_property_values(json: &str) -> Result<Vec<PropertyValue>> {
    let response: SparqlResponse =
        serde_json::from_str(json).map_err(|e| ClientError::Parse {
            message: format!("Invalid SPARQL JSON: {}", e),
        })?;

    Ok(response
        .results
        .bindings
        .into_iter()
        .map(|binding| PropertyValue {
            qid: qid_from_entity_url(&binding.item.value),
            value: binding.value.value,
        })
        .collect())
}

pub struct WdqsClient {
    http: HttpClient,
    endpoint: String,
}

impl WdqsClient {
    pub fn new(http: HttpClient, endpoint: impl Into<String>) -> Self {
        Self {
            http,
            endpoint: endpoint.into(),
        }
    }

    /// Fetch all stored (entity, value) pairs for a property.
    pub async fn property_values(&self, property: &str) -> Result<Vec<PropertyValue>> {
        let query = property_value_query(property);
        let response = self
            .http
            .get_with_params(&self.endpoint, &[("query", &query), ("format", "json")])
            .await?;

        if response.status != 200 {
            return Err(ClientError::Status {
                status: response.status,
                endpoint: self.endpoint.clone(),
            });
        }

        parse_property_values(&response.body)
    }
}
