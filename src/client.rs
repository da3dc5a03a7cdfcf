//! Paginated GraphQL client for The Graph gateway endpoints.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::catalog::queries::QueryTemplate;
use crate::error::GraphDexError;

pub(crate) const GRAPH_API_KEY_ENV: &str = "GRAPH_API_KEY";
const GRAPH_STUDIO_URL: &str = "https://thegraph.com/studio/";
const ERROR_BODY_MAX_BYTES: usize = 2048;

pub(crate) const DEFAULT_PAGE_SIZE: usize = 100;
const RATE_LIMIT_DELAY: Duration = Duration::from_millis(500);

#[derive(Debug, Serialize)]
struct GraphQlRequest<'a> {
    query: &'a str,
    variables: Value,
}

#[derive(Debug, Deserialize)]
struct GraphQlResponse {
    data: Option<Map<String, Value>>,
    errors: Option<Vec<GraphQlError>>,
}

#[derive(Debug, Deserialize)]
struct GraphQlError {
    message: Option<String>,
}

fn resolve_api_key(explicit: Option<&str>) -> Result<String, GraphDexError> {
    explicit
        .map(|s| s.trim().to_string())
        .or_else(|| std::env::var(GRAPH_API_KEY_ENV).ok().map(|s| s.trim().to_string()))
        .filter(|s| !s.is_empty())
        .ok_or_else(|| GraphDexError::ApiKeyRequired {
            env_var: GRAPH_API_KEY_ENV.to_string(),
            docs_url: GRAPH_STUDIO_URL.to_string(),
        })
}

fn body_excerpt(bytes: &[u8]) -> String {
    let full = String::from_utf8_lossy(bytes);

    let truncated: &str = if full.len() > ERROR_BODY_MAX_BYTES {
        let mut end = ERROR_BODY_MAX_BYTES;
        while end > 0 && !full.is_char_boundary(end) {
            end -= 1;
        }
        &full[..end]
    } else {
        full.as_ref()
    };

    let mut s = truncated.trim().replace(['\n', '\r', '\t'], " ");
    if full.len() > ERROR_BODY_MAX_BYTES {
        s.push_str(" …");
    }
    s
}

fn build_http_client() -> Result<reqwest::Client, GraphDexError> {
    let mut default_headers = reqwest::header::HeaderMap::new();
    default_headers.insert(
        reqwest::header::ACCEPT,
        reqwest::header::HeaderValue::from_static("application/json"),
    );

    reqwest::Client::builder()
        .timeout(Duration::from_secs(30))
        .connect_timeout(Duration::from_secs(10))
        .user_agent(concat!("graphdex/", env!("CARGO_PKG_VERSION")))
        .default_headers(default_headers)
        .build()
        .map_err(GraphDexError::HttpClientInit)
}

/// Client for one subgraph endpoint.
///
/// Owns the HTTP session, executes single GraphQL requests, and drives the
/// skip/first pagination loop. All requests are strictly sequential; the only
/// suspension is the fixed inter-page rate-limit delay.
#[derive(Debug)]
pub struct GraphClient {
    http: reqwest::Client,
    url: String,
    api: String,
    rate_limit_delay: Duration,
}

impl GraphClient {
    /// Creates a client for a subgraph on The Graph gateway.
    ///
    /// The credential comes from `api_key` or, when absent, from the
    /// `GRAPH_API_KEY` environment variable. Fails before any network
    /// activity when neither is set.
    pub fn new(
        api: &str,
        subgraph_id: &str,
        api_key: Option<&str>,
    ) -> Result<Self, GraphDexError> {
        let api_key = resolve_api_key(api_key)?;
        Ok(Self {
            http: build_http_client()?,
            url: crate::catalog::gateway_url(&api_key, subgraph_id),
            api: api.to_string(),
            rate_limit_delay: RATE_LIMIT_DELAY,
        })
    }

    #[cfg(test)]
    fn new_for_test(url: String) -> Result<Self, GraphDexError> {
        Ok(Self {
            http: build_http_client()?,
            url,
            api: "test".to_string(),
            rate_limit_delay: Duration::ZERO,
        })
    }

    /// Executes one GraphQL request and returns the `data` mapping.
    ///
    /// A non-success HTTP status or a non-empty `errors` array in the body is
    /// a terminal failure for this call; `errors` wins even when `data` is
    /// also present.
    pub async fn execute(
        &self,
        query: &str,
        variables: Value,
    ) -> Result<Map<String, Value>, GraphDexError> {
        let body = GraphQlRequest { query, variables };
        let resp = self.http.post(&self.url).json(&body).send().await?;
        let status = resp.status();
        let bytes = resp.bytes().await?;

        if !status.is_success() {
            return Err(GraphDexError::Api {
                api: self.api.clone(),
                message: format!("HTTP {status}: {}", body_excerpt(&bytes)),
            });
        }

        let parsed: GraphQlResponse =
            serde_json::from_slice(&bytes).map_err(|source| GraphDexError::ApiJson {
                api: self.api.clone(),
                source,
            })?;

        if let Some(errors) = parsed.errors {
            let message = errors
                .into_iter()
                .filter_map(|e| e.message)
                .collect::<Vec<_>>()
                .join("; ");
            if !message.is_empty() {
                return Err(GraphDexError::GraphQl {
                    api: self.api.clone(),
                    message,
                });
            }
        }

        Ok(parsed.data.unwrap_or_default())
    }

    /// Fetches up to `max_items` records, issuing as many page requests as
    /// needed.
    ///
    /// Termination is best-effort by design: a transport or GraphQL failure
    /// mid-pagination is logged and whatever accumulated so far is returned.
    /// Callers observe partial results only through the record count, never
    /// through an error. The skip cursor advances by items actually received
    /// so server-side short pages cannot skip records, and a page shorter
    /// than requested ends the loop (exhaustion for offset pagination).
    pub async fn fetch_paginated(
        &self,
        template: &QueryTemplate,
        base_variables: Map<String, Value>,
        max_items: Option<usize>,
        page_size: usize,
    ) -> Vec<Value> {
        let mut items: Vec<Value> = Vec::new();
        let mut skip = 0usize;

        loop {
            let request_size = match max_items {
                Some(max) => {
                    let remaining = max.saturating_sub(items.len());
                    if remaining == 0 {
                        break;
                    }
                    page_size.min(remaining)
                }
                None => page_size,
            };

            let mut variables = base_variables.clone();
            variables.insert("first".to_string(), request_size.into());
            variables.insert("skip".to_string(), skip.into());

            debug!(
                api = self.api.as_str(),
                entity = template.entity,
                skip,
                request_size,
                "Fetching page"
            );

            let data = match self.execute(template.text, Value::Object(variables)).await {
                Ok(data) => data,
                Err(err) => {
                    warn!(
                        api = self.api.as_str(),
                        error = %err,
                        fetched = items.len(),
                        "Pagination aborted; returning partial results"
                    );
                    break;
                }
            };

            let page = match data.get(template.entity) {
                Some(Value::Array(arr)) => arr.as_slice(),
                _ => &[],
            };
            if page.is_empty() {
                break;
            }

            let received = page.len();
            items.extend_from_slice(page);
            skip += received;

            if received < request_size {
                break;
            }

            tokio::time::sleep(self.rate_limit_delay).await;
        }

        items
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::DexSchema;
    use crate::catalog::queries::{DexQuery, dex_query};
    use serde_json::json;
    use wiremock::matchers::{body_string_contains, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn page_of(count: usize, offset: usize) -> Vec<Value> {
        (0..count)
            .map(|i| json!({"id": format!("swap-{}", offset + i)}))
            .collect()
    }

    fn swaps_body(items: Vec<Value>) -> Value {
        json!({"data": {"swaps": items}})
    }

    #[test]
    fn missing_credential_fails_before_any_network_call() {
        // SAFETY: test-only env mutation; no other test reads GRAPH_API_KEY.
        unsafe { std::env::remove_var(GRAPH_API_KEY_ENV) };

        let err = GraphClient::new("test", "5zvR82QoaXYFyDEKLZ9t6v9adgnptxYpKpSbxtgVENFV", None)
            .expect_err("construction without credential should fail");
        assert!(matches!(err, GraphDexError::ApiKeyRequired { .. }));
    }

    #[test]
    fn blank_explicit_credential_is_rejected() {
        unsafe { std::env::remove_var(GRAPH_API_KEY_ENV) };

        let err = GraphClient::new("test", "abc", Some("   "))
            .expect_err("blank key should not count as a credential");
        assert!(matches!(err, GraphDexError::ApiKeyRequired { .. }));
    }

    #[test]
    fn body_excerpt_flattens_and_truncates() {
        let short = body_excerpt(b"bad\nrequest\t!");
        assert_eq!(short, "bad request !");

        let long = body_excerpt(&vec![b'x'; ERROR_BODY_MAX_BYTES + 10]);
        assert!(long.ends_with('…'));
    }

    #[tokio::test]
    async fn execute_returns_data_mapping() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"data": {"reserves": [{"id": "0xabc"}]}})),
            )
            .mount(&server)
            .await;

        let client = GraphClient::new_for_test(server.uri()).unwrap();
        let data = client
            .execute("{ reserves { id } }", json!({}))
            .await
            .expect("data mapping");
        assert_eq!(data["reserves"][0]["id"], "0xabc");
    }

    #[tokio::test]
    async fn execute_joins_graphql_error_messages() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "errors": [
                    {"message": "first problem"},
                    {"message": "second problem"}
                ]
            })))
            .mount(&server)
            .await;

        let client = GraphClient::new_for_test(server.uri()).unwrap();
        let err = client
            .execute("{ swaps { id } }", json!({}))
            .await
            .expect_err("errors payload should fail the call");
        assert!(err.to_string().contains("first problem; second problem"));
    }

    #[tokio::test]
    async fn execute_rejects_non_success_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
            .mount(&server)
            .await;

        let client = GraphClient::new_for_test(server.uri()).unwrap();
        let err = client
            .execute("{ swaps { id } }", json!({}))
            .await
            .expect_err("HTTP 502 should fail the call");
        let msg = err.to_string();
        assert!(msg.contains("502"));
        assert!(msg.contains("bad gateway"));
    }

    #[tokio::test]
    async fn pagination_issues_requests_at_advancing_offsets() {
        let server = MockServer::start().await;
        let template = dex_query(DexSchema::V3, DexQuery::SwapsAll);

        // 250 available items, page size 100: skip 0, 100, 200.
        Mock::given(method("POST"))
            .and(body_string_contains("\"skip\":0"))
            .respond_with(ResponseTemplate::new(200).set_body_json(swaps_body(page_of(100, 0))))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(body_string_contains("\"skip\":100"))
            .respond_with(ResponseTemplate::new(200).set_body_json(swaps_body(page_of(100, 100))))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(body_string_contains("\"skip\":200"))
            .respond_with(ResponseTemplate::new(200).set_body_json(swaps_body(page_of(50, 200))))
            .expect(1)
            .mount(&server)
            .await;

        let client = GraphClient::new_for_test(server.uri()).unwrap();
        let items = client
            .fetch_paginated(&template, Map::new(), None, 100)
            .await;

        assert_eq!(items.len(), 250);
        assert_eq!(items[0]["id"], "swap-0");
        assert_eq!(items[249]["id"], "swap-249");
        assert_eq!(server.received_requests().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn pagination_never_exceeds_max_items() {
        let server = MockServer::start().await;
        let template = dex_query(DexSchema::V3, DexQuery::SwapsAll);

        Mock::given(method("POST"))
            .and(body_string_contains("\"skip\":0"))
            .respond_with(ResponseTemplate::new(200).set_body_json(swaps_body(page_of(100, 0))))
            .mount(&server)
            .await;
        // The final page request is clamped to the remaining budget.
        Mock::given(method("POST"))
            .and(body_string_contains("\"skip\":100"))
            .and(body_string_contains("\"first\":50"))
            .respond_with(ResponseTemplate::new(200).set_body_json(swaps_body(page_of(50, 100))))
            .mount(&server)
            .await;

        let client = GraphClient::new_for_test(server.uri()).unwrap();
        let items = client
            .fetch_paginated(&template, Map::new(), Some(150), 100)
            .await;

        assert_eq!(items.len(), 150);
        assert_eq!(server.received_requests().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn zero_max_items_issues_no_requests() {
        let server = MockServer::start().await;
        let template = dex_query(DexSchema::V3, DexQuery::SwapsAll);

        let client = GraphClient::new_for_test(server.uri()).unwrap();
        let items = client
            .fetch_paginated(&template, Map::new(), Some(0), 100)
            .await;

        assert!(items.is_empty());
        assert_eq!(server.received_requests().await.unwrap().len(), 0);
    }

    #[tokio::test]
    async fn short_page_terminates_pagination() {
        let server = MockServer::start().await;
        let template = dex_query(DexSchema::V3, DexQuery::SwapsAll);

        Mock::given(method("POST"))
            .and(body_string_contains("\"skip\":0"))
            .respond_with(ResponseTemplate::new(200).set_body_json(swaps_body(page_of(37, 0))))
            .expect(1)
            .mount(&server)
            .await;

        let client = GraphClient::new_for_test(server.uri()).unwrap();
        let items = client
            .fetch_paginated(&template, Map::new(), None, 100)
            .await;

        assert_eq!(items.len(), 37);
        assert_eq!(server.received_requests().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn empty_page_terminates_pagination() {
        let server = MockServer::start().await;
        let template = dex_query(DexSchema::V3, DexQuery::SwapsAll);

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(swaps_body(Vec::new())))
            .expect(1)
            .mount(&server)
            .await;

        let client = GraphClient::new_for_test(server.uri()).unwrap();
        let items = client
            .fetch_paginated(&template, Map::new(), None, 100)
            .await;

        assert!(items.is_empty());
    }

    #[tokio::test]
    async fn error_mid_pagination_returns_partial_results() {
        let server = MockServer::start().await;
        let template = dex_query(DexSchema::V3, DexQuery::SwapsAll);

        Mock::given(method("POST"))
            .and(body_string_contains("\"skip\":0"))
            .respond_with(ResponseTemplate::new(200).set_body_json(swaps_body(page_of(100, 0))))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(body_string_contains("\"skip\":100"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "errors": [{"message": "indexer timeout"}]
            })))
            .mount(&server)
            .await;

        let client = GraphClient::new_for_test(server.uri()).unwrap();
        let items = client
            .fetch_paginated(&template, Map::new(), None, 100)
            .await;

        // Exactly the page-1 items, no panic, no error surfaced.
        assert_eq!(items.len(), 100);
        assert_eq!(items[99]["id"], "swap-99");
    }

    #[tokio::test]
    async fn base_variables_are_merged_into_each_page() {
        let server = MockServer::start().await;
        let template = dex_query(DexSchema::V3, DexQuery::SwapsAll);

        Mock::given(method("POST"))
            .and(body_string_contains("\"minAmountUSD\":\"1000\""))
            .and(body_string_contains("\"skip\":0"))
            .respond_with(ResponseTemplate::new(200).set_body_json(swaps_body(page_of(5, 0))))
            .expect(1)
            .mount(&server)
            .await;

        let client = GraphClient::new_for_test(server.uri()).unwrap();
        let mut base = Map::new();
        base.insert("minAmountUSD".to_string(), json!("1000"));
        let items = client.fetch_paginated(&template, base, Some(10), 100).await;

        assert_eq!(items.len(), 5);
    }
}
