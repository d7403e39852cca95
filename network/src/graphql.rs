// Copyright(C) Mundis.
use {
    crate::{
        error::{SdkError, SdkResult},
        net::{ParamsOfQueryCollection, ResultOfQueryCollection},
    },
    log::{debug, warn},
    msig_config::NetworkConfig,
    reqwest::Client,
    serde::{Deserialize, Serialize},
    serde_json::{json, Value},
    std::time::Duration,
};

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct GraphqlRequest {
    pub query: String,
    pub variables: Value,
}

#[derive(Deserialize)]
struct GraphqlErrorBody {
    message: String,
}

#[derive(Deserialize)]
struct GraphqlEnvelope {
    data: Option<Value>,
    #[serde(default)]
    errors: Vec<GraphqlErrorBody>,
}

/// Reads collections from the GraphQL API of one or more endpoints.
pub struct GraphqlClient {
    http: Client,
    urls: Vec<String>,
    access_key: Option<String>,
}

impl GraphqlClient {
    pub fn new(config: &NetworkConfig) -> SdkResult<Self> {
        let urls = config.graphql_urls()?;
        let http = Client::builder()
            .timeout(Duration::from_millis(config.query_timeout_ms))
            .build()?;
        Ok(Self {
            http,
            urls,
            access_key: config.access_key.clone(),
        })
    }

    pub fn urls(&self) -> &[String] {
        &self.urls
    }

    pub async fn query_collection(
        &self,
        params: &ParamsOfQueryCollection,
    ) -> SdkResult<ResultOfQueryCollection> {
        let request = collection_query(params);
        let data = self.execute(&request).await?;
        let rows = match data.get(&params.collection) {
            Some(Value::Array(rows)) => rows.clone(),
            Some(Value::Null) | None => Vec::new(),
            Some(other) => {
                return Err(SdkError::UnexpectedResponse(format!(
                    "`{}` is not a list: {}",
                    params.collection, other
                )))
            }
        };
        debug!("{}: {} rows", params.collection, rows.len());
        Ok(ResultOfQueryCollection { result: rows })
    }

    /// Runs `request` against the endpoints in order, moving on to the next
    /// one only when the previous could not be reached.
    pub async fn execute(&self, request: &GraphqlRequest) -> SdkResult<Value> {
        let mut last_error = None;
        for url in &self.urls {
            match self.post(url, request).await {
                Ok(data) => return Ok(data),
                Err(e) if e.is_transport() => {
                    warn!("GraphQL endpoint {} failed: {}", url, e);
                    last_error = Some(e);
                }
                Err(e) => return Err(e),
            }
        }
        Err(SdkError::AllEndpointsFailed(Box::new(last_error.unwrap_or_else(
            || SdkError::Transport("no endpoints".to_string()),
        ))))
    }

    async fn post(&self, url: &str, request: &GraphqlRequest) -> SdkResult<Value> {
        let mut req = self.http.post(url).json(request);
        if let Some(key) = &self.access_key {
            req = req.basic_auth("", Some(key));
        }
        let resp = req.send().await.map_err(|e| SdkError::Transport(e.to_string()))?;
        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| SdkError::Transport(e.to_string()))?;
        if !status.is_success() {
            return Err(SdkError::Http {
                status: status.as_u16(),
                body,
            });
        }
        parse_response(&body)
    }
}

/// Builds the query for a collection read. The filter type name follows the
/// server schema convention: `messages` is filtered by `MessageFilter`.
pub fn collection_query(params: &ParamsOfQueryCollection) -> GraphqlRequest {
    let query = format!(
        "query($filter: {filter_type}, $orderBy: [QueryOrderBy], $limit: Int) \
         {{ {collection}(filter: $filter, orderBy: $orderBy, limit: $limit) {{ {result} }} }}",
        filter_type = filter_type_name(&params.collection),
        collection = params.collection,
        result = params.result,
    );
    GraphqlRequest {
        query,
        variables: json!({
            "filter": params.filter,
            "orderBy": params.order,
            "limit": params.limit,
        }),
    }
}

pub fn filter_type_name(collection: &str) -> String {
    let mut name = String::new();
    for (i, word) in collection.split('_').enumerate() {
        let word = if i == 0 {
            word.strip_suffix('s').unwrap_or(word)
        } else {
            word
        };
        let mut chars = word.chars();
        if let Some(first) = chars.next() {
            name.extend(first.to_uppercase());
            name.push_str(chars.as_str());
        }
    }
    name.push_str("Filter");
    name
}

/// Splits a GraphQL response body into its data, surfacing server errors.
pub fn parse_response(body: &str) -> SdkResult<Value> {
    let envelope: GraphqlEnvelope =
        serde_json::from_str(body).map_err(|e| SdkError::InvalidJson {
            error: e.to_string(),
            body: body.to_string(),
        })?;
    if !envelope.errors.is_empty() {
        return Err(SdkError::Graphql(
            envelope.errors.into_iter().map(|e| e.message).collect(),
        ));
    }
    envelope
        .data
        .ok_or_else(|| SdkError::UnexpectedResponse("response has no data".to_string()))
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::{net::OrderBy, stub_server::serve_once},
    };

    #[test]
    fn filter_type_names() {
        assert_eq!(filter_type_name("messages"), "MessageFilter");
        assert_eq!(filter_type_name("accounts"), "AccountFilter");
        assert_eq!(filter_type_name("transactions"), "TransactionFilter");
        assert_eq!(filter_type_name("blocks_signatures"), "BlockSignaturesFilter");
    }

    #[test]
    fn builds_collection_query() {
        let params = ParamsOfQueryCollection {
            collection: "messages".to_string(),
            filter: Some(json!({ "msg_type": { "eq": 0 } })),
            result: "id created_at".to_string(),
            order: Some(vec![OrderBy::asc("created_at")]),
            limit: Some(50),
        };
        let request = collection_query(&params);
        assert_eq!(
            request.query,
            "query($filter: MessageFilter, $orderBy: [QueryOrderBy], $limit: Int) \
             { messages(filter: $filter, orderBy: $orderBy, limit: $limit) { id created_at } }"
        );
        assert_eq!(
            request.variables,
            json!({
                "filter": { "msg_type": { "eq": 0 } },
                "orderBy": [{ "path": "created_at", "direction": "ASC" }],
                "limit": 50
            })
        );
    }

    #[test]
    fn parses_data_and_errors() {
        let data = parse_response(r#"{ "data": { "accounts": [] } }"#).unwrap();
        assert_eq!(data, json!({ "accounts": [] }));

        let err = parse_response(r#"{ "errors": [{ "message": "bad filter" }] }"#).unwrap_err();
        assert!(matches!(err, SdkError::Graphql(ref m) if m == &["bad filter".to_string()]));

        let err = parse_response("<html>").unwrap_err();
        assert!(matches!(err, SdkError::InvalidJson { .. }));
    }

    #[tokio::test]
    async fn unreachable_endpoints_are_reported() {
        let config = NetworkConfig {
            endpoints: vec!["http://127.0.0.1:9".to_string()],
            query_timeout_ms: 500,
            ..NetworkConfig::default()
        };
        let client = GraphqlClient::new(&config).unwrap();
        assert_eq!(client.urls(), ["http://127.0.0.1:9/graphql".to_string()]);
        let params = ParamsOfQueryCollection {
            collection: "accounts".to_string(),
            result: "id".to_string(),
            ..ParamsOfQueryCollection::default()
        };
        let err = client.query_collection(&params).await.unwrap_err();
        assert!(matches!(err, SdkError::AllEndpointsFailed(_)));
    }

    #[tokio::test]
    async fn truncated_body_moves_on_to_the_next_endpoint() {
        let truncated = serve_once(
            b"HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: 200\r\n\r\n{\"data\"",
        )
        .await;
        let healthy = serve_once(
            b"HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: 37\r\n\r\n{\"data\":{\"accounts\":[{\"id\":\"0:11\"}]}}",
        )
        .await;
        let config = NetworkConfig {
            endpoints: vec![truncated, healthy],
            query_timeout_ms: 2_000,
            ..NetworkConfig::default()
        };
        let client = GraphqlClient::new(&config).unwrap();
        let params = ParamsOfQueryCollection {
            collection: "accounts".to_string(),
            result: "id".to_string(),
            ..ParamsOfQueryCollection::default()
        };
        let result = client.query_collection(&params).await.unwrap();
        assert_eq!(result.result, vec![json!({ "id": "0:11" })]);
    }

    #[tokio::test]
    async fn truncated_body_is_a_transport_error() {
        let truncated = serve_once(
            b"HTTP/1.1 200 OK\r\nContent-Length: 200\r\n\r\n{\"data\"",
        )
        .await;
        let config = NetworkConfig {
            endpoints: vec![truncated],
            query_timeout_ms: 2_000,
            ..NetworkConfig::default()
        };
        let client = GraphqlClient::new(&config).unwrap();
        let request = GraphqlRequest {
            query: "query { info { version } }".to_string(),
            variables: json!({}),
        };
        let err = client.execute(&request).await.unwrap_err();
        match err {
            SdkError::AllEndpointsFailed(last) => assert!(last.is_transport(), "{}", last),
            other => panic!("unexpected error {}", other),
        }
    }
}
