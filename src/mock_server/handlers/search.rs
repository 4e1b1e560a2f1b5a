//! Ticket search.

use axum::{
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};

use super::{authorize, error, SharedState};

/// GET /search/tickets.json
///
/// Honours `search` and the repeated `inboxes` and `statuses` keys;
/// other criteria are accepted and ignored.
pub async fn search_tickets(
    state: &SharedState,
    segment: &str,
    query: &[(String, String)],
    headers: &HeaderMap,
) -> Response {
    if segment != "tickets.json" {
        return error(StatusCode::NOT_FOUND, format!("cannot search {segment}"));
    }

    let state = state.read().await;
    if let Err(rejection) = authorize(&state, headers) {
        return rejection;
    }

    let inboxes = repeated_ids(query, "inboxes");
    let statuses = repeated_ids(query, "statuses");
    let text = query
        .iter()
        .find(|(key, _)| key == "search")
        .map(|(_, value)| value.as_str());
    let tickets: Vec<Value> = state
        .search_tickets(text, &inboxes, &statuses)
        .into_iter()
        .cloned()
        .collect();
    let records = tickets.len();

    Json(json!({
        "tickets": tickets,
        "included": {},
        "pagination": {
            "records": records,
            "pageSize": records,
            "pages": 1,
            "page": 1,
            "hasMorePages": false
        },
        "meta": {}
    }))
    .into_response()
}

/// Every `name=..` value that parses as an ID, in query order.
fn repeated_ids(query: &[(String, String)], name: &str) -> Vec<u64> {
    query
        .iter()
        .filter(|(key, _)| key == name)
        .filter_map(|(_, value)| value.parse().ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repeated_ids_in_query_order() {
        let query: Vec<(String, String)> = [
            ("inboxes", "7"),
            ("search", "refund"),
            ("inboxes", "3"),
            ("statuses", "2"),
            ("inboxes", "x"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        assert_eq!(repeated_ids(&query, "inboxes"), vec![7, 3]);
        assert_eq!(repeated_ids(&query, "statuses"), vec![2]);
        assert!(repeated_ids(&query, "tags").is_empty());
    }
}
