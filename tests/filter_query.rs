//! Filter expressions as they reach the wire.

use desk_client::{DeskClient, FilterBuilder, List, ListOptions};
use serde_json::{json, Value};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn filter_param(url: &url::Url) -> Value {
    let raw = url
        .query_pairs()
        .find(|(key, _)| key == "filter")
        .map(|(_, value)| value.into_owned())
        .expect("filter parameter present");
    serde_json::from_str(&raw).expect("filter is JSON")
}

#[tokio::test]
async fn test_nested_filter_is_sent_as_json_query_parameter() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/tickets.json"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "tickets": [] })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = DeskClient::new("test-token", &mock_server.uri()).unwrap();

    let waiting = FilterBuilder::new().r#in("status", ["open", "pending"]);
    let mine = FilterBuilder::new().eq("assignee", "john.doe");
    let filter = FilterBuilder::new()
        .eq("inbox", 4)
        .and([&FilterBuilder::new().or([&waiting, &mine])]);

    let options = ListOptions::for_page(1, 20).filter(&filter);
    client.tickets().list(&options).await.unwrap();

    let requests = mock_server.received_requests().await.unwrap();
    assert_eq!(
        filter_param(&requests[0].url),
        json!({
            "inbox": { "$eq": 4 },
            "$and": [{
                "$or": [
                    { "status": { "$in": ["open", "pending"] } },
                    { "assignee": { "$eq": "john.doe" } }
                ]
            }]
        })
    );
}

#[tokio::test]
async fn test_range_on_one_field_keeps_both_bounds() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/tickets.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "tickets": [] })))
        .mount(&mock_server)
        .await;

    let client = DeskClient::new("test-token", &mock_server.uri()).unwrap();
    let filter = FilterBuilder::new()
        .gte("createdAt", "2024-01-01")
        .lt("createdAt", "2024-02-01");

    client
        .tickets()
        .list(&ListOptions::default().filter(&filter))
        .await
        .unwrap();

    let requests = mock_server.received_requests().await.unwrap();
    assert_eq!(
        filter_param(&requests[0].url),
        json!({ "createdAt": { "$gte": "2024-01-01", "$lt": "2024-02-01" } })
    );
}

#[tokio::test]
async fn test_empty_filter_is_not_sent() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/tags.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "tags": [] })))
        .mount(&mock_server)
        .await;

    let client = DeskClient::new("test-token", &mock_server.uri()).unwrap();
    client
        .tags()
        .list(&ListOptions::default().filter(&FilterBuilder::new()))
        .await
        .unwrap();

    let requests = mock_server.received_requests().await.unwrap();
    assert!(requests[0].url.query().is_none());
}
