use reqwest::Method;
use serde_json::Value;

use super::TicketService;
use crate::error::{DeskError, Result};
use crate::models::{SearchTicketsFilter, TicketsResponse};

const SEARCH_PATH: &str = "search/tickets";

impl TicketService {
    /// Search tickets. Unset criteria are left out of the query.
    ///
    /// ID and keyword lists are sent as repeated keys
    /// (`inboxes=1&inboxes=2`); custom-field criteria as
    /// `customfields[0][id]=..`.
    #[tracing::instrument(skip(self, filter))]
    pub async fn search(&self, filter: &SearchTicketsFilter) -> Result<TicketsResponse> {
        let mut url = self.client().endpoint::<()>(SEARCH_PATH, None)?;
        let pairs = search_pairs(filter)?;
        if !pairs.is_empty() {
            url.query_pairs_mut().extend_pairs(&pairs);
        }
        let request = self.client().request(Method::GET, url, None);
        self.client().exchange(request, 200).await
    }
}

/// Flatten a search filter into ordered query pairs.
fn search_pairs(filter: &SearchTicketsFilter) -> Result<Vec<(String, String)>> {
    let mut pairs = Vec::new();
    match serde_json::to_value(filter).map_err(DeskError::Serialize)? {
        Value::Object(fields) => {
            for (key, value) in fields {
                push_pairs(&key, value, &mut pairs);
            }
        }
        other => push_pairs("", other, &mut pairs),
    }
    Ok(pairs)
}

fn push_pairs(key: &str, value: Value, pairs: &mut Vec<(String, String)>) {
    match value {
        Value::Null => {}
        Value::String(s) => pairs.push((key.to_string(), s)),
        Value::Array(items) => {
            for (index, item) in items.into_iter().enumerate() {
                match item {
                    Value::Object(_) => push_pairs(&format!("{key}[{index}]"), item, pairs),
                    scalar => push_pairs(key, scalar, pairs),
                }
            }
        }
        Value::Object(fields) => {
            for (field, item) in fields {
                push_pairs(&format!("{key}[{field}]"), item, pairs);
            }
        }
        scalar => pairs.push((key.to_string(), scalar.to_string())),
    }
}
