use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

/// Overlay `data` onto `target` through its JSON form.
///
/// Objects merge key by key, recursively; any other value replaces what
/// was there. Keys `target` does not know are dropped on the way back.
///
/// # Errors
///
/// Returns an error if the merged document no longer fits `T`, e.g. a
/// string where a number is expected.
pub fn merge_json<T>(target: &mut T, data: &Map<String, Value>) -> serde_json::Result<()>
where
    T: Serialize + DeserializeOwned,
{
    let mut value = serde_json::to_value(&*target)?;
    if let Value::Object(fields) = &mut value {
        merge_objects(fields, data);
    }
    *target = serde_json::from_value(value)?;
    Ok(())
}

fn merge_objects(into: &mut Map<String, Value>, from: &Map<String, Value>) {
    for (key, incoming) in from {
        match (into.get_mut(key), incoming) {
            (Some(Value::Object(existing)), Value::Object(nested)) => merge_objects(existing, nested),
            _ => {
                into.insert(key.clone(), incoming.clone());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{EntityRef, Tag, Ticket};
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn test_overrides_top_level_fields() {
        let mut tag = Tag {
            name: "generated".to_string(),
            ..Default::default()
        };
        merge_json(&mut tag, &object(json!({ "name": "vip", "color": "red" }))).unwrap();

        assert_eq!(tag.name, "vip");
        assert_eq!(tag.color.as_deref(), Some("red"));
    }

    #[test]
    fn test_nested_objects_merge() {
        let mut ticket = Ticket {
            subject: "Hello".to_string(),
            inbox: EntityRef {
                id: 3,
                kind: Some("inboxes".to_string()),
                meta: None,
            },
            ..Default::default()
        };
        merge_json(&mut ticket, &object(json!({ "inbox": { "id": 9 } }))).unwrap();

        assert_eq!(ticket.inbox.id, 9);
        assert_eq!(ticket.inbox.kind.as_deref(), Some("inboxes"));
        assert_eq!(ticket.subject, "Hello");
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let mut tag = Tag::default();
        merge_json(&mut tag, &object(json!({ "bogus": true }))).unwrap();
        assert_eq!(tag, Tag::default());
    }

    #[test]
    fn test_type_mismatch_is_an_error() {
        let mut tag = Tag::default();
        assert!(merge_json(&mut tag, &object(json!({ "name": 12 }))).is_err());
    }
}
