//! Contact entity and its request payloads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A persisted contact.
///
/// `id` is assigned by the store. Both timestamps are stamped with the same
/// instant at creation and never change afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub id: i64,
    pub external_id: Option<i32>,
    pub phone_number: Option<String>,
    pub date_created: DateTime<Utc>,
    pub date_updated: DateTime<Utc>,
}

/// Insert payload handed to a [`ContactStore`](crate::store::ContactStore).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewContact {
    pub external_id: Option<i32>,
    pub phone_number: Option<String>,
    pub date_created: DateTime<Utc>,
    pub date_updated: DateTime<Utc>,
}

impl NewContact {
    /// Build an insert payload with both timestamps set to `now`.
    #[must_use]
    pub fn stamped(request: CreateContactRequest, now: DateTime<Utc>) -> Self {
        Self {
            external_id: request.external_id,
            phone_number: request.phone_number,
            date_created: now,
            date_updated: now,
        }
    }
}

/// Body of `POST /contacts`.
///
/// Neither field is required. Unknown fields, including a caller-supplied
/// `id` or timestamps, are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateContactRequest {
    #[serde(default, alias = "external_id")]
    pub external_id: Option<i32>,
    #[serde(default, alias = "phone_number")]
    pub phone_number: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stamped_sets_identical_timestamps() {
        let now = Utc::now();
        let request = CreateContactRequest {
            external_id: Some(7),
            phone_number: Some("555-0107".to_string()),
        };

        let new_contact = NewContact::stamped(request, now);

        assert_eq!(new_contact.date_created, now);
        assert_eq!(new_contact.date_updated, new_contact.date_created);
        assert_eq!(new_contact.external_id, Some(7));
    }

    #[test]
    fn test_create_request_accepts_both_spellings() {
        let camel: CreateContactRequest =
            serde_json::from_str(r#"{"externalId": 1, "phoneNumber": "555"}"#).unwrap();
        let snake: CreateContactRequest =
            serde_json::from_str(r#"{"external_id": 1, "phone_number": "555"}"#).unwrap();

        assert_eq!(camel.external_id, snake.external_id);
        assert_eq!(camel.phone_number, snake.phone_number);
    }

    #[test]
    fn test_create_request_fields_are_optional() {
        let request: CreateContactRequest =
            serde_json::from_str(r#"{"id": 99, "dateCreated": "x"}"#).unwrap();

        assert!(request.external_id.is_none());
        assert!(request.phone_number.is_none());
    }

    #[test]
    fn test_contact_serializes_camel_case() {
        let now = Utc::now();
        let contact = Contact {
            id: 1,
            external_id: Some(100),
            phone_number: Some("555-0100".to_string()),
            date_created: now,
            date_updated: now,
        };

        let json = serde_json::to_value(&contact).unwrap();
        let object = json.as_object().unwrap();

        let mut keys: Vec<&str> = object.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(
            keys,
            ["dateCreated", "dateUpdated", "externalId", "id", "phoneNumber"]
        );
        assert_eq!(json["externalId"], 100);
    }
}
