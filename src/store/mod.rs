//! Generic record store behind the back-office collections.
//! Used by: handlers, state.

pub mod sqlite;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{Error, Result};

pub type Body = Map<String, Value>;

pub const PROPOSAL_STATUSES: [&str; 3] = ["pending", "approved", "rejected"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Collection {
    Contests,
    Testimonials,
    ContactMessages,
    BreachProposals,
}

impl Collection {
    pub fn as_str(self) -> &'static str {
        match self {
            Collection::Contests => "contests",
            Collection::Testimonials => "testimonials",
            Collection::ContactMessages => "contact-messages",
            Collection::BreachProposals => "breach-proposals",
        }
    }

    fn required_fields(self) -> &'static [&'static str] {
        match self {
            Collection::Contests => &["title", "description"],
            Collection::Testimonials => &["author", "content"],
            Collection::ContactMessages => &["name", "email", "message"],
            Collection::BreachProposals => &["title", "details", "submitter"],
        }
    }

    /// Checks a new record body: required text fields present and non-empty.
    pub fn validate(self, body: &Body) -> Result<()> {
        for field in self.required_fields() {
            match body.get(*field).and_then(Value::as_str) {
                Some(v) if !v.trim().is_empty() => {}
                _ => {
                    return Err(Error::Validation(format!(
                        "{} requires a non-empty `{}`",
                        self.as_str(),
                        field
                    )))
                }
            }
        }
        if self == Collection::ContactMessages {
            let email = body.get("email").and_then(Value::as_str).unwrap_or_default();
            if !email.contains('@') {
                return Err(Error::Validation("email is not valid".into()));
            }
        }
        Ok(())
    }

    /// Checks a partial update: required fields it touches stay non-empty,
    /// and a breach proposal status moves only between known states.
    pub fn validate_patch(self, patch: &Body) -> Result<()> {
        for field in self.required_fields() {
            if let Some(value) = patch.get(*field) {
                if value.as_str().map_or(true, |v| v.trim().is_empty()) {
                    return Err(Error::Validation(format!("`{}` cannot be cleared", field)));
                }
            }
        }
        if self == Collection::BreachProposals {
            if let Some(status) = patch.get("status") {
                if !status.as_str().is_some_and(|s| PROPOSAL_STATUSES.contains(&s)) {
                    return Err(Error::Validation(format!(
                        "status must be one of {}",
                        PROPOSAL_STATUSES.join(", ")
                    )));
                }
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    pub id: String,
    pub created_at: String,
    pub updated_at: String,
    #[serde(flatten)]
    pub body: Body,
}

/// Data-store client. Handlers only reach it after the admin gate where required.
pub trait DataStore: Send + Sync {
    fn insert(&self, collection: Collection, body: Body) -> Result<Record>;
    fn list(&self, collection: Collection, limit: usize) -> Result<Vec<Record>>;
    fn get(&self, collection: Collection, id: &str) -> Result<Record>;
    /// Shallow merge of `patch` into the stored body.
    fn update(&self, collection: Collection, id: &str, patch: Body) -> Result<Record>;
    fn delete(&self, collection: Collection, id: &str) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn body(value: Value) -> Body {
        match value {
            Value::Object(map) => map,
            _ => Body::new(),
        }
    }

    #[test]
    fn collections_parse_from_kebab_case() -> Result<()> {
        let c: Collection = serde_json::from_value(json!("contact-messages"))?;
        assert_eq!(c, Collection::ContactMessages);
        assert!(serde_json::from_value::<Collection>(json!("users")).is_err());
        Ok(())
    }

    #[test]
    fn contest_requires_title_and_description() {
        let ok = body(json!({"title": "Web2 Sprint", "description": "find XSS", "reward": 500}));
        assert!(Collection::Contests.validate(&ok).is_ok());
        let missing = body(json!({"title": "Web2 Sprint"}));
        assert!(matches!(Collection::Contests.validate(&missing), Err(Error::Validation(_))));
    }

    #[test]
    fn blank_and_non_string_fields_rejected() {
        let blank = body(json!({"author": "  ", "content": "great"}));
        assert!(Collection::Testimonials.validate(&blank).is_err());
        let number = body(json!({"author": 7, "content": "great"}));
        assert!(Collection::Testimonials.validate(&number).is_err());
    }

    #[test]
    fn contact_email_must_look_like_an_address() {
        let bad = body(json!({"name": "Ada", "email": "nope", "message": "hi"}));
        assert!(Collection::ContactMessages.validate(&bad).is_err());
        let good = body(json!({"name": "Ada", "email": "ada@example.com", "message": "hi"}));
        assert!(Collection::ContactMessages.validate(&good).is_ok());
    }

    #[test]
    fn proposal_status_patch_restricted() {
        let approve = body(json!({"status": "approved"}));
        assert!(Collection::BreachProposals.validate_patch(&approve).is_ok());
        let bogus = body(json!({"status": "paid"}));
        assert!(Collection::BreachProposals.validate_patch(&bogus).is_err());
        // Other collections carry no status workflow.
        assert!(Collection::Contests.validate_patch(&bogus).is_ok());
    }

    #[test]
    fn patch_cannot_clear_required_field() {
        let clear = body(json!({"title": ""}));
        assert!(Collection::Contests.validate_patch(&clear).is_err());
        let null = body(json!({"title": null}));
        assert!(Collection::Contests.validate_patch(&null).is_err());
        assert!(Collection::Contests.validate_patch(&Body::new()).is_ok());
    }

    #[test]
    fn record_serializes_flat_and_camel_case() -> Result<()> {
        let record = Record {
            id: "r1".into(),
            created_at: "t0".into(),
            updated_at: "t1".into(),
            body: body(json!({"title": "x"})),
        };
        assert_eq!(
            serde_json::to_value(&record)?,
            json!({"id": "r1", "createdAt": "t0", "updatedAt": "t1", "title": "x"})
        );
        Ok(())
    }
}
