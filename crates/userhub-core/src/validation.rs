//! Input schemas for the user write paths.
//!
//! A request body is screened field by field before it reaches the
//! schema: a known field holding the wrong JSON type is reported as a type
//! error and dropped, so that the remaining fields are still checked and
//! every violation comes back in one response. Unknown keys are ignored.

use std::collections::HashMap;

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use validator::{Validate, ValidationError, ValidationErrors};

use crate::domain::{NewUser, UserUpdate};
use crate::error::DomainError;

const NAME_MAX_CHARS: usize = 100;

/// JSON type a field accepts.
#[derive(Debug, Clone, Copy)]
enum Kind {
    String,
    Boolean,
}

impl Kind {
    fn accepts(self, value: &Value) -> bool {
        match self {
            Kind::String => value.is_string(),
            Kind::Boolean => value.is_boolean(),
        }
    }

    fn name(self) -> &'static str {
        match self {
            Kind::String => "a string",
            Kind::Boolean => "a boolean",
        }
    }
}

/// A body field: JSON key, struct field name, label used in messages.
struct Field {
    key: &'static str,
    name: &'static str,
    label: &'static str,
    kind: Kind,
}

const EMAIL: Field = Field {
    key: "email",
    name: "email",
    label: "Email",
    kind: Kind::String,
};
const PASSWORD: Field = Field {
    key: "password",
    name: "password",
    label: "Password",
    kind: Kind::String,
};
const FIRST_NAME: Field = Field {
    key: "firstName",
    name: "first_name",
    label: "First name",
    kind: Kind::String,
};
const LAST_NAME: Field = Field {
    key: "lastName",
    name: "last_name",
    label: "Last name",
    kind: Kind::String,
};
const IS_ACTIVE: Field = Field {
    key: "isActive",
    name: "is_active",
    label: "Active status",
    kind: Kind::Boolean,
};

/// Field declaration order; messages are reported in this order.
const CREATE_FIELDS: [Field; 4] = [EMAIL, PASSWORD, FIRST_NAME, LAST_NAME];
const UPDATE_FIELDS: [Field; 5] = [EMAIL, PASSWORD, FIRST_NAME, LAST_NAME, IS_ACTIVE];

/// Body of `POST /users`.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserInput {
    #[validate(
        required(message = "Email is required"),
        email(message = "Please provide a valid email address")
    )]
    pub email: Option<String>,

    #[validate(
        required(message = "Password is required"),
        length(min = 6, message = "Password must be at least 6 characters long")
    )]
    pub password: Option<String>,

    #[validate(
        required(message = "First name is required"),
        custom(function = "first_name_length")
    )]
    pub first_name: Option<String>,

    #[validate(
        required(message = "Last name is required"),
        custom(function = "last_name_length")
    )]
    pub last_name: Option<String>,
}

/// Body of `PUT /users/{id}`.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserInput {
    #[validate(email(message = "Please provide a valid email address"))]
    pub email: Option<String>,

    #[validate(length(min = 6, message = "Password must be at least 6 characters long"))]
    pub password: Option<String>,

    #[validate(custom(function = "first_name_length"))]
    pub first_name: Option<String>,

    #[validate(custom(function = "last_name_length"))]
    pub last_name: Option<String>,

    pub is_active: Option<bool>,
}

impl CreateUserInput {
    /// Run the create schema over a request body, collecting every violation.
    pub fn parse(body: &Value) -> Result<NewUser, DomainError> {
        let (input, type_errors) = screen::<Self>(body, &CREATE_FIELDS)?;
        let messages = collect_messages(input.validate(), &type_errors, &CREATE_FIELDS);
        if !messages.is_empty() {
            return Err(DomainError::Validation(messages));
        }

        match (input.email, input.password, input.first_name, input.last_name) {
            (Some(email), Some(password), Some(first_name), Some(last_name)) => Ok(NewUser {
                email,
                password,
                first_name,
                last_name,
            }),
            // `required` above guarantees all four are present
            _ => Err(DomainError::Internal(
                "create schema accepted an incomplete payload".to_string(),
            )),
        }
    }
}

impl UpdateUserInput {
    fn is_empty(&self) -> bool {
        self.email.is_none()
            && self.password.is_none()
            && self.first_name.is_none()
            && self.last_name.is_none()
            && self.is_active.is_none()
    }

    /// Run the update schema: per-field rules plus "at least one field".
    pub fn parse(body: &Value) -> Result<UserUpdate, DomainError> {
        let (input, type_errors) = screen::<Self>(body, &UPDATE_FIELDS)?;
        let mut messages = collect_messages(input.validate(), &type_errors, &UPDATE_FIELDS);
        // a mistyped field still counts as provided
        if input.is_empty() && type_errors.is_empty() {
            messages.push("At least one field must be provided".to_string());
        }
        if !messages.is_empty() {
            return Err(DomainError::Validation(messages));
        }

        Ok(UserUpdate {
            email: input.email,
            password: input.password,
            first_name: input.first_name,
            last_name: input.last_name,
            is_active: input.is_active,
        })
    }
}

/// Keep the known fields whose JSON type matches and report the others.
///
/// Returns the deserialized input and the type errors keyed by field name.
fn screen<T: DeserializeOwned>(
    body: &Value,
    fields: &[Field],
) -> Result<(T, HashMap<&'static str, String>), DomainError> {
    let Some(object) = body.as_object() else {
        return Err(DomainError::Validation(vec![
            "Request body must be a JSON object".to_string(),
        ]));
    };

    let mut accepted = Map::new();
    let mut type_errors = HashMap::new();
    for field in fields {
        match object.get(field.key) {
            Some(value) if field.kind.accepts(value) => {
                accepted.insert(field.key.to_string(), value.clone());
            }
            Some(_) => {
                let message = format!("{} must be {}", field.label, field.kind.name());
                type_errors.insert(field.name, message);
            }
            None => {}
        }
    }

    // every accepted value already has the declared type
    let input = serde_json::from_value(Value::Object(accepted))
        .map_err(|e| DomainError::Internal(format!("screened body rejected: {e}")))?;

    Ok((input, type_errors))
}

fn first_name_length(value: &str) -> Result<(), ValidationError> {
    name_length(value, "First name")
}

fn last_name_length(value: &str) -> Result<(), ValidationError> {
    name_length(value, "Last name")
}

/// 1..=100 characters, counted as chars rather than bytes.
fn name_length(value: &str, label: &str) -> Result<(), ValidationError> {
    let message = match value.chars().count() {
        0 => format!("{label} cannot be empty"),
        n if n > NAME_MAX_CHARS => format!("{label} cannot exceed {NAME_MAX_CHARS} characters"),
        _ => return Ok(()),
    };
    let mut error = ValidationError::new("length");
    error.message = Some(message.into());
    Err(error)
}

/// Flatten type errors and rule violations into messages in field order.
///
/// A mistyped field reports only its type error; it was dropped before
/// validation, so its `required` rule would otherwise fire as well.
fn collect_messages(
    result: Result<(), ValidationErrors>,
    type_errors: &HashMap<&'static str, String>,
    fields: &[Field],
) -> Vec<String> {
    let errors = match result {
        Ok(()) => ValidationErrors::new(),
        Err(errors) => errors,
    };
    let by_field = errors.field_errors();

    let mut messages = Vec::new();
    for field in fields {
        if let Some(message) = type_errors.get(field.name) {
            messages.push(message.clone());
            continue;
        }
        let Some(errs) = by_field.get(field.name) else {
            continue;
        };
        messages.extend(errs.iter().map(|err| match &err.message {
            Some(message) => message.to_string(),
            None => err.code.to_string(),
        }));
    }
    messages
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn create(value: Value) -> Result<NewUser, DomainError> {
        CreateUserInput::parse(&value)
    }

    fn update(value: Value) -> Result<UserUpdate, DomainError> {
        UpdateUserInput::parse(&value)
    }

    fn messages(result: Result<impl std::fmt::Debug, DomainError>) -> Vec<String> {
        match result {
            Err(DomainError::Validation(messages)) => messages,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_valid_create_payload() {
        let user = create(json!({
            "email": "a@b.com",
            "password": "secret1",
            "firstName": "A",
            "lastName": "B",
        }))
        .unwrap();

        assert_eq!(user.email, "a@b.com");
        assert_eq!(user.password, "secret1");
        assert_eq!(user.first_name, "A");
        assert_eq!(user.last_name, "B");
    }

    #[test]
    fn test_create_reports_every_missing_field() {
        let messages = messages(create(json!({})));

        assert_eq!(
            messages,
            vec![
                "Email is required",
                "Password is required",
                "First name is required",
                "Last name is required",
            ]
        );
    }

    #[test]
    fn test_create_collects_all_rule_violations() {
        let messages = messages(create(json!({
            "email": "not-an-email",
            "password": "123",
            "firstName": "",
            "lastName": "x".repeat(101),
        })));

        assert_eq!(
            messages,
            vec![
                "Please provide a valid email address",
                "Password must be at least 6 characters long",
                "First name cannot be empty",
                "Last name cannot exceed 100 characters",
            ]
        );
    }

    #[test]
    fn test_name_length_counts_characters() {
        let result = create(json!({
            "email": "a@b.com",
            "password": "secret1",
            "firstName": "é".repeat(100),
            "lastName": "B",
        }));

        assert!(result.is_ok());
    }

    #[test]
    fn test_unknown_fields_are_ignored() {
        let user = create(json!({
            "email": "a@b.com",
            "password": "secret1",
            "firstName": "A",
            "lastName": "B",
            "isAdmin": true,
        }))
        .unwrap();

        assert_eq!(user.email, "a@b.com");
    }

    #[test]
    fn test_empty_update_is_rejected() {
        let messages = messages(update(json!({})));
        assert_eq!(messages, vec!["At least one field must be provided"]);
    }

    #[test]
    fn test_update_with_only_unknown_fields_is_rejected() {
        let messages = messages(update(json!({ "role": "admin" })));
        assert_eq!(messages, vec!["At least one field must be provided"]);
    }

    #[test]
    fn test_update_with_only_is_active() {
        let update = update(json!({ "isActive": false })).unwrap();

        assert_eq!(update.is_active, Some(false));
        assert!(update.email.is_none());
        assert!(update.password.is_none());
        assert!(update.first_name.is_none());
        assert!(update.last_name.is_none());
    }

    #[test]
    fn test_update_applies_field_rules() {
        let messages = messages(update(json!({
            "email": "nope",
            "password": "short",
        })));

        assert_eq!(
            messages,
            vec![
                "Please provide a valid email address",
                "Password must be at least 6 characters long",
            ]
        );
    }

    #[test]
    fn test_wrong_types_are_reported_with_the_other_violations() {
        let messages = messages(create(json!({ "email": 5, "password": "1" })));

        assert_eq!(
            messages,
            vec![
                "Email must be a string",
                "Password must be at least 6 characters long",
                "First name is required",
                "Last name is required",
            ]
        );
    }

    #[test]
    fn test_null_is_a_wrong_type() {
        let messages = messages(create(json!({
            "email": null,
            "password": "secret1",
            "firstName": "A",
            "lastName": ["B"],
        })));

        assert_eq!(
            messages,
            vec!["Email must be a string", "Last name must be a string"]
        );
    }

    #[test]
    fn test_update_with_mistyped_is_active() {
        let only_flag = messages(update(json!({ "isActive": "yes" })));
        assert_eq!(only_flag, vec!["Active status must be a boolean"]);

        let mixed = messages(update(json!({ "firstName": "", "isActive": 1 })));
        assert_eq!(
            mixed,
            vec!["First name cannot be empty", "Active status must be a boolean"]
        );
    }

    #[test]
    fn test_body_must_be_an_object() {
        for body in [json!([]), json!("text"), json!(null), json!(42)] {
            assert_eq!(
                messages(create(body)),
                vec!["Request body must be a JSON object"]
            );
        }
    }
}
