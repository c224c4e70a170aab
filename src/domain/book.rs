//! The `Book` resource: identifier, stored shape, and payload validation.
//!
//! Validation is a plain function over the decoded request payload. It does not depend on the
//! store, so every backend applies exactly the same rules on create and on update.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::fmt;
use utoipa::ToSchema;
use uuid::Uuid;

const HYPHENATED_LEN: usize = 36;

/// Store-assigned identifier of a book. Serialized as a hyphenated UUID string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookId(Uuid);

impl BookId {
    /// Parses a path segment into an identifier.
    ///
    /// Only the 36-character hyphenated form is accepted, so each book has a single URL.
    pub fn parse(raw: &str) -> Option<Self> {
        if raw.len() != HYPHENATED_LEN {
            return None;
        }
        Uuid::try_parse(raw).ok().map(Self)
    }

    pub fn new_random() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl From<Uuid> for BookId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

/// The four business fields of a book, already validated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct BookFields {
    pub title: String,
    pub author: String,
    pub year: i32,
    pub genre: String,
}

/// A persisted book as returned to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Book {
    #[schema(value_type = String, format = Uuid)]
    pub id: BookId,
    pub title: String,
    pub author: String,
    pub year: i32,
    pub genre: String,
}

impl Book {
    pub fn from_parts(id: BookId, fields: BookFields) -> Self {
        Self {
            id,
            title: fields.title,
            author: fields.author,
            year: fields.year,
            genre: fields.genre,
        }
    }

    pub fn fields(&self) -> BookFields {
        BookFields {
            title: self.title.clone(),
            author: self.author.clone(),
            year: self.year,
            genre: self.genre.clone(),
        }
    }
}

/// Raw request body for create and update.
///
/// Every field is kept as an untyped JSON value so that a wrong type is reported by
/// [`validate_payload`] alongside missing fields, instead of failing deserialization.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct BookPayload {
    #[serde(default)]
    #[schema(value_type = String, example = "The Great Gatsby")]
    pub title: Option<JsonValue>,
    #[serde(default)]
    #[schema(value_type = String, example = "F. Scott Fitzgerald")]
    pub author: Option<JsonValue>,
    #[serde(default)]
    #[schema(value_type = i32, example = 1925)]
    pub year: Option<JsonValue>,
    #[serde(default)]
    #[schema(value_type = String, example = "Fiction")]
    pub genre: Option<JsonValue>,
}

impl From<BookFields> for BookPayload {
    fn from(fields: BookFields) -> Self {
        Self {
            title: Some(JsonValue::from(fields.title)),
            author: Some(JsonValue::from(fields.author)),
            year: Some(JsonValue::from(fields.year)),
            genre: Some(JsonValue::from(fields.genre)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum FieldProblem {
    Missing,
    Empty,
    WrongType,
    OutOfRange,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct FieldError {
    pub field: String,
    pub problem: FieldProblem,
}

/// Every offending field of a rejected payload, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub fields: Vec<FieldError>,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.summary(), self.field_names().join(", "))
    }
}

impl std::error::Error for ValidationError {}

impl ValidationError {
    /// Caller-facing message: absent fields take precedence over malformed ones.
    pub fn summary(&self) -> &'static str {
        let incomplete = self
            .fields
            .iter()
            .any(|f| matches!(f.problem, FieldProblem::Missing | FieldProblem::Empty));
        if incomplete {
            "All fields are required"
        } else {
            "Invalid field values"
        }
    }

    pub fn field_names(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.field.as_str()).collect()
    }
}

fn check_text(name: &str, value: Option<&JsonValue>, errors: &mut Vec<FieldError>) -> String {
    let problem = match value {
        None | Some(JsonValue::Null) => FieldProblem::Missing,
        Some(JsonValue::String(s)) if s.trim().is_empty() => FieldProblem::Empty,
        Some(JsonValue::String(s)) => return s.clone(),
        Some(_) => FieldProblem::WrongType,
    };
    errors.push(FieldError {
        field: name.to_string(),
        problem,
    });
    String::new()
}

fn check_year(value: Option<&JsonValue>, errors: &mut Vec<FieldError>) -> i32 {
    let parsed: Result<i64, FieldProblem> = match value {
        None | Some(JsonValue::Null) => Err(FieldProblem::Missing),
        Some(JsonValue::Number(n)) => n.as_i64().ok_or(FieldProblem::WrongType),
        Some(JsonValue::String(s)) if s.trim().is_empty() => Err(FieldProblem::Empty),
        Some(JsonValue::String(s)) => s.trim().parse::<i64>().map_err(|_| FieldProblem::WrongType),
        Some(_) => Err(FieldProblem::WrongType),
    };
    // A zero year counts as absent, the same as a missing one.
    let parsed = parsed.and_then(|n| match n {
        0 => Err(FieldProblem::Missing),
        n => i32::try_from(n).map_err(|_| FieldProblem::OutOfRange),
    });
    match parsed {
        Ok(year) => year,
        Err(problem) => {
            errors.push(FieldError {
                field: "year".to_string(),
                problem,
            });
            0
        }
    }
}

/// Checks a create/update payload and returns the typed fields.
///
/// Text fields must be non-blank JSON strings and are kept verbatim. `year` must be an
/// non-zero integer, either as a JSON number or as a string holding one, within `i32` range.
pub fn validate_payload(payload: &BookPayload) -> Result<BookFields, ValidationError> {
    let mut errors = Vec::new();
    let title = check_text("title", payload.title.as_ref(), &mut errors);
    let author = check_text("author", payload.author.as_ref(), &mut errors);
    let year = check_year(payload.year.as_ref(), &mut errors);
    let genre = check_text("genre", payload.genre.as_ref(), &mut errors);

    if !errors.is_empty() {
        return Err(ValidationError { fields: errors });
    }
    Ok(BookFields {
        title,
        author,
        year,
        genre,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload(v: JsonValue) -> BookPayload {
        serde_json::from_value(v).unwrap()
    }

    #[test]
    fn accepts_complete_payload() {
        let fields = validate_payload(&payload(json!({
            "title": "The Great Gatsby",
            "author": "F. Scott Fitzgerald",
            "year": 1925,
            "genre": "Fiction"
        })))
        .unwrap();
        assert_eq!(fields.title, "The Great Gatsby");
        assert_eq!(fields.year, 1925);
    }

    #[test]
    fn reports_every_missing_field() {
        let err = validate_payload(&payload(json!({ "author": "F. Scott Fitzgerald", "year": 1925 })))
            .unwrap_err();
        assert_eq!(err.field_names(), vec!["title", "genre"]);
        assert_eq!(err.summary(), "All fields are required");
    }

    #[test]
    fn rejects_non_numeric_year() {
        let err = validate_payload(&payload(json!({
            "title": "The Great Gatsby",
            "author": "F. Scott Fitzgerald",
            "year": "invalid",
            "genre": "Fiction"
        })))
        .unwrap_err();
        assert_eq!(
            err.fields,
            vec![FieldError {
                field: "year".into(),
                problem: FieldProblem::WrongType
            }]
        );
        assert_eq!(err.summary(), "Invalid field values");
    }

    #[test]
    fn year_string_is_cast() {
        let fields = validate_payload(&payload(json!({
            "title": "Dune",
            "author": "Frank Herbert",
            "year": " 1965 ",
            "genre": "Science Fiction"
        })))
        .unwrap();
        assert_eq!(fields.year, 1965);
    }

    #[test]
    fn blank_and_mistyped_text() {
        let err = validate_payload(&payload(json!({
            "title": "   ",
            "author": 42,
            "year": 1925.5,
            "genre": null
        })))
        .unwrap_err();
        let problems: Vec<FieldProblem> = err.fields.iter().map(|f| f.problem).collect();
        assert_eq!(
            problems,
            vec![
                FieldProblem::Empty,
                FieldProblem::WrongType,
                FieldProblem::WrongType,
                FieldProblem::Missing
            ]
        );
    }

    #[test]
    fn year_out_of_range() {
        let err = validate_payload(&payload(json!({
            "title": "t",
            "author": "a",
            "year": 1_099_511_627_776_i64,
            "genre": "g"
        })))
        .unwrap_err();
        assert_eq!(err.fields[0].problem, FieldProblem::OutOfRange);
    }

    #[test]
    fn zero_year_is_missing() {
        for year in [json!(0), json!("0")] {
            let err = validate_payload(&payload(json!({
                "title": "t",
                "author": "a",
                "year": year,
                "genre": "g"
            })))
            .unwrap_err();
            assert_eq!(
                err.fields,
                vec![FieldError {
                    field: "year".into(),
                    problem: FieldProblem::Missing
                }]
            );
            assert_eq!(err.summary(), "All fields are required");
        }
    }

    #[test]
    fn book_id_parsing() {
        assert!(BookId::parse("not-an-id").is_none());
        let id = BookId::new_random();
        assert_eq!(BookId::parse(&id.to_string()), Some(id));
    }

    #[test]
    fn book_id_only_accepts_hyphenated_form() {
        let id = BookId::new_random();
        let uuid = id.as_uuid();
        assert!(BookId::parse(&uuid.simple().to_string()).is_none());
        assert!(BookId::parse(&uuid.braced().to_string()).is_none());
        assert!(BookId::parse(&uuid.urn().to_string()).is_none());
        assert!(BookId::parse(&format!(" {} ", id)).is_none());
        assert_eq!(BookId::parse(&uuid.hyphenated().to_string()), Some(id));
    }
}
