//! Declared fields of a post and the validation that turns a raw header block into typed values.
//!
//! Validation never coerces: a YAML number where a string is declared is a [`SchemaViolation::WrongType`],
//! not a string made out of the number.
use std::fmt;
use std::path::Path;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use log::warn;
use serde_yaml::{Mapping, Value};

use crate::errors::{SchemaError, SchemaViolation};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    String,
    Date,
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldType::String => write!(f, "string"),
            FieldType::Date => write!(f, "date"),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FieldDef {
    pub name: &'static str,
    pub ty: FieldType,
    pub required: bool,
}

const fn field(name: &'static str, ty: FieldType, required: bool) -> FieldDef {
    FieldDef { name, ty, required }
}

/// Fields every post declares in its header block, in the order they are checked.
pub const POST_FIELDS: &[FieldDef] = &[
    field("title", FieldType::String, true),
    field("date", FieldType::Date, true),
    field("category", FieldType::String, true),
    field("description", FieldType::String, true),
    field("tags", FieldType::String, false),
    field("cover", FieldType::String, false),
    field("slug", FieldType::String, false),
];

/// The declared fields of one document, typed.
#[derive(Debug, Clone, PartialEq)]
pub struct PostFields {
    pub title: String,
    pub date: DateTime<Utc>,
    pub category: String,
    pub description: String,
    pub tags: Option<String>,
    pub cover: Option<String>,
    pub slug: Option<String>,
}

/// Validate a header block against [`POST_FIELDS`].
///
/// The first violation in declaration order is reported, with the document path and field name.
pub fn validate(header: &Mapping, path: &Path) -> Result<PostFields, SchemaError> {
    for (key, _) in header {
        let declared = key
            .as_str()
            .is_some_and(|key| POST_FIELDS.iter().any(|def| def.name == key));
        if !declared {
            warn!(target: "content", "{}: ignoring undeclared field {:?}", path.display(), key);
        }
    }

    let fail = |field: &str, violation: SchemaViolation| SchemaError {
        path: path.to_path_buf(),
        field: field.to_string(),
        violation,
    };

    let required_string = |name: &str| -> Result<String, SchemaError> {
        optional_string(header, name)
            .map_err(|violation| fail(name, violation))?
            .ok_or_else(|| fail(name, SchemaViolation::Missing))
    };
    let optional = |name: &str| -> Result<Option<String>, SchemaError> {
        optional_string(header, name).map_err(|violation| fail(name, violation))
    };

    let title = required_string("title")?;
    let date = match header.get("date") {
        None | Some(Value::Null) => return Err(fail("date", SchemaViolation::Missing)),
        Some(Value::String(raw)) => {
            parse_date(raw).ok_or_else(|| fail("date", SchemaViolation::InvalidDate(raw.clone())))?
        }
        Some(other) => {
            return Err(fail(
                "date",
                SchemaViolation::WrongType {
                    expected: FieldType::Date,
                    found: value_kind(other),
                },
            ));
        }
    };
    let category = required_string("category")?;
    let description = required_string("description")?;

    Ok(PostFields {
        title,
        date,
        category,
        description,
        tags: optional("tags")?,
        cover: optional("cover")?,
        slug: optional("slug")?,
    })
}

fn optional_string(header: &Mapping, name: &str) -> Result<Option<String>, SchemaViolation> {
    match header.get(name) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(value)) => Ok(Some(value.clone())),
        Some(other) => Err(SchemaViolation::WrongType {
            expected: FieldType::String,
            found: value_kind(other),
        }),
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Sequence(_) => "list",
        Value::Mapping(_) => "mapping",
        Value::Tagged(_) => "tagged value",
    }
}

/// Parse a publish date. Dates without a time or offset are taken as UTC.
pub fn parse_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();

    if let Ok(date) = DateTime::parse_from_rfc3339(raw) {
        return Some(date.with_timezone(&Utc));
    }

    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M"] {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(datetime.and_utc());
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|datetime| datetime.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(yaml: &str) -> Mapping {
        serde_yaml::from_str(yaml).unwrap()
    }

    const COMPLETE: &str = r#"
title: Hello
date: 2024-03-01
category: dev
description: First post
"#;

    #[test]
    fn test_validate_complete_header() {
        let fields = validate(&header(COMPLETE), Path::new("hello.mdx")).unwrap();

        assert_eq!(fields.title, "Hello");
        assert_eq!(fields.category, "dev");
        assert_eq!(fields.date.format("%Y-%m-%d").to_string(), "2024-03-01");
        assert_eq!(fields.tags, None);
        assert_eq!(fields.slug, None);
    }

    #[test]
    fn test_validate_optional_fields() {
        let yaml = format!("{COMPLETE}tags: rust, blog\ncover: /images/cover.png\nslug: hello-world\n");
        let fields = validate(&header(&yaml), Path::new("hello.mdx")).unwrap();

        assert_eq!(fields.tags.as_deref(), Some("rust, blog"));
        assert_eq!(fields.cover.as_deref(), Some("/images/cover.png"));
        assert_eq!(fields.slug.as_deref(), Some("hello-world"));
    }

    #[test]
    fn test_missing_category_names_path_and_field() {
        let yaml = "title: Hello\ndate: 2024-03-01\ndescription: First post\n";
        let err = validate(&header(yaml), Path::new("dev/hello.mdx")).unwrap_err();

        assert_eq!(err.field, "category");
        assert_eq!(err.path, Path::new("dev/hello.mdx"));
        assert_eq!(err.violation, SchemaViolation::Missing);

        let message = err.to_string();
        assert!(message.contains("dev/hello.mdx"));
        assert!(message.contains("category"));
    }

    #[test]
    fn test_null_required_field_is_missing() {
        let yaml = "title: ~\ndate: 2024-03-01\ncategory: dev\ndescription: x\n";
        let err = validate(&header(yaml), Path::new("a.mdx")).unwrap_err();

        assert_eq!(err.field, "title");
        assert_eq!(err.violation, SchemaViolation::Missing);
    }

    #[test]
    fn test_no_implicit_coercion() {
        let yaml = "title: 42\ndate: 2024-03-01\ncategory: dev\ndescription: x\n";
        let err = validate(&header(yaml), Path::new("a.mdx")).unwrap_err();

        assert_eq!(err.field, "title");
        assert_eq!(
            err.violation,
            SchemaViolation::WrongType {
                expected: FieldType::String,
                found: "number"
            }
        );

        let yaml = format!("{COMPLETE}tags: [rust, blog]\n");
        let err = validate(&header(&yaml), Path::new("a.mdx")).unwrap_err();
        assert_eq!(err.field, "tags");
        assert!(matches!(err.violation, SchemaViolation::WrongType { found: "list", .. }));
    }

    #[test]
    fn test_invalid_date() {
        let yaml = "title: a\ndate: yesterday\ncategory: dev\ndescription: x\n";
        let err = validate(&header(yaml), Path::new("a.mdx")).unwrap_err();

        assert_eq!(err.field, "date");
        assert_eq!(err.violation, SchemaViolation::InvalidDate("yesterday".into()));
    }

    #[test]
    fn test_parse_date_formats() {
        let expected = "2024-03-01 00:00";
        for raw in [
            "2024-03-01",
            "2024-03-01T00:00:00Z",
            "2024-03-01T08:00:00+08:00",
            "2024-03-01 00:00:00",
            "2024-03-01T00:00",
        ] {
            let date = parse_date(raw).unwrap_or_else(|| panic!("{raw} should parse"));
            assert_eq!(date.format("%Y-%m-%d %H:%M").to_string(), expected, "{raw}");
        }

        assert!(parse_date("03/01/2024").is_none());
        assert!(parse_date("").is_none());
    }
}
