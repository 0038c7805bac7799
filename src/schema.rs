//! Shape checks for raw topic records.
//!
//! A schema is an ordered list of required fields with their expected JSON
//! type. Validation is pure: skipped items are reported back by index and
//! the caller decides how to log them.

use serde_json::Value;

use crate::error::{CloudError, Result};

/// Expected JSON type of a field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldType {
    String,
    Number,
    Boolean,
    /// Any JSON object, contents unchecked
    Object,
    /// A JSON object that must itself match a sub-schema
    Nested(Schema),
}

impl FieldType {
    fn matches(&self, value: &Value) -> bool {
        match self {
            FieldType::String => value.is_string(),
            FieldType::Number => value.is_number(),
            FieldType::Boolean => value.is_boolean(),
            FieldType::Object | FieldType::Nested(_) => value.is_object(),
        }
    }
}

/// How nested sub-schemas are walked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NestedCheck {
    /// Every field at every level must conform.
    #[default]
    Full,
    /// The walk stops at the first nested field and returns its verdict,
    /// leaving later fields of the same level unchecked.
    FirstBranch,
}

/// Ordered set of required fields.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Schema {
    fields: Vec<(String, FieldType)>,
    check: NestedCheck,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Require a field of the given type.
    pub fn field(mut self, name: impl Into<String>, ty: FieldType) -> Self {
        self.fields.push((name.into(), ty));
        self
    }

    pub fn with_nested_check(mut self, check: NestedCheck) -> Self {
        self.check = check;
        self
    }

    /// The shape every topic record must have.
    pub fn topic() -> Self {
        Schema::new()
            .field("label", FieldType::String)
            .field("sentimentScore", FieldType::Number)
            .field("sentiment", FieldType::Object)
            .field("volume", FieldType::Number)
            .field("id", FieldType::String)
    }

    /// Whether `item` has every field with the expected type.
    pub fn conforms(&self, item: &Value) -> bool {
        self.conforms_with(item, self.check)
    }

    fn conforms_with(&self, item: &Value, check: NestedCheck) -> bool {
        let Some(map) = item.as_object() else {
            return false;
        };

        for (name, ty) in &self.fields {
            let Some(value) = map.get(name) else {
                return false;
            };
            match ty {
                FieldType::Nested(sub) => {
                    let ok = sub.conforms_with(value, check);
                    if check == NestedCheck::FirstBranch || !ok {
                        return ok;
                    }
                }
                _ => {
                    if !ty.matches(value) {
                        return false;
                    }
                }
            }
        }
        true
    }
}

/// Outcome of validating a batch of records.
#[derive(Debug, Default)]
pub struct Validation {
    /// Conforming records, in input order
    pub valid: Vec<Value>,
    /// Input index of each entry in `valid`
    pub accepted: Vec<usize>,
    /// Input indices of skipped records
    pub rejected: Vec<usize>,
}

/// Check every item against `schema`.
///
/// With `ignore_bad == false` the first offending item aborts validation with
/// [`CloudError::SchemaViolation`] and nothing is returned.
pub fn validate(items: &[Value], schema: &Schema, ignore_bad: bool) -> Result<Validation> {
    let mut out = Validation::default();

    for (index, item) in items.iter().enumerate() {
        if schema.conforms(item) {
            out.valid.push(item.clone());
            out.accepted.push(index);
        } else if ignore_bad {
            out.rejected.push(index);
        } else {
            return Err(CloudError::SchemaViolation { index });
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn good() -> Value {
        json!({"id": "a", "label": "Alpha", "volume": 10, "sentimentScore": 55, "sentiment": {}})
    }

    #[test]
    fn conforming_item_passes_unchanged() {
        let v = validate(&[good()], &Schema::topic(), false).unwrap();
        assert_eq!(v.valid, vec![good()]);
        assert_eq!(v.accepted, vec![0]);
        assert!(v.rejected.is_empty());
    }

    #[test]
    fn missing_field_is_rejected() {
        let mut bad = good();
        bad.as_object_mut().unwrap().remove("label");
        assert!(!Schema::topic().conforms(&bad));
    }

    #[test]
    fn wrong_type_is_rejected() {
        let mut bad = good();
        bad["volume"] = json!("10");
        assert!(!Schema::topic().conforms(&bad));

        let mut bad = good();
        bad["sentiment"] = json!(null);
        assert!(!Schema::topic().conforms(&bad));
    }

    #[test]
    fn fails_fast_on_first_offender() {
        let mut bad = good();
        bad["id"] = json!(7);
        let items = vec![good(), bad.clone(), bad];
        let err = validate(&items, &Schema::topic(), false).unwrap_err();
        assert!(matches!(err, CloudError::SchemaViolation { index: 1 }));
    }

    #[test]
    fn ignore_bad_skips_and_reports() {
        let mut bad = good();
        bad["label"] = json!(false);
        let items = vec![bad, good(), json!(42), good()];
        let v = validate(&items, &Schema::topic(), true).unwrap();
        assert_eq!(v.valid.len(), 2);
        assert_eq!(v.accepted, vec![1, 3]);
        assert_eq!(v.rejected, vec![0, 2]);
    }

    #[test]
    fn nested_schema_full_and_first_branch() {
        let sub = Schema::new().field("positive", FieldType::Number);
        let full = Schema::new()
            .field("sentiment", FieldType::Nested(sub.clone()))
            .field("id", FieldType::String);
        let shallow = full.clone().with_nested_check(NestedCheck::FirstBranch);

        let item = json!({"sentiment": {"positive": 3}, "id": 12});
        assert!(!full.conforms(&item));
        // The first-branch walk never reaches `id`.
        assert!(shallow.conforms(&item));

        let item = json!({"sentiment": {"positive": "x"}, "id": "a"});
        assert!(!full.conforms(&item));
        assert!(!shallow.conforms(&item));
    }
}
