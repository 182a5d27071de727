//! Payload Validator: the only way to construct a `QueryPayload`.
//!
//! Everything upstream of this point is untrusted suggestion material; a
//! payload that makes it through here is guaranteed to name a known model,
//! carry flat string filters on known fields, and hold canonical values.

use serde_json::Value;

use crate::canonical::Canonicalizer;
use crate::error::{Result, SchemaError, ShapeError};
use crate::schema::Schema;

use super::types::{FilterSet, QueryPayload};

/// Shape-check the collaborator's explicit filters into a flat string map.
///
/// A non-string value anywhere is a `ShapeError`; it signals a malformed
/// upstream suggestion rather than something worth coercing.
pub fn flatten_filters(raw: &serde_json::Map<String, Value>) -> Result<FilterSet> {
    let mut filters = FilterSet::new();
    for (field, value) in raw {
        match value {
            Value::String(s) => {
                filters.insert(field.clone(), s.clone());
            }
            _ => {
                return Err(ShapeError::NonStringValue {
                    field: field.clone(),
                }
                .into())
            }
        }
    }
    Ok(filters)
}

/// Validate the resolved model and filters into an executable payload.
///
/// Every filter value is canonicalized here, so an explicit filter that
/// bypassed promotion and defaults still arrives canonical.
pub fn validate(
    schema: &Schema,
    model: Option<String>,
    filters: FilterSet,
    canonicalizer: &Canonicalizer,
) -> Result<QueryPayload> {
    let model = match model {
        Some(m) if !m.is_empty() => m,
        _ => return Err(SchemaError::MissingModel.into()),
    };

    let fields = schema
        .fields_of(&model)
        .ok_or_else(|| SchemaError::UnknownModel(model.clone()))?;

    let mut canonical = FilterSet::new();
    for (field, value) in filters {
        if !fields.contains(&field) {
            return Err(SchemaError::UnknownField {
                model: model.clone(),
                field,
            }
            .into());
        }
        canonical.insert(field, canonicalizer.canonicalize(&value));
    }

    Ok(QueryPayload::new(model, canonical))
}
