//! Document structure.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::document::field_value::FieldValue;
use crate::error::{MicroSearchError, Result};

/// Name of the identifier key in a document's JSON form.
pub const ID_FIELD: &str = "id";

/// Prefix of field names reserved for internal metadata.
pub const RESERVED_FIELD_PREFIX: char = '_';

/// A document: an id plus a map from field name to value.
///
/// The JSON form is flat, `{"id": "...", "title": "...", ...}`. Fields are
/// kept in a `BTreeMap` so serialization order is stable.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Map<String, Value>")]
pub struct Document {
    id: String,
    #[serde(flatten)]
    fields: BTreeMap<String, FieldValue>,
}

impl Document {
    pub fn new<S: Into<String>>(id: S) -> Self {
        Document {
            id: id.into(),
            fields: BTreeMap::new(),
        }
    }

    pub fn builder<S: Into<String>>(id: S) -> DocumentBuilder {
        DocumentBuilder::new(id)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn add_field<S: Into<String>, V: Into<FieldValue>>(&mut self, name: S, value: V) {
        self.fields.insert(name.into(), value.into());
    }

    pub fn get_field(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    pub fn has_field(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    pub fn remove_field(&mut self, name: &str) -> Option<FieldValue> {
        self.fields.remove(name)
    }

    pub fn field_names(&self) -> Vec<&str> {
        self.fields.keys().map(|s| s.as_str()).collect()
    }

    pub fn fields(&self) -> &BTreeMap<String, FieldValue> {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Split into id and fields.
    pub fn into_parts(self) -> (String, BTreeMap<String, FieldValue>) {
        (self.id, self.fields)
    }

    /// Check that the document can be indexed.
    ///
    /// Fails with an indexing error when the id is empty, when a field name is
    /// empty, reserved or equal to `id`, or when a float is not finite.
    pub fn validate(&self) -> Result<()> {
        if self.id.is_empty() {
            return Err(MicroSearchError::indexing("document is missing an id"));
        }
        for (name, value) in &self.fields {
            if name.is_empty() {
                return Err(MicroSearchError::indexing(format!(
                    "document '{}' has an empty field name",
                    self.id
                )));
            }
            if name.starts_with(RESERVED_FIELD_PREFIX) {
                return Err(MicroSearchError::indexing(format!(
                    "document '{}' uses reserved field name '{name}'",
                    self.id
                )));
            }
            if name == ID_FIELD {
                return Err(MicroSearchError::indexing(format!(
                    "document '{}' stores 'id' as a field",
                    self.id
                )));
            }
            if matches!(value, FieldValue::Float(f) if !f.is_finite()) {
                return Err(MicroSearchError::indexing(format!(
                    "document '{}' field '{name}' is not a finite number",
                    self.id
                )));
            }
        }
        Ok(())
    }

    /// Build a document from a JSON value.
    ///
    /// The value must be an object. `id` may be a string or a number; a
    /// missing id yields an empty one, which [`Document::validate`] rejects.
    /// `null` fields are skipped, booleans are stored as text, and nested
    /// objects are an error.
    pub fn from_json_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(map) => Self::try_from(map),
            other => Err(MicroSearchError::indexing(format!(
                "document must be a JSON object, got {}",
                json_type_name(&other)
            ))),
        }
    }

    /// Convert into a JSON object value.
    pub fn to_json_value(&self) -> Result<Value> {
        Ok(serde_json::to_value(self)?)
    }
}

impl TryFrom<Map<String, Value>> for Document {
    type Error = MicroSearchError;

    fn try_from(mut map: Map<String, Value>) -> Result<Self> {
        let id = match map.remove(ID_FIELD) {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(s)) => s,
            Some(Value::Number(n)) => n.to_string(),
            Some(other) => {
                return Err(MicroSearchError::indexing(format!(
                    "document id must be a string or number, got {}",
                    json_type_name(&other)
                )));
            }
        };

        let mut document = Document::new(id);
        for (name, value) in map {
            if let Some(field) = field_value_from_json(&name, value)? {
                document.fields.insert(name, field);
            }
        }
        Ok(document)
    }
}

fn field_value_from_json(name: &str, value: Value) -> Result<Option<FieldValue>> {
    let field = match value {
        Value::Null => return Ok(None),
        Value::Bool(b) => FieldValue::Text(b.to_string()),
        Value::Number(n) => match n.as_i64() {
            Some(i) => FieldValue::Integer(i),
            None => FieldValue::Float(n.as_f64().unwrap_or(f64::NAN)),
        },
        Value::String(s) => FieldValue::Text(s),
        Value::Array(items) => {
            let mut list = Vec::with_capacity(items.len());
            for item in items {
                match item {
                    Value::Null => {}
                    Value::String(s) => list.push(s),
                    Value::Number(n) => list.push(n.to_string()),
                    Value::Bool(b) => list.push(b.to_string()),
                    other => {
                        return Err(MicroSearchError::indexing(format!(
                            "field '{name}' contains a nested {}",
                            json_type_name(&other)
                        )));
                    }
                }
            }
            FieldValue::List(list)
        }
        Value::Object(_) => {
            return Err(MicroSearchError::indexing(format!(
                "field '{name}' is a nested object"
            )));
        }
    };
    Ok(Some(field))
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Builder for [`Document`].
#[derive(Debug)]
pub struct DocumentBuilder {
    document: Document,
}

impl DocumentBuilder {
    pub fn new<S: Into<String>>(id: S) -> Self {
        DocumentBuilder {
            document: Document::new(id),
        }
    }

    pub fn add_text<S: Into<String>, T: Into<String>>(mut self, name: S, value: T) -> Self {
        self.document.add_field(name, FieldValue::Text(value.into()));
        self
    }

    pub fn add_integer<S: Into<String>>(mut self, name: S, value: i64) -> Self {
        self.document.add_field(name, FieldValue::Integer(value));
        self
    }

    pub fn add_float<S: Into<String>>(mut self, name: S, value: f64) -> Self {
        self.document.add_field(name, FieldValue::Float(value));
        self
    }

    pub fn add_list<S, I, T>(mut self, name: S, values: I) -> Self
    where
        S: Into<String>,
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let list = values.into_iter().map(Into::into).collect();
        self.document.add_field(name, FieldValue::List(list));
        self
    }

    pub fn add_field<S: Into<String>>(mut self, name: S, value: FieldValue) -> Self {
        self.document.add_field(name, value);
        self
    }

    pub fn build(self) -> Document {
        self.document
    }
}
