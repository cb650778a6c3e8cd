//! Explicit field decoding over the generic TOML tree.
//!
//! Every manifest field is pulled out of a [`toml::Value`] by a dedicated
//! function. Scalars that are absent fall back to their empty value; a
//! present value of the wrong primitive type is always an error.
//!
//! The two "string or table" fields, [`Route`] and [`Source`], are decoded
//! by [`decode_route`] and [`decode_source`], which select the variant from
//! the runtime shape and reject anything else.

use std::collections::BTreeMap;

use toml::{Table, Value};

use crate::error::{BlueprintError, Result};
use crate::manifest::schema::{Route, Source};

const STRING_OR_TABLE: &str = "a string or a table";

/// Name of a value's runtime shape, for error messages.
pub fn shape_name(value: &Value) -> &'static str {
    match value {
        Value::String(_) => "string",
        Value::Integer(_) => "integer",
        Value::Float(_) => "float",
        Value::Boolean(_) => "boolean",
        Value::Datetime(_) => "datetime",
        Value::Array(_) => "array",
        Value::Table(_) => "table",
    }
}

/// Decode a route: a plain path string or `{ private = <bool> }`.
///
/// # Errors
///
/// - `ShapeError` if the value is neither a string nor a table
/// - `MissingSubfield` / `WrongType` if the table lacks a boolean `private`
pub fn decode_route(field: &str, value: &Value) -> Result<Route> {
    match value {
        Value::String(path) => Ok(Route::Path(path.clone())),
        Value::Table(table) => {
            let fields = Fields::from_table(field, table);
            Ok(Route::Config {
                private: fields.required_bool("private")?,
            })
        }
        other => Err(BlueprintError::ShapeError {
            field: field.to_string(),
            expected: STRING_OR_TABLE,
            found: shape_name(other),
        }),
    }
}

/// Decode a component source: a plain path string or `{ url, digest }`.
///
/// # Errors
///
/// - `ShapeError` if the value is neither a string nor a table
/// - `MissingSubfield` / `WrongType` if `url` or `digest` is absent or not a string
pub fn decode_source(field: &str, value: &Value) -> Result<Source> {
    match value {
        Value::String(path) => Ok(Source::Path(path.clone())),
        Value::Table(table) => {
            let fields = Fields::from_table(field, table);
            Ok(Source::Remote {
                url: fields.required_string("url")?,
                digest: fields.required_string("digest")?,
            })
        }
        other => Err(BlueprintError::ShapeError {
            field: field.to_string(),
            expected: STRING_OR_TABLE,
            found: shape_name(other),
        }),
    }
}

/// A table being decoded, together with its dotted path for error messages.
#[derive(Debug, Clone)]
pub struct Fields<'a> {
    path: String,
    table: &'a Table,
}

impl<'a> Fields<'a> {
    /// Wrap a value that must be a table.
    ///
    /// # Errors
    ///
    /// Returns `ShapeError` if `value` is not a table.
    pub fn new(path: impl Into<String>, value: &'a Value) -> Result<Self> {
        match value {
            Value::Table(table) => Ok(Self::from_table(path, table)),
            other => Err(BlueprintError::ShapeError {
                field: path.into(),
                expected: "a table",
                found: shape_name(other),
            }),
        }
    }

    /// Wrap a table that is already known to be one.
    pub fn from_table(path: impl Into<String>, table: &'a Table) -> Self {
        Self {
            path: path.into(),
            table,
        }
    }

    /// Dotted path of this table.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Dotted path of one of this table's fields.
    pub fn field_path(&self, key: &str) -> String {
        if self.path.is_empty() {
            key.to_string()
        } else {
            format!("{}.{}", self.path, key)
        }
    }

    /// The raw value of a field, if present.
    pub fn get(&self, key: &str) -> Option<&'a Value> {
        self.table.get(key)
    }

    /// A string field; absent means empty.
    pub fn string(&self, key: &str) -> Result<String> {
        Ok(self.optional_string(key)?.unwrap_or_default())
    }

    /// A string field that may be absent.
    pub fn optional_string(&self, key: &str) -> Result<Option<String>> {
        match self.get(key) {
            None => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.clone())),
            Some(other) => Err(self.wrong_type(key, "a string", other)),
        }
    }

    /// A string field that must be present.
    pub fn required_string(&self, key: &str) -> Result<String> {
        self.optional_string(key)?
            .ok_or_else(|| self.missing(key))
    }

    /// A boolean field; absent means `false`.
    pub fn bool(&self, key: &str) -> Result<bool> {
        Ok(self.optional_bool(key)?.unwrap_or(false))
    }

    /// A boolean field that must be present.
    pub fn required_bool(&self, key: &str) -> Result<bool> {
        self.optional_bool(key)?.ok_or_else(|| self.missing(key))
    }

    fn optional_bool(&self, key: &str) -> Result<Option<bool>> {
        match self.get(key) {
            None => Ok(None),
            Some(Value::Boolean(b)) => Ok(Some(*b)),
            Some(other) => Err(self.wrong_type(key, "a boolean", other)),
        }
    }

    /// An array of strings; absent means empty.
    pub fn string_list(&self, key: &str) -> Result<Vec<String>> {
        let items = match self.get(key) {
            None => return Ok(Vec::new()),
            Some(Value::Array(items)) => items,
            Some(other) => return Err(self.wrong_type(key, "an array of strings", other)),
        };

        items
            .iter()
            .enumerate()
            .map(|(i, item)| match item {
                Value::String(s) => Ok(s.clone()),
                other => Err(BlueprintError::WrongType {
                    field: format!("{}[{}]", self.field_path(key), i),
                    expected: "a string",
                    found: shape_name(other),
                }),
            })
            .collect()
    }

    /// A table of string values; absent means empty.
    pub fn string_map(&self, key: &str) -> Result<BTreeMap<String, String>> {
        let table = match self.get(key) {
            None => return Ok(BTreeMap::new()),
            Some(Value::Table(table)) => table,
            Some(other) => return Err(self.wrong_type(key, "a table of strings", other)),
        };

        let path = self.field_path(key);
        table
            .iter()
            .map(|(name, value)| match value {
                Value::String(s) => Ok((name.clone(), s.clone())),
                other => Err(BlueprintError::WrongType {
                    field: format!("{}.{}", path, name),
                    expected: "a string",
                    found: shape_name(other),
                }),
            })
            .collect()
    }

    /// A nested table that may be absent.
    pub fn table(&self, key: &str) -> Result<Option<Fields<'a>>> {
        match self.get(key) {
            None => Ok(None),
            Some(value) => Fields::new(self.field_path(key), value).map(Some),
        }
    }

    /// Iterate the raw entries of this table in document order.
    pub fn entries(&self) -> impl Iterator<Item = (&'a String, &'a Value)> {
        self.table.iter()
    }

    fn missing(&self, key: &str) -> BlueprintError {
        BlueprintError::MissingSubfield {
            field: self.path.clone(),
            subfield: key.to_string(),
        }
    }

    fn wrong_type(&self, key: &str, expected: &'static str, found: &Value) -> BlueprintError {
        BlueprintError::WrongType {
            field: self.field_path(key),
            expected,
            found: shape_name(found),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn value(toml_src: &str) -> Value {
        Value::Table(toml_src.parse::<Table>().unwrap())
    }

    #[test]
    fn route_from_string_is_path_variant() {
        let route = decode_route("route", &Value::String("/api/...".into())).unwrap();
        assert_eq!(route, Route::Path("/api/...".into()));
    }

    #[test]
    fn route_from_table_is_config_variant() {
        let route = decode_route("route", &value("private = true")).unwrap();
        assert_eq!(route, Route::Config { private: true });
    }

    #[test]
    fn route_table_requires_private() {
        let err = decode_route("route", &value("public = true")).unwrap_err();
        assert!(matches!(
            err,
            BlueprintError::MissingSubfield { ref subfield, .. } if subfield == "private"
        ));
    }

    #[test]
    fn route_private_must_be_bool() {
        let err = decode_route("route", &value("private = \"yes\"")).unwrap_err();
        assert!(matches!(err, BlueprintError::WrongType { .. }));
    }

    #[test]
    fn route_rejects_third_shape() {
        let err = decode_route("trigger.http[0].route", &Value::Integer(3)).unwrap_err();
        match err {
            BlueprintError::ShapeError { field, found, .. } => {
                assert_eq!(field, "trigger.http[0].route");
                assert_eq!(found, "integer");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn source_from_string_is_path_variant() {
        let source = decode_source("source", &Value::String("main.wasm".into())).unwrap();
        assert_eq!(source, Source::Path("main.wasm".into()));
    }

    #[test]
    fn source_from_table_is_remote_variant() {
        let source = decode_source(
            "source",
            &value("url = \"https://ghcr.io/x\"\ndigest = \"sha256:1\""),
        )
        .unwrap();
        assert_eq!(
            source,
            Source::Remote {
                url: "https://ghcr.io/x".into(),
                digest: "sha256:1".into(),
            }
        );
    }

    #[test]
    fn source_table_rejects_partial_values() {
        let err = decode_source("source", &value("url = \"https://ghcr.io/x\"")).unwrap_err();
        assert!(matches!(
            err,
            BlueprintError::MissingSubfield { ref subfield, .. } if subfield == "digest"
        ));

        let err = decode_source("source", &value("url = 1\ndigest = \"d\"")).unwrap_err();
        assert!(matches!(err, BlueprintError::WrongType { .. }));
    }

    #[test]
    fn source_rejects_array() {
        let err = decode_source("source", &Value::Array(vec![])).unwrap_err();
        assert!(matches!(err, BlueprintError::ShapeError { found: "array", .. }));
    }

    #[test]
    fn fields_absent_scalars_fall_back_to_empty() {
        let v = value("");
        let fields = Fields::new("application", &v).unwrap();
        assert_eq!(fields.string("name").unwrap(), "");
        assert!(!fields.bool("secret").unwrap());
        assert!(fields.string_list("authors").unwrap().is_empty());
        assert!(fields.string_map("variables").unwrap().is_empty());
    }

    #[test]
    fn fields_string_list_reports_index_of_bad_item() {
        let v = value("authors = [\"a\", 2]");
        let fields = Fields::new("application", &v).unwrap();
        match fields.string_list("authors").unwrap_err() {
            BlueprintError::WrongType { field, .. } => assert_eq!(field, "application.authors[1]"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn fields_new_rejects_non_table() {
        let err = Fields::new("component.api", &Value::Boolean(true)).unwrap_err();
        assert!(matches!(err, BlueprintError::ShapeError { found: "boolean", .. }));
    }

    #[test]
    fn field_path_at_root_has_no_leading_dot() {
        let v = value("");
        let fields = Fields::new("", &v).unwrap();
        assert_eq!(fields.field_path("application"), "application");
    }
}
