//! Core metadata records (`METADATA`, `WHEEL`, `entry_points.txt`).
//!
//! Records are rendered as RFC 822 style header blocks: one `Name: value` line
//! per field, repeated for multi-valued fields, followed by an optional body
//! after a blank line. Field values are written as given.

use std::fmt;

/// Version of the core metadata specification the `METADATA` file follows.
pub const METADATA_VERSION: &str = "2.4";
/// Version of the wheel format the `WHEEL` file declares.
pub const WHEEL_VERSION: &str = "1.0";

/// A value for one metadata field: a single line or a repeated header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Single(String),
    Multi(Vec<String>),
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Single(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Single(value)
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(values: Vec<String>) -> Self {
        FieldValue::Multi(values)
    }
}

/// An ordered header block with an optional body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetadataRecord {
    headers: Vec<(String, String)>,
    body: Option<String>,
}

impl MetadataRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a field; multi-valued fields become one header per value.
    pub fn field(mut self, name: &str, value: impl Into<FieldValue>) -> Self {
        match value.into() {
            FieldValue::Single(value) => self.headers.push((name.to_string(), value)),
            FieldValue::Multi(values) => {
                for value in values {
                    self.headers.push((name.to_string(), value));
                }
            }
        }
        self
    }

    pub fn body(mut self, body: impl Into<String>) -> Self {
        let body = body.into();
        self.body = if body.is_empty() { None } else { Some(body) };
        self
    }

    /// All values of a header, in insertion order.
    pub fn values<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.headers
            .iter()
            .filter(move |(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        self.to_string().into_bytes()
    }
}

impl fmt::Display for MetadataRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (name, value) in &self.headers {
            writeln!(f, "{}: {}", name, value)?;
        }
        if let Some(body) = &self.body {
            writeln!(f)?;
            f.write_str(body)?;
        }
        Ok(())
    }
}

/// The `METADATA` record: version header, identity, then the given fields and description.
pub fn package_metadata(
    name: &str,
    version: &str,
    fields: Vec<(&str, FieldValue)>,
    description: &str,
) -> MetadataRecord {
    let mut record = MetadataRecord::new()
        .field("Metadata-Version", METADATA_VERSION)
        .field("Name", name)
        .field("Version", version);
    for (key, value) in fields {
        record = record.field(key, value);
    }
    record.body(description)
}

/// The `WHEEL` record describing the container itself.
pub fn wheel_metadata(generator: &str, tag: &str) -> MetadataRecord {
    MetadataRecord::new()
        .field("Wheel-Version", WHEEL_VERSION)
        .field("Generator", generator)
        .field("Root-Is-Purelib", "false")
        .field("Tag", tag)
}

/// `entry_points.txt` declaring console scripts as `name = module:function`.
pub fn entry_points(scripts: &[(&str, &str)]) -> String {
    let mut out = String::from("[console_scripts]\n");
    for (name, target) in scripts {
        out.push_str(&format!("{} = {}\n", name, target));
    }
    out
}
