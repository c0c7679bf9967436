use crate::errors::{CatalogError, Result};
use chrono::{DateTime, Utc};
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value as JsonValue;
use std::collections::HashSet;
use std::path::PathBuf;
use ulid::Ulid;

pub type UserId = String; // ULID string

/// One CSV-backed dataset exposed under `url_prefix`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DatasetDescriptor {
    #[serde(rename = "prefix")]
    pub url_prefix: String,
    #[serde(rename = "file")]
    pub source_location: PathBuf,
    #[serde(rename = "separator", default = "default_separator")]
    pub field_separator: char,
}

fn default_separator() -> char {
    ','
}

impl DatasetDescriptor {
    pub fn new(
        url_prefix: impl Into<String>,
        source_location: impl Into<PathBuf>,
        field_separator: char,
    ) -> Result<Self> {
        let d = Self {
            url_prefix: url_prefix.into(),
            source_location: source_location.into(),
            field_separator,
        };
        d.validate()?;
        Ok(d)
    }

    pub fn validate(&self) -> Result<()> {
        let p = &self.url_prefix;
        if !p.starts_with('/') || p.len() < 2 || p.ends_with('/') {
            return Err(CatalogError::Config(format!(
                "dataset prefix must look like /name, got {p:?}"
            )));
        }
        if p[1..].contains(':') || p[1..].contains('*') {
            return Err(CatalogError::Config(format!(
                "dataset prefix {p:?} must not contain route captures"
            )));
        }
        self.separator_byte()?;
        Ok(())
    }

    /// The separator as the single byte the csv reader expects.
    pub fn separator_byte(&self) -> Result<u8> {
        if self.field_separator.is_ascii() && self.field_separator != '"' {
            Ok(self.field_separator as u8)
        } else {
            Err(CatalogError::Config(format!(
                "unsupported separator {:?} for {}",
                self.field_separator, self.url_prefix
            )))
        }
    }

    /// Dataset name used as a log and metrics label.
    pub fn name(&self) -> &str {
        self.url_prefix.trim_start_matches('/')
    }
}

/// Paths served by fixed endpoints; no dataset may claim them.
pub const RESERVED_PREFIXES: [&str; 3] = ["/usuario", "/health", "/metrics"];

/// Checks each descriptor and that prefixes are unique and unreserved.
pub fn validate_route_table(table: &[DatasetDescriptor]) -> Result<()> {
    let mut seen = HashSet::new();
    for d in table {
        d.validate()?;
        if RESERVED_PREFIXES.contains(&d.url_prefix.as_str()) {
            return Err(CatalogError::Config(format!(
                "dataset prefix {} is reserved",
                d.url_prefix
            )));
        }
        if !seen.insert(d.url_prefix.as_str()) {
            return Err(CatalogError::Config(format!(
                "duplicate dataset prefix {}",
                d.url_prefix
            )));
        }
    }
    Ok(())
}

/// One parsed CSV line. Keeps header order so the JSON object reads like the file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RowRecord(Vec<(String, String)>);

impl RowRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(n: usize) -> Self {
        Self(Vec::with_capacity(n))
    }

    /// A repeated header keeps its first position and takes the latest value.
    pub fn push(&mut self, header: impl Into<String>, value: impl Into<String>) {
        let header = header.into();
        let value = value.into();
        match self.0.iter_mut().find(|(h, _)| *h == header) {
            Some((_, v)) => *v = value,
            None => self.0.push((header, value)),
        }
    }

    pub fn get(&self, header: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(h, _)| h == header)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(h, v)| (h.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RowRecord {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut row = RowRecord::new();
        for (k, v) in iter {
            row.push(k, v);
        }
        row
    }
}

impl Serialize for RowRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (h, v) in &self.0 {
            map.serialize_entry(h, v)?;
        }
        map.end()
    }
}

/// Registration body as sent by the front-end.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct RegistrationRequest {
    #[serde(default)]
    pub nombre: Option<JsonValue>,
    #[serde(default)]
    pub apellido: Option<JsonValue>,
    #[serde(default)]
    pub pais: Option<JsonValue>,
    #[serde(default)]
    pub edad: Option<JsonValue>,
    #[serde(default)]
    pub email: Option<JsonValue>,
}

/// Stored as-is; no field is required or validated.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct UserRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<JsonValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub surname: Option<JsonValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<JsonValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<JsonValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<JsonValue>,
}

impl From<RegistrationRequest> for UserRecord {
    fn from(r: RegistrationRequest) -> Self {
        Self {
            name: r.nombre,
            surname: r.apellido,
            country: r.pais,
            age: r.edad,
            email: r.email,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StoredUser {
    #[serde(rename = "_id")]
    pub id: UserId,
    #[serde(flatten)]
    pub user: UserRecord,
    pub created_at: DateTime<Utc>,
}

impl StoredUser {
    pub fn new(user: UserRecord) -> Self {
        Self {
            id: Ulid::new().to_string(),
            user,
            created_at: Utc::now(),
        }
    }
}

/// Insertion acknowledgment returned to the client.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InsertAck {
    pub acknowledged: bool,
    pub inserted_id: UserId,
}

impl InsertAck {
    pub fn for_user(u: &StoredUser) -> Self {
        Self {
            acknowledged: true,
            inserted_id: u.id.clone(),
        }
    }
}
