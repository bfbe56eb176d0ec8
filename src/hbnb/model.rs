//! # Records
//!
//! A [`Record`] is a typed bag of attributes with an identity and two
//! timestamps. The set of record types is closed: every schema is a [`Kind`]
//! variant with a fixed table of declared fields. Records may also carry
//! undeclared attributes, which are stored with whatever type the value
//! coerced to.
//!
//! ## Mapping form
//!
//! Records convert to and from a flat JSON object, which is what the store
//! writes to disk:
//!
//! ```text
//! {
//!   "id": "0d0b6a2c-...",
//!   "created_at": "2024-05-01T09:30:00.123456Z",
//!   "updated_at": "2024-05-01T09:31:12.000042Z",
//!   "email": "",
//!   ...
//!   "type_name": "User"
//! }
//! ```

use crate::error::{HbnbError, Result, UsageError};
use chrono::{DateTime, NaiveDateTime, SecondsFormat, SubsecRound, Utc};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Key holding the record type in the mapping form.
pub const DISCRIMINATOR: &str = "type_name";

/// Discriminator key used by files written with the older tooling.
pub const LEGACY_DISCRIMINATOR: &str = "__class__";

/// Fields owned by the record itself. Updates never touch them.
pub const RESERVED_FIELDS: [&str; 3] = ["id", "created_at", "updated_at"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    BaseModel,
    User,
    State,
    City,
    Amenity,
    Place,
    Review,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    Str,
    Int,
    Float,
    StrList,
}

impl FieldType {
    pub fn default_value(self) -> Value {
        match self {
            FieldType::Str => Value::String(String::new()),
            FieldType::Int => Value::from(0),
            FieldType::Float => Value::from(0.0),
            FieldType::StrList => Value::Array(Vec::new()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub ty: FieldType,
}

const fn field(name: &'static str, ty: FieldType) -> FieldSpec {
    FieldSpec { name, ty }
}

const USER_FIELDS: &[FieldSpec] = &[
    field("email", FieldType::Str),
    field("password", FieldType::Str),
    field("first_name", FieldType::Str),
    field("last_name", FieldType::Str),
];

const STATE_FIELDS: &[FieldSpec] = &[field("name", FieldType::Str)];

const CITY_FIELDS: &[FieldSpec] = &[
    field("state_id", FieldType::Str),
    field("name", FieldType::Str),
];

const AMENITY_FIELDS: &[FieldSpec] = &[field("name", FieldType::Str)];

const PLACE_FIELDS: &[FieldSpec] = &[
    field("city_id", FieldType::Str),
    field("user_id", FieldType::Str),
    field("name", FieldType::Str),
    field("description", FieldType::Str),
    field("number_rooms", FieldType::Int),
    field("number_bathrooms", FieldType::Int),
    field("max_guest", FieldType::Int),
    field("price_by_night", FieldType::Int),
    field("latitude", FieldType::Float),
    field("longitude", FieldType::Float),
    field("amenity_ids", FieldType::StrList),
];

const REVIEW_FIELDS: &[FieldSpec] = &[
    field("place_id", FieldType::Str),
    field("user_id", FieldType::Str),
    field("text", FieldType::Str),
];

impl Kind {
    pub const ALL: [Kind; 7] = [
        Kind::BaseModel,
        Kind::User,
        Kind::State,
        Kind::City,
        Kind::Amenity,
        Kind::Place,
        Kind::Review,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Kind::BaseModel => "BaseModel",
            Kind::User => "User",
            Kind::State => "State",
            Kind::City => "City",
            Kind::Amenity => "Amenity",
            Kind::Place => "Place",
            Kind::Review => "Review",
        }
    }

    /// Declared fields for this schema, in display order.
    pub fn fields(self) -> &'static [FieldSpec] {
        match self {
            Kind::BaseModel => &[],
            Kind::User => USER_FIELDS,
            Kind::State => STATE_FIELDS,
            Kind::City => CITY_FIELDS,
            Kind::Amenity => AMENITY_FIELDS,
            Kind::Place => PLACE_FIELDS,
            Kind::Review => REVIEW_FIELDS,
        }
    }

    pub fn field_type(self, name: &str) -> Option<FieldType> {
        self.fields()
            .iter()
            .find(|spec| spec.name == name)
            .map(|spec| spec.ty)
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Kind {
    type Err = UsageError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Kind::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or(UsageError::ClassDoesNotExist)
    }
}

/// Builds the store key `<Kind>.<id>`.
pub fn store_key(kind: Kind, id: &str) -> String {
    format!("{}.{}", kind, id)
}

pub fn is_reserved(name: &str) -> bool {
    RESERVED_FIELDS.contains(&name) || name == DISCRIMINATOR || name == LEGACY_DISCRIMINATOR
}

#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    kind: Kind,
    id: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    attributes: Map<String, Value>,
}

impl Record {
    /// A fresh record with a new id and declared fields at their defaults.
    pub fn new(kind: Kind) -> Self {
        let now = now();
        let attributes = kind
            .fields()
            .iter()
            .map(|spec| (spec.name.to_string(), spec.ty.default_value()))
            .collect();
        Self {
            kind,
            id: Uuid::new_v4().to_string(),
            created_at: now,
            updated_at: now,
            attributes,
        }
    }

    /// Rebuilds a record from its mapping form, keeping id and timestamps verbatim.
    pub fn from_mapping(kind: Kind, mapping: &Map<String, Value>) -> Result<Self> {
        let id = match mapping.get("id") {
            Some(Value::String(id)) if !id.is_empty() => id.clone(),
            _ => {
                return Err(HbnbError::InvalidRecord {
                    key: store_key(kind, "?"),
                    reason: "missing id".to_string(),
                });
            }
        };
        let created_at = timestamp_field(kind, &id, mapping, "created_at")?;
        let updated_at = timestamp_field(kind, &id, mapping, "updated_at")?;

        let mut attributes: Map<String, Value> = kind
            .fields()
            .iter()
            .map(|spec| {
                let value = mapping
                    .get(spec.name)
                    .cloned()
                    .unwrap_or_else(|| spec.ty.default_value());
                (spec.name.to_string(), value)
            })
            .collect();
        for (name, value) in mapping {
            if is_reserved(name) || attributes.contains_key(name) {
                continue;
            }
            attributes.insert(name.clone(), value.clone());
        }

        Ok(Self {
            kind,
            id,
            created_at,
            updated_at,
            attributes,
        })
    }

    pub fn kind(&self) -> Kind {
        self.kind
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn key(&self) -> String {
        store_key(self.kind, &self.id)
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.attributes.get(name)
    }

    pub fn attributes(&self) -> &Map<String, Value> {
        &self.attributes
    }

    /// Sets an attribute. Reserved names are left alone and `false` is returned.
    pub fn set(&mut self, name: &str, value: Value) -> bool {
        if is_reserved(name) {
            return false;
        }
        self.attributes.insert(name.to_string(), value);
        true
    }

    /// Marks the record as modified now.
    pub fn touch(&mut self) {
        self.updated_at = now().max(self.created_at);
    }

    pub fn to_mapping(&self) -> Map<String, Value> {
        let mut mapping = self.fields_mapping();
        mapping.insert(
            DISCRIMINATOR.to_string(),
            Value::String(self.kind.name().to_string()),
        );
        mapping
    }

    /// `[<Kind>] (<id>) {<fields>}`
    pub fn label(&self) -> String {
        format!(
            "[{}] ({}) {}",
            self.kind,
            self.id,
            Value::Object(self.fields_mapping())
        )
    }

    fn fields_mapping(&self) -> Map<String, Value> {
        let mut mapping = Map::new();
        mapping.insert("id".to_string(), Value::String(self.id.clone()));
        mapping.insert(
            "created_at".to_string(),
            Value::String(format_timestamp(self.created_at)),
        );
        mapping.insert(
            "updated_at".to_string(),
            Value::String(format_timestamp(self.updated_at)),
        );
        for (name, value) in &self.attributes {
            mapping.insert(name.clone(), value.clone());
        }
        mapping
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

fn now() -> DateTime<Utc> {
    // Microseconds is what the mapping form keeps.
    Utc::now().trunc_subsecs(6)
}

pub fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Accepts RFC 3339, or a naive ISO-8601 timestamp read as UTC.
pub fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(s) {
        return Some(ts.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}

fn timestamp_field(
    kind: Kind,
    id: &str,
    mapping: &Map<String, Value>,
    name: &str,
) -> Result<DateTime<Utc>> {
    mapping
        .get(name)
        .and_then(Value::as_str)
        .and_then(parse_timestamp)
        .ok_or_else(|| HbnbError::InvalidRecord {
            key: store_key(kind, id),
            reason: format!("missing or malformed {}", name),
        })
}
