//! FHIR primitive types
//!
//! FHIR primitives are mapped onto ecosystem types rather than wrapped in
//! newtypes: the JSON encoding is what matters on the wire, and `chrono` /
//! `rust_decimal` already serialize to the canonical lexical forms.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use rust_decimal::Decimal;

/// FHIR `boolean`
pub type Boolean = bool;

/// FHIR `integer` (32-bit signed)
pub type Integer = i32;

/// FHIR `decimal` — arbitrary-precision decimal, serialized as a JSON number
pub type FhirDecimal = Decimal;

/// FHIR `string`
pub type FhirString = String;

/// FHIR `uri`
pub type Uri = String;

/// FHIR `url`
pub type Url = String;

/// FHIR `canonical` — a uri referring to a canonical resource
pub type Canonical = String;

/// FHIR `code` — a string from a controlled vocabulary
pub type Code = String;

/// FHIR `id` — logical or element identifier, up to 64 chars
pub type Id = String;

/// FHIR `markdown`
pub type Markdown = String;

/// FHIR `oid`
pub type Oid = String;

/// FHIR `dateTime` — instant with timezone, RFC 3339 on the wire
pub type FhirDateTime = DateTime<Utc>;

/// FHIR `instant` — like `dateTime` but always fully specified
pub type Instant = DateTime<Utc>;

/// FHIR `date` — calendar date without time
pub type Date = NaiveDate;

/// FHIR `time` — time of day without date or timezone
pub type Time = NaiveTime;

/// FHIR `unsignedInt` (0..2^31-1)
pub type UnsignedInt = u32;

/// FHIR `positiveInt` (1..2^31-1)
pub type PositiveInt = u32;
