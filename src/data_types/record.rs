use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use eyre::{eyre, Result, WrapErr};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;

/// A single field value carried by a [`Record`].
#[derive(Clone, Debug, PartialEq)]
pub enum FieldValue {
    Number(f64),
    Time(DateTime<Utc>),
    Category(String),
}

impl FieldValue {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Number(_) => "number",
            Self::Time(_) => "temporal",
            Self::Category(_) => "category",
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(v) => Some(*v),
            _ => None,
        }
    }

    /// Epoch milliseconds for temporal values; plain numbers are taken as epoch ms.
    pub fn as_timestamp_ms(&self) -> Option<f64> {
        match self {
            Self::Time(t) => Some(t.timestamp_millis() as f64),
            Self::Number(v) => Some(*v),
            Self::Category(_) => None,
        }
    }

    /// Palette bucket: a non-negative integer, given as a number or numeric text.
    pub fn as_bucket(&self) -> Option<usize> {
        match self {
            Self::Number(v) if *v >= 0.0 && v.fract() == 0.0 && v.is_finite() => Some(*v as usize),
            Self::Category(s) => s.trim().parse::<usize>().ok(),
            _ => None,
        }
    }

    /// Classifies text coming from the backend: dates become `Time`, the rest `Category`.
    pub fn from_text(text: &str) -> Self {
        parse_timestamp(text)
            .map(Self::Time)
            .unwrap_or_else(|| Self::Category(text.to_string()))
    }
}

/// Accepts RFC 3339, `YYYY-MM-DD HH:MM:SS` and `YYYY-MM-DD` (all read as UTC).
pub fn parse_timestamp(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S") {
        return Some(Utc.from_utc_datetime(&naive));
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive))
}

impl From<f64> for FieldValue {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

impl From<i64> for FieldValue {
    fn from(v: i64) -> Self {
        Self::Number(v as f64)
    }
}

impl From<i32> for FieldValue {
    fn from(v: i32) -> Self {
        Self::Number(v as f64)
    }
}

impl From<&str> for FieldValue {
    fn from(v: &str) -> Self {
        Self::Category(v.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(v: String) -> Self {
        Self::Category(v)
    }
}

impl From<DateTime<Utc>> for FieldValue {
    fn from(v: DateTime<Utc>) -> Self {
        Self::Time(v)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawValue {
    Number(f64),
    Bool(bool),
    Text(String),
}

impl<'de> Deserialize<'de> for FieldValue {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match RawValue::deserialize(deserializer)? {
            RawValue::Number(v) => Self::Number(v),
            RawValue::Bool(b) => Self::Number(if b { 1.0 } else { 0.0 }),
            RawValue::Text(s) => Self::from_text(&s),
        })
    }
}

impl Serialize for FieldValue {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Number(v) => serializer.serialize_f64(*v),
            Self::Time(t) => serializer.serialize_str(&t.to_rfc3339()),
            Self::Category(s) => serializer.serialize_str(s),
        }
    }
}

/// One data row: an open mapping from field name to value.
///
/// Records are handed to the chart read-only; the event handlers receive them
/// back untouched.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Record {
    fields: BTreeMap<String, FieldValue>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, field: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.fields.insert(field.into(), value.into());
        self
    }

    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<FieldValue>) {
        self.fields.insert(field.into(), value.into());
    }

    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.fields.get(field)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &FieldValue)> {
        self.fields.iter()
    }

    /// Builds a record from a JSON object. `null` fields are treated as absent.
    pub fn from_json(value: &serde_json::Value) -> Result<Self> {
        let object = value
            .as_object()
            .ok_or_else(|| eyre!("expected a JSON object, got `{}`", value))?;
        let mut record = Self::new();
        for (key, v) in object {
            if v.is_null() {
                continue;
            }
            let field = FieldValue::deserialize(v)
                .wrap_err_with(|| format!("unsupported value for field `{}`", key))?;
            record.fields.insert(key.clone(), field);
        }
        Ok(record)
    }

    /// Parses a JSON array of objects, as delivered by the dashboard backend.
    pub fn list_from_json(json: &str) -> Result<Vec<Self>> {
        let value: serde_json::Value =
            serde_json::from_str(json).wrap_err("record payload is not valid JSON")?;
        let items = value
            .as_array()
            .ok_or_else(|| eyre!("record payload must be a JSON array"))?;
        items
            .iter()
            .enumerate()
            .map(|(i, item)| Self::from_json(item).wrap_err_with(|| format!("record {}", i)))
            .collect()
    }
}

impl<'de> Deserialize<'de> for Record {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = BTreeMap::<String, Option<FieldValue>>::deserialize(deserializer)?;
        Ok(Self {
            fields: raw
                .into_iter()
                .filter_map(|(k, v)| v.map(|v| (k, v)))
                .collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_classification() {
        let json = r#"{"timestamp": "2024-03-01 12:00:00", "count": 4, "color": "1", "note": null, "done": true}"#;
        let value: serde_json::Value = serde_json::from_str(json).unwrap();
        let record = Record::from_json(&value).unwrap();

        assert!(matches!(record.get("timestamp"), Some(FieldValue::Time(_))));
        assert_eq!(record.get("count"), Some(&FieldValue::Number(4.0)));
        assert_eq!(record.get("color").and_then(|v| v.as_bucket()), Some(1));
        assert_eq!(record.get("done"), Some(&FieldValue::Number(1.0)));
        assert!(!record.contains("note"));
    }

    #[test]
    fn test_timestamp_formats() {
        let a = parse_timestamp("2024-03-01T00:00:00Z").unwrap();
        let b = parse_timestamp("2024-03-01 00:00:00").unwrap();
        let c = parse_timestamp("2024-03-01").unwrap();
        assert_eq!(a, b);
        assert_eq!(b, c);
        assert!(parse_timestamp("open").is_none());
    }

    #[test]
    fn test_bucket_rejects_fractions_and_negatives() {
        assert_eq!(FieldValue::Number(2.5).as_bucket(), None);
        assert_eq!(FieldValue::Number(-1.0).as_bucket(), None);
        assert_eq!(FieldValue::from("red").as_bucket(), None);
        assert_eq!(FieldValue::Number(3.0).as_bucket(), Some(3));
    }

    #[test]
    fn test_list_from_json_reports_index() {
        let err = Record::list_from_json(r#"[{"a": 1}, 5]"#).unwrap_err();
        assert!(format!("{:#}", err).contains("record 1"));
    }
}
