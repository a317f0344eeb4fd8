use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Styling tier of the incident priority. Only the numeric values 1, 2 and 3
/// select a tier; everything else is `Unknown`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PriorityTier {
    P1,
    P2,
    P3,
    Unknown,
}

impl PriorityTier {
    pub fn from_value(value: &Value) -> Self {
        let Some(n) = value.as_f64() else {
            return Self::Unknown;
        };
        if n == 1.0 {
            Self::P1
        } else if n == 2.0 {
            Self::P2
        } else if n == 3.0 {
            Self::P3
        } else {
            Self::Unknown
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Priority {
    /// Raw value as it should appear after "Priority ".
    pub label: String,
    pub tier: PriorityTier,
}

impl Priority {
    fn from_value(value: &Value) -> Option<Self> {
        let label = match value {
            Value::Null => return None,
            Value::String(s) => s.clone(),
            Value::Number(n) => number_text(n),
            other => other.to_string(),
        };
        Some(Self {
            label,
            tier: PriorityTier::from_value(value),
        })
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct SopCitation {
    pub title: String,
    pub section: Option<String>,
    pub excerpt: String,
}

/// Latest status payload received from the feed.
///
/// Every field is optional on the wire. Values of the wrong type are dropped
/// rather than rejected, so a well-formed JSON document always yields a
/// snapshot.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Snapshot {
    #[serde(deserialize_with = "lenient_priority")]
    pub priority: Option<Priority>,
    #[serde(deserialize_with = "lenient_text")]
    pub summary: Option<String>,
    #[serde(deserialize_with = "lenient_number")]
    pub confidence: Option<f64>,
    #[serde(deserialize_with = "lenient_text")]
    pub location_guess: Option<String>,
    #[serde(deserialize_with = "lenient_tags")]
    pub units_recommended: Vec<String>,
    #[serde(deserialize_with = "lenient_tags")]
    pub hazards: Vec<String>,
    #[serde(deserialize_with = "lenient_tags")]
    pub medical_flags: Vec<String>,
    #[serde(deserialize_with = "lenient_citations")]
    pub sop_citations: Vec<SopCitation>,
    #[serde(deserialize_with = "lenient_text")]
    pub transcript_window: Option<String>,
}

impl Snapshot {
    /// Parses one inbound text frame. Fails only when the frame is not
    /// well-formed JSON.
    pub fn parse(text: &str) -> Result<Self, String> {
        let value: Value = serde_json::from_str(text).map_err(|e| e.to_string())?;
        Ok(Self::from_value(value))
    }

    pub fn from_value(value: Value) -> Self {
        if !value.is_object() {
            return Self::default();
        }
        serde_json::from_value(value).unwrap_or_default()
    }
}

/// Whole floats print without a fraction, so `3.0` reads as `3`.
fn number_text(n: &serde_json::Number) -> String {
    match n.as_f64() {
        Some(f) if n.is_f64() => f.to_string(),
        _ => n.to_string(),
    }
}

fn text_of(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(number_text(n)),
        _ => None,
    }
}

fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(text_of(&value))
}

fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value.as_f64())
}

fn lenient_priority<'de, D>(deserializer: D) -> Result<Option<Priority>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(Priority::from_value(&value))
}

fn lenient_tags<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value
        .as_array()
        .map(|arr| arr.iter().filter_map(text_of).collect())
        .unwrap_or_default())
}

/// Entries that are not objects still count as a (blank) card.
fn lenient_citations<'de, D>(deserializer: D) -> Result<Vec<SopCitation>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let Some(items) = value.as_array() else {
        return Ok(Vec::new());
    };
    Ok(items
        .iter()
        .map(|item| SopCitation {
            title: item.get("title").and_then(text_of).unwrap_or_default(),
            section: item.get("section").and_then(text_of),
            excerpt: item.get("excerpt").and_then(text_of).unwrap_or_default(),
        })
        .collect())
}
