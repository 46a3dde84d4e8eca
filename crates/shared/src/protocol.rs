use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// One row of the public festival feed. Every field is optional text on the wire.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FestivalRecord {
    #[serde(rename = "fstvlNm", default, deserialize_with = "lenient_name")]
    pub name: String,
    #[serde(
        rename = "fstvlStartDate",
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub start_date: Option<String>,
    #[serde(
        rename = "fstvlEndDate",
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub end_date: Option<String>,
    #[serde(
        rename = "opar",
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub venue: Option<String>,
    #[serde(
        rename = "rdnmadr",
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub road_address: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub latitude: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub longitude: Option<String>,
}

impl FestivalRecord {
    pub fn named(name: impl Into<String>, start_date: Option<&str>) -> Self {
        Self {
            name: name.into(),
            start_date: start_date.map(str::to_string),
            ..Self::default()
        }
    }
}

/// `{ response: { body: { items: [...] } } }` as returned by `/api/festivals`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FestivalsEnvelope {
    #[serde(default)]
    pub response: Option<FestivalsResponse>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FestivalsResponse {
    #[serde(default)]
    pub body: Option<FestivalsBody>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FestivalsBody {
    #[serde(default, deserialize_with = "lenient_items")]
    pub items: Vec<FestivalRecord>,
}

impl FestivalsEnvelope {
    pub fn into_items(self) -> Vec<FestivalRecord> {
        self.response
            .and_then(|response| response.body)
            .map(|body| body.items)
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HomeMessageResponse {
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CharacteristicsResponse {
    #[serde(default)]
    pub characteristics: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QuoteResponse {
    #[serde(default)]
    pub quote: String,
}

fn text_from_value(value: Value) -> Option<String> {
    match value {
        Value::String(text) => {
            let trimmed = text.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}

fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(text_from_value(Value::deserialize(deserializer)?))
}

fn lenient_name<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_text(deserializer)?.unwrap_or_default())
}

// Rows that are not objects are dropped instead of failing the whole batch.
fn lenient_items<'de, D>(deserializer: D) -> Result<Vec<FestivalRecord>, D::Error>
where
    D: Deserializer<'de>,
{
    let Value::Array(rows) = Value::deserialize(deserializer)? else {
        return Ok(Vec::new());
    };
    Ok(rows
        .into_iter()
        .filter_map(|item| serde_json::from_value(item).ok())
        .collect())
}
