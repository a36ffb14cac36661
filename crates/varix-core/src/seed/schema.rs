use serde::{Deserialize, Serialize};

/// External seed format, as the reference data ships it: rule fields are
/// camelCase on the wire, ids and compared values may arrive as strings or
/// bare numbers, and the comparator may use the "not present" spelling.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedFile {
    pub rule_sets: Vec<SeedRuleset>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedRuleset {
    pub id: SeedValue,
    pub name: String,
    pub rules: Vec<SeedRule>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedRule {
    pub id: SeedValue,
    pub measurement: String,
    pub comparator: String,
    #[serde(default)]
    pub compared_value: Option<SeedValue>,
    #[serde(default)]
    pub unit_name: String,
    pub finding_name: String,
    #[serde(default)]
    pub action: Option<String>,
}

/// A JSON value that may arrive as text or as a number; always handled as
/// text internally.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SeedValue {
    Text(String),
    Number(serde_json::Number),
}

impl SeedValue {
    pub fn as_text(&self) -> String {
        match self {
            SeedValue::Text(s) => s.clone(),
            SeedValue::Number(n) => n.to_string(),
        }
    }
}
