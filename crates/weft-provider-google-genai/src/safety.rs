//! Symbolic safety-policy translation for the Gemini API.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use weft_provider::Error;

/// Harm category for Gemini safety settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HarmCategory {
    #[serde(rename = "HARM_CATEGORY_UNSPECIFIED")]
    Unspecified,
    #[serde(rename = "HARM_CATEGORY_HARASSMENT")]
    Harassment,
    #[serde(rename = "HARM_CATEGORY_HATE_SPEECH")]
    HateSpeech,
    #[serde(rename = "HARM_CATEGORY_SEXUALLY_EXPLICIT")]
    SexuallyExplicit,
    #[serde(rename = "HARM_CATEGORY_DANGEROUS_CONTENT")]
    DangerousContent,
    #[serde(rename = "HARM_CATEGORY_CIVIC_INTEGRITY")]
    CivicIntegrity,
}

impl HarmCategory {
    /// Categories a safety policy can be declared for.
    pub const ADJUSTABLE: &[HarmCategory] = &[
        HarmCategory::Harassment,
        HarmCategory::HateSpeech,
        HarmCategory::SexuallyExplicit,
        HarmCategory::DangerousContent,
        HarmCategory::CivicIntegrity,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            HarmCategory::Unspecified => "HARM_CATEGORY_UNSPECIFIED",
            HarmCategory::Harassment => "HARM_CATEGORY_HARASSMENT",
            HarmCategory::HateSpeech => "HARM_CATEGORY_HATE_SPEECH",
            HarmCategory::SexuallyExplicit => "HARM_CATEGORY_SEXUALLY_EXPLICIT",
            HarmCategory::DangerousContent => "HARM_CATEGORY_DANGEROUS_CONTENT",
            HarmCategory::CivicIntegrity => "HARM_CATEGORY_CIVIC_INTEGRITY",
        }
    }

    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "HARM_CATEGORY_UNSPECIFIED" => Some(HarmCategory::Unspecified),
            "HARM_CATEGORY_HARASSMENT" => Some(HarmCategory::Harassment),
            "HARM_CATEGORY_HATE_SPEECH" => Some(HarmCategory::HateSpeech),
            "HARM_CATEGORY_SEXUALLY_EXPLICIT" => Some(HarmCategory::SexuallyExplicit),
            "HARM_CATEGORY_DANGEROUS_CONTENT" => Some(HarmCategory::DangerousContent),
            "HARM_CATEGORY_CIVIC_INTEGRITY" => Some(HarmCategory::CivicIntegrity),
            _ => None,
        }
    }
}

/// Harm block threshold for Gemini safety settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HarmBlockThreshold {
    #[serde(rename = "HARM_BLOCK_THRESHOLD_UNSPECIFIED")]
    Unspecified,
    #[serde(rename = "BLOCK_NONE")]
    BlockNone,
    #[serde(rename = "BLOCK_LOW_AND_ABOVE")]
    BlockLowAndAbove,
    #[serde(rename = "BLOCK_MEDIUM_AND_ABOVE")]
    BlockMediumAndAbove,
    #[serde(rename = "BLOCK_ONLY_HIGH")]
    BlockOnlyHigh,
}

impl HarmBlockThreshold {
    pub const ALL: &[HarmBlockThreshold] = &[
        HarmBlockThreshold::Unspecified,
        HarmBlockThreshold::BlockNone,
        HarmBlockThreshold::BlockLowAndAbove,
        HarmBlockThreshold::BlockMediumAndAbove,
        HarmBlockThreshold::BlockOnlyHigh,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            HarmBlockThreshold::Unspecified => "HARM_BLOCK_THRESHOLD_UNSPECIFIED",
            HarmBlockThreshold::BlockNone => "BLOCK_NONE",
            HarmBlockThreshold::BlockLowAndAbove => "BLOCK_LOW_AND_ABOVE",
            HarmBlockThreshold::BlockMediumAndAbove => "BLOCK_MEDIUM_AND_ABOVE",
            HarmBlockThreshold::BlockOnlyHigh => "BLOCK_ONLY_HIGH",
        }
    }

    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "HARM_BLOCK_THRESHOLD_UNSPECIFIED" => Some(HarmBlockThreshold::Unspecified),
            "BLOCK_NONE" => Some(HarmBlockThreshold::BlockNone),
            "BLOCK_LOW_AND_ABOVE" => Some(HarmBlockThreshold::BlockLowAndAbove),
            "BLOCK_MEDIUM_AND_ABOVE" => Some(HarmBlockThreshold::BlockMediumAndAbove),
            "BLOCK_ONLY_HIGH" => Some(HarmBlockThreshold::BlockOnlyHigh),
            _ => None,
        }
    }
}

/// One safety setting pair, serialized in the shape the API expects
/// (`safetySettings` entries).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SafetySetting {
    pub category: HarmCategory,
    pub threshold: HarmBlockThreshold,
}

/// Translate a symbolic `{category: threshold}` policy into typed settings.
///
/// All-or-nothing: the first symbol that does not resolve aborts the whole
/// translation, and no partial output is returned.
pub fn translate_safety_settings(policy: &Value) -> Result<Vec<SafetySetting>, Error> {
    let Value::Object(entries) = policy else {
        return Err(Error::WrongType {
            key: "safety_settings".to_string(),
            expected: "object",
            actual: json_type_name(policy),
        });
    };

    let mut settings = Vec::with_capacity(entries.len());
    for (category_symbol, threshold_value) in entries {
        let category = HarmCategory::from_symbol(category_symbol).ok_or_else(|| {
            Error::SafetyTranslation {
                symbol: category_symbol.clone(),
            }
        })?;
        let threshold_symbol =
            threshold_value
                .as_str()
                .ok_or_else(|| Error::SafetyTranslation {
                    symbol: threshold_value.to_string(),
                })?;
        let threshold = HarmBlockThreshold::from_symbol(threshold_symbol).ok_or_else(|| {
            Error::SafetyTranslation {
                symbol: threshold_symbol.to_string(),
            }
        })?;
        settings.push(SafetySetting {
            category,
            threshold,
        });
    }
    Ok(settings)
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
