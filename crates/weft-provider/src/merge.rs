//! Resolution of final customization values from provider defaults, stored
//! configuration, and caller overrides.

use serde_json::Value;

use crate::error::Error;
use crate::preset::json_type_name;
use crate::schema::{CustomizationConfig, CustomizationMap, SchemaEntry};

/// Merge customization layers into the map the client factory consumes.
///
/// Layering, lowest to highest precedence: provider defaults (only the
/// default model, and only when `use_defaults`), the host's stored
/// configuration, caller overrides. Overrides win unconditionally per key;
/// a structured sub-map such as a safety-settings block is replaced
/// wholesale, never merged per sub-key. A model is injected when no layer
/// supplied one, since the underlying client has no usable default. Every
/// surviving key is then validated against `schema`; the first violation
/// aborts the merge.
pub fn merge_customizations(
    schema: &CustomizationConfig,
    model_key: &str,
    default_model: &str,
    stored: &CustomizationMap,
    overrides: &CustomizationMap,
    use_defaults: bool,
) -> Result<CustomizationMap, Error> {
    let mut merged = CustomizationMap::new();
    if use_defaults {
        merged.insert(
            model_key.to_string(),
            Value::String(default_model.to_string()),
        );
    }
    for (key, value) in stored {
        merged.insert(key.clone(), value.clone());
    }
    for (key, value) in overrides {
        merged.insert(key.clone(), value.clone());
    }
    if !merged.contains_key(model_key) {
        merged.insert(
            model_key.to_string(),
            Value::String(default_model.to_string()),
        );
    }

    validate_against_schema(schema, &merged)?;
    Ok(merged)
}

fn validate_against_schema(
    schema: &CustomizationConfig,
    values: &CustomizationMap,
) -> Result<(), Error> {
    for (key, value) in values {
        match schema.get(key) {
            None => return Err(Error::UnknownOption(key.clone())),
            Some(SchemaEntry::Value(preset)) => preset.validate(key, value)?,
            Some(SchemaEntry::Group(presets)) => {
                let Value::Object(sub_values) = value else {
                    return Err(Error::WrongType {
                        key: key.clone(),
                        expected: "object",
                        actual: json_type_name(value),
                    });
                };
                for (sub_key, sub_value) in sub_values {
                    let qualified = format!("{key}.{sub_key}");
                    match presets.iter().find(|(name, _)| name == sub_key) {
                        None => return Err(Error::UnknownOption(qualified)),
                        Some((_, preset)) => preset.validate(&qualified, sub_value)?,
                    }
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use serde_json::{Map, json};

    use super::merge_customizations;
    use crate::error::Error;
    use crate::preset::PresetValue;
    use crate::schema::{CustomizationConfig, CustomizationMap};

    fn schema() -> CustomizationConfig {
        CustomizationConfig::new()
            .option("model", PresetValue::string())
            .option("temperature", PresetValue::float().range(0.0, 1.0))
            .group(
                "safety_settings",
                [
                    (
                        "HARM_CATEGORY_HARASSMENT".to_string(),
                        PresetValue::string(),
                    ),
                    (
                        "HARM_CATEGORY_HATE_SPEECH".to_string(),
                        PresetValue::string(),
                    ),
                ],
            )
    }

    fn map(entries: &[(&str, serde_json::Value)]) -> CustomizationMap {
        let mut out = Map::new();
        for (key, value) in entries {
            out.insert((*key).to_string(), value.clone());
        }
        out
    }

    #[test]
    fn overrides_beat_stored_which_beats_defaults() {
        let stored = map(&[("temperature", json!(0.7))]);
        let overrides = map(&[("model", json!("B"))]);

        let merged =
            merge_customizations(&schema(), "model", "A", &stored, &overrides, true).unwrap();
        assert_eq!(merged["model"], json!("B"));
        assert_eq!(merged["temperature"], json!(0.7));
    }

    #[test]
    fn default_model_is_injected_when_absent_everywhere() {
        let merged = merge_customizations(
            &schema(),
            "model",
            "gemini-pro",
            &Map::new(),
            &Map::new(),
            false,
        )
        .unwrap();
        assert_eq!(merged["model"], json!("gemini-pro"));
    }

    #[test]
    fn validation_failure_aborts_and_names_the_key() {
        let overrides = map(&[("temperature", json!(1.5))]);
        let err = merge_customizations(&schema(), "model", "A", &Map::new(), &overrides, true)
            .unwrap_err();
        assert!(matches!(err, Error::OutOfRange { key, .. } if key == "temperature"));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let overrides = map(&[("frequency_penalty", json!(0.2))]);
        let err = merge_customizations(&schema(), "model", "A", &Map::new(), &overrides, true)
            .unwrap_err();
        assert!(matches!(err, Error::UnknownOption(key) if key == "frequency_penalty"));
    }

    #[test]
    fn structured_overrides_replace_the_stored_block_wholesale() {
        let stored = map(&[(
            "safety_settings",
            json!({"HARM_CATEGORY_HARASSMENT": "BLOCK_NONE"}),
        )]);
        let overrides = map(&[(
            "safety_settings",
            json!({"HARM_CATEGORY_HATE_SPEECH": "BLOCK_ONLY_HIGH"}),
        )]);

        let merged =
            merge_customizations(&schema(), "model", "A", &stored, &overrides, true).unwrap();
        assert_eq!(
            merged["safety_settings"],
            json!({"HARM_CATEGORY_HATE_SPEECH": "BLOCK_ONLY_HIGH"})
        );
    }

    #[test]
    fn unknown_group_sub_keys_are_rejected_with_a_qualified_name() {
        let overrides = map(&[("safety_settings", json!({"HARM_CATEGORY_BOGUS": "BLOCK_NONE"}))]);
        let err = merge_customizations(&schema(), "model", "A", &Map::new(), &overrides, true)
            .unwrap_err();
        assert!(
            matches!(err, Error::UnknownOption(key) if key == "safety_settings.HARM_CATEGORY_BOGUS")
        );
    }
}
