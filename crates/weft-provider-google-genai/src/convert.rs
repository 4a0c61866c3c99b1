//! Conversion from merged customization maps to client construction
//! arguments.

use secrecy::SecretString;
use serde_json::Value;

use weft_provider::{CustomizationMap, Error};

use crate::client::ClientParams;
use crate::safety;

pub(crate) const SAFETY_SETTINGS_KEY: &str = "safety_settings";

/// Build [`ClientParams`] from a merged, validated customization map.
///
/// The safety-settings block is pulled out and translated to its typed
/// form; everything else maps field by field. Validation has already run,
/// so absent keys simply stay `None`.
pub(crate) fn client_params(
    mut customizations: CustomizationMap,
    tools: Option<Value>,
    tool_choice: Option<Value>,
) -> Result<ClientParams, Error> {
    let safety_settings = match customizations.remove(SAFETY_SETTINGS_KEY) {
        Some(policy) => safety::translate_safety_settings(&policy)?,
        None => Vec::new(),
    };

    let model = customizations
        .get("model")
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| Error::MissingValue {
            key: "model".to_string(),
        })?;

    Ok(ClientParams {
        model,
        google_api_key: customizations
            .get("google_api_key")
            .and_then(Value::as_str)
            .map(|key| SecretString::from(key.to_string())),
        temperature: customizations.get("temperature").and_then(Value::as_f64),
        max_output_tokens: customizations
            .get("max_output_tokens")
            .and_then(Value::as_u64),
        top_k: customizations.get("top_k").and_then(Value::as_u64),
        top_p: customizations.get("top_p").and_then(Value::as_f64),
        n: customizations.get("n").and_then(Value::as_u64),
        safety_settings,
        convert_system_message_to_human: true,
        tools,
        tool_choice,
    })
}

#[cfg(test)]
mod tests {
    use secrecy::ExposeSecret;
    use serde_json::{Map, json};

    use super::client_params;
    use crate::safety::{HarmBlockThreshold, HarmCategory};
    use weft_provider::{CustomizationMap, Error};

    fn customizations() -> CustomizationMap {
        let mut map = Map::new();
        map.insert("model".into(), json!("gemini-pro"));
        map.insert("google_api_key".into(), json!("sk-secret"));
        map.insert("temperature".into(), json!(0.4));
        map.insert("max_output_tokens".into(), json!(1024));
        map.insert(
            "safety_settings".into(),
            json!({"HARM_CATEGORY_HARASSMENT": "BLOCK_LOW_AND_ABOVE"}),
        );
        map
    }

    #[test]
    fn maps_fields_and_translates_the_safety_block() {
        let params = client_params(customizations(), None, None).unwrap();
        assert_eq!(params.model, "gemini-pro");
        assert_eq!(
            params.google_api_key.unwrap().expose_secret(),
            "sk-secret"
        );
        assert_eq!(params.temperature, Some(0.4));
        assert_eq!(params.max_output_tokens, Some(1024));
        assert_eq!(params.top_k, None);
        assert_eq!(params.safety_settings.len(), 1);
        assert_eq!(
            params.safety_settings[0].category,
            HarmCategory::Harassment
        );
        assert_eq!(
            params.safety_settings[0].threshold,
            HarmBlockThreshold::BlockLowAndAbove
        );
        assert!(params.convert_system_message_to_human);
    }

    #[test]
    fn bad_safety_symbols_abort_the_conversion() {
        let mut map = customizations();
        map.insert(
            "safety_settings".into(),
            json!({"HARM_CATEGORY_BOGUS": "BLOCK_NONE"}),
        );
        assert!(matches!(
            client_params(map, None, None),
            Err(Error::SafetyTranslation { symbol }) if symbol == "HARM_CATEGORY_BOGUS"
        ));
    }

    #[test]
    fn tools_pass_through_untouched() {
        let tools = json!([{"name": "search"}]);
        let params =
            client_params(customizations(), Some(tools.clone()), Some(json!("auto"))).unwrap();
        assert_eq!(params.tools, Some(tools));
        assert_eq!(params.tool_choice, Some(json!("auto")));
    }
}
