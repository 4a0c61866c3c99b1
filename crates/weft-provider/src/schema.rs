//! Per-provider customization schemas.

use serde_json::{Map, Value};

use crate::preset::{PresetValue, REDACTED};

/// Customization values keyed by option name, as handed to the client
/// factory.
pub type CustomizationMap = Map<String, Value>;

/// One schema entry: a single descriptor, or a nested group of them.
#[derive(Debug, Clone)]
pub enum SchemaEntry {
    Value(PresetValue),
    /// A structured block, e.g. safety settings keyed by harm category.
    Group(Vec<(String, PresetValue)>),
}

/// Ordered mapping from option name to descriptor, declared once per
/// provider instance. Hosts use it to render and validate settings UIs.
#[derive(Debug, Clone, Default)]
pub struct CustomizationConfig {
    entries: Vec<(String, SchemaEntry)>,
}

impl CustomizationConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a single option.
    pub fn option(mut self, name: impl Into<String>, preset: PresetValue) -> Self {
        self.entries.push((name.into(), SchemaEntry::Value(preset)));
        self
    }

    /// Declare a structured option whose sub-keys each have a descriptor.
    pub fn group(
        mut self,
        name: impl Into<String>,
        entries: impl IntoIterator<Item = (String, PresetValue)>,
    ) -> Self {
        self.entries.push((
            name.into(),
            SchemaEntry::Group(entries.into_iter().collect()),
        ));
        self
    }

    pub fn get(&self, name: &str) -> Option<&SchemaEntry> {
        self.entries
            .iter()
            .find(|(entry_name, _)| entry_name == name)
            .map(|(_, entry)| entry)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &SchemaEntry)> {
        self.entries
            .iter()
            .map(|(name, entry)| (name.as_str(), entry))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Render `values` for diagnostics, replacing every private value with
    /// a placeholder. Sub-keys of a group inherit each sub-descriptor's
    /// privacy flag; keys the schema does not know are redacted outright.
    pub fn redacted(&self, values: &CustomizationMap) -> CustomizationMap {
        let mut rendered = CustomizationMap::new();
        for (key, value) in values {
            let replacement = match self.get(key) {
                Some(SchemaEntry::Value(preset)) if preset.is_private() => {
                    Value::String(REDACTED.to_string())
                }
                Some(SchemaEntry::Value(_)) => value.clone(),
                Some(SchemaEntry::Group(presets)) => match value {
                    Value::Object(sub) => {
                        let mut out = Map::new();
                        for (sub_key, sub_value) in sub {
                            let private = presets
                                .iter()
                                .find(|(name, _)| name == sub_key)
                                .is_none_or(|(_, preset)| preset.is_private());
                            out.insert(
                                sub_key.clone(),
                                if private {
                                    Value::String(REDACTED.to_string())
                                } else {
                                    sub_value.clone()
                                },
                            );
                        }
                        Value::Object(out)
                    }
                    other => other.clone(),
                },
                None => Value::String(REDACTED.to_string()),
            };
            rendered.insert(key.clone(), replacement);
        }
        rendered
    }
}
