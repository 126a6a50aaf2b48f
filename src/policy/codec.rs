//! Per-kind settings codecs
//!
//! A codec owns the type-specific part of a policy's `settings`: the schema
//! fields it adds, how local values are written into the wire settings, and
//! how they are read back. The shared `scope` key is never touched here.

use std::marker::PhantomData;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::client::models::SettingsBag;
use crate::error::{ResourceError, Result};
use crate::resource::FieldSchema;

use super::common::SCHEMA_SETTINGS;

/// Type-specific settings handling for one policy kind
pub trait SettingsCodec: Send + Sync {
    /// Fields added to the `settings` block of the schema
    fn settings_fields(&self) -> Vec<FieldSchema>;

    /// Write type-specific settings from the local block into the wire bag
    fn expand_settings(&self, settings: &Map<String, Value>, bag: &mut SettingsBag) -> Result<()>;

    /// Write type-specific settings from the wire bag into the local block
    fn flatten_settings(&self, bag: &SettingsBag, settings: &mut Map<String, Value>) -> Result<()>;
}

/// Codec for kinds without type-specific settings
pub struct NoSettings;

impl SettingsCodec for NoSettings {
    fn settings_fields(&self) -> Vec<FieldSchema> {
        Vec::new()
    }

    fn expand_settings(&self, _: &Map<String, Value>, _: &mut SettingsBag) -> Result<()> {
        Ok(())
    }

    fn flatten_settings(&self, _: &SettingsBag, _: &mut Map<String, Value>) -> Result<()> {
        Ok(())
    }
}

/// Codec that maps a local settings struct `L` onto a wire struct `W`.
///
/// `L` uses the local attribute names and `W` the service's camelCase keys.
/// Converting between them is plain `From` in both directions.
pub struct FieldCodec<L, W> {
    fields: fn() -> Vec<FieldSchema>,
    _marker: PhantomData<fn() -> (L, W)>,
}

impl<L, W> FieldCodec<L, W> {
    pub const fn new(fields: fn() -> Vec<FieldSchema>) -> Self {
        Self {
            fields,
            _marker: PhantomData,
        }
    }
}

impl<L, W> SettingsCodec for FieldCodec<L, W>
where
    L: Serialize + DeserializeOwned + From<W>,
    W: Serialize + DeserializeOwned + From<L>,
{
    fn settings_fields(&self) -> Vec<FieldSchema> {
        (self.fields)()
    }

    fn expand_settings(&self, settings: &Map<String, Value>, bag: &mut SettingsBag) -> Result<()> {
        let local: L = serde_json::from_value(Value::Object(settings.clone()))
            .map_err(|e| ResourceError::validation(SCHEMA_SETTINGS, e.to_string()))?;
        bag.merge(&W::from(local))
    }

    fn flatten_settings(&self, bag: &SettingsBag, settings: &mut Map<String, Value>) -> Result<()> {
        let wire: W = bag.extract().map_err(|e| {
            ResourceError::ProtocolViolation(format!("unable to parse policy settings: {}", e))
        })?;
        if let Value::Object(fields) = serde_json::to_value(L::from(wire))? {
            for (key, value) in fields {
                if !value.is_null() {
                    settings.insert(key, value);
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Serialize, Deserialize)]
    struct Local {
        count: i64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        note: Option<String>,
    }

    #[derive(Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    struct Wire {
        #[serde(default)]
        item_count: i64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        note_text: Option<String>,
    }

    impl From<Local> for Wire {
        fn from(l: Local) -> Self {
            Self {
                item_count: l.count,
                note_text: l.note,
            }
        }
    }

    impl From<Wire> for Local {
        fn from(w: Wire) -> Self {
            Self {
                count: w.item_count,
                note: w.note_text,
            }
        }
    }

    fn fields() -> Vec<FieldSchema> {
        vec![FieldSchema::int("count").required()]
    }

    static CODEC: FieldCodec<Local, Wire> = FieldCodec::new(fields);

    fn map(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(m) => m,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn test_expand_ignores_scope_and_renames_keys() {
        let settings = map(json!({"scope": [{"repository_id": "r"}], "count": 3}));
        let mut bag = SettingsBag::new();
        bag.insert("scope", json!([])).unwrap();

        CODEC.expand_settings(&settings, &mut bag).unwrap();

        assert_eq!(bag.get("itemCount"), Some(&json!(3)));
        assert!(!bag.contains_key("noteText"));
        assert!(!bag.contains_key("count"));
    }

    #[test]
    fn test_expand_refuses_to_clobber_existing_keys() {
        let settings = map(json!({"count": 3}));
        let mut bag = SettingsBag::new();
        bag.insert("itemCount", 1).unwrap();

        assert!(CODEC.expand_settings(&settings, &mut bag).is_err());
    }

    #[test]
    fn test_flatten_writes_local_names() {
        let bag = SettingsBag::from(map(json!({
            "scope": [],
            "itemCount": 4,
            "noteText": "hi"
        })));
        let mut settings = map(json!({"scope": []}));

        CODEC.flatten_settings(&bag, &mut settings).unwrap();

        assert_eq!(
            Value::Object(settings),
            json!({"scope": [], "count": 4, "note": "hi"})
        );
    }

    #[test]
    fn test_flatten_reports_malformed_settings() {
        let bag = SettingsBag::from(map(json!({"itemCount": "four"})));
        let mut settings = Map::new();

        let err = CODEC.flatten_settings(&bag, &mut settings).unwrap_err();
        assert!(matches!(
            err,
            crate::error::Error::Resource(ResourceError::ProtocolViolation(_))
        ));
    }

    #[test]
    fn test_no_settings_is_a_no_op() {
        let mut bag = SettingsBag::new();
        NoSettings
            .expand_settings(&map(json!({"scope": []})), &mut bag)
            .unwrap();
        assert!(bag.is_empty());
        assert!(NoSettings.settings_fields().is_empty());
    }
}
