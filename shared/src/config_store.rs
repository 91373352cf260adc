use std::cell::RefCell;

use log::{info, warn};
use serde_json::Value;
use validator::ValidationError;

use crate::admin::AdminAuthority;
use crate::constants::{CONFIG_STORAGE_KEY, DEFAULT_GYM_EMAIL, DEFAULT_GYM_PHONE};
use crate::error::ConfigError;
use crate::storage::KeyValueStore;
use crate::wheel_config::WheelConfig;

/// Loads and saves the wheel config under a single storage key.
pub struct ConfigStore<S> {
    storage: S,
    // Last record that could not be written; preferred by `load` from then on
    fallback: RefCell<Option<String>>,
}

impl<S: KeyValueStore> ConfigStore<S> {
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            fallback: RefCell::new(None),
        }
    }

    /// Never fails. Missing or corrupt records give the defaults, partial
    /// ones are filled in field by field.
    pub fn load(&self) -> WheelConfig {
        if let Some(raw) = self.fallback.borrow().as_deref() {
            return WheelConfig::from_stored(raw);
        }

        match self.storage.get_item(CONFIG_STORAGE_KEY) {
            Ok(Some(raw)) => WheelConfig::from_stored(&raw),
            Ok(None) => WheelConfig::default(),
            Err(e) => {
                warn!("Could not read wheel config, using defaults: {}", e);
                WheelConfig::default()
            }
        }
    }

    /// Writes the whole record, stamped with the current time. Admin only.
    pub fn save<A: KeyValueStore>(
        &self,
        authority: &AdminAuthority<A>,
        config: &WheelConfig,
    ) -> Result<WheelConfig, ConfigError> {
        authority.require()?;
        config.validate()?;

        let mut stamped = config.clone();
        stamped.updated_at = chrono::Utc::now().timestamp_millis();

        let raw = serde_json::to_string(&stamped)
            .map_err(|_| ConfigError::Invalid(ValidationError::new("unserializable_config")))?;

        match self.storage.set_item(CONFIG_STORAGE_KEY, &raw) {
            Ok(()) => {
                self.fallback.replace(None);
            }
            Err(e) => {
                warn!("Wheel config kept in memory only: {}", e);
                self.fallback.replace(Some(raw));
            }
        }
        Ok(stamped)
    }

    pub fn export(&self, config: &WheelConfig) -> Result<String, ConfigError> {
        serde_json::to_string_pretty(config)
            .map_err(|_| ConfigError::Invalid(ValidationError::new("unserializable_config")))
    }

    /// Replaces the stored config with an exported document.
    ///
    /// Fields the document lacks take their defaults, the gym location and
    /// address included. A blank gym email or phone also falls back to its
    /// default so the celebration screen always has a contact.
    pub fn import<A: KeyValueStore>(
        &self,
        authority: &AdminAuthority<A>,
        raw: &str,
    ) -> Result<WheelConfig, ConfigError> {
        authority.require()?;

        let stored = match serde_json::from_str::<Value>(raw) {
            Ok(Value::Object(stored)) => stored,
            Ok(_) => return Err(ConfigError::Import("expected a JSON object".to_string())),
            Err(e) => return Err(ConfigError::Import(e.to_string())),
        };

        let mut config = WheelConfig::merge_with_defaults(stored);
        if config.gym_email.trim().is_empty() {
            config.gym_email = DEFAULT_GYM_EMAIL.to_string();
        }
        if config.gym_phone.trim().is_empty() {
            config.gym_phone = DEFAULT_GYM_PHONE.to_string();
        }

        let saved = self.save(authority, &config)?;
        info!("Imported wheel config with {} items", saved.items.len());
        Ok(saved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{ADMIN_MODE_KEY, DEFAULT_HERO_SUBTITLE};
    use crate::storage::tests::ReadOnlyStorage;
    use crate::storage::MemoryStorage;
    use crate::wheel_config::WheelItem;

    fn admin(storage: &MemoryStorage) -> AdminAuthority<MemoryStorage> {
        storage.set_item(ADMIN_MODE_KEY, "true").unwrap();
        AdminAuthority::restore(storage.clone())
    }

    fn edited() -> WheelConfig {
        let mut config = WheelConfig::default();
        config.items = vec![
            WheelItem::new("a", "10% Off").with_color("#111111"),
            WheelItem::new("b", "Free Session").with_weight(2.5),
        ];
        config.override_result_id = Some("b".to_string());
        config.spin_duration = 6.5;
        config.logo_url = Some("https://cdn.example/logo.png".to_string());
        config.app_title = "Iron Temple".to_string();
        config.gym_address = "12 Barbell Road".to_string();
        config
    }

    #[test]
    fn test_empty_store_loads_defaults() {
        let store = ConfigStore::new(MemoryStorage::new());
        assert_eq!(store.load(), WheelConfig::default());
    }

    #[test]
    fn test_save_then_load_round_trips() {
        let storage = MemoryStorage::new();
        let authority = admin(&storage);
        let store = ConfigStore::new(storage.clone());
        let config = edited();

        let saved = store.save(&authority, &config).unwrap();
        assert!(saved.updated_at > 0);

        let loaded = ConfigStore::new(storage).load();
        assert_eq!(loaded.updated_at, saved.updated_at);
        assert_eq!(WheelConfig { updated_at: config.updated_at, ..loaded }, config);
    }

    #[test]
    fn test_non_admin_save_is_denied() {
        let storage = MemoryStorage::new();
        let authority = AdminAuthority::restore(storage.clone());
        let store = ConfigStore::new(storage.clone());
        assert_eq!(store.save(&authority, &edited()), Err(ConfigError::PermissionDenied));
        assert!(storage.get_item(CONFIG_STORAGE_KEY).unwrap().is_none());
    }

    #[test]
    fn test_older_schema_fills_missing_fields() {
        let storage = MemoryStorage::new();
        storage
            .set_item(
                CONFIG_STORAGE_KEY,
                r#"{"items":[{"id":"x","label":"Water Bottle"}],"heroTitle":"Train hard.","legacyFlag":true}"#,
            )
            .unwrap();
        let loaded = ConfigStore::new(storage).load();
        assert_eq!(loaded.items, vec![WheelItem::new("x", "Water Bottle")]);
        assert_eq!(loaded.hero_title, "Train hard.");
        assert_eq!(loaded.hero_subtitle, DEFAULT_HERO_SUBTITLE);
        assert_eq!(loaded.spin_duration, 4.0);
        assert_eq!(loaded.override_result_id, None);
    }

    #[test]
    fn test_corrupt_record_resets_to_defaults() {
        let storage = MemoryStorage::new();
        storage.set_item(CONFIG_STORAGE_KEY, "{\"items\": [").unwrap();
        assert_eq!(ConfigStore::new(storage).load(), WheelConfig::default());
    }

    #[test]
    fn test_failed_write_falls_back_to_memory() {
        let storage = ReadOnlyStorage::default();
        storage.inner.set_item(ADMIN_MODE_KEY, "true").unwrap();
        let authority = AdminAuthority::restore(storage.clone());
        let store = ConfigStore::new(storage.clone());

        let saved = store.save(&authority, &edited()).unwrap();
        assert_eq!(store.load(), saved);
        // a fresh page sees nothing
        assert_eq!(ConfigStore::new(storage).load(), WheelConfig::default());
    }

    #[test]
    fn test_invalid_config_is_not_saved() {
        let storage = MemoryStorage::new();
        let authority = admin(&storage);
        let store = ConfigStore::new(storage);
        let mut config = edited();
        config.items.push(WheelItem::new("a", "Duplicate"));
        assert!(matches!(store.save(&authority, &config), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_long_stored_duration_survives_load() {
        let storage = MemoryStorage::new();
        storage.set_item(CONFIG_STORAGE_KEY, r#"{"spinDuration":90}"#).unwrap();
        assert_eq!(ConfigStore::new(storage).load().spin_duration, 90.0);
    }

    #[test]
    fn test_loaded_long_label_can_be_saved_again() {
        let storage = MemoryStorage::new();
        let label = "Two free personal training sessions with a coach";
        storage
            .set_item(
                CONFIG_STORAGE_KEY,
                &format!(r#"{{"items":[{{"id":"a","label":"{}"}}],"spinDuration":90}}"#, label),
            )
            .unwrap();
        let authority = admin(&storage);
        let store = ConfigStore::new(storage.clone());

        let mut config = store.load();
        assert_eq!(config.items[0].label, label);
        config.app_title = "Iron Temple".to_string();
        let saved = store.save(&authority, &config).unwrap();

        let reloaded = ConfigStore::new(storage).load();
        assert_eq!(reloaded, saved);
        assert_eq!(reloaded.items[0].label, label);
        assert_eq!(reloaded.spin_duration, 90.0);
    }

    #[test]
    fn test_import_without_location_uses_defaults() {
        let storage = MemoryStorage::new();
        let authority = admin(&storage);
        let store = ConfigStore::new(storage);
        let imported = store.import(&authority, r#"{"gymPhone":"  "}"#).unwrap();
        assert_eq!(imported.gym_phone, DEFAULT_GYM_PHONE);
        assert_eq!(imported.gym_location, WheelConfig::default().gym_location);
        assert_eq!(imported.gym_address, WheelConfig::default().gym_address);
    }

    #[test]
    fn test_export_import() {
        let storage = MemoryStorage::new();
        let authority = admin(&storage);
        let store = ConfigStore::new(storage.clone());

        let exported = store.export(&edited()).unwrap();
        let imported = store.import(&authority, &exported).unwrap();
        assert_eq!(imported.app_title, "Iron Temple");
        assert_eq!(store.load(), imported);

        let partial = store.import(&authority, r#"{"appTitle":"Barbell Club","gymEmail":""}"#).unwrap();
        assert_eq!(partial.gym_email, DEFAULT_GYM_EMAIL);
        assert_eq!(partial.items, WheelConfig::default().items);

        assert!(matches!(store.import(&authority, "[]"), Err(ConfigError::Import(_))));
        assert!(matches!(store.import(&authority, "nope"), Err(ConfigError::Import(_))));

        let guest = AdminAuthority::restore(MemoryStorage::new());
        assert_eq!(store.import(&guest, &exported), Err(ConfigError::PermissionDenied));
    }
}
