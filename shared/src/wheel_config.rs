use log::warn;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::constants::*;
use crate::error::ConfigError;
use crate::validation::{
    validate_font_size, validate_item_label, validate_item_weight, validate_spin_duration,
    validate_spin_duration_setting,
};

/// One slice of the wheel
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct WheelItem {
    pub id: String,
    pub label: String,
    #[serde(default)]
    pub color: String,
    /// Relative odds. When no item on the wheel has one, every slice is equally likely.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
}

impl WheelItem {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            color: String::new(),
            weight: None,
        }
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = Some(weight);
        self
    }
}

/// Everything the admin can edit, persisted as one JSON record.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WheelConfig {
    pub id: String,
    pub name: String,
    pub items: Vec<WheelItem>,
    pub spin_duration: f64,
    pub override_result_id: Option<String>,
    pub logo_url: Option<String>,
    pub font: String,
    pub font_size: f64,
    pub app_title: String,
    pub app_subtitle: String,
    pub hero_title: String,
    pub hero_subtitle: String,
    pub offer_title: String,
    pub celebration_header: String,
    pub celebration_footer: String,
    pub spin_button_text: String,
    pub spin_button_color: String,
    pub footer_text: String,
    pub gym_email: String,
    pub gym_phone: String,
    pub gym_location: String,
    pub gym_address: String,
    /// Epoch milliseconds of the last save
    pub updated_at: i64,
}

static DEFAULT_CONFIG: Lazy<WheelConfig> = Lazy::new(|| WheelConfig {
    id: DEFAULT_CONFIG_ID.to_string(),
    name: DEFAULT_CONFIG_NAME.to_string(),
    items: initial_items(),
    spin_duration: DEFAULT_SPIN_DURATION,
    override_result_id: None,
    logo_url: None,
    font: AVAILABLE_FONTS[0].1.to_string(),
    font_size: DEFAULT_FONT_SIZE,
    app_title: DEFAULT_APP_TITLE.to_string(),
    app_subtitle: DEFAULT_APP_SUBTITLE.to_string(),
    hero_title: DEFAULT_HERO_TITLE.to_string(),
    hero_subtitle: DEFAULT_HERO_SUBTITLE.to_string(),
    offer_title: DEFAULT_OFFER_TITLE.to_string(),
    celebration_header: DEFAULT_CELEBRATION_HEADER.to_string(),
    celebration_footer: DEFAULT_CELEBRATION_FOOTER.to_string(),
    spin_button_text: DEFAULT_SPIN_BUTTON_TEXT.to_string(),
    spin_button_color: WHEEL_COLORS[0].to_string(),
    footer_text: DEFAULT_FOOTER_TEXT.to_string(),
    gym_email: DEFAULT_GYM_EMAIL.to_string(),
    gym_phone: DEFAULT_GYM_PHONE.to_string(),
    gym_location: DEFAULT_GYM_LOCATION.to_string(),
    gym_address: DEFAULT_GYM_ADDRESS.to_string(),
    updated_at: 0,
});

// The defaults as a JSON object, the base every stored record is merged onto
static DEFAULT_FIELDS: Lazy<Map<String, Value>> = Lazy::new(|| {
    match serde_json::to_value(&*DEFAULT_CONFIG) {
        Ok(Value::Object(fields)) => fields,
        _ => Map::new(),
    }
});

fn initial_items() -> Vec<WheelItem> {
    INITIAL_ITEMS
        .iter()
        .enumerate()
        .map(|(i, (id, label))| {
            WheelItem::new(*id, *label).with_color(WHEEL_COLORS[i % WHEEL_COLORS.len()])
        })
        .collect()
}

impl Default for WheelConfig {
    fn default() -> Self {
        DEFAULT_CONFIG.clone()
    }
}

impl WheelConfig {
    /// Builds a config from a stored JSON document, keeping every stored field
    /// that has the right shape and taking the default for the rest.
    ///
    /// Never fails: anything that is not a JSON object yields the defaults.
    pub fn from_stored(raw: &str) -> Self {
        match serde_json::from_str::<Value>(raw) {
            Ok(Value::Object(stored)) => Self::merge_with_defaults(stored),
            Ok(_) => {
                warn!("Stored wheel config is not a JSON object, using defaults");
                Self::default()
            }
            Err(e) => {
                warn!("Stored wheel config is corrupt ({}), using defaults", e);
                Self::default()
            }
        }
    }

    pub fn merge_with_defaults(stored: Map<String, Value>) -> Self {
        let mut merged = DEFAULT_FIELDS.clone();

        for (key, value) in stored {
            if !merged.contains_key(&key) {
                continue;
            }
            let mut candidate = merged.clone();
            candidate.insert(key.clone(), value);
            if serde_json::from_value::<WheelConfig>(Value::Object(candidate.clone())).is_ok() {
                merged = candidate;
            } else {
                warn!("Ignoring stored wheel config field {} with unexpected shape", key);
            }
        }

        serde_json::from_value::<WheelConfig>(Value::Object(merged))
            .unwrap_or_default()
            .normalized()
    }

    /// Repairs values that deserialize but break the config's invariants.
    pub fn normalized(mut self) -> Self {
        if validate_spin_duration(self.spin_duration).is_err() {
            warn!("Resetting invalid spin duration {}", self.spin_duration);
            self.spin_duration = DEFAULT_SPIN_DURATION;
        }
        if validate_font_size(self.font_size).is_err() {
            warn!("Resetting invalid font size {}", self.font_size);
            self.font_size = DEFAULT_FONT_SIZE;
        }
        for item in &mut self.items {
            if let Some(weight) = item.weight.filter(|w| validate_item_weight(*w).is_err()) {
                warn!("Resetting invalid weight {} on wheel item {}", weight, item.id);
                item.weight = Some(0.0);
            }
        }

        let mut seen = std::collections::HashSet::new();
        self.items.retain(|item| {
            let fresh = seen.insert(item.id.clone());
            if !fresh {
                warn!("Dropping wheel item with duplicate id {}", item.id);
            }
            fresh
        });
        self
    }

    /// Checks the invariants every persisted record keeps. Anything
    /// `normalized` returns passes.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_spin_duration(self.spin_duration)?;
        validate_font_size(self.font_size)?;

        let mut seen = std::collections::HashSet::new();
        for item in &self.items {
            if let Some(weight) = item.weight {
                validate_item_weight(weight)?;
            }
            if !seen.insert(item.id.as_str()) {
                return Err(ConfigError::Invalid(validator::ValidationError::new(
                    "duplicate_item_id",
                )));
            }
        }
        Ok(())
    }

    pub fn item(&self, id: &str) -> Option<&WheelItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// The forced winner, if it still points at an item on the wheel.
    pub fn effective_override(&self) -> Option<&WheelItem> {
        self.override_result_id.as_deref().and_then(|id| self.item(id))
    }

    pub fn add_item(&mut self, label: &str, color: Option<&str>) -> Result<&WheelItem, ConfigError> {
        validate_item_label(label)?;
        let mut id = Uuid::new_v4().to_string();
        while self.item(&id).is_some() {
            id = Uuid::new_v4().to_string();
        }
        let color = color
            .map(str::to_string)
            .unwrap_or_else(|| WHEEL_COLORS[self.items.len() % WHEEL_COLORS.len()].to_string());
        self.items.push(WheelItem::new(id, label.trim()).with_color(color));
        Ok(&self.items[self.items.len() - 1])
    }

    pub fn update_item(&mut self, id: &str, label: &str, color: &str) -> Result<(), ConfigError> {
        validate_item_label(label)?;
        let item = self
            .items
            .iter_mut()
            .find(|item| item.id == id)
            .ok_or_else(|| ConfigError::UnknownItem(id.to_string()))?;
        item.label = label.trim().to_string();
        item.color = color.to_string();
        Ok(())
    }

    pub fn set_item_weight(&mut self, id: &str, weight: Option<f64>) -> Result<(), ConfigError> {
        if let Some(weight) = weight {
            validate_item_weight(weight)?;
        }
        let item = self
            .items
            .iter_mut()
            .find(|item| item.id == id)
            .ok_or_else(|| ConfigError::UnknownItem(id.to_string()))?;
        item.weight = weight;
        Ok(())
    }

    /// Removes an item. An override that pointed at it is cleared.
    pub fn remove_item(&mut self, id: &str) -> Option<WheelItem> {
        let index = self.items.iter().position(|item| item.id == id)?;
        if self.override_result_id.as_deref() == Some(id) {
            self.override_result_id = None;
        }
        Some(self.items.remove(index))
    }

    pub fn set_override(&mut self, id: Option<&str>) -> Result<(), ConfigError> {
        match id {
            Some(id) if self.item(id).is_none() => Err(ConfigError::UnknownItem(id.to_string())),
            _ => {
                self.override_result_id = id.map(str::to_string);
                Ok(())
            }
        }
    }

    pub fn set_spin_duration(&mut self, seconds: f64) -> Result<(), ConfigError> {
        validate_spin_duration_setting(seconds)?;
        self.spin_duration = seconds;
        Ok(())
    }

    pub fn set_font_size(&mut self, size: f64) -> Result<(), ConfigError> {
        validate_font_size(size)?;
        self.font_size = size;
        Ok(())
    }
}
