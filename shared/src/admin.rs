use hmac::{Hmac, Mac};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use sha2::Sha256;

use crate::constants::{ADMIN_MODE_KEY, DEFAULT_ADMIN_SECRET};
use crate::error::ConfigError;
use crate::storage::KeyValueStore;
use crate::wheel_config::{WheelConfig, WheelItem};

type HmacSha256 = Hmac<Sha256>;

const CREDENTIAL_KEY: &[u8] = b"prize-wheel-admin-credential";

/// The shared admin secret, kept only as an HMAC tag.
///
/// Attempts are tagged the same way and compared with `verify_slice`, which
/// runs in constant time whatever the attempt's length or content.
#[derive(Clone)]
pub struct AdminCredential {
    expected: Vec<u8>,
}

impl AdminCredential {
    pub fn new(secret: &str) -> Self {
        let expected = match HmacSha256::new_from_slice(CREDENTIAL_KEY) {
            Ok(mut mac) => {
                mac.update(secret.as_bytes());
                mac.finalize().into_bytes().to_vec()
            }
            Err(_) => Vec::new(),
        };
        Self { expected }
    }

    pub fn verify(&self, attempt: &str) -> bool {
        let mut mac = match HmacSha256::new_from_slice(CREDENTIAL_KEY) {
            Ok(mac) => mac,
            Err(_) => return false,
        };
        mac.update(attempt.as_bytes());
        mac.verify_slice(&self.expected).is_ok()
    }
}

impl Default for AdminCredential {
    fn default() -> Self {
        Self::new(DEFAULT_ADMIN_SECRET)
    }
}

/// Admin mode for this browser profile, independent of any member session.
/// Survives reloads through its own storage key until revoked.
pub struct AdminAuthority<S> {
    storage: S,
    granted: bool,
}

impl<S: KeyValueStore> AdminAuthority<S> {
    pub fn restore(storage: S) -> Self {
        let granted = match storage.get_item(ADMIN_MODE_KEY) {
            Ok(value) => value.as_deref() == Some("true"),
            Err(e) => {
                warn!("Could not read admin flag: {}", e);
                false
            }
        };
        Self { storage, granted }
    }

    pub fn is_granted(&self) -> bool {
        self.granted
    }

    pub fn require(&self) -> Result<(), ConfigError> {
        if self.granted {
            Ok(())
        } else {
            Err(ConfigError::PermissionDenied)
        }
    }

    pub(crate) fn grant(&mut self) {
        self.granted = true;
        if let Err(e) = self.storage.set_item(ADMIN_MODE_KEY, "true") {
            warn!("Admin mode granted for this page only: {}", e);
        }
        info!("Admin mode enabled");
    }

    pub(crate) fn revoke(&mut self) {
        self.granted = false;
        if let Err(e) = self.storage.remove_item(ADMIN_MODE_KEY) {
            warn!("Could not clear stored admin flag: {}", e);
        }
        info!("Admin mode disabled");
    }

    /// Returns the menu to show, or `None` outside admin mode.
    pub fn open_context_menu(&self, x: i32, y: i32, options: Vec<MenuOption>) -> Option<ContextMenu> {
        if !self.granted || options.is_empty() {
            return None;
        }
        Some(ContextMenu { x, y, options })
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum EditorTab {
    #[default]
    Content,
    Text,
    Font,
    Admin,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub enum MenuAction {
    OpenEditorTab(EditorTab),
    ForceResult(String),
    ClearForcedResult,
}

impl MenuAction {
    /// Applies the action to a working copy of the config. Returns the editor
    /// tab to switch to, if any. Persisting the change is a separate, gated save.
    pub fn apply(&self, config: &mut WheelConfig) -> Result<Option<EditorTab>, ConfigError> {
        match self {
            Self::OpenEditorTab(tab) => Ok(Some(*tab)),
            Self::ForceResult(id) => {
                config.set_override(Some(id))?;
                Ok(Some(EditorTab::Admin))
            }
            Self::ClearForcedResult => {
                config.set_override(None)?;
                Ok(None)
            }
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct MenuOption {
    pub label: String,
    pub action: MenuAction,
}

impl MenuOption {
    pub fn new(label: impl Into<String>, action: MenuAction) -> Self {
        Self { label: label.into(), action }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ContextMenu {
    pub x: i32,
    pub y: i32,
    pub options: Vec<MenuOption>,
}

/// Options for right-clicking a wheel slice
pub fn slice_menu(item: &WheelItem, config: &WheelConfig) -> Vec<MenuOption> {
    let mut options = vec![
        MenuOption::new("Edit prizes", MenuAction::OpenEditorTab(EditorTab::Content)),
        MenuOption::new(format!("Force \"{}\"", item.label), MenuAction::ForceResult(item.id.clone())),
    ];
    if config.effective_override().is_some() {
        options.push(MenuOption::new("Clear forced result", MenuAction::ClearForcedResult));
    }
    options
}

/// Options for right-clicking the celebration screen
pub fn celebration_menu() -> Vec<MenuOption> {
    vec![
        MenuOption::new("Edit text", MenuAction::OpenEditorTab(EditorTab::Text)),
        MenuOption::new("Change font", MenuAction::OpenEditorTab(EditorTab::Font)),
    ]
}
