pub mod admin;
pub mod config_store;
pub mod constants;
pub mod error;
pub mod outcome;
pub mod session;
pub mod spin;
pub mod storage;
pub mod validation;
pub mod wheel_config;

pub use admin::{AdminAuthority, AdminCredential, ContextMenu, EditorTab, MenuAction, MenuOption};
pub use config_store::ConfigStore;
pub use error::{ConfigError, OutcomeError, SessionError, SpinError, StorageError, WheelError};
pub use outcome::{resolve, resolve_with_rng, Resolution};
pub use session::{SessionGate, UserSession};
pub use spin::{PendingSpin, SpinButton, SpinController, SpinReveal, SpinTicket};
pub use storage::{KeyValueStore, MemoryStorage};
pub use wheel_config::{WheelConfig, WheelItem};
