pub const CONFIG_STORAGE_KEY: &str = "da_strength_club_wheel_active";
pub const ADMIN_MODE_KEY: &str = "dsc_admin_authenticated";

pub const DEFAULT_CONFIG_ID: &str = "current";
pub const DEFAULT_CONFIG_NAME: &str = "Active Wheel";

pub const DEFAULT_SPIN_DURATION: f64 = 4.0;
pub const MAX_SPIN_DURATION: f64 = 60.0;
pub const DEFAULT_FONT_SIZE: f64 = 3.2;

pub const DEFAULT_APP_TITLE: &str = "Da Strength Club Spin";
pub const DEFAULT_APP_SUBTITLE: &str = "Pro Edition";
pub const DEFAULT_HERO_TITLE: &str = "Valor is a choice.";
pub const DEFAULT_HERO_SUBTITLE: &str = "So, make your own.";
pub const DEFAULT_OFFER_TITLE: &str = "Discount";
pub const DEFAULT_CELEBRATION_HEADER: &str = "Victory Unlocked";
pub const DEFAULT_CELEBRATION_FOOTER: &str = "Epic Win Registered";
pub const DEFAULT_SPIN_BUTTON_TEXT: &str = "TAP TO SPIN";
pub const DEFAULT_FOOTER_TEXT: &str = "Da Strength Club Spin Pro • Verified Admin Protocol";

pub const DEFAULT_GYM_EMAIL: &str = "dastrengthclub@gmail.com";
pub const DEFAULT_GYM_PHONE: &str = "+91 99999 88888";
pub const DEFAULT_GYM_LOCATION: &str = "https://www.google.com/maps?q=Da+Strength+Club";
pub const DEFAULT_GYM_ADDRESS: &str = "Elite Performance Center, Muscle District";

// Shown on the trigger once the member has used their spin
pub const EXHAUSTED_BUTTON_TEXT: &str = "OFFER EXHAUSTED";
pub const EXHAUSTED_BUTTON_COLOR: &str = "#e2e8f0";

pub const WHEEL_COLORS: [&str; 8] = [
    "#4f46e5", "#f43f5e", "#f59e0b", "#10b981",
    "#0ea5e9", "#8b5cf6", "#ec4899", "#14b8a6",
];

/// (display name, CSS font family)
pub const AVAILABLE_FONTS: [(&str, &str); 5] = [
    ("Inter", "'Inter', sans-serif"),
    ("Bebas Neue", "'Bebas Neue', sans-serif"),
    ("Oswald", "'Oswald', sans-serif"),
    ("Montserrat", "'Montserrat', sans-serif"),
    ("Playfair Display", "'Playfair Display', serif"),
];

/// (id, label) of the wheel shipped on first run
pub const INITIAL_ITEMS: [(&str, &str); 6] = [
    ("1", "10% Off"),
    ("2", "Free Session"),
    ("3", "Protein Shake"),
    ("4", "20% Off"),
    ("5", "Free PT Session"),
    ("6", "Club Merch"),
];

pub const DEFAULT_ADMIN_SECRET: &str = match option_env!("WHEEL_ADMIN_SECRET") {
    Some(secret) => secret,
    None => "dsc-admin-2024",
};

pub const INVALID_EMAIL_ERROR: &str = "Please enter a valid email address";
pub const ALREADY_SPUN_ERROR: &str = "This member has already used their spin";
pub const EMPTY_WHEEL_ERROR: &str = "The wheel has no prizes configured";
pub const PERMISSION_DENIED_ERROR: &str = "Admin access is required to change the wheel";
pub const SPIN_IN_FLIGHT_ERROR: &str = "A spin is already in progress";
pub const NOT_SIGNED_IN_ERROR: &str = "Please sign in before spinning";
