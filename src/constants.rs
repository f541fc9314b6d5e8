// Constants shared across the client.

/// Backend used when neither `--base-url` nor `NUTRICHAT_URL` is set.
/// The Flask backend listens on port 5000 by default.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";

/// Shown in place of a reply when the request or its decoding fails.
pub const FALLBACK_MESSAGE: &str = "Something went wrong. Please try again.";

/// Prefix for application-level errors reported by the backend.
pub const ERROR_PREFIX: &str = "Error: ";

/// Shown for settings fields that are missing or empty.
pub const NOT_AVAILABLE: &str = "N/A";

pub const ASK_PATH: &str = "/ask";
pub const ASK_SETTINGS_PATH: &str = "/ask_settings";
pub const USER_SETTINGS_PATH: &str = "/get_user_settings";
pub const HISTORY_PATH: &str = "/get_history";

// Body classes mirrored from the page stylesheet.
pub const DARK_MODE_CLASS: &str = "dark-mode";
pub const FONT_SMALL_CLASS: &str = "font-small";
pub const FONT_MEDIUM_CLASS: &str = "font-medium";
pub const FONT_LARGE_CLASS: &str = "font-large";

// Capacity of the UI event broadcast channel.
pub const UI_EVENT_CAPACITY: usize = 100;
