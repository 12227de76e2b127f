//! Shared constants used across the application

/// Character reply shown whenever an exchange fails for any reason.
pub const FALLBACK_REPLY: &str = "حدث خطأ أثناء الاتصال. يرجى المحاولة مرة أخرى.";

/// Heading shown above both screens.
pub const APP_HEADING: &str = "الدردشة مع شخصيات قناتك";

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

/// Overrides the `api_key` stored in the config file.
pub const API_KEY_ENV_VAR: &str = "GEMINI_API_KEY";

/// Space reserved for the busy indicator + margin in the input area.
/// Rendering and cursor placement must agree on it.
pub const INDICATOR_SPACE: u16 = 4;
