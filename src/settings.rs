//! User settings as served by `/get_user_settings`, and their projection onto
//! the settings panel and page appearance.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::constants::{
    DARK_MODE_CLASS, FONT_LARGE_CLASS, FONT_MEDIUM_CLASS, FONT_SMALL_CLASS, NOT_AVAILABLE,
};

/// Settings object owned by the backend. Every field is optional on the wire
/// and kept as raw JSON so that falsy values (`""`, `0`, `false`, `null`) can
/// be told apart from real ones.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserSettings {
    #[serde(default)]
    pub name: Option<Value>,
    #[serde(default)]
    pub age: Option<Value>,
    #[serde(default)]
    pub email: Option<Value>,
    #[serde(default)]
    pub height: Option<Value>,
    #[serde(default)]
    pub weight: Option<Value>,
    #[serde(default)]
    pub theme: Option<Value>,
    #[serde(default, rename = "fontSize")]
    pub font_size: Option<Value>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// Anything other than exactly `"dark"` is the light theme.
    pub fn from_setting(value: &str) -> Self {
        if value == "dark" {
            Theme::Dark
        } else {
            Theme::Light
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontSize {
    Small,
    #[default]
    Medium,
    Large,
}

impl FontSize {
    /// `"small"` and `"large"` are recognised; everything else is medium.
    pub fn from_setting(value: &str) -> Self {
        match value {
            "small" => FontSize::Small,
            "large" => FontSize::Large,
            _ => FontSize::Medium,
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            FontSize::Small => FONT_SMALL_CLASS,
            FontSize::Medium => FONT_MEDIUM_CLASS,
            FontSize::Large => FONT_LARGE_CLASS,
        }
    }
}

/// Theme and font size applied to the page.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Appearance {
    pub theme: Theme,
    pub font_size: FontSize,
}

impl Appearance {
    /// Body classes implied by this appearance: the dark-mode class when dark,
    /// and exactly one font-size class.
    pub fn body_classes(&self) -> Vec<&'static str> {
        let mut classes = Vec::with_capacity(2);
        if self.theme == Theme::Dark {
            classes.push(DARK_MODE_CLASS);
        }
        classes.push(self.font_size.css_class());
        classes
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.body_classes().iter().any(|c| *c == class)
    }
}

/// Display text for every settings panel field, plus the appearance to apply.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SettingsProjection {
    pub name: String,
    pub age: String,
    pub email: String,
    pub height: String,
    pub weight: String,
    pub theme: String,
    pub font_size: String,
    pub appearance: Appearance,
}

impl Default for SettingsProjection {
    /// What the panel shows before the first successful fetch.
    fn default() -> Self {
        Self {
            name: NOT_AVAILABLE.to_string(),
            age: NOT_AVAILABLE.to_string(),
            email: NOT_AVAILABLE.to_string(),
            height: NOT_AVAILABLE.to_string(),
            weight: NOT_AVAILABLE.to_string(),
            theme: "Light".to_string(),
            font_size: "Medium".to_string(),
            appearance: Appearance::default(),
        }
    }
}

impl SettingsProjection {
    /// Labelled panel rows in page order.
    pub fn fields(&self) -> [(&'static str, &str); 7] {
        [
            ("Name", self.name.as_str()),
            ("Age", self.age.as_str()),
            ("Email", self.email.as_str()),
            ("Height", self.height.as_str()),
            ("Weight", self.weight.as_str()),
            ("Theme", self.theme.as_str()),
            ("Font Size", self.font_size.as_str()),
        ]
    }
}

/// Project fetched settings onto display text and appearance.
///
/// Defaults for `theme` and `fontSize` are applied before capitalizing, so
/// absent fields show `Light` / `Medium`.
pub fn project(settings: &UserSettings) -> SettingsProjection {
    let theme = text_or(settings.theme.as_ref(), "light");
    let font_size = text_or(settings.font_size.as_ref(), "medium");

    SettingsProjection {
        name: display_or_na(settings.name.as_ref()),
        age: display_or_na(settings.age.as_ref()),
        email: display_or_na(settings.email.as_ref()),
        height: display_or_na(settings.height.as_ref()),
        weight: display_or_na(settings.weight.as_ref()),
        theme: capitalize(&theme),
        font_size: capitalize(&font_size),
        appearance: Appearance {
            theme: Theme::from_setting(&theme),
            font_size: FontSize::from_setting(&font_size),
        },
    }
}

/// JSON truthiness: `null`, `false`, `0` and `""` are falsy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Text of a JSON scalar as it would appear on the page.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn display_or_na(value: Option<&Value>) -> String {
    match value {
        Some(v) if is_truthy(v) => display_value(v),
        _ => NOT_AVAILABLE.to_string(),
    }
}

fn text_or(value: Option<&Value>, default: &str) -> String {
    match value {
        Some(Value::String(s)) if !s.is_empty() => s.clone(),
        _ => default.to_string(),
    }
}

/// Uppercase the first character, leave the rest as is.
pub fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
