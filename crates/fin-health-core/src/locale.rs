//! Output language for labels, answers and conclusions.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Locale {
    #[default]
    En,
    /// Traditional Chinese (Taiwan), the wording analysts of the source
    /// rubric work with.
    ZhTw,
}

impl Locale {
    pub fn yes(self) -> &'static str {
        match self {
            Locale::En => "Yes",
            Locale::ZhTw => "是",
        }
    }

    pub fn no(self) -> &'static str {
        match self {
            Locale::En => "No",
            Locale::ZhTw => "否",
        }
    }

    pub fn answer(self, passed: bool) -> &'static str {
        if passed {
            self.yes()
        } else {
            self.no()
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locale::En => write!(f, "en"),
            Locale::ZhTw => write!(f, "zh-tw"),
        }
    }
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "en" | "en-us" | "en-gb" | "english" => Ok(Locale::En),
            "zh-tw" | "zh-hant" | "zh" => Ok(Locale::ZhTw),
            other => Err(format!("Unsupported locale '{other}' (expected 'en' or 'zh-tw')")),
        }
    }
}

/// A piece of user-facing text in every supported locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Text {
    pub en: &'static str,
    pub zh_tw: &'static str,
}

impl Text {
    pub const fn new(en: &'static str, zh_tw: &'static str) -> Self {
        Self { en, zh_tw }
    }

    pub fn get(&self, locale: Locale) -> &'static str {
        match locale {
            Locale::En => self.en,
            Locale::ZhTw => self.zh_tw,
        }
    }
}
