use serde::{Deserialize, Serialize};
use serde_with::DeserializeFromStr;
use strum::{Display as StrumDisplay, EnumIter, EnumString};

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    DeserializeFromStr,
    EnumString,
    EnumIter,
    StrumDisplay,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    #[strum(to_string = "en", serialize = "english")]
    En,
    #[strum(to_string = "jp", serialize = "ja", serialize = "japanese")]
    Jp,
}

impl Locale {
    pub fn hover_hint(&self) -> &'static str {
        match self {
            Self::En => "Hover over nodes to explore",
            Self::Jp => "ノードにホバーして詳細を表示",
        }
    }

    pub fn unavailable(&self) -> &'static str {
        match self {
            Self::En => "3D visualization unavailable",
            Self::Jp => "3D表示を利用できません",
        }
    }
}

/// Text with an English original and an optional Japanese translation.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Localized {
    pub en: String,
    #[serde(default)]
    pub jp: Option<String>,
}

impl Localized {
    pub fn new(en: impl Into<String>, jp: impl Into<String>) -> Self {
        Self {
            en: en.into(),
            jp: Some(jp.into()),
        }
    }

    pub fn same(text: impl Into<String>) -> Self {
        Self {
            en: text.into(),
            jp: None,
        }
    }

    /// Falls back to English when no translation exists.
    pub fn get(&self, locale: Locale) -> &str {
        match locale {
            Locale::Jp => self.jp.as_deref().unwrap_or(&self.en),
            Locale::En => &self.en,
        }
    }
}
