//! Metadata endpoint resources and languages
//!
//! The static metadata endpoint serves one JSON document per resource,
//! under a language segment: `{base}{language}/{resource}.json`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Default base URL of the static metadata endpoint
pub const DEFAULT_BASE_URL: &str = "https://open.api.nexon.com/static/tfd/meta/";

// ============================================================================
// Resource
// ============================================================================

/// Metadata documents served by the endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Stat,
    Weapon,
    Descendant,
    Module,
    Reactor,
    ExternalComponent,
    RewardHour,
    VoidBattle,
    Title,
}

impl Resource {
    /// All known resources, in endpoint listing order
    pub const ALL: &'static [Resource] = &[
        Resource::Stat,
        Resource::Weapon,
        Resource::Descendant,
        Resource::Module,
        Resource::Reactor,
        Resource::ExternalComponent,
        Resource::RewardHour,
        Resource::VoidBattle,
        Resource::Title,
    ];

    /// Path of the resource relative to the language segment
    pub fn path(self) -> &'static str {
        match self {
            Resource::Stat => "stat.json",
            Resource::Weapon => "weapon.json",
            Resource::Descendant => "descendant.json",
            Resource::Module => "module.json",
            Resource::Reactor => "reactor.json",
            Resource::ExternalComponent => "external-component.json",
            Resource::RewardHour => "reward-hour.json",
            Resource::VoidBattle => "void-battle.json",
            Resource::Title => "title.json",
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

// ============================================================================
// Language
// ============================================================================

/// Languages the metadata endpoint is published in
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Language {
    Korean,
    #[default]
    English,
    German,
    French,
    Japanese,
    ChineseSimplified,
    ChineseTraditional,
    Italian,
    Polish,
    Portuguese,
    Russian,
    Spanish,
}

impl Language {
    pub const ALL: &'static [Language] = &[
        Language::Korean,
        Language::English,
        Language::German,
        Language::French,
        Language::Japanese,
        Language::ChineseSimplified,
        Language::ChineseTraditional,
        Language::Italian,
        Language::Polish,
        Language::Portuguese,
        Language::Russian,
        Language::Spanish,
    ];

    /// Language code as used in the endpoint path
    pub fn code(self) -> &'static str {
        match self {
            Language::Korean => "ko",
            Language::English => "en",
            Language::German => "de",
            Language::French => "fr",
            Language::Japanese => "ja",
            Language::ChineseSimplified => "zh-CN",
            Language::ChineseTraditional => "zh-TW",
            Language::Italian => "it",
            Language::Polish => "pl",
            Language::Portuguese => "pt",
            Language::Russian => "ru",
            Language::Spanish => "es",
        }
    }

    /// Path segment inserted between the base URL and the resource path
    pub fn segment(self) -> String {
        format!("{}/", self.code())
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Language::ALL
            .iter()
            .copied()
            .find(|l| l.code().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                let codes: Vec<&str> = Language::ALL.iter().map(|l| l.code()).collect();
                format!("Unknown language '{}' (expected one of: {})", s, codes.join(", "))
            })
    }
}

impl TryFrom<String> for Language {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Language> for String {
    fn from(language: Language) -> Self {
        language.code().to_string()
    }
}
