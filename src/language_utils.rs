use anyhow::{Result, anyhow};
use isolang::Language;
use rust_stemmers::Algorithm;
use serde::{Deserialize, Serialize};
use std::fmt;

// @module: Language resolution for the summarizer
//
// Users name the summary language either the way classic NLP toolkits do
// ("english", "german") or with an ISO 639-1/639-2 code ("en", "deu", "ger").
// Both spellings resolve to a `SummaryLanguage`, which selects the stemmer and
// the stop-word list.

// @const: ISO 639-2/B codes that differ from their 639-2/T counterpart
const PART2B_ALIASES: [(&str, &str); 18] = [
    ("fre", "fra"), ("ger", "deu"), ("dut", "nld"), ("gre", "ell"),
    ("chi", "zho"), ("cze", "ces"), ("ice", "isl"), ("alb", "sqi"),
    ("arm", "hye"), ("baq", "eus"), ("bur", "mya"), ("per", "fas"),
    ("geo", "kat"), ("may", "msa"), ("mac", "mkd"), ("rum", "ron"),
    ("slo", "slk"), ("wel", "cym"),
];

/// Normalize a language code to ISO 639-2/T (3-letter) format
pub fn normalize_to_part2t(code: &str) -> Result<String> {
    let normalized_code = code.trim().to_lowercase();

    match normalized_code.len() {
        2 => {
            if let Some(lang) = Language::from_639_1(&normalized_code) {
                return Ok(lang.to_639_3().to_string());
            }
        }
        3 => {
            if Language::from_639_3(&normalized_code).is_some() {
                return Ok(normalized_code);
            }
            if let Some((_, part2t)) = PART2B_ALIASES.iter().find(|(b, _)| *b == normalized_code) {
                return Ok(part2t.to_string());
            }
        }
        _ => {}
    }

    Err(anyhow!("Cannot normalize invalid language code: {}", code))
}

/// Check if two language codes match (represent the same language)
pub fn language_codes_match(code1: &str, code2: &str) -> bool {
    match (normalize_to_part2t(code1), normalize_to_part2t(code2)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

/// Get the English language name from a code
pub fn get_language_name(code: &str) -> Result<String> {
    let normalized = normalize_to_part2t(code)?;
    let lang = Language::from_639_3(&normalized)
        .ok_or_else(|| anyhow!("Failed to get language from code: {}", normalized))?;

    Ok(lang.to_name().to_string())
}

/// Languages the statistical summarizer can tokenize and stem
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SummaryLanguage {
    Arabic,
    Danish,
    Dutch,
    English,
    Finnish,
    French,
    German,
    Greek,
    Hungarian,
    Italian,
    Norwegian,
    Portuguese,
    Romanian,
    Russian,
    Spanish,
    Swedish,
    Tamil,
    Turkish,
}

impl SummaryLanguage {
    pub const ALL: [SummaryLanguage; 18] = [
        Self::Arabic, Self::Danish, Self::Dutch, Self::English, Self::Finnish,
        Self::French, Self::German, Self::Greek, Self::Hungarian, Self::Italian,
        Self::Norwegian, Self::Portuguese, Self::Romanian, Self::Russian,
        Self::Spanish, Self::Swedish, Self::Tamil, Self::Turkish,
    ];

    // @returns: ISO 639-2/T code
    pub fn iso_code(&self) -> &'static str {
        match self {
            Self::Arabic => "ara",
            Self::Danish => "dan",
            Self::Dutch => "nld",
            Self::English => "eng",
            Self::Finnish => "fin",
            Self::French => "fra",
            Self::German => "deu",
            Self::Greek => "ell",
            Self::Hungarian => "hun",
            Self::Italian => "ita",
            Self::Norwegian => "nor",
            Self::Portuguese => "por",
            Self::Romanian => "ron",
            Self::Russian => "rus",
            Self::Spanish => "spa",
            Self::Swedish => "swe",
            Self::Tamil => "tam",
            Self::Turkish => "tur",
        }
    }

    // @returns: Lowercase name, as used in configuration files
    pub fn name(&self) -> &'static str {
        match self {
            Self::Arabic => "arabic",
            Self::Danish => "danish",
            Self::Dutch => "dutch",
            Self::English => "english",
            Self::Finnish => "finnish",
            Self::French => "french",
            Self::German => "german",
            Self::Greek => "greek",
            Self::Hungarian => "hungarian",
            Self::Italian => "italian",
            Self::Norwegian => "norwegian",
            Self::Portuguese => "portuguese",
            Self::Romanian => "romanian",
            Self::Russian => "russian",
            Self::Spanish => "spanish",
            Self::Swedish => "swedish",
            Self::Tamil => "tamil",
            Self::Turkish => "turkish",
        }
    }

    /// Snowball stemmer for this language
    pub fn stemmer_algorithm(&self) -> Algorithm {
        match self {
            Self::Arabic => Algorithm::Arabic,
            Self::Danish => Algorithm::Danish,
            Self::Dutch => Algorithm::Dutch,
            Self::English => Algorithm::English,
            Self::Finnish => Algorithm::Finnish,
            Self::French => Algorithm::French,
            Self::German => Algorithm::German,
            Self::Greek => Algorithm::Greek,
            Self::Hungarian => Algorithm::Hungarian,
            Self::Italian => Algorithm::Italian,
            Self::Norwegian => Algorithm::Norwegian,
            Self::Portuguese => Algorithm::Portuguese,
            Self::Romanian => Algorithm::Romanian,
            Self::Russian => Algorithm::Russian,
            Self::Spanish => Algorithm::Spanish,
            Self::Swedish => Algorithm::Swedish,
            Self::Tamil => Algorithm::Tamil,
            Self::Turkish => Algorithm::Turkish,
        }
    }

    /// Resolve a language name ("english") or ISO code ("en", "eng", "ger")
    pub fn resolve(input: &str) -> Result<Self> {
        let lowered = input.trim().to_lowercase();

        if let Some(lang) = Self::ALL.iter().find(|l| l.name() == lowered) {
            return Ok(*lang);
        }

        // Norwegian Bokmål and Nynorsk share the Norwegian stemmer
        let code = match normalize_to_part2t(&lowered)?.as_str() {
            "nob" | "nno" => "nor".to_string(),
            other => other.to_string(),
        };

        Self::ALL
            .iter()
            .find(|l| l.iso_code() == code)
            .copied()
            .ok_or_else(|| {
                let name = get_language_name(&code).unwrap_or_else(|_| code.clone());
                anyhow!("No summarizer support for language: {}", name)
            })
    }
}

impl fmt::Display for SummaryLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for SummaryLanguage {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::resolve(s)
    }
}
