//! Generation configuration: language, tone, customer context, section toggles.
//!
//! Request flags and a stored template are merged once into a
//! `ResolvedConfig` before the prompt is assembled. Template values win
//! whenever the template actually sets them.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Output language of the generated message.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    English,
    Tamil,
    /// English first, then Tamil.
    Both,
}

impl Language {
    pub fn as_str(self) -> &'static str {
        match self {
            Language::English => "english",
            Language::Tamil => "tamil",
            Language::Both => "both",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    #[default]
    Professional,
    Friendly,
    Motivational,
    Formal,
}

impl Tone {
    /// Lenient parse for stored values; anything unrecognized is `Professional`.
    pub fn parse_lenient(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "friendly" => Tone::Friendly,
            "motivational" => Tone::Motivational,
            "formal" => Tone::Formal,
            _ => Tone::Professional,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CustomerType {
    Fresher,
    Experienced,
    CareerChange,
    Student,
    #[default]
    Custom,
}

impl CustomerType {
    /// Lenient parse for stored values; anything unrecognized is `Custom`.
    pub fn parse_lenient(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "fresher" => CustomerType::Fresher,
            "experienced" => CustomerType::Experienced,
            "career_change" => CustomerType::CareerChange,
            "student" => CustomerType::Student,
            _ => CustomerType::Custom,
        }
    }
}

/// Per-section overrides as stored on a template. `None` means the template
/// does not say, so the base value applies.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SectionOverrides {
    pub appreciation: Option<bool>,
    pub feedback: Option<bool>,
    pub guidance: Option<bool>,
    pub job_roles: Option<bool>,
    pub interview_questions: Option<bool>,
    pub encouragement: Option<bool>,
}

/// A saved bundle of tone, audience and section choices.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Template {
    pub id: Uuid,
    pub name: String,
    pub tone: Tone,
    pub customer_type: CustomerType,
    pub sections: SectionOverrides,
    pub custom_instructions: Option<String>,
}

/// Everything the caller and stored settings say about one generation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenerationConfig {
    pub language: Language,
    pub include_interview_questions: bool,
    pub include_ats_score: bool,
    pub template: Option<Template>,
}

/// Final on/off state of every section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionFlags {
    pub appreciation: bool,
    pub feedback: bool,
    pub guidance: bool,
    pub job_roles: bool,
    pub interview_questions: bool,
    pub ats_score: bool,
    pub encouragement: bool,
}

/// Config after precedence has been applied. This is what the prompt
/// builder consumes.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    pub language: Language,
    pub tone: Tone,
    pub customer_type: CustomerType,
    pub sections: SectionFlags,
    pub custom_instructions: Option<String>,
}

impl GenerationConfig {
    pub fn resolve(&self) -> ResolvedConfig {
        let overrides = self
            .template
            .as_ref()
            .map(|t| t.sections.clone())
            .unwrap_or_default();

        let sections = SectionFlags {
            appreciation: overrides.appreciation.unwrap_or(true),
            feedback: overrides.feedback.unwrap_or(true),
            guidance: overrides.guidance.unwrap_or(true),
            job_roles: overrides.job_roles.unwrap_or(true),
            interview_questions: overrides
                .interview_questions
                .unwrap_or(self.include_interview_questions),
            ats_score: self.include_ats_score,
            encouragement: overrides.encouragement.unwrap_or(true),
        };

        ResolvedConfig {
            language: self.language,
            tone: self.template.as_ref().map(|t| t.tone).unwrap_or_default(),
            customer_type: self
                .template
                .as_ref()
                .map(|t| t.customer_type)
                .unwrap_or_default(),
            sections,
            custom_instructions: self
                .template
                .as_ref()
                .and_then(|t| t.custom_instructions.as_deref())
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from),
        }
    }
}
