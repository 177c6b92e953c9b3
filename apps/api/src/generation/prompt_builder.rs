//! Prompt Builder — deterministic assembly of the outreach instruction document.
//!
//! Pure function of `(customer_name, extracted_text, ResolvedConfig)`. Section
//! order is fixed; disabled sections are left out entirely.

use crate::generation::config::{ResolvedConfig, SectionFlags};
use crate::generation::prompts::{
    customer_context, language_instruction, tone_instruction, ADDITIONAL_INSTRUCTIONS_MARKER,
    ALLOWED_EMOJI, APPRECIATION_BLOCK, ATS_BLOCK, CLOSING_RULES_TEMPLATE, DISCLAIMER,
    ENCOURAGEMENT_BLOCK, FEEDBACK_BLOCK, GUIDANCE_BLOCK, INTERVIEW_QUESTIONS_BLOCK, INTRO_TEMPLATE,
    JOB_ROLES_BLOCK,
};

/// Builds the user prompt for one outreach message.
pub fn build_prompt(customer_name: &str, extracted_text: &str, config: &ResolvedConfig) -> String {
    let name = customer_name.trim();
    let mut parts: Vec<String> = Vec::with_capacity(8);

    parts.push(INTRO_TEMPLATE.replace("{name}", name));
    parts.push(format!("LANGUAGE: {}", language_instruction(config.language)));
    parts.push(format!("TONE: {}", tone_instruction(config.tone)));

    let context = customer_context(config.customer_type);
    if !context.is_empty() {
        parts.push(format!("CUSTOMER CONTEXT: {context}"));
    }

    parts.push(format!("RESUME CONTENT:\n\"\"\"\n{}\n\"\"\"", extracted_text.trim()));
    parts.push(message_structure(name, &config.sections));

    if let Some(custom) = &config.custom_instructions {
        parts.push(format!("{ADDITIONAL_INSTRUCTIONS_MARKER}\n{custom}"));
    }

    parts.push(
        CLOSING_RULES_TEMPLATE
            .replace("{language_rule}", language_instruction(config.language))
            .replace("{emoji}", ALLOWED_EMOJI)
            .replace("{disclaimer}", DISCLAIMER),
    );

    parts.join("\n\n")
}

/// Enabled section blocks in fixed order:
/// appreciation → feedback → guidance → job roles → interview questions → ATS → encouragement.
fn enabled_sections(sections: &SectionFlags) -> Vec<&'static str> {
    [
        (sections.appreciation, APPRECIATION_BLOCK),
        (sections.feedback, FEEDBACK_BLOCK),
        (sections.guidance, GUIDANCE_BLOCK),
        (sections.job_roles, JOB_ROLES_BLOCK),
        (sections.interview_questions, INTERVIEW_QUESTIONS_BLOCK),
        (sections.ats_score, ATS_BLOCK),
        (sections.encouragement, ENCOURAGEMENT_BLOCK),
    ]
    .into_iter()
    .filter_map(|(enabled, block)| enabled.then_some(block))
    .collect()
}

fn message_structure(name: &str, sections: &SectionFlags) -> String {
    let blocks = enabled_sections(sections);
    if blocks.is_empty() {
        return "MESSAGE STRUCTURE:\nWrite a brief, helpful note about the resume.".to_string();
    }

    let numbered: Vec<String> = blocks
        .iter()
        .enumerate()
        .map(|(i, block)| format!("{}. {}", i + 1, block.replace("{name}", name)))
        .collect();

    format!(
        "MESSAGE STRUCTURE (include only these sections, in this order):\n{}",
        numbered.join("\n\n")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::config::{
        CustomerType, GenerationConfig, Language, SectionOverrides, Template, Tone,
    };
    use crate::generation::prompts::DISCLAIMER;

    const RESUME: &str = "Divya R | B.Com | Tally, GST filing, MS Excel | 2 years accounts assistant";

    const LABELS: [&str; 7] = [
        "APPRECIATION:",
        "RESUME FEEDBACK:",
        "CAREER GUIDANCE:",
        "SUITABLE JOB ROLES:",
        "INTERVIEW QUESTIONS:",
        "ATS COMPATIBILITY SCORE:",
        "ENCOURAGEMENT:",
    ];

    fn all_on() -> ResolvedConfig {
        GenerationConfig {
            language: Language::English,
            include_interview_questions: true,
            include_ats_score: true,
            template: None,
        }
        .resolve()
    }

    #[test]
    fn test_prompt_is_deterministic() {
        let config = all_on();
        let a = build_prompt("Divya", RESUME, &config);
        let b = build_prompt("Divya", RESUME, &config);
        assert_eq!(a, b);
    }

    #[test]
    fn test_disclaimer_and_language_clause_for_every_language() {
        for language in [Language::English, Language::Tamil, Language::Both] {
            let mut config = all_on();
            config.language = language;
            let prompt = build_prompt("Divya", RESUME, &config);
            assert!(prompt.contains(DISCLAIMER), "{language:?} missing disclaimer");
            assert!(
                prompt.contains(&format!("LANGUAGE: {}", language_instruction(language))),
                "{language:?} missing language clause"
            );
        }
    }

    #[test]
    fn test_both_language_orders_english_before_tamil() {
        let mut config = all_on();
        config.language = Language::Both;
        let prompt = build_prompt("Divya", RESUME, &config);
        assert!(prompt.contains("complete English version first, then the complete Tamil"));
    }

    #[test]
    fn test_sections_appear_in_fixed_order() {
        let prompt = build_prompt("Divya", RESUME, &all_on());
        let positions: Vec<usize> = LABELS
            .iter()
            .map(|label| prompt.find(label).unwrap_or_else(|| panic!("{label} missing")))
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]), "{positions:?}");
        assert!(prompt.contains("1. APPRECIATION:"));
        assert!(prompt.contains("7. ENCOURAGEMENT:"));
    }

    #[test]
    fn test_disabled_section_is_removed_entirely() {
        let mut config = all_on();
        config.sections.feedback = false;
        config.sections.ats_score = false;
        let prompt = build_prompt("Divya", RESUME, &config);
        assert!(!prompt.contains("RESUME FEEDBACK"));
        assert!(!prompt.contains("ATS COMPATIBILITY"));
        assert!(prompt.contains("2. CAREER GUIDANCE:"));
        assert!(prompt.contains("5. ENCOURAGEMENT:"));
    }

    #[test]
    fn test_template_interview_false_overrides_standalone_true() {
        let config = GenerationConfig {
            language: Language::English,
            include_interview_questions: true,
            include_ats_score: false,
            template: Some(Template {
                sections: SectionOverrides {
                    interview_questions: Some(false),
                    ..Default::default()
                },
                ..Default::default()
            }),
        }
        .resolve();
        let prompt = build_prompt("Divya", RESUME, &config);
        assert!(!prompt.contains("INTERVIEW QUESTIONS"));
    }

    #[test]
    fn test_all_sections_disabled_still_builds() {
        let mut config = all_on();
        config.sections = SectionFlags {
            appreciation: false,
            feedback: false,
            guidance: false,
            job_roles: false,
            interview_questions: false,
            ats_score: false,
            encouragement: false,
        };
        let prompt = build_prompt("Divya", RESUME, &config);
        for label in LABELS {
            assert!(!prompt.contains(label));
        }
        assert!(prompt.contains(DISCLAIMER));
    }

    #[test]
    fn test_tone_and_customer_context_from_template() {
        let config = GenerationConfig {
            template: Some(Template {
                tone: Tone::Motivational,
                customer_type: CustomerType::Fresher,
                ..Default::default()
            }),
            ..Default::default()
        }
        .resolve();
        let prompt = build_prompt("Divya", RESUME, &config);
        assert!(prompt.contains(&format!("TONE: {}", tone_instruction(Tone::Motivational))));
        assert!(prompt.contains(customer_context(CustomerType::Fresher)));
    }

    #[test]
    fn test_default_tone_is_professional_and_custom_context_omitted() {
        let prompt = build_prompt("Divya", RESUME, &all_on());
        assert!(prompt.contains(&format!("TONE: {}", tone_instruction(Tone::Professional))));
        assert!(!prompt.contains("CUSTOMER CONTEXT:"));
    }

    #[test]
    fn test_custom_instructions_appended_verbatim() {
        let mut config = all_on();
        config.custom_instructions = Some("Mention our Saturday mock-interview camp.".to_string());
        let prompt = build_prompt("Divya", RESUME, &config);
        assert!(prompt.contains(&format!(
            "{ADDITIONAL_INSTRUCTIONS_MARKER}\nMention our Saturday mock-interview camp."
        )));

        let without = build_prompt("Divya", RESUME, &all_on());
        assert!(!without.contains("ADDITIONAL INSTRUCTIONS"));
    }

    #[test]
    fn test_name_and_resume_are_embedded() {
        let prompt = build_prompt("  Divya  ", RESUME, &all_on());
        assert!(prompt.contains("for the customer Divya,"));
        assert!(prompt.contains("greeting Divya by name"));
        assert!(prompt.contains(RESUME));
    }
}
