// Fixed instruction text for the outreach message prompt.
// Every variant-keyed table is an exhaustive match so adding a variant fails
// to compile until its text exists.

use crate::generation::config::{CustomerType, Language, Tone};

/// Sentence the model must reproduce verbatim at the end of every message.
pub const DISCLAIMER: &str = "Note: This feedback is for guidance only and does not guarantee \
    job selection or interview calls.";

/// Emoji the model may use. Anything else is off-limits.
pub const ALLOWED_EMOJI: &str = "👋 ✅ 📌 💼 🎯 ⭐ 👍 🙏";

pub const ADDITIONAL_INSTRUCTIONS_MARKER: &str = "ADDITIONAL INSTRUCTIONS (follow these exactly):";

pub fn language_instruction(language: Language) -> &'static str {
    match language {
        Language::English => "Write the entire message in English only.",
        Language::Tamil => {
            "Write the entire message in Tamil (தமிழ்) only. Use simple, conversational Tamil \
            that is easy to read on a phone. Job titles and technical terms may stay in English."
        }
        Language::Both => {
            "Write the message in both English and Tamil. Write the complete English version \
            first, then the complete Tamil (தமிழ்) version after it, separated by a blank line \
            and a line of dashes. Both versions must carry the same content."
        }
    }
}

pub fn tone_instruction(tone: Tone) -> &'static str {
    match tone {
        Tone::Professional => {
            "Use a professional, respectful tone, like an experienced career counsellor."
        }
        Tone::Friendly => {
            "Use a warm, friendly tone, like a helpful senior talking to a younger friend."
        }
        Tone::Motivational => {
            "Use an uplifting, motivational tone that builds confidence and energy."
        }
        Tone::Formal => "Use a formal, polite tone suitable for official communication.",
    }
}

pub fn customer_context(customer_type: CustomerType) -> &'static str {
    match customer_type {
        CustomerType::Fresher => {
            "The candidate is a fresher looking for a first job. Focus on academic projects, \
            internships, skills and entry-level opportunities."
        }
        CustomerType::Experienced => {
            "The candidate is an experienced professional. Focus on achievements, leadership, \
            career growth and senior roles."
        }
        CustomerType::CareerChange => {
            "The candidate wants to change careers. Highlight transferable skills and realistic \
            paths into the new field."
        }
        CustomerType::Student => {
            "The candidate is still a student. Focus on internships, part-time roles, \
            certifications and skills to build before graduating."
        }
        CustomerType::Custom => "",
    }
}

pub const APPRECIATION_BLOCK: &str = "APPRECIATION:\n\
    Start by greeting {name} by name and sincerely appreciating one or two real strengths \
    visible in the resume.";

pub const FEEDBACK_BLOCK: &str = "RESUME FEEDBACK:\n\
    Give 2-3 short, specific and constructive suggestions to improve the resume \
    (structure, missing details, wording).";

pub const GUIDANCE_BLOCK: &str = "CAREER GUIDANCE:\n\
    Suggest 2-3 practical next steps such as skills to learn, certifications or portfolio \
    work that fit the candidate's background.";

pub const JOB_ROLES_BLOCK: &str = "SUITABLE JOB ROLES:\n\
    List 3-5 job roles that realistically match the candidate's current profile.";

pub const INTERVIEW_QUESTIONS_BLOCK: &str = "INTERVIEW QUESTIONS:\n\
    Add 3-5 likely interview questions for those roles, each with a one-line tip on how to \
    answer.";

pub const ATS_BLOCK: &str = "ATS COMPATIBILITY SCORE:\n\
    Give an estimated ATS compatibility score out of 100 with one line explaining it and one \
    quick fix. Make clear it is an estimate.";

pub const ENCOURAGEMENT_BLOCK: &str = "ENCOURAGEMENT:\n\
    Close with a short, genuine line of encouragement.";

/// Opening line. Replace `{name}` before use.
pub const INTRO_TEMPLATE: &str = "You are a career advisor at a resume and print shop. \
    Write a personalized WhatsApp message for the customer {name}, based on the resume below.";

/// Rules appended to every prompt regardless of configuration.
/// Replace `{language_rule}`, `{emoji}` and `{disclaimer}` before use.
pub const CLOSING_RULES_TEMPLATE: &str = "IMPORTANT RULES:
1. Language: {language_rule}
2. Keep the message short and easy to read on a mobile phone: short paragraphs, short lines.
3. Use only these emoji, sparingly: {emoji}
4. Never make false promises. Do not claim guaranteed selection, guaranteed jobs, salaries \
or interview calls. Only mention facts present in the resume.
5. End the message with this exact sentence, unchanged: \"{disclaimer}\"
6. Sound warm and human but stay professional.
7. Format for WhatsApp: plain text with line breaks only. No markdown headings, tables, \
bold, italics or links.
8. Output only the message itself, with no preface or explanation.";
