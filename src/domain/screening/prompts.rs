//! Prompt templates for the screening conversation.
//!
//! Provides the fixed opening and farewell messages and composes the system
//! prompt handed to the completion provider on every turn.

use super::fields::CandidateFields;
use super::phase::ScreeningPhase;

/// The assistant's opening message, sent when a session starts.
pub const OPENING_MESSAGE: &str = "Hello, and welcome to TalentScout! I'm the hiring \
assistant for our technology placements. Before we get to the technical part of the \
screening I need a few details from you. To start, what email address can we reach \
you at?";

/// The fixed farewell, sent when a termination token ends the conversation.
pub const FAREWELL_MESSAGE: &str = "Thank you for your time today! We'll review \
everything we discussed and be in touch within the next few days if your profile \
aligns with one of our current openings. Best of luck with your search.";

const SYSTEM_PROMPT_BASE: &str = "\
You are a hiring assistant for TalentScout, a recruitment agency specializing in \
technology placements.

Your purpose is the initial screening of candidates: gather essential contact \
details, then pose relevant technical questions tailored to the candidate's \
background.

Required information, in order: email address, phone number, years of \
professional experience.

Constraints:
- Stay focused on the screening; do not drift into unrelated topics.
- Keep responses professional and concise.
- Handle unexpected input with a brief, meaningful fallback.";

/// Composes the per-turn system prompt.
///
/// The base prompt is extended with the current phase directive and a
/// summary of what has been collected, so the model always knows which
/// field to ask for next.
pub fn compose_system_prompt(phase: ScreeningPhase, fields: &CandidateFields) -> String {
    let mut prompt = format!(
        "{}\n\nCurrent stage: {}. {}\nCollected so far: {}.",
        SYSTEM_PROMPT_BASE,
        phase.label(),
        phase.directive(),
        fields.summary(),
    );

    if phase == ScreeningPhase::CollectingInfo {
        if let Some(kind) = fields.first_missing() {
            prompt.push_str(&format!(
                " Ask next for the candidate's {}.",
                kind.label()
            ));
        }
    }

    prompt
}
