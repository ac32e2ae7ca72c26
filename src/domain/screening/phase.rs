//! Screening phase state machine.
//!
//! Defines the stages of a screening conversation and the valid
//! transitions between them.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::StateMachine;

/// The current stage of a screening conversation.
///
/// Phases progress strictly forward:
/// - `Greeting`: opening message is being composed, no candidate input yet
/// - `CollectingInfo`: gathering email, phone, and years of experience;
///   repeats until every required field is present
/// - `Interviewing`: free-form technical Q&A, fields are finalized
/// - `Closing`: a termination token was seen; the farewell message is being
///   composed. Pass-through only — a session is never in this phase between
///   turns
/// - `Ended`: terminal, no further turns accepted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ScreeningPhase {
    /// Session created, opening message not yet sent.
    #[default]
    Greeting,

    /// Collecting required candidate fields turn by turn.
    CollectingInfo,

    /// All fields collected, technical interview underway.
    Interviewing,

    /// Termination detected, farewell in flight.
    Closing,

    /// Conversation is over, session is read-only.
    Ended,
}

impl ScreeningPhase {
    /// Returns true if candidate messages are processed in this phase.
    pub fn accepts_candidate_input(&self) -> bool {
        matches!(self, Self::CollectingInfo | Self::Interviewing)
    }

    /// Returns true if candidate turns are scanned for fields in this phase.
    ///
    /// Extraction only happens while collecting; interview turns are
    /// free-form and never overwrite finalized fields.
    pub fn runs_extraction(&self) -> bool {
        matches!(self, Self::CollectingInfo)
    }

    /// Returns the directive steering the assistant's replies in this phase.
    pub fn directive(&self) -> &'static str {
        match self {
            Self::Greeting => "Welcome the candidate and explain the screening process.",
            Self::CollectingInfo => {
                "Ask for the missing candidate details, one at a time. Acknowledge what was already provided."
            }
            Self::Interviewing => {
                "Ask 3-5 technical questions tailored to the candidate's stated background. One question per message."
            }
            Self::Closing => "Thank the candidate and describe next steps.",
            Self::Ended => "The conversation is over.",
        }
    }

    /// Returns a shorter label for the phase, suitable for display.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Greeting => "Greeting",
            Self::CollectingInfo => "Collecting info",
            Self::Interviewing => "Interviewing",
            Self::Closing => "Closing",
            Self::Ended => "Ended",
        }
    }
}

impl StateMachine for ScreeningPhase {
    fn can_transition_to(&self, target: &Self) -> bool {
        use ScreeningPhase::*;
        matches!(
            (self, target),
            // Opening message sent, start collecting
            (Greeting, CollectingInfo) |
            // Still missing fields, keep collecting
            (CollectingInfo, CollectingInfo) |
            // All required fields present
            (CollectingInfo, Interviewing) |
            // Free-form Q&A continues
            (Interviewing, Interviewing) |
            // Termination token seen, from any live phase
            (Greeting, Closing) |
            (CollectingInfo, Closing) |
            (Interviewing, Closing) |
            // Farewell sent
            (Closing, Ended)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use ScreeningPhase::*;
        match self {
            Greeting => vec![CollectingInfo, Closing],
            CollectingInfo => vec![CollectingInfo, Interviewing, Closing],
            Interviewing => vec![Interviewing, Closing],
            Closing => vec![Ended],
            Ended => vec![],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_PHASES: [ScreeningPhase; 5] = [
        ScreeningPhase::Greeting,
        ScreeningPhase::CollectingInfo,
        ScreeningPhase::Interviewing,
        ScreeningPhase::Closing,
        ScreeningPhase::Ended,
    ];

    mod phase_basics {
        use super::*;

        #[test]
        fn default_phase_is_greeting() {
            assert_eq!(ScreeningPhase::default(), ScreeningPhase::Greeting);
        }

        #[test]
        fn serializes_to_snake_case() {
            let phase = ScreeningPhase::CollectingInfo;
            let json = serde_json::to_string(&phase).unwrap();
            assert_eq!(json, "\"collecting_info\"");
        }

        #[test]
        fn deserializes_from_snake_case() {
            let phase: ScreeningPhase = serde_json::from_str("\"interviewing\"").unwrap();
            assert_eq!(phase, ScreeningPhase::Interviewing);
        }

        #[test]
        fn all_phases_have_directives() {
            for phase in ALL_PHASES {
                assert!(!phase.directive().is_empty());
            }
        }

        #[test]
        fn all_phases_have_labels() {
            for phase in ALL_PHASES {
                assert!(!phase.label().is_empty());
            }
        }
    }

    mod accepts_candidate_input {
        use super::*;

        #[test]
        fn collecting_info_accepts_input() {
            assert!(ScreeningPhase::CollectingInfo.accepts_candidate_input());
        }

        #[test]
        fn interviewing_accepts_input() {
            assert!(ScreeningPhase::Interviewing.accepts_candidate_input());
        }

        #[test]
        fn ended_does_not_accept_input() {
            assert!(!ScreeningPhase::Ended.accepts_candidate_input());
        }

        #[test]
        fn closing_does_not_accept_input() {
            assert!(!ScreeningPhase::Closing.accepts_candidate_input());
        }
    }

    mod runs_extraction {
        use super::*;

        #[test]
        fn only_collecting_info_runs_extraction() {
            for phase in ALL_PHASES {
                assert_eq!(
                    phase.runs_extraction(),
                    phase == ScreeningPhase::CollectingInfo,
                    "unexpected extraction flag for {:?}",
                    phase
                );
            }
        }
    }

    mod phase_transitions {
        use super::*;

        #[test]
        fn greeting_transitions_to_collecting_info() {
            let phase = ScreeningPhase::Greeting;
            assert!(phase.can_transition_to(&ScreeningPhase::CollectingInfo));
        }

        #[test]
        fn greeting_cannot_skip_to_interviewing() {
            let phase = ScreeningPhase::Greeting;
            assert!(!phase.can_transition_to(&ScreeningPhase::Interviewing));
        }

        #[test]
        fn collecting_info_can_repeat() {
            let phase = ScreeningPhase::CollectingInfo;
            assert!(phase.can_transition_to(&ScreeningPhase::CollectingInfo));
        }

        #[test]
        fn collecting_info_transitions_to_interviewing() {
            let phase = ScreeningPhase::CollectingInfo;
            assert!(phase.can_transition_to(&ScreeningPhase::Interviewing));
        }

        #[test]
        fn no_backward_transitions() {
            assert!(!ScreeningPhase::CollectingInfo.can_transition_to(&ScreeningPhase::Greeting));
            assert!(!ScreeningPhase::Interviewing.can_transition_to(&ScreeningPhase::CollectingInfo));
            assert!(!ScreeningPhase::Closing.can_transition_to(&ScreeningPhase::Interviewing));
        }

        #[test]
        fn every_live_phase_can_reach_closing() {
            for phase in [
                ScreeningPhase::Greeting,
                ScreeningPhase::CollectingInfo,
                ScreeningPhase::Interviewing,
            ] {
                assert!(
                    phase.can_transition_to(&ScreeningPhase::Closing),
                    "{:?} should reach Closing",
                    phase
                );
            }
        }

        #[test]
        fn closing_only_transitions_to_ended() {
            assert_eq!(
                ScreeningPhase::Closing.valid_transitions(),
                vec![ScreeningPhase::Ended]
            );
        }

        #[test]
        fn ended_is_terminal() {
            assert!(ScreeningPhase::Ended.valid_transitions().is_empty());
            assert!(ScreeningPhase::Ended.is_terminal());
        }

        #[test]
        fn transition_to_fails_for_invalid_transition() {
            let result = ScreeningPhase::Ended.transition_to(ScreeningPhase::Greeting);
            assert!(result.is_err());
        }

        #[test]
        fn valid_transitions_matches_can_transition_to() {
            for phase in ALL_PHASES {
                for valid_target in phase.valid_transitions() {
                    assert!(
                        phase.can_transition_to(&valid_target),
                        "can_transition_to should return true for {:?} -> {:?}",
                        phase,
                        valid_target
                    );
                }
            }
        }
    }
}
