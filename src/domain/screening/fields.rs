//! Candidate field records and merge policy.
//!
//! Holds the structured attributes extracted from candidate turns and the
//! rules for merging newly extracted values into already collected ones.

use serde::{Deserialize, Serialize};

/// The structured attributes collected during screening.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Email,
    Phone,
    YearsExperience,
}

impl FieldKind {
    /// Deterministic prompting priority: email first, then phone, then
    /// experience. Given the same input sequence, the assistant always asks
    /// for missing fields in this order.
    pub const PRIORITY: [FieldKind; 3] =
        [FieldKind::Email, FieldKind::Phone, FieldKind::YearsExperience];

    /// Returns a human-readable label for the field.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Email => "email address",
            Self::Phone => "phone number",
            Self::YearsExperience => "years of professional experience",
        }
    }
}

/// Fields found in a single candidate turn.
///
/// Produced by the extractor; any subset may be present. Absence is not an
/// error.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PartialFields {
    pub email: Option<String>,
    pub phone: Option<String>,
    pub years_experience: Option<f32>,
}

impl PartialFields {
    /// Returns true if no field was found.
    pub fn is_empty(&self) -> bool {
        self.email.is_none() && self.phone.is_none() && self.years_experience.is_none()
    }
}

/// The accumulated candidate record for a session.
///
/// # Merge policy
///
/// - `email` and `phone`: the last valid match wins — a corrected value in a
///   later turn replaces the earlier one.
/// - `years_experience`: the first valid match wins — later numeric matches
///   never overwrite it, so unrelated numbers in interview answers cannot
///   clobber the figure.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CandidateFields {
    email: Option<String>,
    phone: Option<String>,
    years_experience: Option<f32>,
}

impl CandidateFields {
    /// Creates an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the collected email, if any.
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    /// Returns the collected phone number (digits only), if any.
    pub fn phone(&self) -> Option<&str> {
        self.phone.as_deref()
    }

    /// Returns the collected years of experience, if any.
    pub fn years_experience(&self) -> Option<f32> {
        self.years_experience
    }

    /// Merges one turn's extraction result into the record.
    ///
    /// Returns the kinds that changed, in priority order.
    pub fn merge(&mut self, partial: PartialFields) -> Vec<FieldKind> {
        let mut changed = Vec::new();

        if let Some(email) = partial.email {
            if self.email.as_deref() != Some(email.as_str()) {
                changed.push(FieldKind::Email);
            }
            self.email = Some(email);
        }

        if let Some(phone) = partial.phone {
            if self.phone.as_deref() != Some(phone.as_str()) {
                changed.push(FieldKind::Phone);
            }
            self.phone = Some(phone);
        }

        if let Some(years) = partial.years_experience {
            if self.years_experience.is_none() {
                self.years_experience = Some(years);
                changed.push(FieldKind::YearsExperience);
            }
        }

        changed
    }

    /// Returns true if every required field has been collected.
    pub fn is_complete(&self) -> bool {
        self.email.is_some() && self.phone.is_some() && self.years_experience.is_some()
    }

    /// Returns the highest-priority field still missing, if any.
    pub fn first_missing(&self) -> Option<FieldKind> {
        FieldKind::PRIORITY
            .into_iter()
            .find(|kind| !self.has(*kind))
    }

    /// Returns all missing fields in priority order.
    pub fn missing(&self) -> Vec<FieldKind> {
        FieldKind::PRIORITY
            .into_iter()
            .filter(|kind| !self.has(*kind))
            .collect()
    }

    /// Returns true if the given field has been collected.
    pub fn has(&self, kind: FieldKind) -> bool {
        match kind {
            FieldKind::Email => self.email.is_some(),
            FieldKind::Phone => self.phone.is_some(),
            FieldKind::YearsExperience => self.years_experience.is_some(),
        }
    }

    /// Formats the collected fields for inclusion in the completion context.
    pub fn summary(&self) -> String {
        let mut parts = Vec::new();
        if let Some(email) = &self.email {
            parts.push(format!("email: {}", email));
        }
        if let Some(phone) = &self.phone {
            parts.push(format!("phone: {}", phone));
        }
        if let Some(years) = self.years_experience {
            parts.push(format!("experience: {} years", years));
        }
        if parts.is_empty() {
            "none yet".to_string()
        } else {
            parts.join("; ")
        }
    }
}
