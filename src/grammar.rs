//! Agreement rules for the Malayalam notice text.
//!
//! Every function here is total and pure: each input maps to exactly one
//! word form.

use chrono::{Datelike, NaiveDate};

use crate::types::{Gender, GuardianStatus, Relation};

/// Day names, Sunday first.
pub const MALAYALAM_DAYS: [&str; 7] = [
    "ഞായര്‍",
    "തിങ്കള്‍",
    "ചൊവ്വ",
    "ബുധന്‍",
    "വ്യാഴം",
    "വെള്ളി",
    "ശനി",
];

pub fn resolve_gender_from_relation(relation: Relation) -> Gender {
    match relation {
        Relation::Son => Gender::Male,
        Relation::Daughter | Relation::Wife => Gender::Female,
    }
}

/// Resolve gender from a free-form relation label. Unknown labels fall back
/// to [`Gender::Male`].
pub fn resolve_gender_from_label(label: &str) -> Gender {
    Relation::from_label(label)
        .map(resolve_gender_from_relation)
        .unwrap_or(Gender::Male)
}

/// Honorific placed before the guardian's name. The trailing space is part
/// of the prefix; the name is appended with no separator.
pub fn resolve_guardian_prefix(status: GuardianStatus) -> &'static str {
    match status {
        GuardianStatus::Alive => "",
        GuardianStatus::DeceasedMale => "പരേതനായ ",
        GuardianStatus::DeceasedFemale => "പരേതയായ ",
    }
}

pub fn resolve_possessive_form(gender: Gender) -> &'static str {
    match gender {
        Gender::Male => "പരേതന്റെ",
        Gender::Female => "പരേതയുടെ",
    }
}

pub fn day_name(date: NaiveDate) -> &'static str {
    MALAYALAM_DAYS[date.weekday().num_days_from_sunday() as usize]
}
