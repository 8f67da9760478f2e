//! Core data model for a single notice.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::grammar;
use crate::parse::split_footer;

/// Status of the guardian named in the notice. Controls the honorific
/// placed directly before the guardian's name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GuardianStatus {
    #[default]
    Alive,
    DeceasedMale,
    DeceasedFemale,
}

impl FromStr for GuardianStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "alive" => Ok(Self::Alive),
            "deceased-male" => Ok(Self::DeceasedMale),
            "deceased-female" => Ok(Self::DeceasedFemale),
            other => Err(format!(
                "unknown guardian status '{other}' (expected alive, deceased-male or deceased-female)"
            )),
        }
    }
}

/// Relation of the deceased to the guardian.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Relation {
    #[default]
    #[serde(rename = "son", alias = "മകൻ")]
    Son,
    #[serde(rename = "daughter", alias = "മകൾ")]
    Daughter,
    #[serde(rename = "wife", alias = "ഭാര്യ")]
    Wife,
}

impl Relation {
    pub const ALL: [Relation; 3] = [Relation::Son, Relation::Daughter, Relation::Wife];

    /// The Malayalam word embedded in the notice body.
    pub fn label(self) -> &'static str {
        match self {
            Self::Son => "മകൻ",
            Self::Daughter => "മകൾ",
            Self::Wife => "ഭാര്യ",
        }
    }

    /// Look up a relation by its Malayalam label or English name.
    pub fn from_label(label: &str) -> Option<Self> {
        let trimmed = label.trim();
        Self::ALL.into_iter().find(|r| {
            r.label() == trimmed || r.english_name().eq_ignore_ascii_case(trimmed)
        })
    }

    fn english_name(self) -> &'static str {
        match self {
            Self::Son => "son",
            Self::Daughter => "daughter",
            Self::Wife => "wife",
        }
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Relation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_label(s).ok_or_else(|| {
            format!("unknown relation '{s}' (expected son, daughter, wife or the Malayalam label)")
        })
    }
}

/// Grammatical gender of the deceased.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

/// A required input of [`FormData`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormField {
    Place,
    GuardianName,
    DeceasedName,
    Date,
}

impl FormField {
    pub const REQUIRED: [FormField; 4] = [
        FormField::Place,
        FormField::GuardianName,
        FormField::DeceasedName,
        FormField::Date,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Place => "place",
            Self::GuardianName => "guardian name",
            Self::DeceasedName => "deceased name",
            Self::Date => "date",
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Inputs for one notice.
///
/// The deceased's gender is not stored; it is always derived from
/// [`relation`](Self::relation) through [`FormData::deceased_gender`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FormData {
    pub place: String,
    pub guardian_name: String,
    pub guardian_status: GuardianStatus,
    pub relation: Relation,
    pub deceased_name: String,
    pub date: Option<NaiveDate>,
}

impl FormData {
    pub fn deceased_gender(&self) -> Gender {
        grammar::resolve_gender_from_relation(self.relation)
    }

    /// Required fields that are missing or blank, in form order.
    pub fn missing_fields(&self) -> Vec<FormField> {
        FormField::REQUIRED
            .into_iter()
            .filter(|field| match field {
                FormField::Place => self.place.trim().is_empty(),
                FormField::GuardianName => self.guardian_name.trim().is_empty(),
                FormField::DeceasedName => self.deceased_name.trim().is_empty(),
                FormField::Date => self.date.is_none(),
            })
            .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.missing_fields().is_empty()
    }
}

/// Left and right halves of one footer line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FooterLine {
    pub left: String,
    pub right: String,
}

/// The four structural lines of a composed notice.
///
/// Each footer line carries its left and right halves separated by
/// [`crate::compose::FOOTER_DELIMITER`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoticeContent {
    pub greeting: String,
    pub main_text: String,
    pub footer_line1: String,
    pub footer_line2: String,
}

impl NoticeContent {
    /// Both footer lines split into halves.
    pub fn footers(&self) -> [FooterLine; 2] {
        [split_footer(&self.footer_line1), split_footer(&self.footer_line2)]
    }

    /// Footer line `n` (1 or 2) split into halves.
    pub fn footer(&self, n: usize) -> Option<FooterLine> {
        match n {
            1 => Some(split_footer(&self.footer_line1)),
            2 => Some(split_footer(&self.footer_line2)),
            _ => None,
        }
    }
}
