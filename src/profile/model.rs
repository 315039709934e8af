//! Profile draft model and the option catalogues offered by the form.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::ProfileError;

/// Lowest selectable salary, in thousands of USD.
pub const SALARY_FLOOR: u32 = 30;
/// Highest selectable salary, in thousands of USD.
pub const SALARY_CEILING: u32 = 200;

pub const PERSONALITY_TYPES: [&str; 16] = [
    "INTJ", "INFJ", "INTP", "INFP", "ISTJ", "ISFJ", "ISTP", "ISFP", "ENTJ", "ENFJ", "ENTP", "ENFP",
    "ESTJ", "ESFJ", "ESTP", "ESFP",
];

pub const HOBBIES: [&str; 8] = [
    "Avid Reader",
    "Marathon Runner",
    "Yoga Enthusiast",
    "Coder",
    "Musician",
    "Traveler",
    "Foodie",
    "Gamer",
];

pub const SKILLS: [&str; 6] = [
    "Public Speaking",
    "Data Analysis",
    "Foreign Languages",
    "Project Management",
    "Graphic Design",
    "Video Editing",
];

/// Industries a job-seeker can express interest in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Industry {
    Technology,
    Healthcare,
    Finance,
    Education,
    Manufacturing,
    Retail,
}

impl Industry {
    pub const ALL: [Industry; 6] = [
        Industry::Technology,
        Industry::Healthcare,
        Industry::Finance,
        Industry::Education,
        Industry::Manufacturing,
        Industry::Retail,
    ];
}

impl std::fmt::Display for Industry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Serialized names are the display names.
        write!(f, "{self:?}")
    }
}

/// The three badge groups on the profile form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BadgeKind {
    Personality,
    Hobby,
    Skill,
}

impl BadgeKind {
    /// Labels that may be picked for this group.
    pub fn catalogue(&self) -> &'static [&'static str] {
        match self {
            Self::Personality => &PERSONALITY_TYPES,
            Self::Hobby => &HOBBIES,
            Self::Skill => &SKILLS,
        }
    }
}

impl std::fmt::Display for BadgeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Personality => write!(f, "personality"),
            Self::Hobby => write!(f, "hobby"),
            Self::Skill => write!(f, "skill"),
        }
    }
}

/// Expected salary range in thousands of USD.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryRange {
    pub min: u32,
    pub max: u32,
}

impl Default for SalaryRange {
    fn default() -> Self {
        Self { min: 50, max: 80 }
    }
}

impl SalaryRange {
    /// Build a range, checking order and slider bounds.
    pub fn new(min: u32, max: u32) -> Result<Self, ProfileError> {
        let range = Self { min, max };
        range.validate()?;
        Ok(range)
    }

    pub fn validate(&self) -> Result<(), ProfileError> {
        for value in [self.min, self.max] {
            if !(SALARY_FLOOR..=SALARY_CEILING).contains(&value) {
                return Err(ProfileError::SalaryOutOfBounds {
                    value,
                    floor: SALARY_FLOOR,
                    ceiling: SALARY_CEILING,
                });
            }
        }
        if self.min > self.max {
            return Err(ProfileError::SalaryRangeInverted {
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }
}

/// What the user filled in on the profile form.
///
/// Never stored by the core; it is validated and handed to a
/// [`ProfileStore`](crate::backends::ProfileStore).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileDraft {
    pub name: String,
    pub zip_code: String,
    pub industries: BTreeSet<Industry>,
    pub salary_range: SalaryRange,
    pub personality_badges: BTreeSet<String>,
    pub hobby_badges: BTreeSet<String>,
    pub skill_badges: BTreeSet<String>,
}

impl ProfileDraft {
    /// Badges selected for one group.
    pub fn badges(&self, kind: BadgeKind) -> &BTreeSet<String> {
        match kind {
            BadgeKind::Personality => &self.personality_badges,
            BadgeKind::Hobby => &self.hobby_badges,
            BadgeKind::Skill => &self.skill_badges,
        }
    }

    /// Total badges across all three groups.
    pub fn badge_count(&self) -> usize {
        self.personality_badges.len() + self.hobby_badges.len() + self.skill_badges.len()
    }

    /// Check the salary range and that every badge comes from its catalogue.
    ///
    /// Name and zip code are free text and may be empty.
    pub fn validate(&self) -> Result<(), ProfileError> {
        self.salary_range.validate()?;
        for kind in [BadgeKind::Personality, BadgeKind::Hobby, BadgeKind::Skill] {
            let catalogue = kind.catalogue();
            if let Some(label) = self
                .badges(kind)
                .iter()
                .find(|label| !catalogue.iter().any(|known| *known == label.as_str()))
            {
                return Err(ProfileError::UnknownBadge {
                    kind: kind.to_string(),
                    label: label.clone(),
                });
            }
        }
        Ok(())
    }
}

/// Everything the profile form offers, for rendering pickers.
#[derive(Debug, Clone, Serialize)]
pub struct ProfileOptions {
    pub industries: Vec<Industry>,
    pub salary_floor: u32,
    pub salary_ceiling: u32,
    pub default_salary_range: SalaryRange,
    pub personality_types: &'static [&'static str],
    pub hobbies: &'static [&'static str],
    pub skills: &'static [&'static str],
}

impl ProfileOptions {
    pub fn catalogue() -> Self {
        Self {
            industries: Industry::ALL.to_vec(),
            salary_floor: SALARY_FLOOR,
            salary_ceiling: SALARY_CEILING,
            default_salary_range: SalaryRange::default(),
            personality_types: &PERSONALITY_TYPES,
            hobbies: &HOBBIES,
            skills: &SKILLS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn default_draft_is_valid() {
        let draft = ProfileDraft::default();
        assert!(draft.validate().is_ok());
        assert_eq!(draft.salary_range, SalaryRange { min: 50, max: 80 });
        assert_eq!(draft.badge_count(), 0);
    }

    #[test]
    fn salary_range_checks() {
        assert!(SalaryRange::new(30, 200).is_ok());
        assert!(SalaryRange::new(90, 90).is_ok());
        assert_eq!(
            SalaryRange::new(120, 60),
            Err(ProfileError::SalaryRangeInverted { min: 120, max: 60 })
        );
        assert_eq!(
            SalaryRange::new(10, 60),
            Err(ProfileError::SalaryOutOfBounds {
                value: 10,
                floor: SALARY_FLOOR,
                ceiling: SALARY_CEILING
            })
        );
        assert!(SalaryRange::new(50, 250).is_err());
    }

    #[test]
    fn badges_must_come_from_catalogue() {
        let draft = ProfileDraft {
            personality_badges: set(&["INTJ"]),
            hobby_badges: set(&["Coder", "Foodie"]),
            skill_badges: set(&["Data Analysis"]),
            ..Default::default()
        };
        assert!(draft.validate().is_ok());
        assert_eq!(draft.badge_count(), 4);

        let draft = ProfileDraft {
            hobby_badges: set(&["Skydiver"]),
            ..Default::default()
        };
        assert_eq!(
            draft.validate(),
            Err(ProfileError::UnknownBadge {
                kind: "hobby".to_string(),
                label: "Skydiver".to_string()
            })
        );

        // Catalogues are per group.
        let draft = ProfileDraft {
            skill_badges: set(&["INTJ"]),
            ..Default::default()
        };
        assert!(draft.validate().is_err());
    }

    #[test]
    fn draft_deserializes_with_defaults() {
        let draft: ProfileDraft = serde_json::from_value(serde_json::json!({
            "name": "Ada",
            "industries": ["Technology", "Finance", "Technology"],
            "skill_badges": ["Public Speaking"]
        }))
        .unwrap();

        assert_eq!(draft.name, "Ada");
        assert!(draft.zip_code.is_empty());
        assert_eq!(draft.industries.len(), 2, "duplicates collapse");
        assert_eq!(draft.salary_range, SalaryRange::default());
        assert!(draft.validate().is_ok());
    }

    #[test]
    fn unknown_industry_fails_to_parse() {
        let parsed = serde_json::from_value::<ProfileDraft>(serde_json::json!({
            "industries": ["Aerospace"]
        }));
        assert!(parsed.is_err());
    }

    #[test]
    fn catalogue_lists_everything() {
        let options = ProfileOptions::catalogue();
        assert_eq!(options.industries.len(), 6);
        assert_eq!(options.personality_types.len(), 16);
        assert_eq!(options.hobbies.len(), 8);
        assert_eq!(options.skills.len(), 6);
        assert_eq!(options.salary_floor, 30);
        assert_eq!(options.salary_ceiling, 200);
        assert_eq!(Industry::Healthcare.to_string(), "Healthcare");
    }
}
