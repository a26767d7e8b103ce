//! Persona records returned by the derivation collaborator.

use serde::{Deserialize, Serialize};

use super::snapshot::ProfileIdentity;

/// One free-text observation with an optional supporting link. Both halves may be null.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Insight {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

impl Insight {
    pub fn new(text: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            url: Some(url.into()),
        }
    }

    pub fn text_or_empty(&self) -> &str {
        self.text.as_deref().unwrap_or("")
    }
}

/// Scores on the four personality axes, nominally 0 to 10.
///
/// Values are carried exactly as the producer sent them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TraitScores {
    pub introversion_extroversion: f64,
    pub intuition_sensing: f64,
    pub feeling_thinking: f64,
    pub perceiving_judging: f64,
}

impl TraitScores {
    pub fn new(
        introversion_extroversion: f64,
        intuition_sensing: f64,
        feeling_thinking: f64,
        perceiving_judging: f64,
    ) -> Self {
        Self {
            introversion_extroversion,
            intuition_sensing,
            feeling_thinking,
            perceiving_judging,
        }
    }

    /// Axis label and score, in report order.
    pub fn axes(&self) -> [(&'static str, f64); 4] {
        [
            ("Introversion/Extroversion", self.introversion_extroversion),
            ("Intuition/Sensing", self.intuition_sensing),
            ("Feeling/Thinking", self.feeling_thinking),
            ("Perceiving/Judging", self.perceiving_judging),
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsightSection {
    BehaviorsAndHabits,
    GoalsAndNeeds,
    Frustrations,
    Motivations,
}

impl InsightSection {
    pub const ALL: [InsightSection; 4] = [
        InsightSection::BehaviorsAndHabits,
        InsightSection::GoalsAndNeeds,
        InsightSection::Frustrations,
        InsightSection::Motivations,
    ];

    pub fn title(self) -> &'static str {
        match self {
            InsightSection::BehaviorsAndHabits => "Behaviors & Habits",
            InsightSection::GoalsAndNeeds => "Goals & Needs",
            InsightSection::Frustrations => "Frustrations",
            InsightSection::Motivations => "Motivations",
        }
    }
}

/// Derived personality analysis. Carries its own copy of the profile block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonaRecord {
    #[serde(flatten)]
    pub profile: ProfileIdentity,
    #[serde(flatten)]
    pub traits: TraitScores,
    #[serde(default)]
    pub behaviors_and_habits: Vec<Insight>,
    #[serde(default)]
    pub goals_and_needs: Vec<Insight>,
    #[serde(default)]
    pub frustrations: Vec<Insight>,
    #[serde(default)]
    pub motivations: Vec<Insight>,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub personality_type: Option<String>,
    #[serde(default)]
    pub emotional_regulation: Option<String>,
}

impl PersonaRecord {
    pub fn new(profile: ProfileIdentity, traits: TraitScores) -> Self {
        Self {
            profile,
            traits,
            behaviors_and_habits: Vec::new(),
            goals_and_needs: Vec::new(),
            frustrations: Vec::new(),
            motivations: Vec::new(),
            keywords: Vec::new(),
            personality_type: None,
            emotional_regulation: None,
        }
    }

    pub fn handle(&self) -> &str {
        &self.profile.username
    }

    pub fn insights(&self, section: InsightSection) -> &[Insight] {
        match section {
            InsightSection::BehaviorsAndHabits => &self.behaviors_and_habits,
            InsightSection::GoalsAndNeeds => &self.goals_and_needs,
            InsightSection::Frustrations => &self.frustrations,
            InsightSection::Motivations => &self.motivations,
        }
    }
}
