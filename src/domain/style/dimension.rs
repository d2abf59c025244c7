//! The four Felder–Silverman dichotomies.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::StyleLabel;

/// One bipolar learning-style axis.
///
/// Positive scalar values lean to the first pole.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Dimension {
    ActiveReflective,
    SensingIntuitive,
    VisualVerbal,
    SequentialGlobal,
}

impl Dimension {
    pub const ALL: [Dimension; 4] = [
        Dimension::ActiveReflective,
        Dimension::SensingIntuitive,
        Dimension::VisualVerbal,
        Dimension::SequentialGlobal,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Dimension::ActiveReflective => "activeReflective",
            Dimension::SensingIntuitive => "sensingIntuitive",
            Dimension::VisualVerbal => "visualVerbal",
            Dimension::SequentialGlobal => "sequentialGlobal",
        }
    }

    pub fn first_pole(&self) -> StyleLabel {
        match self {
            Dimension::ActiveReflective => StyleLabel::Active,
            Dimension::SensingIntuitive => StyleLabel::Sensing,
            Dimension::VisualVerbal => StyleLabel::Visual,
            Dimension::SequentialGlobal => StyleLabel::Sequential,
        }
    }

    pub fn second_pole(&self) -> StyleLabel {
        match self {
            Dimension::ActiveReflective => StyleLabel::Reflective,
            Dimension::SensingIntuitive => StyleLabel::Intuitive,
            Dimension::VisualVerbal => StyleLabel::Verbal,
            Dimension::SequentialGlobal => StyleLabel::Global,
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// One scalar per dimension.
///
/// Used for both dimension values in `[-1, 1]` and confidences in `[0, 1]`;
/// the owner enforces the bound.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct DimensionScores {
    pub active_reflective: f64,
    pub sensing_intuitive: f64,
    pub visual_verbal: f64,
    pub sequential_global: f64,
}

impl DimensionScores {
    pub fn uniform(value: f64) -> Self {
        Self::from_fn(|_| value)
    }

    pub fn from_fn(mut f: impl FnMut(Dimension) -> f64) -> Self {
        Self {
            active_reflective: f(Dimension::ActiveReflective),
            sensing_intuitive: f(Dimension::SensingIntuitive),
            visual_verbal: f(Dimension::VisualVerbal),
            sequential_global: f(Dimension::SequentialGlobal),
        }
    }

    pub fn get(&self, dimension: Dimension) -> f64 {
        match dimension {
            Dimension::ActiveReflective => self.active_reflective,
            Dimension::SensingIntuitive => self.sensing_intuitive,
            Dimension::VisualVerbal => self.visual_verbal,
            Dimension::SequentialGlobal => self.sequential_global,
        }
    }

    pub fn set(&mut self, dimension: Dimension, value: f64) {
        match dimension {
            Dimension::ActiveReflective => self.active_reflective = value,
            Dimension::SensingIntuitive => self.sensing_intuitive = value,
            Dimension::VisualVerbal => self.visual_verbal = value,
            Dimension::SequentialGlobal => self.sequential_global = value,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Dimension, f64)> + '_ {
        Dimension::ALL.into_iter().map(move |d| (d, self.get(d)))
    }
}
