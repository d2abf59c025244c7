//! Fixed-schema classifier input.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::ValidationError;
use crate::domain::style::Dimension;

/// The 27 named scalars the classification service consumes.
///
/// Ratios lie in `[0, 1]`; counts are already capped by the pipeline.
/// The wire form is camelCase and unknown or missing fields are rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct FeatureVector {
    // Active / Reflective
    pub active_mode_ratio: f64,
    pub questions_generated: u32,
    pub debates_participated: u32,
    pub reflective_mode_ratio: f64,
    pub reflections_written: u32,
    pub journal_entries: u32,

    // Assistant usage
    pub ai_ask_mode_ratio: f64,
    pub ai_research_mode_ratio: f64,
    pub ai_text_to_docs_ratio: f64,

    // Sensing / Intuitive
    pub sensing_mode_ratio: f64,
    pub simulations_completed: u32,
    pub challenges_completed: u32,
    pub intuitive_mode_ratio: f64,
    pub concepts_explored: u32,
    pub patterns_discovered: u32,

    // Visual / Verbal
    pub visual_mode_ratio: f64,
    pub diagrams_viewed: u32,
    pub wireframes_explored: u32,
    pub verbal_mode_ratio: f64,
    pub text_read: u32,
    pub summaries_created: u32,

    // Sequential / Global
    pub sequential_mode_ratio: f64,
    pub steps_completed: u32,
    pub linear_navigation: u32,
    pub global_mode_ratio: f64,
    pub overviews_viewed: u32,
    pub navigation_jumps: u32,
}

impl FeatureVector {
    /// A vector with no evidence: every pair at 0.5, all counts zero.
    pub fn neutral() -> Self {
        Self {
            active_mode_ratio: 0.5,
            questions_generated: 0,
            debates_participated: 0,
            reflective_mode_ratio: 0.5,
            reflections_written: 0,
            journal_entries: 0,
            ai_ask_mode_ratio: 0.0,
            ai_research_mode_ratio: 0.0,
            ai_text_to_docs_ratio: 0.0,
            sensing_mode_ratio: 0.5,
            simulations_completed: 0,
            challenges_completed: 0,
            intuitive_mode_ratio: 0.5,
            concepts_explored: 0,
            patterns_discovered: 0,
            visual_mode_ratio: 0.5,
            diagrams_viewed: 0,
            wireframes_explored: 0,
            verbal_mode_ratio: 0.5,
            text_read: 0,
            summaries_created: 0,
            sequential_mode_ratio: 0.5,
            steps_completed: 0,
            linear_navigation: 0,
            global_mode_ratio: 0.5,
            overviews_viewed: 0,
            navigation_jumps: 0,
        }
    }

    /// Ratio fields of the two poles of a dimension.
    pub fn pole_ratios(&self, dimension: Dimension) -> (f64, f64) {
        match dimension {
            Dimension::ActiveReflective => (self.active_mode_ratio, self.reflective_mode_ratio),
            Dimension::SensingIntuitive => (self.sensing_mode_ratio, self.intuitive_mode_ratio),
            Dimension::VisualVerbal => (self.visual_mode_ratio, self.verbal_mode_ratio),
            Dimension::SequentialGlobal => (self.sequential_mode_ratio, self.global_mode_ratio),
        }
    }

    fn ratios(&self) -> [(&'static str, f64); 11] {
        [
            ("activeModeRatio", self.active_mode_ratio),
            ("reflectiveModeRatio", self.reflective_mode_ratio),
            ("aiAskModeRatio", self.ai_ask_mode_ratio),
            ("aiResearchModeRatio", self.ai_research_mode_ratio),
            ("aiTextToDocsRatio", self.ai_text_to_docs_ratio),
            ("sensingModeRatio", self.sensing_mode_ratio),
            ("intuitiveModeRatio", self.intuitive_mode_ratio),
            ("visualModeRatio", self.visual_mode_ratio),
            ("verbalModeRatio", self.verbal_mode_ratio),
            ("sequentialModeRatio", self.sequential_mode_ratio),
            ("globalModeRatio", self.global_mode_ratio),
        ]
    }

    /// Rejects non-finite or out-of-range ratios.
    ///
    /// Counts are unsigned so only ratios can be malformed.
    pub fn validate(&self) -> Result<(), ValidationError> {
        for (field, value) in self.ratios() {
            ValidationError::check_range(field, 0.0, 1.0, value)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn neutral_vector_is_valid_and_balanced() {
        let v = FeatureVector::neutral();
        assert!(v.validate().is_ok());
        for dim in Dimension::ALL {
            assert_eq!(v.pole_ratios(dim), (0.5, 0.5));
        }
    }

    #[test]
    fn validate_rejects_nan_ratio() {
        let mut v = FeatureVector::neutral();
        v.visual_mode_ratio = f64::NAN;
        assert!(matches!(
            v.validate(),
            Err(ValidationError::InvalidFormat { field, .. }) if field == "visualModeRatio"
        ));
    }

    #[test]
    fn validate_rejects_ratio_above_one() {
        let mut v = FeatureVector::neutral();
        v.ai_ask_mode_ratio = 1.2;
        assert!(matches!(v.validate(), Err(ValidationError::OutOfRange { .. })));
    }

    #[test]
    fn wire_form_has_exactly_27_camel_case_fields() {
        let json = serde_json::to_value(FeatureVector::neutral()).unwrap();
        let obj = json.as_object().unwrap();
        assert_eq!(obj.len(), 27);
        assert!(obj.contains_key("aiTextToDocsRatio"));
        assert!(obj.contains_key("navigationJumps"));
    }

    #[test]
    fn unknown_field_is_rejected() {
        let mut json = serde_json::to_value(FeatureVector::neutral()).unwrap();
        json["mood"] = serde_json::json!(1);
        assert!(serde_json::from_value::<FeatureVector>(json).is_err());
    }

    #[test]
    fn missing_field_is_rejected() {
        let mut json = serde_json::to_value(FeatureVector::neutral()).unwrap();
        json.as_object_mut().unwrap().remove("textRead");
        assert!(serde_json::from_value::<FeatureVector>(json).is_err());
    }
}
