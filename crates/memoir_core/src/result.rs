//! Pipeline output handed back to the caller.

use crate::Story;
use chrono::{DateTime, Utc};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Stories generated for one request, with the context they were generated for.
///
/// # Examples
///
/// ```
/// use memoir_core::{PipelineResult, Story};
///
/// let result = PipelineResult::builder()
///     .life_stage("childhood")
///     .subcategory("family")
///     .stories(vec![Story::new("Title", "Body")])
///     .generated_at(chrono::Utc::now())
///     .build()
///     .unwrap();
///
/// let json = serde_json::to_value(&result).unwrap();
/// assert_eq!(json["lifeStage"], "childhood");
/// assert_eq!(json["stories"][0]["title"], "Title");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters, derive_builder::Builder)]
#[builder(setter(into))]
#[serde(rename_all = "camelCase")]
pub struct PipelineResult {
    /// Life stage the stories belong to
    life_stage: String,
    /// Subcategory the stories belong to
    subcategory: String,
    /// Stories in the order the backend produced them
    stories: Vec<Story>,
    /// When generation finished
    generated_at: DateTime<Utc>,
}

impl PipelineResult {
    /// Creates a result from its parts.
    pub fn new(
        life_stage: impl Into<String>,
        subcategory: impl Into<String>,
        stories: Vec<Story>,
        generated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            life_stage: life_stage.into(),
            subcategory: subcategory.into(),
            stories,
            generated_at,
        }
    }

    /// Creates a builder for `PipelineResult`.
    pub fn builder() -> PipelineResultBuilder {
        PipelineResultBuilder::default()
    }
}
