use crate::error::{ScrollineError, ScrollineResult};

/// Declarative description of a scroll sequence: the ordered step list a page
/// author writes. Computed placement lives in [`crate::layout::SegmentList`].
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct SequenceSpec {
    pub steps: Vec<StepSpec>,
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct StepSpec {
    #[serde(default)]
    pub duration: DurationSpec,
    /// Crossfade share of this step's span, in [0, 0.5]. `None` takes the
    /// timeline default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overlap: Option<f64>,
    /// Element key that pins this step's start to a measured page position.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anchor: Option<String>,
}

/// How much of the progress range a step occupies relative to its siblings.
///
/// A bare number is a proportional weight. Strings add the page-author
/// spellings: `"420px"` divides by the region's scrollable height, `"15%"`
/// means 0.15 of it. Both collapse to plain weights before layout.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum DurationSpec {
    Weight(f64),
    Text(String),
}

impl Default for DurationSpec {
    fn default() -> Self {
        Self::Weight(Self::DEFAULT_WEIGHT)
    }
}

enum TextDuration {
    Px(f64),
    Percent(f64),
}

impl DurationSpec {
    pub const DEFAULT_WEIGHT: f64 = 1.0;

    fn parse_text(text: &str) -> Option<TextDuration> {
        let trimmed = text.trim();
        if let Some(px) = trimmed.strip_suffix("px") {
            let value: f64 = px.trim().parse().ok()?;
            return value.is_finite().then_some(TextDuration::Px(value));
        }
        if let Some(pct) = trimmed.strip_suffix('%') {
            let value: f64 = pct.trim().parse().ok()?;
            return value.is_finite().then_some(TextDuration::Percent(value));
        }
        None
    }

    /// Collapses the spec to a proportional weight, never failing: malformed
    /// or unusable inputs fall back to [`Self::DEFAULT_WEIGHT`] so one bad
    /// step cannot take the sequence down. `scroll_distance_px` is the
    /// region's scrollable height, `None` before the first measurement.
    pub fn resolve_weight(&self, scroll_distance_px: Option<f64>, dev_warnings: bool) -> f64 {
        let raw = match self {
            Self::Weight(w) if w.is_finite() => *w,
            Self::Weight(_) => {
                if dev_warnings {
                    tracing::warn!(
                        "non-finite duration weight, using {}",
                        Self::DEFAULT_WEIGHT
                    );
                }
                Self::DEFAULT_WEIGHT
            }
            Self::Text(text) => match Self::parse_text(text) {
                Some(TextDuration::Px(px)) => match scroll_distance_px {
                    Some(distance) => px / distance.max(1.0),
                    None => {
                        if dev_warnings {
                            tracing::warn!(
                                "pixel duration '{}' needs a measured scroll distance, using weight {}",
                                text,
                                Self::DEFAULT_WEIGHT
                            );
                        }
                        Self::DEFAULT_WEIGHT
                    }
                },
                Some(TextDuration::Percent(pct)) => pct / 100.0,
                None => {
                    if dev_warnings {
                        tracing::warn!(
                            "unrecognized duration '{}', using weight {}",
                            text,
                            Self::DEFAULT_WEIGHT
                        );
                    }
                    Self::DEFAULT_WEIGHT
                }
            },
        };
        if raw < 0.0 {
            if dev_warnings {
                tracing::warn!("negative duration {} clamped to 0", raw);
            }
            return 0.0;
        }
        raw
    }
}

impl StepSpec {
    pub fn validate(&self) -> ScrollineResult<()> {
        if let Some(key) = &self.anchor {
            if key.trim().is_empty() {
                return Err(ScrollineError::validation(
                    "step anchor key must be non-empty",
                ));
            }
        }
        if let DurationSpec::Text(text) = &self.duration {
            if DurationSpec::parse_text(text).is_none() {
                return Err(ScrollineError::validation(format!(
                    "unrecognized duration '{text}' (expected a number, '<n>px' or '<n>%')"
                )));
            }
        }
        Ok(())
    }
}

impl SequenceSpec {
    pub fn validate(&self) -> ScrollineResult<()> {
        if self.steps.is_empty() {
            return Err(ScrollineError::validation(
                "sequence must contain at least one step",
            ));
        }
        for step in &self.steps {
            step.validate()?;
        }
        Ok(())
    }

    pub fn from_json(json: &str) -> ScrollineResult<Self> {
        serde_json::from_str(json).map_err(|err| ScrollineError::serde(err.to_string()))
    }

    pub fn to_json(&self) -> ScrollineResult<String> {
        serde_json::to_string_pretty(self).map_err(|err| ScrollineError::serde(err.to_string()))
    }
}
