use crate::{
    error::ScrollineResult,
    model::{DurationSpec, StepSpec},
    progress::ProgressOptions,
    timeline::{Step, StepSample, Timeline, TimelineOptions},
};

/// Chainable construction for a whole timeline.
pub struct SequenceBuilder {
    options: TimelineOptions,
    steps: Vec<Step>,
}

impl SequenceBuilder {
    pub fn new() -> Self {
        Self {
            options: TimelineOptions::default(),
            steps: Vec::new(),
        }
    }

    pub fn options(mut self, options: TimelineOptions) -> Self {
        self.options = options;
        self
    }

    /// Overlap share applied to every step that does not declare its own.
    pub fn default_overlap(mut self, share: f64) -> Self {
        self.options.default_overlap = share;
        self
    }

    pub fn progress(mut self, progress: ProgressOptions) -> Self {
        self.options.progress = progress;
        self
    }

    pub fn dev_warnings(mut self, enabled: bool) -> Self {
        self.options.dev_warnings = enabled;
        self
    }

    pub fn step(mut self, step: Step) -> Self {
        self.steps.push(step);
        self
    }

    pub fn build(self) -> ScrollineResult<Timeline> {
        Timeline::new(self.steps, self.options)
    }
}

impl Default for SequenceBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Chainable construction for one step around its render callback.
pub struct StepBuilder {
    spec: StepSpec,
    render: Box<dyn FnMut(StepSample) -> ScrollineResult<()>>,
}

impl StepBuilder {
    pub fn new(render: impl FnMut(StepSample) -> ScrollineResult<()> + 'static) -> Self {
        Self {
            spec: StepSpec {
                duration: DurationSpec::default(),
                overlap: None,
                anchor: None,
            },
            render: Box::new(render),
        }
    }

    /// Proportional duration weight.
    pub fn duration(mut self, weight: f64) -> Self {
        self.spec.duration = DurationSpec::Weight(weight);
        self
    }

    /// Text duration in the page-author grammar, `"420px"` or `"15%"`.
    pub fn duration_text(mut self, text: impl Into<String>) -> Self {
        self.spec.duration = DurationSpec::Text(text.into());
        self
    }

    pub fn overlap(mut self, share: f64) -> Self {
        self.spec.overlap = Some(share);
        self
    }

    pub fn anchor(mut self, key: impl Into<String>) -> Self {
        self.spec.anchor = Some(key.into());
        self
    }

    pub fn build(self) -> ScrollineResult<Step> {
        self.spec.validate()?;
        Ok(Step {
            spec: self.spec,
            render: self.render,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::DurationSpec;

    fn noop(_: StepSample) -> ScrollineResult<()> {
        Ok(())
    }

    #[test]
    fn builders_create_expected_structure() {
        let timeline = SequenceBuilder::new()
            .default_overlap(0.15)
            .dev_warnings(false)
            .step(StepBuilder::new(noop).duration(2.0).build().unwrap())
            .step(
                StepBuilder::new(noop)
                    .duration_text("300px")
                    .anchor("the-problem")
                    .build()
                    .unwrap(),
            )
            .step(
                StepBuilder::new(noop)
                    .overlap(0.3)
                    .build()
                    .unwrap(),
            )
            .build()
            .unwrap();

        assert_eq!(timeline.step_count(), 3);
        assert_eq!(timeline.options().default_overlap, 0.15);

        let spec = timeline.spec();
        assert_eq!(spec.steps[0].duration, DurationSpec::Weight(2.0));
        assert_eq!(spec.steps[1].anchor.as_deref(), Some("the-problem"));
        assert_eq!(spec.steps[2].overlap, Some(0.3));
        assert_eq!(spec.steps[2].duration, DurationSpec::Weight(1.0));
    }

    #[test]
    fn blank_anchor_key_is_rejected() {
        assert!(StepBuilder::new(noop).anchor("  ").build().is_err());
    }

    #[test]
    fn malformed_text_duration_is_rejected() {
        assert!(StepBuilder::new(noop).duration_text("fast").build().is_err());
    }

    #[test]
    fn empty_sequence_is_rejected() {
        assert!(SequenceBuilder::new().build().is_err());
    }
}
