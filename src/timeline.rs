use std::fmt;

use crate::{
    anchor::{AnchorProbe, resolve_anchor_offsets},
    blend::{self, ActiveSet, BlendRole},
    error::{ScrollineError, ScrollineResult},
    fingerprint::{LayoutFingerprint, fingerprint_layout},
    foundation::Progress,
    layout::{LayoutParams, SegmentList, layout_segments},
    model::{SequenceSpec, StepSpec},
    progress::ProgressOptions,
};

/// Per-frame values handed to a step's render callback.
#[derive(Clone, Copy, Debug)]
pub struct StepSample {
    /// Progress remapped onto the step's own segment, clamped to [0, 1].
    pub local: f64,
    /// Crossfade contribution, 1 outside any band.
    pub weight: f64,
    pub role: BlendRole,
    /// Sequence-global progress, for callbacks that want the raw position.
    pub progress: Progress,
}

pub type RenderFn = Box<dyn FnMut(StepSample) -> ScrollineResult<()>>;

/// One animation step: a declarative spec plus the callback that draws it.
pub struct Step {
    pub spec: StepSpec,
    pub render: RenderFn,
}

impl Step {
    pub fn new(
        spec: StepSpec,
        render: impl FnMut(StepSample) -> ScrollineResult<()> + 'static,
    ) -> Self {
        Self {
            spec,
            render: Box::new(render),
        }
    }
}

impl fmt::Debug for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Step").field("spec", &self.spec).finish()
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimelineOptions {
    pub progress: ProgressOptions,
    /// Overlap share for steps that do not declare one.
    pub default_overlap: f64,
    /// Emit tracing warnings for recoverable spec problems.
    pub dev_warnings: bool,
}

impl Default for TimelineOptions {
    fn default() -> Self {
        Self {
            progress: ProgressOptions::default(),
            default_overlap: 0.0,
            dev_warnings: cfg!(debug_assertions),
        }
    }
}

struct LayoutCache {
    fingerprint: LayoutFingerprint,
    segments: SegmentList,
}

/// Owns one sequence's steps and the cached segment layout.
///
/// The cache is keyed by a fingerprint of everything the layout reads, so a
/// rebuild whose inputs did not actually change keeps the existing segments
/// and running animations hold perfectly still.
pub struct Timeline {
    steps: Vec<Step>,
    spec: SequenceSpec,
    options: TimelineOptions,
    cache: Option<LayoutCache>,
    dirty: bool,
    scratch: ActiveSet,
}

impl Timeline {
    pub fn new(steps: Vec<Step>, options: TimelineOptions) -> ScrollineResult<Self> {
        let spec = SequenceSpec {
            steps: steps.iter().map(|s| s.spec.clone()).collect(),
        };
        spec.validate()?;
        Ok(Self {
            steps,
            spec,
            options,
            cache: None,
            dirty: true,
            scratch: ActiveSet::default(),
        })
    }

    pub fn options(&self) -> &TimelineOptions {
        &self.options
    }

    pub fn spec(&self) -> &SequenceSpec {
        &self.spec
    }

    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// The cached layout, `None` before the first successful rebuild.
    pub fn segments(&self) -> Option<&SegmentList> {
        self.cache.as_ref().map(|c| &c.segments)
    }

    /// Swaps the whole step list (a tab switch). The cached layout belongs to
    /// the old list and is discarded; nothing is dispatched until the next
    /// rebuild.
    pub fn replace_steps(&mut self, steps: Vec<Step>) -> ScrollineResult<()> {
        let spec = SequenceSpec {
            steps: steps.iter().map(|s| s.spec.clone()).collect(),
        };
        spec.validate()?;
        self.steps = steps;
        self.spec = spec;
        self.cache = None;
        self.dirty = true;
        Ok(())
    }

    /// Marks anchors and layout stale after a resize or content reflow.
    pub fn invalidate_layout(&mut self) {
        self.dirty = true;
    }

    /// Re-resolves anchors and relays the sequence out. Returns `true` when
    /// new segments were computed, `false` when the fingerprint matched and
    /// the cache was kept.
    pub fn rebuild(
        &mut self,
        probe: &dyn AnchorProbe,
        scroll_distance_px: Option<f64>,
    ) -> ScrollineResult<bool> {
        let anchors = resolve_anchor_offsets(&self.spec, probe, self.options.dev_warnings);
        let fingerprint = fingerprint_layout(
            &self.spec,
            &anchors,
            self.options.default_overlap,
            scroll_distance_px,
        );
        if let Some(cache) = &self.cache {
            if cache.fingerprint == fingerprint {
                self.dirty = false;
                return Ok(false);
            }
        }

        let params = LayoutParams {
            default_overlap: self.options.default_overlap,
            scroll_distance_px,
            dev_warnings: self.options.dev_warnings,
        };
        let segments = layout_segments(&self.spec, &anchors, &params)?;
        self.cache = Some(LayoutCache {
            fingerprint,
            segments,
        });
        self.dirty = false;
        Ok(true)
    }

    /// [`Self::rebuild`] gated on the dirty flag, for per-frame callers.
    pub fn rebuild_if_dirty(
        &mut self,
        probe: &dyn AnchorProbe,
        scroll_distance_px: Option<f64>,
    ) -> ScrollineResult<bool> {
        if self.dirty || self.cache.is_none() {
            return self.rebuild(probe, scroll_distance_px);
        }
        Ok(false)
    }

    /// Resolves the active set at `progress` and invokes the active steps'
    /// callbacks. A failing callback never blocks the other active callback;
    /// the first error is returned once the whole frame has been dispatched.
    #[tracing::instrument(skip(self))]
    pub fn frame(&mut self, progress: Progress) -> ScrollineResult<ActiveSet> {
        if !progress.0.is_finite() {
            return Err(ScrollineError::validation("progress must be finite"));
        }
        let Some(cache) = &self.cache else {
            return Err(ScrollineError::dispatch(
                "no layout computed yet, rebuild the timeline first",
            ));
        };

        blend::active_set_into(progress, &cache.segments, &mut self.scratch);

        let mut first_err = None;
        for entry in &self.scratch.entries {
            let sample = StepSample {
                local: entry.local,
                weight: entry.weight,
                role: entry.role,
                progress,
            };
            let step = &mut self.steps[entry.index];
            if let Err(err) = (step.render)(sample) {
                if first_err.is_none() {
                    first_err = Some(err);
                }
            }
        }

        match first_err {
            Some(err) => Err(err),
            None => Ok(self.scratch.clone()),
        }
    }
}

impl fmt::Debug for Timeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Timeline")
            .field("steps", &self.steps.len())
            .field("dirty", &self.dirty)
            .field("cached", &self.cache.is_some())
            .finish()
    }
}
