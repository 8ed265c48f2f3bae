use crate::{
    anchor::AnchorProbe,
    blend::ActiveSet,
    error::ScrollineResult,
    foundation::{Progress, ViewportSnapshot},
    progress::ProgressSource,
    timeline::{Step, Timeline},
};

/// What one [`Dispatcher::tick`] did.
#[derive(Clone, Debug, serde::Serialize)]
pub struct FrameTrace {
    /// Whether this tick had to compute a fresh segment layout.
    pub rebuilt: bool,
    pub active: ActiveSet,
}

/// Host-facing coordinator: owns the timeline, the progress source, and the
/// anchor probe, and turns the host's frame callback into render dispatches.
///
/// Event handlers (`on_scroll`, `on_viewport_change`) are cheap writes; all
/// real work happens in [`Self::tick`], which the host calls once per
/// animation frame. Any number of events between two ticks collapse into one
/// computation.
pub struct Dispatcher {
    timeline: Timeline,
    source: ProgressSource,
    probe: Box<dyn AnchorProbe>,
}

impl Dispatcher {
    pub fn new(timeline: Timeline, probe: Box<dyn AnchorProbe>) -> Self {
        let source = ProgressSource::new(timeline.options().progress);
        Self {
            timeline,
            source,
            probe,
        }
    }

    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    pub fn source(&self) -> &ProgressSource {
        &self.source
    }

    /// Current progress without dispatching anything.
    pub fn progress(&self) -> Progress {
        self.source.sample()
    }

    /// Records the latest scroll position. Called per scroll event.
    pub fn on_scroll(&mut self, region_top_px: f64) {
        self.source.on_scroll(region_top_px);
    }

    /// Records fresh viewport measurements and eagerly re-lays the sequence
    /// out, so anchored boundaries move in the same frame as the resize.
    /// Returns `true` when the layout actually changed.
    pub fn on_viewport_change(&mut self, snapshot: ViewportSnapshot) -> ScrollineResult<bool> {
        self.source.on_viewport_change(snapshot);
        self.timeline.invalidate_layout();
        self.timeline
            .rebuild(self.probe.as_ref(), self.source.scroll_distance_px())
    }

    /// Swaps the whole step list (a tab switch) and lays the new list out
    /// before anything is dispatched against it.
    pub fn replace_steps(&mut self, steps: Vec<Step>) -> ScrollineResult<()> {
        self.timeline.replace_steps(steps)?;
        self.timeline
            .rebuild(self.probe.as_ref(), self.source.scroll_distance_px())?;
        Ok(())
    }

    /// One animation frame: refresh the layout if something marked it stale,
    /// sample progress once, and invoke the active steps' callbacks.
    pub fn tick(&mut self) -> ScrollineResult<FrameTrace> {
        let rebuilt = self
            .timeline
            .rebuild_if_dirty(self.probe.as_ref(), self.source.scroll_distance_px())?;
        let progress = self.source.sample();
        let active = self.timeline.frame(progress)?;
        Ok(FrameTrace { rebuilt, active })
    }

    /// Tears the coordinator down, handing the timeline back to the caller.
    pub fn into_timeline(self) -> Timeline {
        self.timeline
    }
}
