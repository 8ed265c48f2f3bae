use crate::foundation::{Progress, ViewportSnapshot};

/// Trigger-point tuning for the scroll-to-progress mapping, in CSS pixels.
///
/// `start_offset_px` pushes the zero point this many pixels past the default
/// trigger (region top meeting the viewport top). `end_offset_px` pulls the
/// one point the same way in from the default exit.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ProgressOptions {
    #[serde(default)]
    pub start_offset_px: f64,
    #[serde(default)]
    pub end_offset_px: f64,
}

/// Holds the latest raw scroll measurements and derives normalized progress
/// on demand.
///
/// Event handlers only store values here; nothing is computed until
/// [`Self::sample`] runs, so any number of scroll events between two frames
/// collapse into one computation. Non-finite measurements are dropped, and
/// scroll events arriving before the first full measurement are ignored (the
/// first measurement carries its own top position).
#[derive(Clone, Debug, Default)]
pub struct ProgressSource {
    options: ProgressOptions,
    snapshot: Option<ViewportSnapshot>,
}

impl ProgressSource {
    pub fn new(options: ProgressOptions) -> Self {
        let mut options = options;
        if !options.start_offset_px.is_finite() {
            tracing::warn!(
                "non-finite start_offset_px {}, using 0",
                options.start_offset_px
            );
            options.start_offset_px = 0.0;
        }
        if !options.end_offset_px.is_finite() {
            tracing::warn!("non-finite end_offset_px {}, using 0", options.end_offset_px);
            options.end_offset_px = 0.0;
        }
        Self {
            options,
            snapshot: None,
        }
    }

    pub fn options(&self) -> ProgressOptions {
        self.options
    }

    pub fn snapshot(&self) -> Option<ViewportSnapshot> {
        self.snapshot
    }

    /// Cheap per-event write: a scroll only moves the region's top edge.
    pub fn on_scroll(&mut self, region_top_px: f64) {
        if !region_top_px.is_finite() {
            return;
        }
        if let Some(snap) = &mut self.snapshot {
            snap.region_top = region_top_px;
        }
    }

    /// Full re-measure after a resize, font load, or other reflow.
    pub fn on_viewport_change(&mut self, snapshot: ViewportSnapshot) {
        let finite = snapshot.region_top.is_finite()
            && snapshot.region_height.is_finite()
            && snapshot.viewport_height.is_finite();
        if !finite {
            return;
        }
        self.snapshot = Some(snapshot);
    }

    /// Scrollable height of the region, `None` before the first measurement.
    /// Pixel durations resolve against this value.
    pub fn scroll_distance_px(&self) -> Option<f64> {
        self.snapshot.map(|snap| snap.scroll_distance())
    }

    /// The scroll-to-progress mapping: linear in scroll offset between the
    /// configured trigger points, clamped to [0, 1]. Returns zero until the
    /// first measurement arrives.
    pub fn sample(&self) -> Progress {
        let Some(snap) = self.snapshot else {
            return Progress::ZERO;
        };
        let distance = (snap.region_height
            - snap.viewport_height
            - self.options.start_offset_px
            - self.options.end_offset_px)
            .max(1.0);
        let scrolled = snap.scrolled() - self.options.start_offset_px;
        Progress((scrolled / distance).clamp(0.0, 1.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn measured(source: &mut ProgressSource, region_top: f64) {
        source.on_viewport_change(ViewportSnapshot {
            region_top,
            region_height: 2000.0,
            viewport_height: 800.0,
        });
    }

    #[test]
    fn sample_is_zero_before_first_measurement() {
        let mut source = ProgressSource::new(ProgressOptions::default());
        assert_eq!(source.sample(), Progress::ZERO);
        source.on_scroll(-400.0);
        assert_eq!(source.sample(), Progress::ZERO);
        assert_eq!(source.scroll_distance_px(), None);
    }

    #[test]
    fn sample_tracks_scroll_linearly_and_clamps() {
        let mut source = ProgressSource::new(ProgressOptions::default());
        measured(&mut source, 0.0);
        assert_eq!(source.sample(), Progress::ZERO);

        source.on_scroll(-600.0);
        assert_eq!(source.sample(), Progress(0.5));

        source.on_scroll(-1200.0);
        assert_eq!(source.sample(), Progress::ONE);

        source.on_scroll(-5000.0);
        assert_eq!(source.sample(), Progress::ONE);

        source.on_scroll(300.0);
        assert_eq!(source.sample(), Progress::ZERO);
    }

    #[test]
    fn start_offset_moves_the_zero_point() {
        let mut source = ProgressSource::new(ProgressOptions {
            start_offset_px: 100.0,
            end_offset_px: 0.0,
        });
        measured(&mut source, -100.0);
        assert_eq!(source.sample(), Progress::ZERO);

        // Distance shrinks to 1100; halfway sits 550px past the shifted zero.
        source.on_scroll(-650.0);
        assert_eq!(source.sample(), Progress(0.5));
    }

    #[test]
    fn end_offset_moves_the_one_point() {
        let mut source = ProgressSource::new(ProgressOptions {
            start_offset_px: 0.0,
            end_offset_px: 200.0,
        });
        measured(&mut source, -1000.0);
        assert_eq!(source.sample(), Progress::ONE);
    }

    #[test]
    fn non_finite_events_are_dropped() {
        let mut source = ProgressSource::new(ProgressOptions::default());
        measured(&mut source, -600.0);
        source.on_scroll(f64::NAN);
        assert_eq!(source.sample(), Progress(0.5));

        source.on_viewport_change(ViewportSnapshot {
            region_top: -600.0,
            region_height: f64::INFINITY,
            viewport_height: 800.0,
        });
        assert_eq!(source.sample(), Progress(0.5));
    }

    #[test]
    fn scroll_distance_ignores_trigger_offsets() {
        let mut source = ProgressSource::new(ProgressOptions {
            start_offset_px: 100.0,
            end_offset_px: 200.0,
        });
        measured(&mut source, 0.0);
        assert_eq!(source.scroll_distance_px(), Some(1200.0));
    }
}
