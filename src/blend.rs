use crate::{
    foundation::Progress,
    layout::{Segment, SegmentList},
};

/// How a segment participates in the current frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub enum BlendRole {
    Solo,
    Outgoing,
    Incoming,
}

/// One active segment with its per-frame sampling values.
#[derive(Clone, Copy, Debug, serde::Serialize)]
pub struct ActiveSegment {
    pub index: usize,
    /// Progress remapped onto this segment's own span, clamped to [0, 1].
    pub local: f64,
    /// Crossfade contribution. The weights of an active set sum to 1.
    pub weight: f64,
    pub role: BlendRole,
}

/// The one or two segments a frame has to render, in outgoing-then-incoming
/// order.
#[derive(Clone, Debug, Default, serde::Serialize)]
pub struct ActiveSet {
    pub progress: Progress,
    pub entries: Vec<ActiveSegment>,
}

impl ActiveSet {
    pub fn weight_sum(&self) -> f64 {
        self.entries.iter().map(|e| e.weight).sum()
    }

    pub fn entry_for(&self, index: usize) -> Option<&ActiveSegment> {
        self.entries.iter().find(|e| e.index == index)
    }
}

/// Resolves which segments are live at `progress` and how strongly.
///
/// Inside an overlap band the two neighbors share the frame with weights
/// `1 - t` and `t`, `t` running linearly across the band; everywhere else the
/// owning segment renders alone with weight 1. Zero-width segments are never
/// active.
pub fn active_set(progress: Progress, segments: &SegmentList) -> ActiveSet {
    let mut out = ActiveSet::default();
    active_set_into(progress, segments, &mut out);
    out
}

/// Buffer-reusing variant of [`active_set`] for per-frame callers.
pub fn active_set_into(progress: Progress, segments: &SegmentList, out: &mut ActiveSet) {
    out.progress = progress;
    out.entries.clear();

    let segs = segments.segments();
    if segs.is_empty() {
        return;
    }
    let owner = locate(segs, progress);

    // The band straddling the owner's end boundary.
    if let Some(band) = segs[owner].trailing_band {
        if band.contains(progress) {
            push_pair(out, &segs[owner], &segs[owner + 1], band.local(progress), progress);
            return;
        }
    }
    // The band straddling the owner's start boundary.
    if owner > 0 {
        if let Some(band) = segs[owner - 1].trailing_band {
            if band.contains(progress) {
                push_pair(out, &segs[owner - 1], &segs[owner], band.local(progress), progress);
                return;
            }
        }
    }

    out.entries.push(ActiveSegment {
        index: segs[owner].index,
        local: segs[owner].span.local(progress),
        weight: 1.0,
        role: BlendRole::Solo,
    });
}

fn push_pair(
    out: &mut ActiveSet,
    outgoing: &Segment,
    incoming: &Segment,
    t: f64,
    progress: Progress,
) {
    out.entries.push(ActiveSegment {
        index: outgoing.index,
        local: outgoing.span.local(progress),
        weight: 1.0 - t,
        role: BlendRole::Outgoing,
    });
    out.entries.push(ActiveSegment {
        index: incoming.index,
        local: incoming.span.local(progress),
        weight: t,
        role: BlendRole::Incoming,
    });
}

/// Index of the segment that owns `p`: the last one starting at or before it,
/// skipping zero-width segments. At `p` = 1 this is the final segment with
/// actual width.
fn locate(segs: &[Segment], p: Progress) -> usize {
    let mut idx = segs.partition_point(|s| s.span.start.0 <= p.0);
    if idx == 0 {
        return 0;
    }
    idx -= 1;
    while idx > 0 && segs[idx].span.is_empty() {
        idx -= 1;
    }
    idx
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        anchor::AnchorOffsets,
        layout::{LayoutParams, layout_segments},
        model::{DurationSpec, SequenceSpec, StepSpec},
    };

    fn laid_out(weights: &[f64], overlaps: &[Option<f64>]) -> SegmentList {
        let spec = SequenceSpec {
            steps: weights
                .iter()
                .zip(overlaps)
                .map(|(w, ov)| StepSpec {
                    duration: DurationSpec::Weight(*w),
                    overlap: *ov,
                    anchor: None,
                })
                .collect(),
        };
        let params = LayoutParams {
            default_overlap: 0.0,
            scroll_distance_px: None,
            dev_warnings: false,
        };
        layout_segments(&spec, &AnchorOffsets::none(weights.len()), &params).unwrap()
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-12
    }

    #[test]
    fn solo_inside_a_core() {
        let list = laid_out(&[1.0, 2.0, 1.0], &[None, None, None]);
        let set = active_set(Progress(0.5), &list);
        assert_eq!(set.entries.len(), 1);
        assert_eq!(set.entries[0].index, 1);
        assert_eq!(set.entries[0].role, BlendRole::Solo);
        assert_eq!(set.entries[0].weight, 1.0);
        assert!(close(set.entries[0].local, 0.5));
    }

    #[test]
    fn handoff_is_an_even_split() {
        let list = laid_out(&[1.0, 1.0], &[Some(0.5), Some(0.5)]);
        let set = active_set(Progress(0.5), &list);
        assert_eq!(set.entries.len(), 2);

        let out = &set.entries[0];
        let inc = &set.entries[1];
        assert_eq!(out.index, 0);
        assert_eq!(out.role, BlendRole::Outgoing);
        assert!(close(out.weight, 0.5));
        assert!(close(out.local, 1.0));
        assert_eq!(inc.index, 1);
        assert_eq!(inc.role, BlendRole::Incoming);
        assert!(close(inc.weight, 0.5));
        assert!(close(inc.local, 0.0));
    }

    #[test]
    fn band_edges_blend_continuously() {
        // Band [0.375, 0.625) around the 0.5 boundary.
        let list = laid_out(&[1.0, 1.0], &[Some(0.5), Some(0.5)]);

        let entering = active_set(Progress(0.375), &list);
        assert_eq!(entering.entries.len(), 2);
        assert!(close(entering.entries[0].weight, 1.0));
        assert!(close(entering.entries[1].weight, 0.0));

        let leaving = active_set(Progress(0.625), &list);
        assert_eq!(leaving.entries.len(), 1);
        assert_eq!(leaving.entries[0].index, 1);
        assert_eq!(leaving.entries[0].weight, 1.0);

        let nearly_out = active_set(Progress(0.624999), &list);
        assert_eq!(nearly_out.entries.len(), 2);
        assert!(nearly_out.entries[0].weight < 0.001);
        assert!(nearly_out.entries[1].weight > 0.999);
    }

    #[test]
    fn weights_sum_to_one_across_the_band() {
        let list = laid_out(&[2.0, 2.0, 1.0], &[Some(0.2), Some(0.3), Some(0.0)]);
        for i in 0..=100 {
            let p = Progress(i as f64 / 100.0);
            let set = active_set(p, &list);
            assert!(!set.entries.is_empty());
            assert!(close(set.weight_sum(), 1.0));
        }
    }

    #[test]
    fn band_interior_weights_follow_band_position() {
        // Spans 0.4/0.4/0.2; band [0.36, 0.44) around 0.4.
        let list = laid_out(&[2.0, 2.0, 1.0], &[Some(0.2), Some(0.3), Some(0.0)]);
        let set = active_set(Progress(0.42), &list);
        assert_eq!(set.entries.len(), 2);
        assert!(close(set.entries[0].weight, 0.25));
        assert!(close(set.entries[1].weight, 0.75));
        assert!(close(set.entries[1].local, 0.05));
    }

    #[test]
    fn endpoints_resolve_to_first_and_last_segments() {
        let list = laid_out(&[1.0, 1.0], &[None, None]);

        let start = active_set(Progress::ZERO, &list);
        assert_eq!(start.entries.len(), 1);
        assert_eq!(start.entries[0].index, 0);
        assert_eq!(start.entries[0].local, 0.0);

        let end = active_set(Progress::ONE, &list);
        assert_eq!(end.entries.len(), 1);
        assert_eq!(end.entries[0].index, 1);
        assert_eq!(end.entries[0].local, 1.0);
    }

    #[test]
    fn zero_width_segments_are_never_active() {
        let list = laid_out(&[1.0, 0.0, 1.0], &[None, None, None]);
        for i in 0..=100 {
            let set = active_set(Progress(i as f64 / 100.0), &list);
            assert!(set.entry_for(1).is_none());
        }
        let at_collapse = active_set(Progress(0.5), &list);
        assert_eq!(at_collapse.entries.len(), 1);
        assert_eq!(at_collapse.entries[0].index, 2);
        assert_eq!(at_collapse.entries[0].local, 0.0);
    }

    #[test]
    fn full_progress_falls_back_to_last_segment_with_width() {
        let list = laid_out(&[1.0, 0.0], &[None, None]);
        let set = active_set(Progress::ONE, &list);
        assert_eq!(set.entries.len(), 1);
        assert_eq!(set.entries[0].index, 0);
        assert_eq!(set.entries[0].local, 1.0);
    }

    #[test]
    fn local_progress_is_monotonic_under_forward_scrub() {
        let list = laid_out(&[1.0, 2.0, 1.0], &[Some(0.4), Some(0.4), Some(0.4)]);
        let mut last_local = f64::NEG_INFINITY;
        for i in 0..=1000 {
            let set = active_set(Progress(i as f64 / 1000.0), &list);
            if let Some(entry) = set.entry_for(1) {
                assert!(entry.local >= last_local);
                assert!((0.0..=1.0).contains(&entry.local));
                last_local = entry.local;
            }
        }
    }

    #[test]
    fn empty_segment_list_yields_no_entries() {
        let set = active_set(Progress(0.5), &SegmentList::default());
        assert!(set.entries.is_empty());
        assert_eq!(set.weight_sum(), 0.0);
    }

    #[test]
    fn reused_buffer_is_fully_overwritten() {
        let list = laid_out(&[1.0, 1.0], &[Some(0.5), Some(0.5)]);
        let mut set = ActiveSet::default();
        active_set_into(Progress(0.5), &list, &mut set);
        assert_eq!(set.entries.len(), 2);
        active_set_into(Progress(0.1), &list, &mut set);
        assert_eq!(set.entries.len(), 1);
        assert_eq!(set.entries[0].index, 0);
        assert_eq!(set.progress, Progress(0.1));
    }
}
