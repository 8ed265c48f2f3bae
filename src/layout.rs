use crate::{
    anchor::AnchorOffsets,
    error::ScrollineResult,
    foundation::{Progress, Span},
    model::SequenceSpec,
};

/// Inputs that shape a layout besides the sequence itself.
#[derive(Clone, Copy, Debug)]
pub struct LayoutParams {
    /// Overlap share for steps that do not declare one.
    pub default_overlap: f64,
    /// Region scrollable height, `None` before the first measurement.
    pub scroll_distance_px: Option<f64>,
    /// Emit tracing warnings for recoverable spec problems.
    pub dev_warnings: bool,
}

impl Default for LayoutParams {
    fn default() -> Self {
        Self {
            default_overlap: 0.0,
            scroll_distance_px: None,
            dev_warnings: cfg!(debug_assertions),
        }
    }
}

/// One step's computed placement on the progress axis.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct Segment {
    pub index: usize,
    pub span: Span,
    /// Crossfade band centered on the boundary shared with the next segment.
    /// `None` when either neighbor declares no overlap or has no width.
    pub trailing_band: Option<Span>,
}

/// Computed placement for a whole sequence: segments in step order whose
/// spans partition [0, 1].
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
pub struct SegmentList {
    segments: Vec<Segment>,
}

impl SegmentList {
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn get(&self, idx: usize) -> Option<&Segment> {
        self.segments.get(idx)
    }

    /// Band shared with the next segment, straddling this segment's end.
    pub fn trailing_band(&self, idx: usize) -> Option<Span> {
        self.segments.get(idx).and_then(|s| s.trailing_band)
    }

    /// Band shared with the previous segment; the same interval as that
    /// segment's trailing band.
    pub fn leading_band(&self, idx: usize) -> Option<Span> {
        if idx == 0 {
            return None;
        }
        self.trailing_band(idx - 1)
    }
}

/// Lays a sequence out on the progress axis.
///
/// Anchored steps pin their start boundary to the measured position; maximal
/// runs of unpinned boundaries divide the space between the surrounding
/// pinned ones in proportion to duration weight. The first start is always 0
/// and the last end is always 1, so the segments partition [0, 1] no matter
/// what the spec declares.
#[tracing::instrument(skip(spec, anchors))]
pub fn layout_segments(
    spec: &SequenceSpec,
    anchors: &AnchorOffsets,
    params: &LayoutParams,
) -> ScrollineResult<SegmentList> {
    spec.validate()?;

    let mut params = *params;
    if params.scroll_distance_px.is_some_and(|d| !d.is_finite()) {
        if params.dev_warnings {
            tracing::warn!("non-finite scroll distance, treating the region as unmeasured");
        }
        params.scroll_distance_px = None;
    }

    let step_count = spec.steps.len();
    let weights = resolve_weights(spec, &params);
    let overlaps = resolve_overlaps(spec, &params);
    let bounds = place_boundaries(spec, anchors, &weights, params.dev_warnings);

    let mut segments = Vec::with_capacity(step_count);
    for index in 0..step_count {
        let span = Span::new(Progress(bounds[index]), Progress(bounds[index + 1]))?;
        segments.push(Segment {
            index,
            span,
            trailing_band: None,
        });
    }
    attach_bands(&mut segments, &overlaps)?;

    Ok(SegmentList { segments })
}

fn resolve_weights(spec: &SequenceSpec, params: &LayoutParams) -> Vec<f64> {
    spec.steps
        .iter()
        .map(|step| {
            step.duration
                .resolve_weight(params.scroll_distance_px, params.dev_warnings)
        })
        .collect()
}

fn resolve_overlaps(spec: &SequenceSpec, params: &LayoutParams) -> Vec<f64> {
    let default = sanitize_overlap(params.default_overlap, params.dev_warnings);
    spec.steps
        .iter()
        .map(|step| match step.overlap {
            Some(value) => sanitize_overlap(value, params.dev_warnings),
            None => default,
        })
        .collect()
}

/// Overlap shares are clamped into [0, 0.5]; half a span per side is the
/// ceiling at which adjacent bands would start to collide.
fn sanitize_overlap(value: f64, dev_warnings: bool) -> f64 {
    if !value.is_finite() {
        if dev_warnings {
            tracing::warn!("non-finite overlap {}, using 0", value);
        }
        return 0.0;
    }
    if !(0.0..=0.5).contains(&value) {
        let clamped = value.clamp(0.0, 0.5);
        if dev_warnings {
            tracing::warn!("overlap {} outside [0, 0.5], clamping to {}", value, clamped);
        }
        return clamped;
    }
    value
}

/// Boundary `i` is segment `i`'s start; boundary `step_count` closes the last
/// segment at 1. Pinned boundaries keep their measured value exactly, so a
/// relayout from identical inputs reproduces identical positions.
fn place_boundaries(
    spec: &SequenceSpec,
    anchors: &AnchorOffsets,
    weights: &[f64],
    dev_warnings: bool,
) -> Vec<f64> {
    let step_count = spec.steps.len();
    let mut bounds = vec![0.0; step_count + 1];
    bounds[step_count] = 1.0;

    if anchors.offset_for(0).is_some() && dev_warnings {
        tracing::warn!("anchor on the first step is ignored, a sequence always starts at 0");
    }

    // Pin anchored starts, clamped monotonic so step order survives a
    // mis-ordered page.
    let mut pinned = Vec::with_capacity(step_count + 1);
    pinned.push(0usize);
    let mut prev_pinned = 0.0f64;
    for idx in 1..step_count {
        let Some(measured) = anchors.offset_for(idx) else {
            continue;
        };
        let mut at = measured.clamp(0.0, 1.0);
        if at < prev_pinned {
            if dev_warnings {
                tracing::warn!(
                    "anchored start {} of step {} precedes the pinned boundary {} before it, clamping",
                    at,
                    idx,
                    prev_pinned
                );
            }
            at = prev_pinned;
        }
        bounds[idx] = at;
        pinned.push(idx);
        prev_pinned = at;
    }
    pinned.push(step_count);

    for pair in pinned.windows(2) {
        distribute_run(&mut bounds, weights, pair[0], pair[1], dev_warnings);
    }

    bounds
}

/// Places the unpinned boundaries strictly between `start` and `end` at
/// cumulative weight shares of the pinned range.
fn distribute_run(
    bounds: &mut [f64],
    weights: &[f64],
    start: usize,
    end: usize,
    dev_warnings: bool,
) {
    if end <= start + 1 {
        return;
    }
    let lo = bounds[start];
    let hi = bounds[end];
    let range = hi - lo;

    let run = &weights[start..end];
    let mut total: f64 = run.iter().sum();
    let mut equal_shares = false;
    if total <= 0.0 {
        // A run of zero-weight steps still has to cover its range; equal
        // shares keep the partition intact.
        if range > 0.0 && dev_warnings {
            tracing::warn!(
                "steps {}..{} have zero total duration, splitting their range equally",
                start,
                end
            );
        }
        total = run.len() as f64;
        equal_shares = true;
    }

    let mut acc = 0.0;
    for idx in (start + 1)..end {
        acc += if equal_shares { 1.0 } else { weights[idx - 1] };
        let mut at = lo + range * (acc / total);
        at = at.clamp(lo, hi);
        if at < bounds[idx - 1] {
            at = bounds[idx - 1];
        }
        bounds[idx] = at;
    }
}

/// Width of the band between neighbors `i` and `i+1` is the smaller declared
/// overlap share times the smaller span, split evenly across the boundary.
fn attach_bands(segments: &mut [Segment], overlaps: &[f64]) -> ScrollineResult<()> {
    let count = segments.len();
    for idx in 0..count.saturating_sub(1) {
        let share = overlaps[idx].min(overlaps[idx + 1]);
        let width = share * segments[idx].span.len().min(segments[idx + 1].span.len());
        if width <= 0.0 {
            continue;
        }
        let boundary = segments[idx].span.end.0;
        let half = width / 2.0;
        let band = Span::new(Progress(boundary - half), Progress(boundary + half))?;
        segments[idx].trailing_band = Some(band);
    }
    Ok(())
}
