use crate::model::SequenceSpec;

/// The one measurement seam between the engine and a live page.
///
/// Implementations look up the element registered under `key` inside the
/// observed scroll region and report its vertical position as a ratio of the
/// region's scrollable height, in [0, 1]. Return `None` when the element
/// cannot be found (not mounted yet, removed, or a typo'd key).
pub trait AnchorProbe {
    fn measure(&self, key: &str) -> Option<f64>;
}

impl<F> AnchorProbe for F
where
    F: Fn(&str) -> Option<f64>,
{
    fn measure(&self, key: &str) -> Option<f64> {
        self(key)
    }
}

/// Probe for sequences that use no anchors.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoAnchors;

impl AnchorProbe for NoAnchors {
    fn measure(&self, _key: &str) -> Option<f64> {
        None
    }
}

/// Resolved anchor positions, indexed by step. Steps without an anchor, and
/// steps whose anchor failed to measure, hold `None`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AnchorOffsets {
    per_step: Vec<Option<f64>>,
}

impl AnchorOffsets {
    /// Offsets for a sequence that anchors nothing.
    pub fn none(step_count: usize) -> Self {
        Self {
            per_step: vec![None; step_count],
        }
    }

    /// Pre-resolved offsets, mainly for tests and replayed layouts.
    pub fn from_offsets(per_step: Vec<Option<f64>>) -> Self {
        Self { per_step }
    }

    pub fn offset_for(&self, step_idx: usize) -> Option<f64> {
        self.per_step.get(step_idx).copied().flatten()
    }

    pub fn len(&self) -> usize {
        self.per_step.len()
    }

    pub fn is_empty(&self) -> bool {
        self.per_step.is_empty()
    }
}

/// Measures every anchored step through `probe`. Resolution never fails: an
/// anchor that does not measure falls back to `None` (proportional placement)
/// so a missing element degrades the layout instead of breaking it.
pub fn resolve_anchor_offsets(
    spec: &SequenceSpec,
    probe: &dyn AnchorProbe,
    dev_warnings: bool,
) -> AnchorOffsets {
    let mut per_step = Vec::with_capacity(spec.steps.len());
    for (idx, step) in spec.steps.iter().enumerate() {
        let Some(key) = step.anchor.as_deref() else {
            per_step.push(None);
            continue;
        };
        let resolved = match probe.measure(key) {
            Some(ratio) if ratio.is_finite() => {
                if !(0.0..=1.0).contains(&ratio) {
                    if dev_warnings {
                        tracing::warn!(
                            "anchor '{}' on step {} measured {} outside [0, 1], clamping",
                            key,
                            idx,
                            ratio
                        );
                    }
                    Some(ratio.clamp(0.0, 1.0))
                } else {
                    Some(ratio)
                }
            }
            Some(ratio) => {
                if dev_warnings {
                    tracing::warn!(
                        "anchor '{}' on step {} measured non-finite {}, ignoring",
                        key,
                        idx,
                        ratio
                    );
                }
                None
            }
            None => {
                if dev_warnings {
                    tracing::warn!(
                        "anchor '{}' on step {} did not resolve, falling back to proportional placement",
                        key,
                        idx
                    );
                }
                None
            }
        };
        per_step.push(resolved);
    }
    AnchorOffsets { per_step }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DurationSpec, StepSpec};
    use std::collections::BTreeMap;

    struct MapProbe(BTreeMap<String, f64>);

    impl AnchorProbe for MapProbe {
        fn measure(&self, key: &str) -> Option<f64> {
            self.0.get(key).copied()
        }
    }

    fn anchored(key: Option<&str>) -> StepSpec {
        StepSpec {
            duration: DurationSpec::Weight(1.0),
            overlap: None,
            anchor: key.map(str::to_string),
        }
    }

    #[test]
    fn resolves_measured_anchors_and_skips_the_rest() {
        let spec = SequenceSpec {
            steps: vec![
                anchored(None),
                anchored(Some("intro")),
                anchored(Some("gone")),
            ],
        };
        let mut map = BTreeMap::new();
        map.insert("intro".to_string(), 0.4);
        let probe = MapProbe(map);

        let offsets = resolve_anchor_offsets(&spec, &probe, false);
        assert_eq!(offsets.len(), 3);
        assert_eq!(offsets.offset_for(0), None);
        assert_eq!(offsets.offset_for(1), Some(0.4));
        assert_eq!(offsets.offset_for(2), None);
    }

    #[test]
    fn clamps_out_of_range_and_drops_non_finite() {
        let spec = SequenceSpec {
            steps: vec![anchored(Some("low")), anchored(Some("bad"))],
        };
        let mut map = BTreeMap::new();
        map.insert("low".to_string(), -0.2);
        map.insert("bad".to_string(), f64::NAN);
        let probe = MapProbe(map);

        let offsets = resolve_anchor_offsets(&spec, &probe, false);
        assert_eq!(offsets.offset_for(0), Some(0.0));
        assert_eq!(offsets.offset_for(1), None);
    }

    #[test]
    fn closures_are_probes() {
        let spec = SequenceSpec {
            steps: vec![anchored(Some("half"))],
        };
        let probe = |key: &str| (key == "half").then_some(0.5);
        let offsets = resolve_anchor_offsets(&spec, &probe, false);
        assert_eq!(offsets.offset_for(0), Some(0.5));
    }

    #[test]
    fn no_anchors_probe_measures_nothing() {
        assert_eq!(NoAnchors.measure("anything"), None);
    }

    #[test]
    fn offset_for_out_of_bounds_is_none() {
        let offsets = AnchorOffsets::none(2);
        assert_eq!(offsets.offset_for(5), None);
    }
}
