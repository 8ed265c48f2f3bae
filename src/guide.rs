//! # Scrolline guide (v0.1.0)
//!
//! This module is a standalone, end-to-end walkthrough of Scrolline's architecture and public API.
//! It is intentionally detailed so future phases (and external integrations) can build on a shared
//! mental model of what "a frame" means in this codebase.
//!
//! If you are looking for copy/paste snippets, start with the repository `README.md`.
//! If you are implementing new features, start here.
//!
//! ---
//!
//! ## Core concepts
//!
//! - [`SequenceSpec`](crate::SequenceSpec): the step descriptors a page author writes (durations, overlaps, anchors)
//! - [`Progress`](crate::Progress): normalized scroll position through the observed region, in `[0, 1]`
//! - [`SegmentList`](crate::SegmentList): computed placement, segments whose spans partition `[0, 1]`
//! - [`ActiveSet`](crate::ActiveSet): the one or two segments a given progress value has to render
//! - [`Timeline`](crate::Timeline): owns the steps, their callbacks, and the cached layout
//! - [`Dispatcher`](crate::Dispatcher): host-facing coordinator driven by one `tick()` per animation frame
//! - [`AnchorProbe`](crate::AnchorProbe): the only place the engine touches a live page
//!
//! The per-frame pipeline is explicitly staged:
//!
//! 1. Sample progress: [`ProgressSource::sample`](crate::ProgressSource::sample)
//! 2. Lay segments out (cached): [`layout_segments`](crate::layout_segments)
//! 3. Resolve the active set: [`active_set`](crate::blend::active_set)
//! 4. Dispatch render callbacks: [`Timeline::frame`](crate::Timeline::frame)
//!
//! The convenience wrapper for (1)+(2)+(3)+(4) is [`Dispatcher::tick`](crate::Dispatcher::tick).
//!
//! ---
//!
//! ## "No DOM in the engine" (and why)
//!
//! Scrolline wants layout and blending to be deterministic, testable, and portable.
//! To do that, engine code never reads a live page. Instead:
//!
//! - scroll and resize measurements are pushed in as a [`ViewportSnapshot`](crate::ViewportSnapshot)
//! - anchored elements are measured through [`AnchorProbe`](crate::AnchorProbe), a single
//!   `measure(key) -> Option<ratio>` seam
//! - drawing happens inside the step callbacks the host registers; the engine only tells each
//!   callback its local progress and crossfade weight
//!
//! A probe can be backed by `getBoundingClientRect` in a browser host, by a fixture map in tests,
//! or by nothing at all ([`NoAnchors`](crate::NoAnchors)). The whole engine runs headless.
//!
//! ---
//!
//! ## Frame discipline (Scrolline's scheduling contract)
//!
//! Scroll events arrive far more often than frames are drawn. The contract is:
//!
//! - event handlers ([`Dispatcher::on_scroll`](crate::Dispatcher::on_scroll),
//!   [`Dispatcher::on_viewport_change`](crate::Dispatcher::on_viewport_change)) only store raw values
//! - all computation happens in [`Dispatcher::tick`](crate::Dispatcher::tick), which the host calls
//!   once per animation frame
//! - any number of events between two ticks collapse into exactly one layout check, one blend
//!   resolution, and at most two callback invocations
//!
//! Re-entrancy is a non-problem by construction: everything runs on the host's frame callback.
//!
//! ---
//!
//! ## Building a timeline (Rust DSL)
//!
//! JSON is supported via Serde for the declarative part ([`SequenceSpec`](crate::SequenceSpec)),
//! but render callbacks are code, so programmatic usage goes through the builder DSL.
//!
//! ```rust,no_run
//! use scrolline::{Dispatcher, SequenceBuilder, StepBuilder, ViewportSnapshot};
//!
//! # fn main() -> scrolline::ScrollineResult<()> {
//! let timeline = SequenceBuilder::new()
//!     .default_overlap(0.15)
//!     .step(
//!         StepBuilder::new(|sample| {
//!             println!("intro: local={:.2} weight={:.2}", sample.local, sample.weight);
//!             Ok(())
//!         })
//!         .duration(2.0)
//!         .build()?,
//!     )
//!     .step(
//!         StepBuilder::new(|sample| {
//!             println!("problem: local={:.2}", sample.local);
//!             Ok(())
//!         })
//!         .anchor("the-problem")
//!         .build()?,
//!     )
//!     .step(
//!         StepBuilder::new(|_sample| Ok(()))
//!             .duration_text("300px")
//!             .build()?,
//!     )
//!     .build()?;
//!
//! // The probe is the only place the engine touches a live page.
//! let probe = |key: &str| (key == "the-problem").then_some(0.55);
//! let mut dispatcher = Dispatcher::new(timeline, Box::new(probe));
//!
//! // Host wiring: push events as they happen...
//! dispatcher.on_viewport_change(ViewportSnapshot {
//!     region_top: 0.0,
//!     region_height: 2400.0,
//!     viewport_height: 800.0,
//! })?;
//! dispatcher.on_scroll(-640.0);
//!
//! // ...and drive one tick per animation frame.
//! let trace = dispatcher.tick()?;
//! assert!(trace.active.weight_sum() > 0.99);
//! # Ok(())
//! # }
//! ```
//!
//! The same step descriptors serialize to JSON without the callbacks:
//!
//! ```json
//! {
//!   "steps": [
//!     { "duration": 2 },
//!     { "anchor": "the-problem" },
//!     { "duration": "300px", "overlap": 0.2 }
//!   ]
//! }
//! ```
//!
//! Notes:
//!
//! - [`SequenceSpec::validate`](crate::SequenceSpec::validate) is called by the builders.
//! - A bare number is a proportional weight; `"420px"` and `"15%"` resolve against the region's
//!   scrollable height once it has been measured.
//!
//! ---
//!
//! ## Layout: from descriptors to segments
//!
//! [`layout_segments`](crate::layout_segments) converts a spec into a
//! [`SegmentList`](crate::SegmentList) on the progress axis:
//!
//! - text durations collapse to weights ([`DurationSpec::resolve_weight`](crate::DurationSpec::resolve_weight))
//! - anchored steps pin their start boundary to the probed position, clamped monotonic so step
//!   order survives a mis-ordered page
//! - each maximal run of unanchored boundaries divides the space between the surrounding pinned
//!   ones in proportion to weight
//! - the first start is always 0 and the last end is always 1
//!
//! The result partitions `[0, 1]`: every progress value belongs to exactly one segment's span.
//! Zero-weight steps collapse to zero-width segments that are never dispatched.
//!
//! Degraded inputs degrade the layout, never the page: unresolvable anchors fall back to
//! proportional placement, out-of-range overlaps clamp, and a run of zero-weight steps splits its
//! range equally. Each fallback emits a `tracing` warning when `dev_warnings` is on.
//!
//! ---
//!
//! ## Blending: overlap bands and the active set
//!
//! Adjacent steps can crossfade. Each step declares an overlap share in `[0, 0.5]` (or inherits
//! the timeline default), and each boundary gets a band:
//!
//! - width = the smaller declared share times the smaller neighboring span
//! - the band straddles the boundary symmetrically, so the handoff is an exact 50/50 split
//!
//! [`active_set`](crate::blend::active_set) resolves a progress value to one or two
//! [`ActiveSegment`](crate::ActiveSegment)s:
//!
//! - inside a band: the outgoing neighbor at weight `1 - t` and the incoming one at `t`, with `t`
//!   running linearly across the band
//! - everywhere else: the owning segment alone at weight 1
//!
//! Weights always sum to 1, and each entry carries the progress value remapped onto its own span
//! (clamped, so a segment entered mid-band starts from a sane local position).
//!
//! ---
//!
//! ## Relayout without jitter
//!
//! Resizes, font loads, and tab switches all need a relayout, and relayouts are where scroll
//! animations usually jump. Scrolline gates the cache swap on a
//! [`LayoutFingerprint`](crate::LayoutFingerprint) of everything the layout reads: step specs,
//! resolved anchor offsets, the default overlap, and the scroll distance. If a rebuild's
//! fingerprint matches the cache, the cached segments are kept byte for byte and running
//! animations hold perfectly still.
//!
//! [`Timeline::replace_steps`](crate::Timeline::replace_steps) is the tab-switch path: the old
//! layout belongs to the old list and is discarded outright, and nothing is dispatched until the
//! new list has been laid out.
//!
//! ---
//!
//! ## Error handling
//!
//! Structural mistakes (an empty sequence, a blank anchor key, an unparseable text duration) fail
//! fast as [`ScrollineError::Validation`](crate::ScrollineError) when a timeline is built.
//! Value-range problems in otherwise well-formed specs clamp at layout time instead of failing, so
//! a live page keeps scrolling. Render callbacks return
//! [`ScrollineResult`](crate::ScrollineResult); a failing callback never blocks the other active
//! callback in the same frame, and the first error surfaces from
//! [`Dispatcher::tick`](crate::Dispatcher::tick) once the frame has been fully dispatched.
