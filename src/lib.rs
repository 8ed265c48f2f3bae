#![forbid(unsafe_code)]

pub mod anchor;
pub mod blend;
pub mod dispatch;
pub mod dsl;
pub mod error;
pub mod fingerprint;
pub mod foundation;
pub mod guide;
pub mod layout;
pub mod model;
pub mod progress;
pub mod timeline;

pub use anchor::{AnchorOffsets, AnchorProbe, NoAnchors, resolve_anchor_offsets};
pub use blend::{ActiveSegment, ActiveSet, BlendRole};
pub use dispatch::{Dispatcher, FrameTrace};
pub use dsl::{SequenceBuilder, StepBuilder};
pub use error::{ScrollineError, ScrollineResult};
pub use fingerprint::{LayoutFingerprint, fingerprint_layout};
pub use foundation::{Progress, Span, ViewportSnapshot};
pub use layout::{LayoutParams, Segment, SegmentList, layout_segments};
pub use model::{DurationSpec, SequenceSpec, StepSpec};
pub use progress::{ProgressOptions, ProgressSource};
pub use timeline::{RenderFn, Step, StepSample, Timeline, TimelineOptions};
