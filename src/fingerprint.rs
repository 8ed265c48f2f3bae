use crate::{
    anchor::AnchorOffsets,
    model::{DurationSpec, SequenceSpec, StepSpec},
};

/// Identity of a segment layout's inputs. Equal fingerprints mean a relayout
/// would reproduce the cached segments bit for bit, so the cache can be kept
/// and in-flight animations never jitter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct LayoutFingerprint {
    pub hi: u64,
    pub lo: u64,
}

/// Hashes everything [`crate::layout::layout_segments`] reads: the step
/// specs, the resolved anchor offsets, the default overlap, and the scroll
/// distance pixel durations divide by.
pub fn fingerprint_layout(
    spec: &SequenceSpec,
    anchors: &AnchorOffsets,
    default_overlap: f64,
    scroll_distance_px: Option<f64>,
) -> LayoutFingerprint {
    let mut a = Fnv1a64::new(0xcbf29ce484222325);
    let mut b = Fnv1a64::new(0x9ae16a3b2f90404f);

    write_u64_pair(&mut a, &mut b, spec.steps.len() as u64);
    for (idx, step) in spec.steps.iter().enumerate() {
        write_step_pair(&mut a, &mut b, step);
        write_opt_f64_pair(&mut a, &mut b, anchors.offset_for(idx));
    }
    write_u64_pair(&mut a, &mut b, default_overlap.to_bits());
    write_opt_f64_pair(&mut a, &mut b, scroll_distance_px);

    LayoutFingerprint {
        hi: a.finish(),
        lo: b.finish(),
    }
}

fn write_step_pair(a: &mut Fnv1a64, b: &mut Fnv1a64, step: &StepSpec) {
    match &step.duration {
        DurationSpec::Weight(w) => {
            write_u8_pair(a, b, 0);
            write_u64_pair(a, b, w.to_bits());
        }
        DurationSpec::Text(text) => {
            write_u8_pair(a, b, 1);
            write_str_pair(a, b, text);
        }
    }
    write_opt_f64_pair(a, b, step.overlap);
    match &step.anchor {
        Some(key) => {
            write_u8_pair(a, b, 1);
            write_str_pair(a, b, key);
        }
        None => write_u8_pair(a, b, 0),
    }
}

fn write_opt_f64_pair(a: &mut Fnv1a64, b: &mut Fnv1a64, v: Option<f64>) {
    match v {
        Some(x) => {
            write_u8_pair(a, b, 1);
            write_u64_pair(a, b, x.to_bits());
        }
        None => write_u8_pair(a, b, 0),
    }
}

fn write_u8_pair(a: &mut Fnv1a64, b: &mut Fnv1a64, v: u8) {
    a.write_u8(v);
    b.write_u8(v);
}

fn write_u64_pair(a: &mut Fnv1a64, b: &mut Fnv1a64, v: u64) {
    a.write_u64(v);
    b.write_u64(v);
}

fn write_str_pair(a: &mut Fnv1a64, b: &mut Fnv1a64, s: &str) {
    write_u64_pair(a, b, s.len() as u64);
    a.write_bytes(s.as_bytes());
    b.write_bytes(s.as_bytes());
}

#[derive(Clone, Copy)]
struct Fnv1a64(u64);

impl Fnv1a64 {
    fn new(seed: u64) -> Self {
        Self(seed)
    }

    fn write_u8(&mut self, v: u8) {
        self.write_bytes(&[v]);
    }

    fn write_u64(&mut self, v: u64) {
        self.write_bytes(&v.to_le_bytes());
    }

    fn write_bytes(&mut self, bytes: &[u8]) {
        let mut h = self.0;
        for &b in bytes {
            h ^= b as u64;
            h = h.wrapping_mul(0x100000001b3);
        }
        self.0 = h;
    }

    fn finish(self) -> u64 {
        self.0
    }
}
