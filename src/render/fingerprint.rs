use crate::foundation::value::{Snapshot, Value, canonical_f64_bits};
use xxhash_rust::xxh3::Xxh3;

const XXH3_SEED: u64 = 0x8b5ad4a0c7d8e9f1;

/// Stable 128-bit fingerprint of a state snapshot.
///
/// Keys are visited in sorted order and nested tuples/maps are length-prefixed, so two
/// snapshots that compare equal always produce the same fingerprint.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct StateFingerprint {
    pub hi: u64,
    pub lo: u64,
}

/// Fingerprint a snapshot via its canonical recursive encoding.
pub fn fingerprint_snapshot(snapshot: &Snapshot) -> StateFingerprint {
    let mut h = StableHasher::new();
    h.write_u64(snapshot.len() as u64);
    for (k, v) in snapshot.iter() {
        h.write_str(k);
        write_value(&mut h, v);
    }
    h.finish()
}

fn write_value(h: &mut StableHasher, v: &Value) {
    match v {
        Value::Int(i) => {
            h.write_u8(0);
            h.write_u64(*i as u64);
        }
        Value::Float(f) => {
            h.write_u8(1);
            h.write_u64(canonical_f64_bits(*f));
        }
        Value::Bool(b) => {
            h.write_u8(2);
            h.write_bool(*b);
        }
        Value::Str(s) => {
            h.write_u8(3);
            h.write_str(s);
        }
        Value::Tuple(items) => {
            h.write_u8(4);
            h.write_u64(items.len() as u64);
            for item in items {
                write_value(h, item);
            }
        }
        Value::Map(map) => {
            h.write_u8(5);
            h.write_u64(map.len() as u64);
            for (k, item) in map {
                h.write_str(k);
                write_value(h, item);
            }
        }
    }
}

struct StableHasher {
    inner: Xxh3,
}

impl StableHasher {
    fn new() -> Self {
        Self {
            inner: Xxh3::with_seed(XXH3_SEED),
        }
    }

    fn write_bytes(&mut self, b: &[u8]) {
        self.inner.update(b);
    }

    fn write_u8(&mut self, v: u8) {
        self.write_bytes(&[v]);
    }

    fn write_bool(&mut self, v: bool) {
        self.write_u8(u8::from(v));
    }

    fn write_u64(&mut self, v: u64) {
        self.write_bytes(&v.to_le_bytes());
    }

    fn write_str(&mut self, s: &str) {
        self.write_u64(s.len() as u64);
        self.write_bytes(s.as_bytes());
    }

    fn finish(self) -> StateFingerprint {
        let v = self.inner.digest128();
        StateFingerprint {
            hi: (v >> 64) as u64,
            lo: v as u64,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/fingerprint.rs"]
mod tests;
