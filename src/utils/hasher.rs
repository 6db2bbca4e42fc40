//! xxh3-backed `BuildHasher` for the digest sets used by the unicity and
//! membership rules.

use std::hash::{BuildHasher, Hasher};

use xxhash_rust::xxh3::{Xxh3, xxh3_64};

#[derive(Default, Clone)]
pub struct Xxh3Hasher(Xxh3);

impl Hasher for Xxh3Hasher {
    #[inline]
    fn finish(&self) -> u64 {
        self.0.finish()
    }

    #[inline]
    fn write(&mut self, bytes: &[u8]) {
        self.0.write(bytes);
    }
}

#[derive(Clone, Copy, Default)]
pub struct Xxh3Builder;

impl BuildHasher for Xxh3Builder {
    type Hasher = Xxh3Hasher;

    #[inline]
    fn build_hasher(&self) -> Self::Hasher {
        Xxh3Hasher(Xxh3::new())
    }
}

/// Digest a value's byte representation for set storage.
#[inline]
pub fn digest(bytes: &[u8]) -> u64 {
    xxh3_64(bytes)
}
