use core::fmt;
use core::marker::PhantomData;

use serde::de::{Error as _, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::linked_sequence::LinkedSequence;

// Cap on preallocation from an untrusted length hint.
const MAX_PREALLOCATED: usize = 4096;

impl<T: Serialize> Serialize for LinkedSequence<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self)
    }
}

struct SequenceVisitor<T>(PhantomData<T>);

impl<'de, T: Deserialize<'de>> Visitor<'de> for SequenceVisitor<T> {
    type Value = LinkedSequence<T>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a sequence")
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut seq = LinkedSequence::new();
        let hint = access.size_hint().unwrap_or(0).min(MAX_PREALLOCATED);
        seq.try_reserve(hint).map_err(A::Error::custom)?;
        while let Some(value) = access.next_element()? {
            seq.push_back(value).map_err(A::Error::custom)?;
        }
        Ok(seq)
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for LinkedSequence<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_seq(SequenceVisitor(PhantomData))
    }
}
