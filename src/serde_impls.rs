//! `serde` support (feature `serde`): a [`FingerTree`] serializes as a plain sequence and
//! deserializes the same way.
//!
//! No [`Measurer`] instance travels over the wire, so deserialization requires `Mr: Default`.

use std::fmt;
use std::marker::PhantomData;

use serde::{de, Serialize};

use crate::measure::Measurer;
use crate::tree::FingerTree;

impl<Mr> Serialize for FingerTree<Mr>
where
    Mr: Measurer,
    Mr::Item: Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeSeq;

        let sequence = self.to_sequence();
        let mut seq_ser = serializer.serialize_seq(Some(sequence.len()))?;
        for item in &sequence {
            seq_ser.serialize_element(item.as_ref())?;
        }
        seq_ser.end()
    }
}

impl<'de, Mr> de::Deserialize<'de> for FingerTree<Mr>
where
    Mr: Measurer + Default,
    Mr::Item: de::Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_seq(Visitor(PhantomData))
    }
}

struct Visitor<Mr>(PhantomData<Mr>);

impl<'de, Mr> de::Visitor<'de> for Visitor<Mr>
where
    Mr: Measurer + Default,
    Mr::Item: de::Deserialize<'de>,
{
    type Value = FingerTree<Mr>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a sequence of values")
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: de::SeqAccess<'de>,
    {
        let mut tree = FingerTree::empty(Mr::default());
        while let Some(item) = seq.next_element::<Mr::Item>()? {
            tree = tree.push_last(item);
        }
        Ok(tree)
    }
}
