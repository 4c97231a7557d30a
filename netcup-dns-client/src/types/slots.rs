//! Fixed-arity numbered slot groups.
//!
//! The schema models some collections as numbered sibling fields
//! (`nameserver1` .. `nameserver8`) instead of arrays. The numbering is part
//! of the wire contract, including gaps: the DNSSEC group has no slot 8 and
//! no slot 15.

use std::fmt;
use std::marker::PhantomData;

use serde::de::{self, DeserializeOwned, IgnoredAny, MapAccess, Unexpected, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

use crate::utils::wire;

/// Wire layout of a slot group: element prefix and the slot numbers in order.
pub trait SlotLayout<const N: usize> {
    const PREFIX: &'static str;
    const NUMBERS: [u8; N];
}

/// `nameserver1` .. `nameserver8`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NameserverSlots;

impl SlotLayout<8> for NameserverSlots {
    const PREFIX: &'static str = "nameserver";
    const NUMBERS: [u8; 8] = [1, 2, 3, 4, 5, 6, 7, 8];
}

/// `dnssecentry1` .. `dnssecentry20` without 8 and 15, as published by the
/// service. Possibly unintentional upstream, kept verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DnssecSlots;

impl SlotLayout<18> for DnssecSlots {
    const PREFIX: &'static str = "dnssecentry";
    const NUMBERS: [u8; 18] = [
        1, 2, 3, 4, 5, 6, 7, 9, 10, 11, 12, 13, 14, 16, 17, 18, 19, 20,
    ];
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SlotError {
    #[error("{prefix}{number} is not a slot of this group")]
    UnknownSlot { prefix: &'static str, number: u8 },

    #[error("all {capacity} {prefix} slots are occupied")]
    Full {
        prefix: &'static str,
        capacity: usize,
    },
}

/// A fixed-capacity, ordered set of numbered slots.
///
/// Slots are addressed by their *wire number*, not by index, so a gap in the
/// layout can never be written.
#[derive(Debug, Clone, PartialEq)]
pub struct SlotSet<T, L, const N: usize> {
    slots: [Option<T>; N],
    layout: PhantomData<L>,
}

impl<T, L: SlotLayout<N>, const N: usize> Default for SlotSet<T, L, N> {
    fn default() -> Self {
        Self {
            slots: std::array::from_fn(|_| None),
            layout: PhantomData,
        }
    }
}

impl<T, L: SlotLayout<N>, const N: usize> SlotSet<T, L, N> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fill slots in layout order.
    pub fn from_entries<I: IntoIterator<Item = T>>(entries: I) -> Result<Self, SlotError> {
        let mut set = Self::new();
        for entry in entries {
            set.push(entry)?;
        }
        Ok(set)
    }

    pub const fn capacity(&self) -> usize {
        N
    }

    /// Wire numbers of all slots, in order.
    pub fn slot_numbers() -> [u8; N] {
        L::NUMBERS
    }

    fn index_of(number: u8) -> Option<usize> {
        L::NUMBERS.iter().position(|&n| n == number)
    }

    fn unknown(number: u8) -> SlotError {
        SlotError::UnknownSlot {
            prefix: L::PREFIX,
            number,
        }
    }

    pub fn get(&self, number: u8) -> Option<&T> {
        Self::index_of(number).and_then(|i| self.slots[i].as_ref())
    }

    /// Store `value` in slot `number`, returning the previous occupant.
    pub fn set(&mut self, number: u8, value: T) -> Result<Option<T>, SlotError> {
        let i = Self::index_of(number).ok_or_else(|| Self::unknown(number))?;
        Ok(self.slots[i].replace(value))
    }

    pub fn take(&mut self, number: u8) -> Option<T> {
        Self::index_of(number).and_then(|i| self.slots[i].take())
    }

    /// Store `value` in the first free slot and return that slot's number.
    pub fn push(&mut self, value: T) -> Result<u8, SlotError> {
        let i = self
            .slots
            .iter()
            .position(Option::is_none)
            .ok_or(SlotError::Full {
                prefix: L::PREFIX,
                capacity: N,
            })?;
        self.slots[i] = Some(value);
        Ok(L::NUMBERS[i])
    }

    /// Occupied slots as `(number, value)` in layout order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, &T)> + '_ {
        L::NUMBERS
            .into_iter()
            .zip(self.slots.iter())
            .filter_map(|(number, slot)| slot.as_ref().map(|value| (number, value)))
    }

    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }
}

impl<T: Serialize, L: SlotLayout<N>, const N: usize> Serialize for SlotSet<T, L, N> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (number, value) in self.iter() {
            map.serialize_entry(&format!("{}{number}", L::PREFIX), value)?;
        }
        map.end()
    }
}

struct SlotValue<T>(Option<T>);

impl<'de, T: DeserializeOwned> Deserialize<'de> for SlotValue<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        wire::empty_as_none(deserializer).map(SlotValue)
    }
}

struct SlotVisitor<T, L, const N: usize>(PhantomData<(T, L, [(); N])>);

impl<'de, T: DeserializeOwned, L: SlotLayout<N>, const N: usize> Visitor<'de>
    for SlotVisitor<T, L, N>
{
    type Value = SlotSet<T, L, N>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "a map of {} slots", L::PREFIX)
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        let mut set = SlotSet::<T, L, N>::new();
        while let Some(key) = map.next_key::<String>()? {
            let index = key
                .strip_prefix(L::PREFIX)
                .and_then(|n| n.parse::<u8>().ok())
                .and_then(SlotSet::<T, L, N>::index_of);
            match index {
                Some(i) => set.slots[i] = map.next_value::<SlotValue<T>>()?.0,
                None => {
                    map.next_value::<IgnoredAny>()?;
                }
            }
        }
        Ok(set)
    }

    // 空元素解码为 ""
    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        if v.trim().is_empty() {
            Ok(SlotSet::new())
        } else {
            Err(E::invalid_type(Unexpected::Str(v), &self))
        }
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(SlotSet::new())
    }
}

impl<'de, T: DeserializeOwned, L: SlotLayout<N>, const N: usize> Deserialize<'de>
    for SlotSet<T, L, N>
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(SlotVisitor::<T, L, N>(PhantomData))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    type Dnssec = SlotSet<String, DnssecSlots, 18>;
    type Nameservers = SlotSet<String, NameserverSlots, 8>;

    #[test]
    fn dnssec_layout_has_gaps() {
        let numbers = Dnssec::slot_numbers();
        assert_eq!(numbers.len(), 18);
        assert!(!numbers.contains(&8));
        assert!(!numbers.contains(&15));
        assert_eq!(numbers.first(), Some(&1));
        assert_eq!(numbers.last(), Some(&20));
    }

    #[test]
    fn gap_slots_cannot_be_written() {
        let mut set = Dnssec::new();
        assert_eq!(
            set.set(8, "x".into()),
            Err(SlotError::UnknownSlot {
                prefix: "dnssecentry",
                number: 8
            })
        );
        assert!(set.set(15, "x".into()).is_err());
        assert!(set.set(16, "x".into()).is_ok());
        assert_eq!(set.get(16).map(String::as_str), Some("x"));
    }

    #[test]
    fn push_skips_gaps() {
        let mut set = Dnssec::new();
        let numbers: Vec<u8> = (0..9).map(|i| set.push(format!("k{i}")).unwrap()).collect();
        assert_eq!(numbers, vec![1, 2, 3, 4, 5, 6, 7, 9, 10]);
    }

    #[test]
    fn push_until_full() {
        let mut set = Nameservers::from_entries((1..=8).map(|i| format!("ns{i}"))).unwrap();
        assert_eq!(set.len(), 8);
        assert_eq!(
            set.push("ns9".into()),
            Err(SlotError::Full {
                prefix: "nameserver",
                capacity: 8
            })
        );
    }

    #[test]
    fn set_returns_previous_and_take_clears() {
        let mut set = Nameservers::new();
        assert_eq!(set.set(2, "a".into()), Ok(None));
        assert_eq!(set.set(2, "b".into()), Ok(Some("a".into())));
        assert_eq!(set.take(2), Some("b".into()));
        assert!(set.is_empty());
        assert_eq!(set.capacity(), 8);
    }

    #[test]
    fn serializes_occupied_slots_by_wire_name() {
        let mut set = Dnssec::new();
        set.set(7, "seven".into()).unwrap();
        set.set(9, "nine".into()).unwrap();
        let value = serde_json::to_value(&set).unwrap();
        assert_eq!(
            value,
            json!({"dnssecentry7": "seven", "dnssecentry9": "nine"})
        );
    }

    #[test]
    fn deserializes_ignoring_unknown_and_empty_slots() {
        let set: Dnssec = serde_json::from_value(json!({
            "dnssecentry1": "one",
            "dnssecentry8": "gap",
            "dnssecentry2": "",
            "dnssecentry20": "twenty",
            "unrelated": 5
        }))
        .unwrap();
        let entries: Vec<(u8, &str)> = set.iter().map(|(n, v)| (n, v.as_str())).collect();
        assert_eq!(entries, vec![(1, "one"), (20, "twenty")]);
    }

    #[test]
    fn deserializes_empty_element() {
        let set: Nameservers = serde_json::from_value(json!("")).unwrap();
        assert!(set.is_empty());
        let set: Nameservers = serde_json::from_value(json!(null)).unwrap();
        assert!(set.is_empty());
    }
}
