//! Tagged slot+generation handle tables.
//!
//! Handles crossing the C boundary are plain `u64`s laid out as
//! `tag:8 | slot:24 | generation:32`. The tag names the table that minted
//! the handle, so an accessor handle passed where an array is expected is
//! reported as the wrong type rather than looked up in the wrong table.
//! The generation makes destroyed handles detectable: a freed slot bumps
//! its generation and old handles stop resolving.

/// Tag for handles minted by the array table.
pub(crate) const ARRAY_TAG: u8 = 0xA7;
/// Tag for handles minted by the accessor table.
pub(crate) const ACCESSOR_TAG: u8 = 0xAC;

const KNOWN_TAGS: [u8; 2] = [ARRAY_TAG, ACCESSOR_TAG];

const SLOT_BITS: u32 = 24;
const MAX_SLOTS: u32 = 1 << SLOT_BITS;

fn encode(tag: u8, slot: u32, generation: u32) -> u64 {
    ((tag as u64) << 56) | ((slot as u64) << 32) | generation as u64
}

fn decode(handle: u64) -> (u8, u32, u32) {
    let tag = (handle >> 56) as u8;
    let slot = ((handle >> 32) as u32) & (MAX_SLOTS - 1);
    (tag, slot, handle as u32)
}

/// Why a handle failed to resolve.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum LookupError {
    /// The handle belongs to a different table.
    OtherTable,
    /// Never issued, or already destroyed.
    Stale,
}

struct Entry<T> {
    generation: u32,
    value: Option<T>,
}

/// Maps tagged `u64` handles to owned values.
///
/// Freed slots are recycled through a free list. A slot whose generation
/// would wrap back to zero is retired for good instead, so a very old
/// handle can never alias a new value.
pub(crate) struct HandleTable<T> {
    tag: u8,
    entries: Vec<Entry<T>>,
    free: Vec<u32>,
}

impl<T> HandleTable<T> {
    /// Create an empty table minting handles with `tag`.
    pub const fn new(tag: u8) -> Self {
        Self {
            tag,
            entries: Vec::new(),
            free: Vec::new(),
        }
    }

    /// Store `value`, returning its handle, or `None` when all slots are
    /// in use.
    pub fn insert(&mut self, value: T) -> Option<u64> {
        if let Some(slot) = self.free.pop() {
            let entry = &mut self.entries[slot as usize];
            entry.value = Some(value);
            return Some(encode(self.tag, slot, entry.generation));
        }
        let slot = u32::try_from(self.entries.len()).ok()?;
        if slot >= MAX_SLOTS {
            return None;
        }
        self.entries.push(Entry {
            generation: 0,
            value: Some(value),
        });
        Some(encode(self.tag, slot, 0))
    }

    fn locate(&self, handle: u64) -> Result<usize, LookupError> {
        let (tag, slot, generation) = decode(handle);
        if tag != self.tag {
            return Err(if KNOWN_TAGS.contains(&tag) {
                LookupError::OtherTable
            } else {
                LookupError::Stale
            });
        }
        match self.entries.get(slot as usize) {
            Some(e) if e.generation == generation && e.value.is_some() => Ok(slot as usize),
            _ => Err(LookupError::Stale),
        }
    }

    /// Borrow the value behind `handle`.
    pub fn get(&self, handle: u64) -> Result<&T, LookupError> {
        let idx = self.locate(handle)?;
        self.entries[idx].value.as_ref().ok_or(LookupError::Stale)
    }

    /// Mutably borrow the value behind `handle`.
    pub fn get_mut(&mut self, handle: u64) -> Result<&mut T, LookupError> {
        let idx = self.locate(handle)?;
        self.entries[idx].value.as_mut().ok_or(LookupError::Stale)
    }

    /// Take the value out, invalidating `handle`. Double-remove is an error,
    /// not a crash.
    pub fn remove(&mut self, handle: u64) -> Result<T, LookupError> {
        let idx = self.locate(handle)?;
        let entry = &mut self.entries[idx];
        let value = entry.value.take().ok_or(LookupError::Stale)?;
        entry.generation = entry.generation.wrapping_add(1);
        if entry.generation != 0 {
            self.free.push(idx as u32);
        }
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_then_get() {
        let mut table = HandleTable::new(ARRAY_TAG);
        let h = table.insert("a").unwrap();
        assert_eq!(table.get(h), Ok(&"a"));
        assert_eq!(decode(h).0, ARRAY_TAG);
    }

    #[test]
    fn get_mut_updates_in_place() {
        let mut table = HandleTable::new(ARRAY_TAG);
        let h = table.insert(1u8).unwrap();
        *table.get_mut(h).unwrap() = 9;
        assert_eq!(table.get(h), Ok(&9));
    }

    #[test]
    fn removed_handle_goes_stale() {
        let mut table = HandleTable::new(ARRAY_TAG);
        let h = table.insert(5i64).unwrap();
        assert_eq!(table.remove(h), Ok(5));
        assert_eq!(table.get(h), Err(LookupError::Stale));
        assert_eq!(table.remove(h), Err(LookupError::Stale));
    }

    #[test]
    fn foreign_tag_is_other_table() {
        let mut arrays = HandleTable::new(ARRAY_TAG);
        let mut accessors = HandleTable::new(ACCESSOR_TAG);
        let _a = arrays.insert(()).unwrap();
        let acc = accessors.insert(()).unwrap();
        assert_eq!(arrays.get(acc), Err(LookupError::OtherTable));
    }

    #[test]
    fn unknown_tag_and_zero_are_stale() {
        let table: HandleTable<()> = HandleTable::new(ARRAY_TAG);
        assert_eq!(table.get(0), Err(LookupError::Stale));
        assert_eq!(table.get(encode(0x11, 0, 0)), Err(LookupError::Stale));
        assert_eq!(table.get(encode(ARRAY_TAG, 42, 0)), Err(LookupError::Stale));
    }

    #[test]
    fn recycled_slot_gets_new_generation() {
        let mut table = HandleTable::new(ACCESSOR_TAG);
        let h1 = table.insert(1).unwrap();
        table.remove(h1).unwrap();
        let h2 = table.insert(2).unwrap();
        let (_, s1, g1) = decode(h1);
        let (_, s2, g2) = decode(h2);
        assert_eq!(s1, s2);
        assert_eq!(g2, g1 + 1);
        assert_eq!(table.get(h1), Err(LookupError::Stale));
        assert_eq!(table.get(h2), Ok(&2));
    }

    #[test]
    fn wrapped_generation_retires_slot() {
        let mut table = HandleTable::new(ARRAY_TAG);
        let h = table.insert(0u8).unwrap();
        table.remove(h).unwrap();
        table.entries[0].generation = u32::MAX;
        let h_max = table.insert(1u8).unwrap();
        assert_eq!(decode(h_max).2, u32::MAX);

        table.remove(h_max).unwrap();
        assert_eq!(table.entries[0].generation, 0);
        assert!(!table.free.contains(&0));

        // The very first handle must not come back to life.
        assert_eq!(table.get(h), Err(LookupError::Stale));
        let fresh = table.insert(2u8).unwrap();
        assert_ne!(decode(fresh).1, 0);
    }
}
