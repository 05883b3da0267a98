//! The chart aggregate: a BPM map plus per-key columns of placed objects.

pub mod obj;

pub use obj::{ChartObject, KeyCount, KeyIndex, PlaceOptions};

use crate::timeline::{Beat, BpmMap, Time};
use crate::{ChartError, Result};

/// A chart under edit.
///
/// Owns the BPM map and one ordered-by-beat object column per key. Each
/// (column, beat) slot holds at most one object; placing into an occupied
/// slot either removes the occupant or leaves the chart untouched, decided by
/// [`PlaceOptions`]. Object times are never cached on the objects; they are
/// recomputed from the BPM map on demand, so tempo edits cannot leave stale
/// times behind.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Chart {
    bpm_map: BpmMap,
    key_count: KeyCount,
    columns: Vec<Vec<ChartObject>>,
}

impl Default for Chart {
    fn default() -> Self {
        Self::new(BpmMap::default(), KeyCount::default())
    }
}

impl Chart {
    /// Create an empty chart with the given BPM map and key count.
    #[must_use]
    pub fn new(bpm_map: BpmMap, key_count: KeyCount) -> Self {
        Self {
            bpm_map,
            columns: vec![Vec::new(); key_count.value()],
            key_count,
        }
    }

    /// The BPM map owned by this chart.
    #[must_use]
    pub const fn bpm_map(&self) -> &BpmMap {
        &self.bpm_map
    }

    /// Mutable access to the BPM map, for tempo edits.
    pub const fn bpm_map_mut(&mut self) -> &mut BpmMap {
        &mut self.bpm_map
    }

    /// The number of key columns.
    #[must_use]
    pub const fn key_count(&self) -> KeyCount {
        self.key_count
    }

    /// The objects of one key column, ascending by beat.
    ///
    /// # Errors
    ///
    /// Returns [`ChartError::OutOfRange`] when `key` is not below the key
    /// count.
    pub fn column(&self, key: KeyIndex) -> Result<&[ChartObject]> {
        self.columns
            .get(key.value())
            .map(Vec::as_slice)
            .ok_or(ChartError::OutOfRange {
                index: key.value(),
                len: self.key_count.value(),
            })
    }

    /// Place `obj` into its key column, reporting whether the chart changed.
    ///
    /// If an object already occupies the beat in that column, the occupant is
    /// removed when `opts.remove_if_exists` is set (the editor's toggle
    /// placement) and nothing happens otherwise. Collision is decided by beat
    /// equality alone, regardless of the object types involved; hold duration
    /// overlap does not block placement.
    ///
    /// The returned flag is the caller's redraw/undo signal: `true` when the
    /// chart was mutated.
    ///
    /// # Errors
    ///
    /// Returns [`ChartError::OutOfRange`] when the object's key is not below
    /// the key count.
    pub fn place_object(&mut self, obj: ChartObject, opts: PlaceOptions) -> Result<bool> {
        let key = obj.key();
        let len = self.key_count.value();
        let column = self
            .columns
            .get_mut(key.value())
            .ok_or(ChartError::OutOfRange {
                index: key.value(),
                len,
            })?;
        match column.binary_search_by(|existing| existing.beat().cmp(&obj.beat())) {
            Ok(occupied) => {
                if opts.remove_if_exists {
                    column.remove(occupied);
                    Ok(true)
                } else {
                    Ok(false)
                }
            }
            Err(slot) => {
                column.insert(slot, obj);
                Ok(true)
            }
        }
    }

    /// The object occupying `(key, beat)`, if any.
    ///
    /// # Errors
    ///
    /// Returns [`ChartError::OutOfRange`] when `key` is not below the key
    /// count.
    pub fn object_at(&self, key: KeyIndex, beat: Beat) -> Result<Option<&ChartObject>> {
        let column = self.column(key)?;
        Ok(column
            .binary_search_by(|existing| existing.beat().cmp(&beat))
            .ok()
            .and_then(|index| column.get(index)))
    }

    /// Remove the object at `(key, beat)`, reporting whether one was there.
    ///
    /// # Errors
    ///
    /// Returns [`ChartError::OutOfRange`] when `key` is not below the key
    /// count.
    pub fn remove_object(&mut self, key: KeyIndex, beat: Beat) -> Result<bool> {
        let len = self.key_count.value();
        let column = self
            .columns
            .get_mut(key.value())
            .ok_or(ChartError::OutOfRange {
                index: key.value(),
                len,
            })?;
        match column.binary_search_by(|existing| existing.beat().cmp(&beat)) {
            Ok(occupied) => {
                column.remove(occupied);
                Ok(true)
            }
            Err(_) => Ok(false),
        }
    }

    /// The objects of one column whose times fall inside `[start, end]`, both
    /// bounds inclusive.
    ///
    /// Each object's beat is converted through the BPM map on the fly; the
    /// scan is linear over the column, which stays cheap at the hundreds to
    /// low thousands of objects charts reach in practice.
    ///
    /// # Errors
    ///
    /// Returns [`ChartError::OutOfRange`] when `key` is not below the key
    /// count, and [`ChartError::InvalidArgument`] when `start >= end`.
    pub fn objects_in_interval(
        &self,
        key: KeyIndex,
        start: Time,
        end: Time,
    ) -> Result<Vec<&ChartObject>> {
        let column = self.column(key)?;
        if start >= end {
            return Err(ChartError::InvalidArgument(format!(
                "interval start {start} must come before end {end}"
            )));
        }
        Ok(column
            .iter()
            .filter(|obj| {
                let time = self.bpm_map.time_at(obj.beat());
                start <= time && time <= end
            })
            .collect())
    }
}
