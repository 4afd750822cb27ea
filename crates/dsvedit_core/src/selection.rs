//! Selection state: the area list and the current (area, sector, room) triple.

use dsvedit_records::AreaEntry;

/// Label of the non-selectable first entry shown before any area is chosen.
pub const AREA_PLACEHOLDER: &str = "Select Area";

/// Area dropdown contents.
///
/// Starts with a placeholder in slot 0. The first selection removes it for good.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AreaList {
    entries: Vec<AreaEntry>,
    placeholder: bool,
}

impl AreaList {
    pub fn with_placeholder(entries: Vec<AreaEntry>) -> Self {
        Self {
            entries,
            placeholder: true,
        }
    }

    pub fn has_placeholder(&self) -> bool {
        self.placeholder
    }

    /// Remove the placeholder. Returns whether it was still present.
    pub fn take_placeholder(&mut self) -> bool {
        std::mem::take(&mut self.placeholder)
    }

    pub fn entries(&self) -> &[AreaEntry] {
        &self.entries
    }

    /// Entry at a dropdown slot. The placeholder slot has no entry.
    pub fn entry(&self, slot: usize) -> Option<&AreaEntry> {
        let index = if self.placeholder {
            slot.checked_sub(1)?
        } else {
            slot
        };
        self.entries.get(index)
    }

    /// Dropdown labels, placeholder first when present.
    pub fn labels(&self) -> Vec<String> {
        self.placeholder
            .then(|| AREA_PLACEHOLDER.to_string())
            .into_iter()
            .chain(self.entries.iter().map(AreaEntry::label))
            .collect()
    }
}

/// The active (area, sector, room) indices. `None` until first selected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Selection {
    pub area_index: Option<usize>,
    pub sector_index: Option<usize>,
    pub room_index: Option<usize>,
}

/// How many times each level of the tree has been rebound.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RebuildCounters {
    pub areas: usize,
    pub sectors: usize,
    pub rooms: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list() -> AreaList {
        AreaList::with_placeholder(vec![AreaEntry::new(0, "Castle"), AreaEntry::new(1, "Garden")])
    }

    #[test]
    fn test_placeholder_occupies_slot_zero() {
        let list = list();
        assert_eq!(list.entry(0), None);
        assert_eq!(list.entry(1).map(|e| e.index), Some(0));
        assert_eq!(list.labels(), vec!["Select Area", "00 Castle", "01 Garden"]);
    }

    #[test]
    fn test_take_placeholder_once() {
        let mut list = list();
        assert!(list.take_placeholder());
        assert!(!list.take_placeholder());
        assert_eq!(list.entry(0).map(|e| e.index), Some(0));
        assert_eq!(list.labels(), vec!["00 Castle", "01 Garden"]);
    }
}
