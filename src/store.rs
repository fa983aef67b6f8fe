use thiserror::Error;

use crate::models::{Record, RecordPatch};

#[derive(Error, Debug, PartialEq, Eq)]
pub enum StoreError {
    #[error("Record {0} not found")]
    NotFound(i64),
}

#[derive(Debug, PartialEq, Eq)]
pub enum Merge {
    Merged,
    Unchanged,
}

/// Ordered, in-memory sequence of records. A record is addressed by its
/// current position, so removing one shifts every later record down by one.
#[derive(Debug, Default)]
pub struct RecordStore {
    records: Vec<Record>,
}

impl RecordStore {
    pub fn seeded() -> Self {
        RecordStore {
            records: vec![
                Record::new("Sam Larry", 20, "AI Developer"),
                Record::new("Bahubali", 21, "Backend Developer"),
                Record::new("John Doe", 22, "Frontend Developer"),
            ],
        }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn append(&mut self, record: Record) -> usize {
        let index = self.records.len();
        self.records.push(record);

        index
    }

    pub fn replace(&mut self, index: i64, record: Record) -> Result<(), StoreError> {
        let position = self.position(index)?;
        self.records[position] = record;
        Ok(())
    }

    /// Bounds are checked first, so an empty patch against a missing
    /// index is still `NotFound`.
    pub fn merge(&mut self, index: i64, patch: RecordPatch) -> Result<Merge, StoreError> {
        let position = self.position(index)?;
        if patch.is_empty() {
            return Ok(Merge::Unchanged);
        }
        self.records[position].apply(patch);
        Ok(Merge::Merged)
    }

    pub fn remove(&mut self, index: i64) -> Result<Record, StoreError> {
        let position = self.position(index)?;
        Ok(self.records.remove(position))
    }

    // negative indices are out of range, never counted from the end
    fn position(&self, index: i64) -> Result<usize, StoreError> {
        usize::try_from(index)
            .ok()
            .filter(|&position| position < self.records.len())
            .ok_or(StoreError::NotFound(index))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn ada() -> Record {
        Record::new("Ada", 30, "QA")
    }

    #[test]
    fn store_test_append() {
        let mut store = RecordStore::seeded();
        let before = store.len();

        let index = store.append(ada());

        assert_eq!(index, before);
        assert_eq!(store.len(), before + 1);
        assert_eq!(store.records().last(), Some(&ada()));
        assert_eq!(store.records()[0].name, "Sam Larry");
    }

    #[test]
    fn store_test_duplicates_allowed() {
        let mut store = RecordStore::default();
        store.append(ada());
        store.append(ada());
        assert_eq!(store.records(), &[ada(), ada()]);
    }

    #[test]
    fn store_test_replace_discards_old_fields() {
        let mut store = RecordStore::seeded();
        store.replace(2, ada()).unwrap();
        assert_eq!(store.records()[2], ada());
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn store_test_merge_only_supplied_fields() {
        let mut store = RecordStore::seeded();
        let patch = RecordPatch {
            age: Some(99),
            ..Default::default()
        };

        assert_eq!(store.merge(1, patch), Ok(Merge::Merged));
        assert_eq!(store.records()[1], Record::new("Bahubali", 99, "Backend Developer"));
    }

    #[test]
    fn store_test_empty_merge_is_a_no_op() {
        let mut store = RecordStore::seeded();
        let before = store.records().to_vec();

        assert_eq!(store.merge(0, RecordPatch::default()), Ok(Merge::Unchanged));
        assert_eq!(store.records(), before.as_slice());
    }

    #[test]
    fn store_test_remove_shifts_later_records() {
        let mut store = RecordStore::seeded();

        let removed = store.remove(0).unwrap();

        assert_eq!(removed, Record::new("Sam Larry", 20, "AI Developer"));
        assert_eq!(store.len(), 2);
        assert_eq!(store.records()[0].name, "Bahubali");
        assert_eq!(store.records()[1].name, "John Doe");
    }

    #[test]
    fn store_test_out_of_range() {
        let mut store = RecordStore::seeded();
        let before = store.records().to_vec();

        for index in [3, 42, -1, i64::MIN] {
            assert_eq!(store.replace(index, ada()), Err(StoreError::NotFound(index)));
            assert_eq!(
                store.merge(index, RecordPatch::default()),
                Err(StoreError::NotFound(index))
            );
            assert_eq!(store.remove(index), Err(StoreError::NotFound(index)));
        }
        assert_eq!(store.records(), before.as_slice());
    }
}
