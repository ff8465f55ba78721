//! Submitted records and their in-memory store

use super::forms::FieldValues;
use chrono::{DateTime, Utc};
use std::fmt;
use uuid::Uuid;

/// Stable identifier for a submitted record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RecordId(Uuid);

impl RecordId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RecordId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One completed, submitted set of field values tied to a form type
#[derive(Debug, Clone, PartialEq)]
pub struct SubmittedRecord {
    pub id: RecordId,
    pub form_type: String,
    pub data: FieldValues,
    pub submitted_at: DateTime<Utc>,
}

impl SubmittedRecord {
    pub fn new(form_type: impl Into<String>, data: FieldValues) -> Self {
        Self {
            id: RecordId::new(),
            form_type: form_type.into(),
            data,
            submitted_at: Utc::now(),
        }
    }
}

/// Ordered collection of submitted records.
///
/// Records keep insertion order. Replacing keeps a record's position and id;
/// removing shifts later records down by one.
#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    records: Vec<SubmittedRecord>,
}

impl RecordStore {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SubmittedRecord> {
        self.records.iter()
    }

    /// Record at an insertion-order position
    pub fn at(&self, index: usize) -> Option<&SubmittedRecord> {
        self.records.get(index)
    }

    pub fn get(&self, id: RecordId) -> Option<&SubmittedRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    pub fn position(&self, id: RecordId) -> Option<usize> {
        self.records.iter().position(|r| r.id == id)
    }

    pub fn push(&mut self, record: SubmittedRecord) -> RecordId {
        let id = record.id;
        self.records.push(record);
        id
    }

    /// Replace the record with `id` in place. The stored id is preserved.
    pub fn replace(&mut self, id: RecordId, form_type: String, data: FieldValues) -> bool {
        match self.records.iter_mut().find(|r| r.id == id) {
            Some(record) => {
                record.form_type = form_type;
                record.data = data;
                record.submitted_at = Utc::now();
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, id: RecordId) -> Option<SubmittedRecord> {
        let index = self.position(id)?;
        Some(self.records.remove(index))
    }

    /// Records of one form type, in global insertion order
    pub fn filtered<'a>(
        &'a self,
        form_type: &'a str,
    ) -> impl Iterator<Item = &'a SubmittedRecord> {
        self.records
            .iter()
            .filter(move |r| r.form_type == form_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn values(pairs: &[(&str, &str)]) -> FieldValues {
        let mut v = FieldValues::default();
        for (k, val) in pairs {
            v.set(k, *val);
        }
        v
    }

    fn store_with(types: &[&str]) -> (RecordStore, Vec<RecordId>) {
        let mut store = RecordStore::default();
        let ids = types
            .iter()
            .enumerate()
            .map(|(i, t)| {
                let data = values(&[("n", i.to_string().as_str())]);
                store.push(SubmittedRecord::new(*t, data))
            })
            .collect();
        (store, ids)
    }

    #[test]
    fn test_push_preserves_order() {
        let (store, ids) = store_with(&["a", "b", "a"]);
        assert_eq!(store.len(), 3);
        assert_eq!(store.at(0).unwrap().id, ids[0]);
        assert_eq!(store.at(2).unwrap().id, ids[2]);
    }

    #[test]
    fn test_filtered_is_stable() {
        let (store, ids) = store_with(&["a", "b", "a", "b", "a"]);
        let a: Vec<_> = store.filtered("a").map(|r| r.id).collect();
        assert_eq!(a, vec![ids[0], ids[2], ids[4]]);
        assert_eq!(store.filtered("c").count(), 0);
    }

    #[test]
    fn test_remove_shifts_later_records() {
        let (mut store, ids) = store_with(&["a", "a", "a", "a"]);
        let removed = store.remove(ids[1]).unwrap();
        assert_eq!(removed.id, ids[1]);
        assert_eq!(store.len(), 3);
        let order: Vec<_> = store.iter().map(|r| r.id).collect();
        assert_eq!(order, vec![ids[0], ids[2], ids[3]]);
        assert_eq!(store.position(ids[3]), Some(2));
    }

    #[test]
    fn test_remove_unknown_is_none() {
        let (mut store, _) = store_with(&["a"]);
        assert!(store.remove(RecordId::new()).is_none());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_replace_keeps_position_and_id() {
        let (mut store, ids) = store_with(&["a", "a", "a"]);
        let replaced = store.replace(ids[1], "a".to_string(), values(&[("n", "edited")]));
        assert!(replaced);
        assert_eq!(store.len(), 3);
        let record = store.at(1).unwrap();
        assert_eq!(record.id, ids[1]);
        assert_eq!(record.data.get("n"), Some("edited"));
    }

    #[test]
    fn test_replace_unknown_returns_false() {
        let (mut store, _) = store_with(&["a"]);
        assert!(!store.replace(RecordId::new(), "a".to_string(), FieldValues::default()));
    }

    #[test]
    fn test_record_ids_are_unique() {
        assert_ne!(RecordId::new(), RecordId::new());
    }
}
