use anyhow::{anyhow, bail};
use grubdash_http::AppError;
use std::sync::{Arc, RwLock};

use super::{Collection, Record};

/// `Vec`-backed collection guarded by one lock per collection.
#[derive(Clone)]
pub struct InMemoryCollection<T> {
    records: Arc<RwLock<Vec<T>>>,
}

impl<T: Record> InMemoryCollection<T> {
    pub fn new() -> Self {
        Self::with_records(Vec::new())
    }

    /// Start from existing records, e.g. seed data
    pub fn with_records(records: Vec<T>) -> Self {
        Self {
            records: Arc::new(RwLock::new(records)),
        }
    }
}

impl<T: Record> Default for InMemoryCollection<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Record> Collection<T> for InMemoryCollection<T> {
    fn list(&self) -> anyhow::Result<Vec<T>> {
        let records = self
            .records
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(records.clone())
    }

    fn find(&self, id: &str) -> anyhow::Result<Option<T>> {
        let records = self
            .records
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(records.iter().find(|record| record.id() == id).cloned())
    }

    fn append(&self, record: T) -> anyhow::Result<T> {
        let mut records = self
            .records
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        if records.iter().any(|existing| existing.id() == record.id()) {
            bail!("duplicate record id {}", record.id());
        }
        records.push(record.clone());

        Ok(record)
    }

    fn replace(&self, record: T) -> anyhow::Result<Option<T>> {
        let mut records = self
            .records
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        Ok(records
            .iter_mut()
            .find(|existing| existing.id() == record.id())
            .map(|slot| std::mem::replace(slot, record)))
    }

    fn remove(&self, id: &str) -> anyhow::Result<Option<T>> {
        let mut records = self
            .records
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        Ok(records
            .iter()
            .position(|record| record.id() == id)
            .map(|index| records.remove(index)))
    }

    fn update_with(
        &self,
        id: &str,
        apply: &mut dyn FnMut(&T) -> Result<T, AppError>,
    ) -> Result<Option<T>, AppError> {
        let mut records = self
            .records
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        let Some(slot) = records.iter_mut().find(|record| record.id() == id) else {
            return Ok(None);
        };
        let updated = apply(slot)?;
        *slot = updated.clone();

        Ok(Some(updated))
    }

    fn remove_if(
        &self,
        id: &str,
        guard: &mut dyn FnMut(&T) -> Result<(), AppError>,
    ) -> Result<Option<T>, AppError> {
        let mut records = self
            .records
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        let Some(index) = records.iter().position(|record| record.id() == id) else {
            return Ok(None);
        };
        guard(&records[index])?;

        Ok(Some(records.remove(index)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[derive(Debug, Clone, PartialEq)]
    struct Note {
        id: String,
        body: &'static str,
    }

    impl Record for Note {
        fn id(&self) -> &str {
            &self.id
        }
    }

    fn note(id: &str, body: &'static str) -> Note {
        Note {
            id: id.to_string(),
            body,
        }
    }

    #[test]
    fn append_keeps_insertion_order() {
        let notes = InMemoryCollection::new();
        notes.append(note("b", "second")).unwrap();
        notes.append(note("a", "first")).unwrap();

        let ids: Vec<_> = notes.list().unwrap().into_iter().map(|n| n.id).collect();
        assert_eq!(ids, vec!["b", "a"]);
    }

    #[test]
    fn append_rejects_duplicate_ids() {
        let notes = InMemoryCollection::with_records(vec![note("a", "first")]);
        let err = notes.append(note("a", "again")).unwrap_err();
        assert_eq!(err.to_string(), "duplicate record id a");
        assert_eq!(notes.list().unwrap().len(), 1);
    }

    #[test]
    fn replace_overwrites_in_place() {
        let notes = InMemoryCollection::with_records(vec![note("a", "one"), note("b", "two")]);

        let previous = notes.replace(note("a", "uno")).unwrap();
        assert_eq!(previous, Some(note("a", "one")));
        assert_eq!(notes.list().unwrap()[0], note("a", "uno"));

        assert_eq!(notes.replace(note("z", "missing")).unwrap(), None);
        assert_eq!(notes.list().unwrap().len(), 2);
    }

    #[test]
    fn remove_drops_only_the_match() {
        let notes = InMemoryCollection::with_records(vec![note("a", "one"), note("b", "two")]);

        assert_eq!(notes.remove("a").unwrap(), Some(note("a", "one")));
        assert_eq!(notes.remove("a").unwrap(), None);
        assert_eq!(notes.find("a").unwrap(), None);
        assert_eq!(notes.find("b").unwrap(), Some(note("b", "two")));
    }

    #[test]
    fn update_with_rejection_leaves_record() {
        let notes = InMemoryCollection::with_records(vec![note("a", "one")]);

        let err = notes
            .update_with("a", &mut |_| Err(AppError::bad_request("frozen")))
            .unwrap_err();
        assert_eq!(err.message(), "frozen");
        assert_eq!(notes.find("a").unwrap(), Some(note("a", "one")));

        let updated = notes
            .update_with("a", &mut |current| Ok(note(&current.id, "uno")))
            .unwrap();
        assert_eq!(updated, Some(note("a", "uno")));
        assert_eq!(notes.list().unwrap(), vec![note("a", "uno")]);

        let mut called = false;
        let missing = notes
            .update_with("z", &mut |current| {
                called = true;
                Ok(current.clone())
            })
            .unwrap();
        assert_eq!(missing, None);
        assert!(!called);
    }

    #[test]
    fn remove_if_honors_guard() {
        let notes = InMemoryCollection::with_records(vec![note("a", "keep"), note("b", "drop")]);
        let mut only_drop = |current: &Note| {
            if current.body == "drop" {
                Ok(())
            } else {
                Err(AppError::bad_request("kept"))
            }
        };

        assert_eq!(notes.remove_if("a", &mut only_drop).unwrap_err().message(), "kept");
        assert_eq!(notes.remove_if("b", &mut only_drop).unwrap(), Some(note("b", "drop")));
        assert_eq!(notes.remove_if("b", &mut only_drop).unwrap(), None);
        assert_eq!(notes.list().unwrap(), vec![note("a", "keep")]);
    }

    #[derive(Debug, Clone, PartialEq)]
    struct Tally {
        id: String,
        count: u32,
    }

    impl Record for Tally {
        fn id(&self) -> &str {
            &self.id
        }
    }

    #[test]
    fn update_with_is_atomic_across_threads() {
        let tallies = InMemoryCollection::with_records(vec![Tally {
            id: "t".to_string(),
            count: 0,
        }]);

        let workers: Vec<_> = (0..8)
            .map(|_| {
                let tallies = tallies.clone();
                thread::spawn(move || {
                    for _ in 0..100 {
                        tallies
                            .update_with("t", &mut |current| {
                                let seen = current.count;
                                thread::yield_now();
                                Ok(Tally {
                                    id: current.id.clone(),
                                    count: seen + 1,
                                })
                            })
                            .unwrap();
                    }
                })
            })
            .collect();
        for worker in workers {
            worker.join().unwrap();
        }

        assert_eq!(tallies.find("t").unwrap().unwrap().count, 800);
    }
}
