use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

use super::aggregate::GroupAggregate;
use super::model::{AgeGroup, Record};

// ---------------------------------------------------------------------------
// Identity keys
// ---------------------------------------------------------------------------

/// Something that can be matched to a persistent visual mark.
pub trait Keyed {
    type Key: Clone + Debug + Eq + Hash;

    fn key(&self) -> Self::Key;
}

/// Heart-grid cell identity: one mark per (age group, marital status).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellKey {
    pub age_group: AgeGroup,
    pub marital_status: String,
}

impl Keyed for Record {
    type Key = CellKey;

    fn key(&self) -> CellKey {
        CellKey {
            age_group: self.age_group,
            marital_status: self.marital_status.clone(),
        }
    }
}

impl Keyed for GroupAggregate {
    type Key = String;

    fn key(&self) -> String {
        self.group_key.clone()
    }
}

// ---------------------------------------------------------------------------
// ViewDiff / KeyedView
// ---------------------------------------------------------------------------

/// Instructions for the renderer after a recompute.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewDiff<T: Keyed> {
    /// Marks to create.
    pub enter: Vec<T>,
    /// Marks that already exist and take the new datum.
    pub update: Vec<T>,
    /// Marks to remove.
    pub exit: Vec<T::Key>,
}

impl<T: Keyed> ViewDiff<T> {
    pub fn is_empty(&self) -> bool {
        self.enter.is_empty() && self.update.is_empty() && self.exit.is_empty()
    }
}

/// The set of marks currently bound to data, in order of first appearance.
#[derive(Debug, Clone)]
pub struct KeyedView<T: Keyed> {
    marks: Vec<T>,
    index: HashMap<T::Key, usize>,
}

impl<T: Keyed> Default for KeyedView<T> {
    fn default() -> Self {
        Self {
            marks: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<T: Keyed + Clone> KeyedView<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Currently bound marks.
    pub fn marks(&self) -> &[T] {
        &self.marks
    }

    pub fn get(&self, key: &T::Key) -> Option<&T> {
        self.index.get(key).map(|&i| &self.marks[i])
    }

    pub fn len(&self) -> usize {
        self.marks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.marks.is_empty()
    }

    /// Bind `next` to the marks, returning what changed.
    ///
    /// Items sharing a key collapse into one mark holding the last datum,
    /// positioned where the key first appeared.
    pub fn reconcile(&mut self, next: impl IntoIterator<Item = T>) -> ViewDiff<T> {
        let mut marks: Vec<T> = Vec::new();
        let mut index: HashMap<T::Key, usize> = HashMap::new();
        for item in next {
            let key = item.key();
            match index.get(&key) {
                Some(&slot) => marks[slot] = item,
                None => {
                    index.insert(key, marks.len());
                    marks.push(item);
                }
            }
        }

        let mut diff = ViewDiff {
            enter: Vec::new(),
            update: Vec::new(),
            exit: Vec::new(),
        };
        for mark in &marks {
            if self.index.contains_key(&mark.key()) {
                diff.update.push(mark.clone());
            } else {
                diff.enter.push(mark.clone());
            }
        }
        diff.exit = self
            .marks
            .iter()
            .map(|m| m.key())
            .filter(|key| !index.contains_key(key))
            .collect();

        log::debug!(
            "reconcile: {} enter, {} update, {} exit",
            diff.enter.len(),
            diff.update.len(),
            diff.exit.len()
        );

        self.marks = marks;
        self.index = index;
        diff
    }
}
