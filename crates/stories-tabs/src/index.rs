//! Identity to position lookup kept next to the ordered items

use std::collections::HashMap;
use std::hash::Hash;

use crate::content::ProgressTabContent;
use crate::error::TabError;
use crate::Result;

#[derive(Debug, Clone)]
pub struct SequenceIndex<Id> {
    positions: HashMap<Id, usize>,
}

impl<Id> SequenceIndex<Id>
where
    Id: Eq + Hash + Clone + std::fmt::Debug,
{
    /// Build the lookup, rejecting items that share an identity
    pub fn build<T>(items: &[T]) -> Result<Self>
    where
        T: ProgressTabContent<Id = Id>,
    {
        let mut positions = HashMap::with_capacity(items.len());
        for (position, item) in items.iter().enumerate() {
            let id = item.id();
            if positions.contains_key(&id) {
                return Err(TabError::DuplicateId(format!("{:?}", id)));
            }
            positions.insert(id, position);
        }
        Ok(Self { positions })
    }

    /// Position of `id` in sequence order
    pub fn position(&self, id: &Id) -> Option<usize> {
        self.positions.get(id).copied()
    }

    pub fn contains(&self, id: &Id) -> bool {
        self.positions.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}
