//! Identity registry mapping record names to node ids.

use std::collections::HashMap;

use yuml_core::graph::NodeId;

use crate::label::record_name;

/// Assigns `A0`, `A1`, ... to record names in first-seen order.
///
/// Labels are reduced to their record name before lookup, so `[Customer]`
/// and `[Customer|name;email]` share one id.
#[derive(Debug, Default)]
pub struct UidRegistry {
    ids: HashMap<String, NodeId>,
}

impl UidRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the record name of `label`.
    ///
    /// Returns the new id, or `None` when the name is already known.
    pub fn create(&mut self, label: &str) -> Option<NodeId> {
        let name = record_name(label);
        if self.ids.contains_key(name) {
            return None;
        }
        let id = NodeId::new(format!("A{}", self.ids.len()));
        self.ids.insert(name.to_string(), id.clone());
        Some(id)
    }

    /// Looks up the id of the record name of `label` without registering it.
    pub fn get(&self, label: &str) -> Option<NodeId> {
        self.ids.get(record_name(label)).cloned()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}
