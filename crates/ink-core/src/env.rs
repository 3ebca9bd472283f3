//! Variable environment: symbol → value, fed by assignment results.
//!
//! The whole map is sent with every solve request so the service can
//! substitute previously defined symbols.

use crate::model::SolveEntry;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VariableEnv {
    vars: BTreeMap<String, String>,
}

impl VariableEnv {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply every assignment entry, overwriting existing symbols.
    /// Non-assignment entries are ignored. Returns how many were applied.
    pub fn apply_assignments(&mut self, entries: &[SolveEntry]) -> usize {
        let mut applied = 0;
        for entry in entries.iter().filter(|e| e.is_assignment) {
            log::debug!("assign {} = {}", entry.expression, entry.result);
            self.vars
                .insert(entry.expression.clone(), entry.result.clone());
            applied += 1;
        }
        applied
    }

    pub fn get(&self, symbol: &str) -> Option<&str> {
        self.vars.get(symbol).map(String::as_str)
    }

    /// Owned copy of the current mapping, for request serialization.
    pub fn snapshot(&self) -> BTreeMap<String, String> {
        self.vars.clone()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.vars.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    pub fn reset(&mut self) {
        self.vars.clear();
    }
}
