//! FieldRegistry: explicit ownership of the fields participating in a
//! restart.
//!
//! The registry is handed into restore operations rather than consulted as a
//! process-wide singleton, which keeps the load path testable with synthetic
//! fields.

use std::collections::HashMap;

use crate::data::field::Field;
use crate::data::storage::{HostStorage, VecStorage};
use crate::restart_error::RestartError;

/// Name-keyed collection of fields sharing a value type and shape.
#[derive(Debug)]
pub struct FieldRegistry<V, const D: usize, const C: usize, St = VecStorage<[V; C]>> {
    fields: HashMap<String, Field<V, D, C, St>>,
}

impl<V, const D: usize, const C: usize, St> Default for FieldRegistry<V, D, C, St> {
    fn default() -> Self {
        Self {
            fields: HashMap::new(),
        }
    }
}

impl<V, const D: usize, const C: usize, St> FieldRegistry<V, D, C, St>
where
    St: HostStorage<[V; C]>,
{
    /// Empty registry.
    pub fn new() -> Self {
        Self {
            fields: HashMap::new(),
        }
    }

    /// Register a field under its own name.
    ///
    /// # Errors
    /// Returns `Err(DuplicateField)` if the name is already taken.
    pub fn insert(&mut self, field: Field<V, D, C, St>) -> Result<(), RestartError> {
        let name = field.name().to_owned();
        if self.fields.contains_key(&name) {
            return Err(RestartError::DuplicateField(name));
        }
        self.fields.insert(name, field);
        Ok(())
    }

    /// Borrow a field by name.
    pub fn get(&self, name: &str) -> Result<&Field<V, D, C, St>, RestartError> {
        self.fields
            .get(name)
            .ok_or_else(|| RestartError::UnknownField(name.to_owned()))
    }

    /// Mutably borrow a field by name.
    pub fn get_mut(&mut self, name: &str) -> Result<&mut Field<V, D, C, St>, RestartError> {
        self.fields
            .get_mut(name)
            .ok_or_else(|| RestartError::UnknownField(name.to_owned()))
    }

    /// Release a field, transferring ownership back to the caller.
    pub fn release(&mut self, name: &str) -> Result<Field<V, D, C, St>, RestartError> {
        self.fields
            .remove(name)
            .ok_or_else(|| RestartError::UnknownField(name.to_owned()))
    }

    /// Names of all registered fields, in no particular order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Number of registered fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
