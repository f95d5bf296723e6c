use crate::error::{ArborError, Result};
use crate::value::Value;
use log::debug;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// One scope of bindings, linked to the scope that encloses it.
///
/// A child only holds a handle to its parent for lookup; dropping the child
/// leaves the parent's bindings untouched.
#[derive(Debug, Default)]
pub struct Environment {
    values: HashMap<String, Value>,
    enclosing: Option<Rc<RefCell<Environment>>>,
}

impl Environment {
    pub fn new() -> Self {
        Environment {
            values: HashMap::new(),
            enclosing: None,
        }
    }

    pub fn with_enclosing(enclosing: Rc<RefCell<Environment>>) -> Self {
        Environment {
            values: HashMap::new(),
            enclosing: Some(enclosing),
        }
    }

    /// Bind `name` in this scope.  Shadowing an outer binding is fine;
    /// declaring the same name twice in one scope is not.
    pub fn declare(&mut self, name: &str, value: Value) -> Result<()> {
        if self.values.contains_key(name) {
            return Err(ArborError::already_declared(name));
        }

        debug!("Declaring '{}' = {}", name, value);

        self.values.insert(name.to_string(), value);
        Ok(())
    }

    /// Overwrite the nearest existing binding of `name`.
    pub fn assign(&mut self, name: &str, value: Value) -> Result<()> {
        if let Some(slot) = self.values.get_mut(name) {
            debug!("Assigning '{}' = {}", name, value);
            *slot = value;
            Ok(())
        } else if let Some(enclosing) = &self.enclosing {
            enclosing.borrow_mut().assign(name, value)
        } else {
            Err(ArborError::undefined(name))
        }
    }

    pub fn get(&self, name: &str) -> Result<Value> {
        if let Some(value) = self.values.get(name) {
            Ok(value.clone())
        } else if let Some(enclosing) = &self.enclosing {
            enclosing.borrow().get(name)
        } else {
            Err(ArborError::undefined(name))
        }
    }

    /// Is `name` bound in this exact scope (ignoring enclosing ones)?
    pub fn is_declared_here(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }
}
