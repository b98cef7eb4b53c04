//! Process-wide system properties
//!
//! A small key/value table shared by the whole process. The CLI fills it from
//! `-D` flags; values here take precedence over configured tool properties,
//! and in-process entry points read their logging setup from it.

use std::collections::BTreeMap;
use std::sync::{LazyLock, Mutex, MutexGuard, PoisonError};

static PROPERTIES: LazyLock<Mutex<BTreeMap<String, String>>> =
    LazyLock::new(|| Mutex::new(BTreeMap::new()));

fn table() -> MutexGuard<'static, BTreeMap<String, String>> {
    PROPERTIES.lock().unwrap_or_else(PoisonError::into_inner)
}

pub fn get(key: &str) -> Option<String> {
    table().get(key).cloned()
}

/// Set `key`, returning the previous value
pub fn set(key: impl Into<String>, value: impl Into<String>) -> Option<String> {
    table().insert(key.into(), value.into())
}

/// Remove `key`, returning the previous value
pub fn remove(key: &str) -> Option<String> {
    table().remove(key)
}

pub fn snapshot() -> BTreeMap<String, String> {
    table().clone()
}

/// Overrides one property until dropped, then restores the previous value
/// (or removes the key if it was unset).
#[must_use = "the override is reverted as soon as the guard is dropped"]
#[derive(Debug)]
pub struct PropertyOverride {
    key: String,
    previous: Option<String>,
}

impl PropertyOverride {
    pub fn set(key: impl Into<String>, value: impl Into<String>) -> Self {
        let key = key.into();
        let previous = set(key.clone(), value);
        Self { key, previous }
    }
}

impl Drop for PropertyOverride {
    fn drop(&mut self) {
        match self.previous.take() {
            Some(value) => {
                set(self.key.clone(), value);
            }
            None => {
                remove(&self.key);
            }
        }
    }
}

/// A stack of overrides, reverted last-in first-out so repeated keys end up
/// at their original value
#[must_use = "the overrides are reverted as soon as the guard is dropped"]
#[derive(Debug, Default)]
pub struct PropertyOverrides {
    stack: Vec<PropertyOverride>,
}

impl PropertyOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.stack.push(PropertyOverride::set(key, value));
    }
}

impl Drop for PropertyOverrides {
    fn drop(&mut self) {
        while let Some(guard) = self.stack.pop() {
            drop(guard);
        }
    }
}
