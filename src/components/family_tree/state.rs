use std::collections::HashMap;

use super::path_key::PathKey;

/// Which collapsible regions are open, keyed by encoded [`PathKey`].
///
/// Values are never mutated in place: every change produces a new state so
/// the signal holding it sees a replacement.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExpansionState {
	open: HashMap<String, bool>,
}

impl ExpansionState {
	pub fn new() -> Self {
		Self::default()
	}

	/// Absent keys are collapsed.
	pub fn get(&self, key: &PathKey) -> bool {
		self.open.get(&key.encode()).copied().unwrap_or(false)
	}

	pub fn toggle(&self, key: &PathKey) -> Self {
		let mut open = self.open.clone();
		let encoded = key.encode();
		let current = open.get(&encoded).copied().unwrap_or(false);
		open.insert(encoded, !current);
		Self { open }
	}

	/// Opens every key, leaving all others as they were.
	pub fn open_all<'a>(&self, keys: impl IntoIterator<Item = &'a PathKey>) -> Self {
		let mut open = self.open.clone();
		for key in keys {
			open.insert(key.encode(), true);
		}
		Self { open }
	}
}

/// Mounted handles by display name; the last registration wins.
#[derive(Debug)]
pub struct Registry<T> {
	entries: HashMap<String, T>,
}

impl<T> Default for Registry<T> {
	fn default() -> Self {
		Self {
			entries: HashMap::new(),
		}
	}
}

impl<T> Registry<T> {
	pub fn register(&mut self, name: impl Into<String>, handle: T) {
		self.entries.insert(name.into(), handle);
	}

	pub fn get(&self, name: &str) -> Option<&T> {
		self.entries.get(name)
	}
}
