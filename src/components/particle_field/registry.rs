//! Registry of running field instances.
//!
//! Each mounted canvas owns one running field; the registry maps a surface
//! key to a handle whose shared running flag gates the animation loop.
//! Insert on initialize, remove on destroy. Removal stops the loop and is
//! idempotent, so repeated destroys are no-ops and independent instances
//! never affect each other.

use std::cell::Cell;
use std::collections::HashMap;
use std::hash::Hash;
use std::rc::Rc;

/// Shared running flag for one field's animation loop.
///
/// The rAF closure holds a clone and re-schedules itself only while the flag
/// is set; clearing it guarantees no further frames after the one in flight.
#[derive(Clone, Debug)]
pub struct FieldHandle {
	running: Rc<Cell<bool>>,
}

impl FieldHandle {
	/// Creates a handle in the running state.
	pub fn new() -> Self {
		Self {
			running: Rc::new(Cell::new(true)),
		}
	}

	/// Whether the loop should keep scheduling frames.
	pub fn is_running(&self) -> bool {
		self.running.get()
	}

	/// Stops the loop at the next frame boundary. Idempotent.
	pub fn stop(&self) {
		self.running.set(false);
	}
}

/// Owned map from surface key to the handle of the field bound to it.
#[derive(Debug, Default)]
pub struct FieldRegistry<K: Eq + Hash> {
	entries: HashMap<K, FieldHandle>,
}

impl<K: Eq + Hash> FieldRegistry<K> {
	/// Creates an empty registry.
	pub fn new() -> Self {
		Self {
			entries: HashMap::new(),
		}
	}

	/// Registers a running field under `key`, returning its handle. A field
	/// already registered under the same key is stopped and replaced.
	pub fn register(&mut self, key: K) -> FieldHandle {
		let handle = FieldHandle::new();
		if let Some(old) = self.entries.insert(key, handle.clone()) {
			old.stop();
		}
		handle
	}

	/// Stops and removes the field registered under `key`. No-op when the
	/// key is absent, so destroy may be called any number of times.
	pub fn remove(&mut self, key: &K) {
		if let Some(handle) = self.entries.remove(key) {
			handle.stop();
		}
	}

	/// Number of live fields.
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	/// True when no fields are registered.
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}
}
