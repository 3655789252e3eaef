// chorus/chorus-directory
//
// Copyright: 2026, Chorus Contributors
// License: Mozilla Public License v2.0 (MPL v2.0)

use crate::handles::{Handle, SharedHandleRepo};
use crate::int_set::IntSet;

/// A collection of handles that keeps its members referenced.
///
/// Every member holds exactly one simple reference in the backing
/// repository, taken on insert and released on remove or drop. The interior
/// [`IntSet`] is never exposed mutably; all mutation goes through the
/// operations that maintain the reference invariant.
pub struct HandleSet {
    repo: SharedHandleRepo,
    handles: IntSet,
}

impl HandleSet {
    pub fn new(repo: SharedHandleRepo) -> Self {
        HandleSet {
            repo,
            handles: IntSet::new(),
        }
    }

    /// Adds `handle`, taking a reference on it. Returns `false` when the
    /// handle is already a member or is invalid in the backing repository.
    pub fn insert(&mut self, handle: Handle) -> bool {
        if self.handles.contains(handle.get()) {
            return false;
        }
        if !self.repo.lock().add_ref(handle) {
            return false;
        }
        self.handles.insert(handle.get());
        true
    }

    /// Removes `handle` and releases its reference. Returns `false` if it
    /// was not a member.
    pub fn remove(&mut self, handle: Handle) -> bool {
        if !self.handles.remove(handle.get()) {
            return false;
        }
        self.repo.lock().unref(handle);
        true
    }

    pub fn contains(&self, handle: Handle) -> bool {
        self.handles.contains(handle.get())
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// Read-only view of the member handles.
    pub fn handles(&self) -> &IntSet {
        &self.handles
    }

    pub fn to_vec(&self) -> Vec<Handle> {
        self.handles.iter().filter_map(Handle::from_u32).collect()
    }

    /// Adds every element of `add` that is not yet a member, referencing
    /// each. Returns the subset that was actually added.
    pub fn update(&mut self, add: &IntSet) -> IntSet {
        let mut added = IntSet::new();
        let mut repo = self.repo.lock();
        for value in add.difference(&self.handles).iter() {
            let Some(handle) = Handle::from_u32(value) else {
                continue;
            };
            if !repo.add_ref(handle) {
                continue;
            }
            self.handles.insert(value);
            added.insert(value);
        }
        added
    }

    /// Removes every member that is also in `remove`, releasing each.
    /// Returns the subset that was actually removed.
    pub fn difference_update(&mut self, remove: &IntSet) -> IntSet {
        let removed = self.handles.intersection(remove);
        let mut repo = self.repo.lock();
        for value in removed.iter() {
            self.handles.remove(value);
            if let Some(handle) = Handle::from_u32(value) {
                repo.unref(handle);
            }
        }
        removed
    }

    /// Removes and releases every member.
    pub fn clear(&mut self) {
        let mut repo = self.repo.lock();
        for value in self.handles.iter() {
            if let Some(handle) = Handle::from_u32(value) {
                repo.unref(handle);
            }
        }
        self.handles.clear();
    }
}

impl Drop for HandleSet {
    fn drop(&mut self) {
        self.clear();
    }
}
