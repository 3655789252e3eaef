// chorus/chorus-directory
//
// Copyright: 2026, Chorus Contributors
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, warn};

use crate::handles::{Handle, HandleType, HolderId, IdError, Normalizer};
use crate::int_set::IntSet;

/// Shared-ownership seam for a repository: the repository must outlive every
/// [`HandleSet`](crate::handles::HandleSet) built on it, so sets share it
/// behind `Arc<Mutex<_>>`.
pub type SharedHandleRepo = Arc<Mutex<HandleRepo>>;

struct Entry {
    id: String,
    refs: u32,
    holder_count: u32,
}

/// Interning table for one semantic category of identifiers.
///
/// Maps normalized ids to stable [`Handle`]s and back. Each interned handle
/// stays alive while it has simple references (`add_ref`/`unref`) or named
/// client holds (`hold`/`release`); when both are gone the entry is
/// collected and the handle becomes invalid.
pub struct HandleRepo {
    kind: HandleType,
    normalize: Normalizer,
    /// Fixed-vocabulary repositories never intern new ids and never collect
    /// their seeded entries.
    fixed: bool,
    next_handle: u32,
    entries: HashMap<Handle, Entry>,
    by_id: HashMap<String, Handle>,
    holds: HashMap<HolderId, IntSet>,
}

impl HandleRepo {
    /// A repository that interns arbitrary ids accepted by `normalize`.
    pub fn dynamic(kind: HandleType, normalize: Normalizer) -> Self {
        HandleRepo {
            kind,
            normalize,
            fixed: false,
            next_handle: 1,
            entries: HashMap::new(),
            by_id: HashMap::new(),
            holds: HashMap::new(),
        }
    }

    /// A repository pre-seeded with a closed vocabulary, in order, starting
    /// at handle 1. Lookups work as usual; interning an id outside the
    /// vocabulary fails and the seeded entries are never collected.
    pub fn fixed(kind: HandleType, vocabulary: &[&str]) -> Self {
        let mut repo = HandleRepo::dynamic(kind, crate::handles::normalize_opaque);
        repo.fixed = true;
        for id in vocabulary {
            repo.intern(id.to_string());
        }
        repo
    }

    pub fn into_shared(self) -> SharedHandleRepo {
        Arc::new(Mutex::new(self))
    }

    pub fn kind(&self) -> HandleType {
        self.kind
    }

    /// Number of currently interned handles.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Interns `id`, or returns the existing handle if its normalized form
    /// is already known.
    ///
    /// A freshly interned handle carries one simple reference owned by the
    /// requester; re-requesting an interned id does not add another.
    /// Callers that need independent ownership of an existing handle use
    /// [`add_ref`](Self::add_ref).
    pub fn ensure_handle(&mut self, id: &str) -> Result<Handle, IdError> {
        let normalized = (self.normalize)(id)?;
        if let Some(&handle) = self.by_id.get(&normalized) {
            return Ok(handle);
        }
        if self.fixed {
            return Err(IdError::NotInVocabulary(normalized));
        }
        Ok(self.intern(normalized))
    }

    /// Looks up the handle for `id` without interning. Returns `None` when
    /// the id is unknown or fails normalization.
    pub fn lookup_handle(&self, id: &str) -> Option<Handle> {
        let normalized = (self.normalize)(id).ok()?;
        self.by_id.get(&normalized).copied()
    }

    pub fn is_valid(&self, handle: Handle) -> bool {
        self.entries.contains_key(&handle)
    }

    /// The normalized id behind `handle`, or `None` if the handle is not
    /// currently interned.
    pub fn id_of(&self, handle: Handle) -> Option<&str> {
        self.entries.get(&handle).map(|entry| entry.id.as_str())
    }

    /// The normalized id behind `handle`.
    ///
    /// # Panics
    ///
    /// Panics if `handle` is invalid. Callers are expected to have checked
    /// validity; use [`id_of`](Self::id_of) when that is not the case.
    pub fn inspect(&self, handle: Handle) -> &str {
        match self.id_of(handle) {
            Some(id) => id,
            None => panic!("inspected invalid {} handle {}", self.kind, handle),
        }
    }

    /// Takes a simple reference. Returns `false` if `handle` is invalid.
    pub fn add_ref(&mut self, handle: Handle) -> bool {
        let Some(entry) = self.entries.get_mut(&handle) else {
            warn!(kind = %self.kind, %handle, "add_ref on invalid handle");
            return false;
        };
        entry.refs += 1;
        true
    }

    /// Releases a simple reference, collecting the entry when no references
    /// and no holds remain.
    ///
    /// Returns `false` when `handle` is invalid or its reference count is
    /// already zero. Either is a caller bug, not a recoverable condition;
    /// the count never wraps.
    pub fn unref(&mut self, handle: Handle) -> bool {
        let Some(entry) = self.entries.get_mut(&handle) else {
            warn!(kind = %self.kind, %handle, "unref on invalid handle");
            return false;
        };
        if entry.refs == 0 {
            warn!(kind = %self.kind, %handle, "unref below zero");
            return false;
        }
        entry.refs -= 1;
        self.collect_if_dead(handle);
        true
    }

    /// Records that the client named `holder` needs `handle` to stay valid,
    /// independently of simple references. Holding an already-held handle is
    /// a no-op. Returns `false` if `handle` is invalid.
    pub fn hold(&mut self, holder: &str, handle: Handle) -> bool {
        if !self.entries.contains_key(&handle) {
            warn!(kind = %self.kind, %handle, holder, "hold on invalid handle");
            return false;
        }
        let held = self.holds.entry(HolderId::from(holder)).or_default();
        if held.contains(handle.get()) {
            return true;
        }
        held.insert(handle.get());
        if let Some(entry) = self.entries.get_mut(&handle) {
            entry.holder_count += 1;
        }
        true
    }

    /// Drops `holder`'s hold on `handle`. Returns `false` when the handle is
    /// invalid or was not held by `holder` (a caller bug).
    pub fn release(&mut self, holder: &str, handle: Handle) -> bool {
        if !self.entries.contains_key(&handle) {
            warn!(kind = %self.kind, %handle, holder, "release on invalid handle");
            return false;
        }
        let Some(held) = self.holds.get_mut(holder) else {
            warn!(kind = %self.kind, %handle, holder, "release without hold");
            return false;
        };
        if !held.remove(handle.get()) {
            warn!(kind = %self.kind, %handle, holder, "release without hold");
            return false;
        }
        if held.is_empty() {
            self.holds.remove(holder);
        }
        if let Some(entry) = self.entries.get_mut(&handle) {
            entry.holder_count -= 1;
        }
        self.collect_if_dead(handle);
        true
    }

    pub fn is_held_by(&self, holder: &str, handle: Handle) -> bool {
        self.holds
            .get(holder)
            .map_or(false, |held| held.contains(handle.get()))
    }

    /// Current simple reference count, for invariant checks and diagnostics.
    pub fn ref_count(&self, handle: Handle) -> Option<u32> {
        self.entries.get(&handle).map(|entry| entry.refs)
    }

    fn intern(&mut self, normalized: String) -> Handle {
        let raw = self.next_handle;
        self.next_handle = raw.checked_add(1).expect("handle space exhausted");
        let handle = Handle::from_u32(raw).expect("handle counter starts at 1");
        debug!(kind = %self.kind, %handle, id = %normalized, "interned handle");
        self.by_id.insert(normalized.clone(), handle);
        self.entries.insert(
            handle,
            Entry {
                id: normalized,
                refs: 1,
                holder_count: 0,
            },
        );
        handle
    }

    fn collect_if_dead(&mut self, handle: Handle) {
        if self.fixed {
            return;
        }
        let dead = self
            .entries
            .get(&handle)
            .map_or(false, |entry| entry.refs == 0 && entry.holder_count == 0);
        if !dead {
            return;
        }
        if let Some(entry) = self.entries.remove(&handle) {
            self.by_id.remove(&entry.id);
            debug!(kind = %self.kind, %handle, id = %entry.id, "collected handle");
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::handles::{normalize_bare_jid, normalize_opaque};

    use super::*;

    fn contact_repo() -> HandleRepo {
        HandleRepo::dynamic(HandleType::Contact, normalize_bare_jid)
    }

    #[test]
    fn test_interning_is_idempotent() {
        let mut repo = contact_repo();
        let handle = repo.ensure_handle("juliet@capulet.lit").unwrap();
        let again = repo.ensure_handle("juliet@capulet.lit").unwrap();

        assert_eq!(handle, again);
        assert_eq!(repo.ref_count(handle), Some(1));
        assert_eq!(repo.len(), 1);
        assert_eq!(repo.inspect(handle), "juliet@capulet.lit");
    }

    #[test]
    fn test_lookup_does_not_intern() {
        let mut repo = contact_repo();
        assert_eq!(repo.lookup_handle("juliet@capulet.lit"), None);
        assert_eq!(repo.lookup_handle("not a jid at all/////"), None);

        let handle = repo.ensure_handle("juliet@capulet.lit").unwrap();
        assert_eq!(repo.lookup_handle("juliet@capulet.lit"), Some(handle));
    }

    #[test]
    fn test_malformed_id_fails_interning() {
        let mut repo = contact_repo();
        assert!(matches!(
            repo.ensure_handle("@capulet.lit"),
            Err(IdError::MalformedJid(_))
        ));
        assert!(repo.is_empty());
    }

    #[test]
    fn test_last_unref_collects() {
        let mut repo = contact_repo();
        let handle = repo.ensure_handle("juliet@capulet.lit").unwrap();

        assert!(repo.add_ref(handle));
        assert_eq!(repo.ref_count(handle), Some(2));
        assert!(repo.unref(handle));
        assert!(repo.is_valid(handle));
        assert!(repo.unref(handle));

        assert!(!repo.is_valid(handle));
        assert_eq!(repo.id_of(handle), None);
        assert_eq!(repo.lookup_handle("juliet@capulet.lit"), None);
    }

    #[test]
    fn test_unref_below_zero_reports_caller_bug() {
        let mut repo = contact_repo();
        let handle = repo.ensure_handle("juliet@capulet.lit").unwrap();
        assert!(repo.unref(handle));
        // The handle is gone now; a further unref must not wrap anything.
        assert!(!repo.unref(handle));
        assert!(!repo.add_ref(handle));
    }

    #[test]
    fn test_hold_keeps_handle_alive_without_refs() {
        let mut repo = contact_repo();
        let handle = repo.ensure_handle("juliet@capulet.lit").unwrap();

        assert!(repo.hold("org.chorus.Roster", handle));
        assert!(repo.hold("org.chorus.Roster", handle)); // no-op
        assert!(repo.unref(handle));

        assert!(repo.is_valid(handle));
        assert!(repo.is_held_by("org.chorus.Roster", handle));
        // The count is at zero; a further unref is a caller bug and must
        // not wrap or collect the held entry.
        assert!(!repo.unref(handle));
        assert!(repo.is_valid(handle));

        assert!(repo.release("org.chorus.Roster", handle));
        assert!(!repo.is_valid(handle));
    }

    #[test]
    fn test_refs_keep_handle_alive_without_holds() {
        let mut repo = contact_repo();
        let handle = repo.ensure_handle("juliet@capulet.lit").unwrap();

        assert!(repo.hold("org.chorus.Roster", handle));
        assert!(repo.release("org.chorus.Roster", handle));

        // The interning reference is still there.
        assert!(repo.is_valid(handle));
        assert!(repo.unref(handle));
        assert!(!repo.is_valid(handle));
    }

    #[test]
    fn test_release_without_hold_reports_caller_bug() {
        let mut repo = contact_repo();
        let handle = repo.ensure_handle("juliet@capulet.lit").unwrap();
        assert!(!repo.release("org.chorus.Roster", handle));
        assert!(repo.is_valid(handle));
    }

    #[test]
    fn test_holds_are_independent_per_holder() {
        let mut repo = contact_repo();
        let handle = repo.ensure_handle("juliet@capulet.lit").unwrap();
        repo.hold("org.chorus.Roster", handle);
        repo.hold("org.chorus.Muc", handle);
        repo.unref(handle);

        assert!(repo.release("org.chorus.Roster", handle));
        assert!(repo.is_valid(handle));
        assert!(repo.release("org.chorus.Muc", handle));
        assert!(!repo.is_valid(handle));
    }

    #[test]
    #[should_panic(expected = "invalid contact handle")]
    fn test_inspect_panics_on_invalid_handle() {
        let repo = contact_repo();
        let bogus = Handle::from_u32(42).unwrap();
        repo.inspect(bogus);
    }

    #[test]
    fn test_fixed_repo_serves_its_vocabulary_only() {
        let mut repo = HandleRepo::fixed(HandleType::List, &["publish", "subscribe"]);

        let publish = repo.lookup_handle("publish").unwrap();
        assert_eq!(publish.get(), 1);
        assert_eq!(repo.ensure_handle("publish"), Ok(publish));
        assert_eq!(
            repo.ensure_handle("block"),
            Err(IdError::NotInVocabulary("block".to_string()))
        );
        assert_eq!(repo.inspect(publish), "publish");
    }

    #[test]
    fn test_fixed_repo_entries_survive_unref() {
        let mut repo = HandleRepo::fixed(HandleType::List, &["publish"]);
        let publish = repo.lookup_handle("publish").unwrap();
        assert!(repo.unref(publish));
        assert!(repo.is_valid(publish));
    }

    #[test]
    fn test_opaque_repo_is_case_sensitive() {
        let mut repo = HandleRepo::dynamic(HandleType::Group, normalize_opaque);
        let a = repo.ensure_handle("Friends").unwrap();
        let b = repo.ensure_handle("friends").unwrap();
        assert_ne!(a, b);
    }
}
