// chorus/chorus-directory
//
// Copyright: 2026, Chorus Contributors
// License: Mozilla Public License v2.0 (MPL v2.0)

use pretty_assertions::assert_eq;

use chorus_directory::{Handle, HandleRegistry, HandleSet, HandleType, IntSet};

#[test]
fn test_refcounts_track_live_sets_plus_external_refs() {
    let registry = HandleRegistry::new();
    let contacts = registry.repo(HandleType::Contact);

    let juliet = contacts.lock().ensure_handle("juliet@capulet.lit").unwrap();
    let nurse = contacts.lock().ensure_handle("nurse@capulet.lit").unwrap();

    // One external (interning) reference each.
    assert_eq!(contacts.lock().ref_count(juliet), Some(1));

    let mut roster = HandleSet::new(contacts.clone());
    let mut blocked = HandleSet::new(contacts.clone());

    roster.insert(juliet);
    roster.insert(nurse);
    blocked.insert(juliet);

    assert_eq!(contacts.lock().ref_count(juliet), Some(3));
    assert_eq!(contacts.lock().ref_count(nurse), Some(2));

    let removed = roster.difference_update(&IntSet::from_iter([juliet.get(), nurse.get()]));
    assert_eq!(removed.len(), 2);
    assert_eq!(contacts.lock().ref_count(juliet), Some(2));
    assert_eq!(contacts.lock().ref_count(nurse), Some(1));

    drop(blocked);
    assert_eq!(contacts.lock().ref_count(juliet), Some(1));

    // Releasing the external references collects both handles.
    assert!(contacts.lock().unref(juliet));
    assert!(contacts.lock().unref(nurse));
    assert!(!contacts.lock().is_valid(juliet));
    assert!(!contacts.lock().is_valid(nurse));
}

#[test]
fn test_client_holds_outlive_simple_refs() {
    let registry = HandleRegistry::new();
    let rooms = registry.repo(HandleType::Room);

    let room = rooms.lock().ensure_handle("play@muc.shakespeare.lit").unwrap();
    assert!(rooms.lock().hold("org.chorus.MucChannel", room));

    // The channel's hold keeps the handle valid past the last simple ref.
    assert!(rooms.lock().unref(room));
    assert!(rooms.lock().is_valid(room));
    assert_eq!(
        rooms.lock().id_of(room).map(str::to_string),
        Some("play@muc.shakespeare.lit".to_string())
    );

    assert!(rooms.lock().release("org.chorus.MucChannel", room));
    assert!(!rooms.lock().is_valid(room));
}

#[test]
fn test_update_returns_exactly_the_added_subset() {
    let registry = HandleRegistry::new();
    let contacts = registry.repo(HandleType::Contact);

    let handles: Vec<Handle> = ["a", "b", "c"]
        .iter()
        .map(|name| {
            contacts
                .lock()
                .ensure_handle(&format!("{name}@capulet.lit"))
                .unwrap()
        })
        .collect();

    let mut set = HandleSet::new(contacts.clone());
    set.insert(handles[0]);

    let requested = IntSet::from_iter(handles.iter().map(|h| h.get()));
    let added = set.update(&requested);

    assert_eq!(
        added,
        IntSet::from_iter([handles[1].get(), handles[2].get()])
    );
    assert_eq!(set.handles(), &requested);
}

#[test]
fn test_never_interned_handles_are_invalid() {
    let registry = HandleRegistry::new();
    let contacts = registry.repo(HandleType::Contact);
    let bogus = Handle::from_u32(7).unwrap();

    assert!(!contacts.lock().is_valid(bogus));
    assert!(!contacts.lock().add_ref(bogus));
    assert!(!contacts.lock().unref(bogus));
    assert!(!contacts.lock().hold("org.chorus.Roster", bogus));
}
