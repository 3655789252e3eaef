// chorus/chorus-directory
//
// Copyright: 2026, Chorus Contributors
// License: Mozilla Public License v2.0 (MPL v2.0)

use crate::handles::{normalize_bare_jid, normalize_opaque, HandleRepo, HandleType, SharedHandleRepo};

/// Publish/subscribe list names defined by the roster protocol. The list
/// repository serves exactly this vocabulary.
pub const LIST_NAMES: &[&str] = &["deny", "publish", "stored", "subscribe"];

/// One repository per semantic category, looked up by [`HandleType`].
pub struct HandleRegistry {
    contacts: SharedHandleRepo,
    rooms: SharedHandleRepo,
    lists: SharedHandleRepo,
    groups: SharedHandleRepo,
}

impl HandleRegistry {
    /// Builds the four repositories with their category-appropriate
    /// normalizers: JID normalization for contacts and rooms, the fixed
    /// roster-list vocabulary for lists, opaque names for groups.
    pub fn new() -> Self {
        HandleRegistry {
            contacts: HandleRepo::dynamic(HandleType::Contact, normalize_bare_jid).into_shared(),
            rooms: HandleRepo::dynamic(HandleType::Room, normalize_bare_jid).into_shared(),
            lists: HandleRepo::fixed(HandleType::List, LIST_NAMES).into_shared(),
            groups: HandleRepo::dynamic(HandleType::Group, normalize_opaque).into_shared(),
        }
    }

    pub fn repo(&self, kind: HandleType) -> &SharedHandleRepo {
        match kind {
            HandleType::Contact => &self.contacts,
            HandleType::Room => &self.rooms,
            HandleType::List => &self.lists,
            HandleType::Group => &self.groups,
        }
    }
}

impl Default for HandleRegistry {
    fn default() -> Self {
        HandleRegistry::new()
    }
}
