// chorus/chorus-directory
//
// Copyright: 2026, Chorus Contributors
// License: Mozilla Public License v2.0 (MPL v2.0)

//! Identity, presence and capability directory for the Chorus connection
//! manager.
//!
//! The protocol layer reduces inbound roster, presence and disco#info
//! traffic to plain values and feeds them in here; the channel layer pulls
//! aggregated presence, handle membership and capability-gated resource
//! selections back out. Nothing in this crate performs I/O or parses XML,
//! and every operation runs to completion synchronously: hosts confine a
//! directory to one event-processing context.

pub use caps::{
    verification_hash, verification_string, CapabilitySet, ClientCaps, DataForm, DataFormField,
    DiscoBundle, Identity,
};
pub use handles::{
    normalize_bare_jid, normalize_opaque, Handle, HandleRegistry, HandleRepo, HandleSet,
    HandleType, HolderId, IdError, Normalizer, SharedHandleRepo,
};
pub use int_set::IntSet;
pub use presence::{
    Availability, Presence, PresenceDirectory, PresenceRecord, ResourceName, ResourcePresence,
};

pub mod caps;
pub mod handles;
pub mod int_set;
pub mod presence;
