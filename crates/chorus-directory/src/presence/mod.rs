// chorus/chorus-directory
//
// Copyright: 2026, Chorus Contributors
// License: Mozilla Public License v2.0 (MPL v2.0)

pub use availability::Availability;
pub use directory::{PresenceDirectory, PresenceRecord};
pub use report::{Presence, ResourcePresence};

mod availability;
mod directory;
mod report;

chorus_utils::id_string!(
    /// An XMPP resource name: one contact may have several simultaneously
    /// connected resources, each with independent presence and capabilities.
    ResourceName
);
