// chorus/chorus-directory
//
// Copyright: 2026, Chorus Contributors
// License: Mozilla Public License v2.0 (MPL v2.0)

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

/// Presence status, declared from least to most present so that the derived
/// `Ord` is the presentness ranking used to pick a contact's winning
/// resource. The string forms follow the wire `show` vocabulary.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
)]
#[strum(serialize_all = "lowercase")]
pub enum Availability {
    #[default]
    Offline,
    #[strum(serialize = "xa")]
    ExtendedAway,
    Away,
    #[strum(serialize = "dnd")]
    DoNotDisturb,
    Available,
    Chat,
}

impl Availability {
    pub fn is_online(self) -> bool {
        self > Availability::Offline
    }
}
