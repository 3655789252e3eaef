// chorus/chorus-directory
//
// Copyright: 2026, Chorus Contributors
// License: Mozilla Public License v2.0 (MPL v2.0)

use serde::{Deserialize, Serialize};

use crate::caps::CapabilitySet;
use crate::presence::Availability;

/// A presence report reduced to plain values: status, optional status
/// message and connection priority.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Presence {
    pub availability: Availability,
    pub status: Option<String>,
    pub priority: i16,
}

/// Everything the directory tracks for one connected resource.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResourcePresence {
    pub presence: Presence,
    pub caps: CapabilitySet,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_offline() {
        assert_eq!(
            Presence::default(),
            Presence {
                availability: Availability::Offline,
                status: None,
                priority: 0,
            }
        )
    }
}
