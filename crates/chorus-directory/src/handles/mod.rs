// chorus/chorus-directory
//
// Copyright: 2026, Chorus Contributors
// License: Mozilla Public License v2.0 (MPL v2.0)

pub use handle_set::HandleSet;
pub use normalize::{normalize_bare_jid, normalize_opaque, IdError, Normalizer};
pub use registry::HandleRegistry;
pub use repo::{HandleRepo, SharedHandleRepo};

mod handle_set;
mod normalize;
mod registry;
mod repo;

use std::fmt;
use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

chorus_utils::id_string!(
    /// Opaque tag naming a client that holds handles independently of the
    /// simple reference count.
    HolderId
);

/// Stable small integer standing in for an interned identifier within one
/// semantic category.
///
/// The reserved "no handle" value 0 is unrepresentable; `Option<Handle>`
/// expresses it instead. A `Handle` is only meaningful to the repository
/// that produced it.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Handle(NonZeroU32);

impl Handle {
    /// Returns `None` for the reserved value 0.
    pub fn from_u32(raw: u32) -> Option<Handle> {
        NonZeroU32::new(raw).map(Handle)
    }

    pub fn get(self) -> u32 {
        self.0.get()
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Semantic category of a handle. Each category is served by its own
/// repository.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
pub enum HandleType {
    Contact,
    Room,
    List,
    Group,
}
