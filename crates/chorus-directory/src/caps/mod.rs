// chorus/chorus-directory
//
// Copyright: 2026, Chorus Contributors
// License: Mozilla Public License v2.0 (MPL v2.0)

pub use bundle::{ClientCaps, DataForm, DataFormField, DiscoBundle, Identity};
pub use capability_set::CapabilitySet;
pub use verification::{verification_hash, verification_string};

mod bundle;
mod capability_set;
mod verification;
