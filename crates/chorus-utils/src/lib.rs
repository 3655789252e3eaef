// chorus/chorus-utils
//
// Copyright: 2026, Chorus Contributors
// License: Mozilla Public License v2.0 (MPL v2.0)

mod id_string_macro;
