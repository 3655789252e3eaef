// chorus/chorus-directory
//
// Copyright: 2026, Chorus Contributors
// License: Mozilla Public License v2.0 (MPL v2.0)

use base64::{engine::general_purpose, Engine as _};
use sha1::{Digest, Sha1};

use crate::caps::{DataForm, DiscoBundle};

/// Builds the XEP-0115 §5.1 input string for `bundle`.
///
/// Identities are formatted `category/type/lang/name` and sorted; features
/// are sorted byte-wise; each data form is serialized with its fields sorted
/// by var and its values sorted within a field, and the form strings are
/// sorted in turn. Every block is `<`-terminated. The sorts make the result
/// a pure function of the bundle's contents, independent of enumeration
/// order at the source.
pub fn verification_string(bundle: &DiscoBundle) -> String {
    let mut string = String::new();

    let mut identities: Vec<String> = bundle
        .identities
        .iter()
        .map(ToString::to_string)
        .collect();
    identities.sort();
    for identity in identities {
        string.push_str(&identity);
        string.push('<');
    }

    // CapabilitySet already iterates in byte-wise order.
    for feature in bundle.features.iter() {
        string.push_str(feature);
        string.push('<');
    }

    let mut forms: Vec<String> = bundle.forms.iter().map(serialize_form).collect();
    forms.sort();
    for form in forms {
        string.push_str(&form);
    }

    string
}

/// The XEP-0115 verification hash: SHA-1 over the UTF-8 bytes of
/// [`verification_string`], base64-encoded.
pub fn verification_hash(bundle: &DiscoBundle) -> String {
    let mut hasher = Sha1::new();
    hasher.update(verification_string(bundle).as_bytes());
    general_purpose::STANDARD.encode(hasher.finalize())
}

fn serialize_form(form: &DataForm) -> String {
    let mut string = form.form_type.clone();
    string.push('<');

    let mut fields: Vec<_> = form
        .fields
        .iter()
        .filter(|field| field.var != "FORM_TYPE")
        .collect();
    fields.sort_by(|a, b| a.var.cmp(&b.var));

    for field in fields {
        string.push_str(&field.var);
        string.push('<');
        let mut values = field.values.clone();
        values.sort();
        for value in values {
            string.push_str(&value);
            string.push('<');
        }
    }

    string
}
