// chorus/chorus-directory
//
// Copyright: 2026, Chorus Contributors
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::caps::{verification_hash, verification_string, CapabilitySet};

/// A disco#info identity record, reduced to plain values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub category: String,
    pub kind: String,
    pub lang: String,
    pub name: String,
}

impl Identity {
    pub fn new(
        category: impl Into<String>,
        kind: impl Into<String>,
        lang: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Identity {
            category: category.into(),
            kind: kind.into(),
            lang: lang.into(),
            name: name.into(),
        }
    }
}

impl Display for Identity {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}/{}/{}/{}",
            self.category, self.kind, self.lang, self.name
        )
    }
}

/// One field of an extended disco#info data form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataFormField {
    pub var: String,
    pub values: Vec<String>,
}

impl DataFormField {
    pub fn new(var: impl Into<String>, values: impl IntoIterator<Item = impl Into<String>>) -> Self {
        DataFormField {
            var: var.into(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }
}

/// An extended disco#info data form, reduced to its FORM_TYPE and fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataForm {
    pub form_type: String,
    pub fields: Vec<DataFormField>,
}

impl DataForm {
    pub fn new(form_type: impl Into<String>, fields: impl IntoIterator<Item = DataFormField>) -> Self {
        DataForm {
            form_type: form_type.into(),
            fields: fields.into_iter().collect(),
        }
    }
}

/// The full capability description of an entity: feature set plus ordered
/// identity records and extended data forms. This is what the XEP-0115
/// verification hash is computed over.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscoBundle {
    pub identities: Vec<Identity>,
    pub features: CapabilitySet,
    pub forms: Vec<DataForm>,
}

impl DiscoBundle {
    pub fn new(
        identities: impl IntoIterator<Item = Identity>,
        features: CapabilitySet,
        forms: impl IntoIterator<Item = DataForm>,
    ) -> Self {
        DiscoBundle {
            identities: identities.into_iter().collect(),
            features,
            forms: forms.into_iter().collect(),
        }
    }
}

/// The local client's advertised capabilities, with the verification string
/// and hash precomputed.
#[derive(Debug, Clone)]
pub struct ClientCaps {
    pub node: String,
    pub bundle: DiscoBundle,
    pub ver_string: String,
    pub ver_hash: String,
}

impl ClientCaps {
    pub fn new(
        client_name: impl Into<String>,
        node: impl Into<String>,
        features: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        let bundle = DiscoBundle::new(
            [Identity::new("client", "pc", "", client_name)],
            features.into_iter().collect(),
            [],
        );
        let ver_string = verification_string(&bundle);
        let ver_hash = verification_hash(&bundle);

        ClientCaps {
            node: node.into(),
            bundle,
            ver_string,
            ver_hash,
        }
    }

    /// The caps node attribute advertised in presence: `node#ver`.
    pub fn caps_node(&self) -> String {
        format!("{}#{}", self.node, self.ver_hash)
    }
}
