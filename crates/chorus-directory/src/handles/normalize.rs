// chorus/chorus-directory
//
// Copyright: 2026, Chorus Contributors
// License: Mozilla Public License v2.0 (MPL v2.0)

use jid::BareJid;

/// Normalization failure for an identifier submitted for interning.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdError {
    #[error("empty identifier")]
    Empty,
    #[error("malformed JID: {0}")]
    MalformedJid(String),
    #[error("'{0}' is not part of this repository's fixed vocabulary")]
    NotInVocabulary(String),
}

/// Pure normalization function applied to every id before interning. The
/// normalized form is what the bidirectional mapping stores, so two spellings
/// of the same identifier always intern to the same handle.
pub type Normalizer = fn(&str) -> Result<String, IdError>;

/// Normalizer for contact and room identifiers: parses the id as a bare JID
/// and re-serializes its canonical form. Ids carrying a resource are
/// rejected, the caller is expected to split those upstream.
pub fn normalize_bare_jid(id: &str) -> Result<String, IdError> {
    if id.is_empty() {
        return Err(IdError::Empty);
    }
    let jid = id
        .parse::<BareJid>()
        .map_err(|e| IdError::MalformedJid(e.to_string()))?;
    Ok(jid.to_string())
}

/// Normalizer for list and group names: opaque, case-sensitive, must be
/// non-empty.
pub fn normalize_opaque(id: &str) -> Result<String, IdError> {
    if id.is_empty() {
        return Err(IdError::Empty);
    }
    Ok(id.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_jid_accepts_valid_ids() {
        assert_eq!(
            normalize_bare_jid("romeo@montague.lit"),
            Ok("romeo@montague.lit".to_string())
        );
        // Domain-only JIDs are valid (servers, MUC services).
        assert_eq!(
            normalize_bare_jid("conference.montague.lit"),
            Ok("conference.montague.lit".to_string())
        );
    }

    #[test]
    fn test_bare_jid_rejects_garbage() {
        assert_eq!(normalize_bare_jid(""), Err(IdError::Empty));
        assert!(matches!(
            normalize_bare_jid("@montague.lit"),
            Err(IdError::MalformedJid(_))
        ));
        assert!(matches!(
            normalize_bare_jid("romeo@montague.lit/balcony"),
            Err(IdError::MalformedJid(_))
        ));
    }

    #[test]
    fn test_opaque_only_rejects_empty() {
        assert_eq!(normalize_opaque("Friends"), Ok("Friends".to_string()));
        assert_eq!(normalize_opaque(""), Err(IdError::Empty));
    }
}
