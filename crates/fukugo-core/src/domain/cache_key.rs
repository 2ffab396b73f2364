//! Cache key derivation for synthesized utterances.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Separator placed between the voice and the text of a [`CacheKey`].
pub const CACHE_KEY_SEPARATOR: char = ':';

/// Deterministic identifier of one synthesized utterance.
///
/// Built as `voice + ":" + text`, so `("ja-JP-NanamiNeural", "食べる")`
/// becomes `"ja-JP-NanamiNeural:食べる"`. The same pair always yields the
/// same key.
///
/// The separator is not escaped: a voice containing `:` can alias a
/// different pair. Voice identifiers never contain one in practice.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CacheKey(String);

impl CacheKey {
    /// Derive the key for `text` spoken in `voice`.
    pub fn new(voice: &str, text: &str) -> Self {
        let capacity = voice.len() + CACHE_KEY_SEPARATOR.len_utf8() + text.len();
        let mut key = String::with_capacity(capacity);
        key.push_str(voice);
        key.push(CACHE_KEY_SEPARATOR);
        key.push_str(text);
        Self(key)
    }

    /// The key as stored in the blob store.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the key, returning the underlying string.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CacheKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_is_voice_colon_text() {
        let key = CacheKey::new("ja-JP-NanamiNeural", "食べる");
        assert_eq!(key.as_str(), "ja-JP-NanamiNeural:食べる");
        assert_eq!(key.to_string(), "ja-JP-NanamiNeural:食べる");
    }

    #[test]
    fn same_pair_yields_same_key() {
        let a = CacheKey::new("ja-JP-KeitaNeural", "書き込む");
        let b = CacheKey::new("ja-JP-KeitaNeural", "書き込む");
        assert_eq!(a, b);
    }

    #[test]
    fn distinct_pairs_yield_distinct_keys() {
        let pairs = [
            ("ja-JP-NanamiNeural", "食べる"),
            ("ja-JP-KeitaNeural", "食べる"),
            ("ja-JP-NanamiNeural", "食べ始める"),
            ("ja-JP-NanamiNeural", ""),
            ("", "食べる"),
        ];

        for (i, (v1, t1)) in pairs.iter().enumerate() {
            for (v2, t2) in &pairs[i + 1..] {
                assert_ne!(
                    CacheKey::new(v1, t1),
                    CacheKey::new(v2, t2),
                    "({v1}, {t1}) collided with ({v2}, {t2})"
                );
            }
        }
    }

    #[test]
    fn colon_in_voice_can_alias_another_pair() {
        // Inherited behavior: the separator is not escaped.
        assert_eq!(CacheKey::new("a:b", "c"), CacheKey::new("a", "b:c"));
    }

    #[test]
    fn serializes_as_plain_string() {
        let key = CacheKey::new("v", "t");
        assert_eq!(serde_json::to_string(&key).unwrap(), "\"v:t\"");
    }
}
