//! Term key normalization policy

use crate::ports::KeyNormalizer;

/// Produces path-safe term keys.
///
/// Whitespace runs become a single `-`, characters other than
/// alphanumerics and `-_.` are dropped, and the result is lowercased
/// unless `preserve_case` is set.
#[derive(Debug, Clone, Copy, Default)]
pub struct PathKeyNormalizer {
    pub preserve_case: bool,
}

impl PathKeyNormalizer {
    pub fn new(preserve_case: bool) -> Self {
        Self { preserve_case }
    }
}

impl KeyNormalizer for PathKeyNormalizer {
    fn normalize(&self, term: &str) -> String {
        let mut key = String::with_capacity(term.len());
        let mut pending_dash = false;

        for c in term.trim().chars() {
            if c.is_whitespace() {
                pending_dash = true;
                continue;
            }
            if !(c.is_alphanumeric() || matches!(c, '-' | '_' | '.')) {
                continue;
            }
            if pending_dash && !key.is_empty() {
                key.push('-');
            }
            pending_dash = false;
            if self.preserve_case {
                key.push(c);
            } else {
                key.extend(c.to_lowercase());
            }
        }

        key
    }
}
