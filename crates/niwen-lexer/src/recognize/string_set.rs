use std::collections::{BTreeMap, HashSet};

use super::Recognizer;
use crate::LexerBuildError;

/// Matches any string of a fixed set.
///
/// Candidates are bucketed by byte length, so recognition costs one slice
/// and one hash lookup per distinct length. Longer candidates win.
#[derive(Clone, Debug)]
pub struct StringSet {
    by_length: BTreeMap<usize, HashSet<String>>,
}

impl StringSet {
    /// Empty candidates are skipped; a set left with none is an error.
    pub fn new<I, S>(candidates: I) -> Result<Self, LexerBuildError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut by_length: BTreeMap<usize, HashSet<String>> = BTreeMap::new();
        for candidate in candidates {
            let candidate = candidate.into();
            if candidate.is_empty() {
                continue;
            }
            by_length
                .entry(candidate.len())
                .or_default()
                .insert(candidate);
        }

        if by_length.is_empty() {
            return Err(LexerBuildError::EmptyStringSet);
        }
        Ok(Self { by_length })
    }

    pub fn len(&self) -> usize {
        self.by_length.values().map(HashSet::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.by_length.is_empty()
    }
}

impl Recognizer for StringSet {
    fn recognize(&self, text: &str, offset: usize) -> Option<usize> {
        for (&len, candidates) in self.by_length.iter().rev() {
            let end = offset + len;
            if let Some(slice) = text.get(offset..end)
                && candidates.contains(slice)
            {
                return Some(end);
            }
        }
        None
    }
}
