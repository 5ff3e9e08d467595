use super::{BoxedRecognizer, IntoRecognizer, Recognizer};
use crate::LexerBuildError;

/// Greedy repetition of another recognizer.
///
/// Fails when fewer than `min` repetitions match, or when one more
/// repetition would still match after `max` were taken. A zero-width inner
/// match ends the loop.
#[derive(Debug)]
pub struct Repeated {
    inner: BoxedRecognizer,
    min: usize,
    max: Option<usize>,
}

impl Repeated {
    pub fn one_or_more(inner: impl IntoRecognizer) -> Self {
        Self {
            inner: inner.into_recognizer(),
            min: 1,
            max: None,
        }
    }

    pub fn bounded(
        inner: impl IntoRecognizer,
        min: usize,
        max: Option<usize>,
    ) -> Result<Self, LexerBuildError> {
        if let Some(max) = max
            && min > max
        {
            return Err(LexerBuildError::InvalidRepetition { min, max });
        }
        Ok(Self {
            inner: inner.into_recognizer(),
            min,
            max,
        })
    }
}

impl Recognizer for Repeated {
    fn recognize(&self, text: &str, offset: usize) -> Option<usize> {
        let mut index = offset;
        let mut count = 0usize;

        while let Some(end) = self.inner.recognize(text, index) {
            if end <= index {
                break;
            }
            if self.max == Some(count) {
                return None;
            }
            count += 1;
            index = end;
        }

        (count >= self.min).then_some(index)
    }
}
