use super::Recognizer;

/// Single character whose code point lies in `start..=end`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CharRange {
    start: char,
    end: char,
}

impl CharRange {
    pub const fn new(start: char, end: char) -> Self {
        Self { start, end }
    }

    pub const fn single(c: char) -> Self {
        Self { start: c, end: c }
    }

    #[inline]
    pub fn contains(&self, c: char) -> bool {
        (self.start..=self.end).contains(&c)
    }
}

impl Recognizer for CharRange {
    fn recognize(&self, text: &str, offset: usize) -> Option<usize> {
        let c = text.get(offset..)?.chars().next()?;
        self.contains(c).then(|| offset + c.len_utf8())
    }
}
