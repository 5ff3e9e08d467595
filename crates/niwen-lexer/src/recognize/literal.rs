use super::Recognizer;

/// Exact prefix match of a fixed string.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Literal {
    text: String,
}

impl Literal {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

impl Recognizer for Literal {
    fn recognize(&self, text: &str, offset: usize) -> Option<usize> {
        let rest = text.get(offset..)?;
        rest.starts_with(self.text.as_str())
            .then(|| offset + self.text.len())
    }
}
