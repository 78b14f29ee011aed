use crate::Answer;

/// Error type for answer access operations.
#[derive(Debug, thiserror::Error)]
pub enum AnswerError {
    #[error("Missing answer for key: {0}")]
    MissingKey(String),

    #[error("Type mismatch for key '{key}': expected {expected}, got {actual}")]
    TypeMismatch {
        key: String,
        expected: &'static str,
        actual: &'static str,
    },
}

/// Answers collected by an interview, keyed by question name.
///
/// Keys keep the order in which they were first inserted, which is the
/// declaration order of the questions that produced them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Answers {
    entries: Vec<(String, Answer)>,
}

impl Answers {
    /// Create a new empty answers collection.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Insert an answer under the given name.
    ///
    /// Replacing an existing key keeps its original position.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Answer>) {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(key, _)| *key == name) {
            Some((_, slot)) => *slot = value,
            None => self.entries.push((name, value)),
        }
    }

    /// Get the answer stored under the given name.
    pub fn get(&self, name: &str) -> Option<&Answer> {
        self.entries
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
    }

    /// Check if an answer exists under the given name.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Remove the answer stored under the given name.
    pub fn remove(&mut self, name: &str) -> Option<Answer> {
        let index = self.entries.iter().position(|(key, _)| key == name)?;
        Some(self.entries.remove(index).1)
    }

    /// Iterate over the names in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    /// Iterate over name-answer pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Answer)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }

    /// Get the number of answers.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if there are no answers.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn require(&self, name: &str) -> Result<&Answer, AnswerError> {
        self.get(name)
            .ok_or_else(|| AnswerError::MissingKey(name.to_string()))
    }

    fn mismatch(name: &str, expected: &'static str, actual: &Answer) -> AnswerError {
        AnswerError::TypeMismatch {
            key: name.to_string(),
            expected,
            actual: actual.type_name(),
        }
    }

    // === Convenience accessors ===

    /// Get a string answer.
    pub fn get_string(&self, name: &str) -> Result<&str, AnswerError> {
        match self.require(name)? {
            Answer::String(s) => Ok(s),
            other => Err(Self::mismatch(name, "String", other)),
        }
    }

    /// Get an integer answer.
    pub fn get_int(&self, name: &str) -> Result<i64, AnswerError> {
        match self.require(name)? {
            Answer::Int(i) => Ok(*i),
            other => Err(Self::mismatch(name, "Int", other)),
        }
    }

    /// Get a float answer.
    pub fn get_float(&self, name: &str) -> Result<f64, AnswerError> {
        match self.require(name)? {
            Answer::Float(f) => Ok(*f),
            other => Err(Self::mismatch(name, "Float", other)),
        }
    }

    /// Get a boolean answer.
    pub fn get_bool(&self, name: &str) -> Result<bool, AnswerError> {
        match self.require(name)? {
            Answer::Bool(b) => Ok(*b),
            other => Err(Self::mismatch(name, "Bool", other)),
        }
    }

    /// Get a list answer.
    pub fn get_list(&self, name: &str) -> Result<&[Answer], AnswerError> {
        match self.require(name)? {
            Answer::List(items) => Ok(items),
            other => Err(Self::mismatch(name, "List", other)),
        }
    }

    /// Get the answers of a nested interview.
    pub fn get_map(&self, name: &str) -> Result<&Answers, AnswerError> {
        match self.require(name)? {
            Answer::Map(answers) => Ok(answers),
            other => Err(Self::mismatch(name, "Map", other)),
        }
    }
}

impl IntoIterator for Answers {
    type Item = (String, Answer);
    type IntoIter = std::vec::IntoIter<(String, Answer)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<K: Into<String>, V: Into<Answer>> FromIterator<(K, V)> for Answers {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut answers = Answers::new();
        for (name, value) in iter {
            answers.insert(name, value);
        }
        answers
    }
}
