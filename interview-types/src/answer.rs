use crate::Answers;

/// A single answer collected by an interview.
///
/// This is the value stored in `Answers` for each question that was not skipped.
#[derive(Debug, Clone, PartialEq)]
pub enum Answer {
    /// A string value (from `Str` questions).
    String(String),

    /// An integer value (from `Int` questions).
    Int(i64),

    /// A floating-point value (from `Float` questions).
    Float(f64),

    /// A boolean value (from `YesNo` questions).
    Bool(bool),

    /// An ordered sequence of values (from `Tuple` questions).
    List(Vec<Answer>),

    /// The answers of a nested interview.
    Map(Answers),
}

impl Answer {
    /// Try to get this value as a string reference.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get this value as an integer.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Try to get this value as a float.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Try to get this value as a bool.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Try to get this value as a list of answers.
    pub fn as_list(&self) -> Option<&[Answer]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    /// Try to get this value as nested answers.
    pub fn as_map(&self) -> Option<&Answers> {
        match self {
            Self::Map(answers) => Some(answers),
            _ => None,
        }
    }

    /// Whether the value counts as "set": non-empty text and collections,
    /// non-zero numbers and `true`.
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::String(s) => !s.is_empty(),
            Self::Int(i) => *i != 0,
            Self::Float(f) => *f != 0.0,
            Self::Bool(b) => *b,
            Self::List(items) => !items.is_empty(),
            Self::Map(answers) => !answers.is_empty(),
        }
    }

    /// Get the type name of this value for error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::String(_) => "String",
            Self::Int(_) => "Int",
            Self::Float(_) => "Float",
            Self::Bool(_) => "Bool",
            Self::List(_) => "List",
            Self::Map(_) => "Map",
        }
    }
}

impl From<String> for Answer {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<&str> for Answer {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<i64> for Answer {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<i32> for Answer {
    fn from(i: i32) -> Self {
        Self::Int(i64::from(i))
    }
}

impl From<f64> for Answer {
    fn from(f: f64) -> Self {
        Self::Float(f)
    }
}

impl From<bool> for Answer {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<Answers> for Answer {
    fn from(answers: Answers) -> Self {
        Self::Map(answers)
    }
}

impl<T: Into<Answer>> From<Vec<T>> for Answer {
    fn from(items: Vec<T>) -> Self {
        Self::List(items.into_iter().map(Into::into).collect())
    }
}
