//! Argument lists grouped by occurrence.
//!
//! Every time an option is named on the command line a new occurrence begins.
//! Arity rules are checked per occurrence, so `--name a --name b` holds two
//! single-argument occurrences rather than one two-argument list.

/// The raw argument strings consumed by one applied option.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArgumentList {
    values: Vec<String>,
    /// Start index into `values` of each occurrence. Never empty.
    starts: Vec<usize>,
}

impl Default for ArgumentList {
    fn default() -> Self {
        Self::new()
    }
}

impl ArgumentList {
    /// Creates an empty list with a single open occurrence.
    #[must_use]
    pub fn new() -> Self {
        Self {
            values: Vec::new(),
            starts: vec![0],
        }
    }

    /// Creates a list holding one occurrence with the given values.
    #[must_use]
    pub fn from_values<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            values: values.into_iter().map(Into::into).collect(),
            starts: vec![0],
        }
    }

    /// All values, across occurrences, in the order they were consumed.
    #[must_use]
    pub fn values(&self) -> &[String] {
        &self.values
    }

    /// Number of values across all occurrences.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if no value was consumed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Number of occurrences (always at least one).
    #[must_use]
    pub fn occurrence_count(&self) -> usize {
        self.starts.len()
    }

    /// Values of the most recent occurrence.
    #[must_use]
    pub fn current_occurrence(&self) -> &[String] {
        let start = self.starts.last().copied().unwrap_or(0);
        &self.values[start..]
    }

    /// Iterates over the values of each occurrence in order.
    pub fn occurrences(&self) -> impl Iterator<Item = &[String]> + '_ {
        self.starts.iter().enumerate().map(|(i, &start)| {
            let end = self.starts.get(i + 1).copied().unwrap_or(self.values.len());
            &self.values[start..end]
        })
    }

    /// Begins a new, empty occurrence.
    pub fn start_occurrence(&mut self) {
        self.starts.push(self.values.len());
    }

    /// Appends a value to the current occurrence.
    pub fn push(&mut self, value: impl Into<String>) {
        self.values.push(value.into());
    }

    /// Returns a copy of this list with `value` appended to the current occurrence.
    #[must_use]
    pub fn with(&self, value: impl Into<String>) -> Self {
        let mut next = self.clone();
        next.push(value);
        next
    }
}
