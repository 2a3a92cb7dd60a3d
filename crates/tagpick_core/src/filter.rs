//! Search filter for the dropdown list

/// Case-insensitive substring filter over candidate labels
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchFilter {
    term: String,
    /// Lowercased copy of `term`
    needle: String,
}

impl SearchFilter {
    pub fn new(term: impl Into<String>) -> Self {
        let term = term.into();
        let needle = term.to_lowercase();
        Self { term, needle }
    }

    /// The term as typed
    pub fn term(&self) -> &str {
        &self.term
    }

    /// An empty term shows everything
    pub fn is_empty(&self) -> bool {
        self.term.is_empty()
    }

    /// Check if a label matches the term (trimmed, case-insensitive)
    pub fn matches(&self, label: &str) -> bool {
        if self.needle.is_empty() {
            return true;
        }
        label.trim().to_lowercase().contains(&self.needle)
    }

    /// Split labels into visible and hidden, keeping the input order
    pub fn partition<'a, I>(&self, labels: I) -> (Vec<&'a str>, Vec<&'a str>)
    where
        I: IntoIterator<Item = &'a str>,
    {
        labels.into_iter().partition(|label| self.matches(label))
    }
}
