//! Cross-origin allow-list parsing.

/// Origins permitted to call the API from a browser.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum AllowedOrigins {
    /// Any origin.
    #[default]
    Any,
    /// Only the listed origins.
    List(Vec<String>),
}

impl AllowedOrigins {
    /// Parse a comma-separated allow-list.
    ///
    /// Entries are trimmed and blanks dropped. An input with no entries left,
    /// or one containing `*`, allows any origin.
    pub fn parse(raw: &str) -> Self {
        Self::from_entries(raw.split(','))
    }

    /// Build an allow-list from individual entries, applying the same rules as [`Self::parse`].
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let origins: Vec<String> = entries
            .into_iter()
            .map(|entry| entry.as_ref().trim().to_string())
            .filter(|entry| !entry.is_empty())
            .collect();

        if origins.is_empty() || origins.iter().any(|origin| origin == "*") {
            Self::Any
        } else {
            Self::List(origins)
        }
    }
}

impl std::fmt::Display for AllowedOrigins {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Any => write!(f, "*"),
            Self::List(origins) => write!(f, "{}", origins.join(", ")),
        }
    }
}
