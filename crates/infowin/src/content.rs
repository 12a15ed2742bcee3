#![forbid(unsafe_code)]

//! Default popup content: a title with an optional snippet below it.

/// Text shown by the default popup view.
///
/// Both fields are optional, but a default popup needs at least one
/// non-empty field to be worth opening; see [`PopupContent::is_renderable`].
/// Empty strings count as absent.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PopupContent {
    /// Bold headline, usually the marker's name.
    pub title: Option<String>,
    /// Secondary text below the title.
    pub snippet: Option<String>,
}

impl PopupContent {
    /// Create content with a title only.
    pub fn with_title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            snippet: None,
        }
    }

    /// Set the snippet.
    pub fn snippet(mut self, snippet: impl Into<String>) -> Self {
        self.snippet = Some(snippet.into());
        self
    }

    /// The title, if present and non-empty.
    pub fn title_text(&self) -> Option<&str> {
        self.title.as_deref().filter(|s| !s.is_empty())
    }

    /// The snippet, if present and non-empty.
    pub fn snippet_text(&self) -> Option<&str> {
        self.snippet.as_deref().filter(|s| !s.is_empty())
    }

    /// Whether there is anything to show at all.
    pub fn is_renderable(&self) -> bool {
        self.title_text().is_some() || self.snippet_text().is_some()
    }
}
