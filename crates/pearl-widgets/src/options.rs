//! Option list with case-insensitive filtering.

use crate::error::ConfigError;
use std::collections::HashSet;

/// One choice of a [`Select`](crate::select::Select).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    /// Identifier reported to the caller on commit. Unique within a list.
    pub value: String,
    /// Text shown in the list and the trigger.
    pub label: String,
    /// Longer text searched by autocomplete instead of the label, e.g. a
    /// full country name behind a short code.
    pub verbose: Option<String>,
    /// Short glyph shown before the label, or alone in concise mode.
    pub icon: Option<String>,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
            verbose: None,
            icon: None,
        }
    }

    pub fn with_verbose(mut self, verbose: impl Into<String>) -> Self {
        self.verbose = Some(verbose.into());
        self
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    /// The text autocomplete matches against.
    pub fn search_text(&self) -> &str {
        self.verbose.as_deref().unwrap_or(&self.label)
    }

    fn matches(&self, needle_lower: &str) -> bool {
        self.search_text().to_lowercase().contains(needle_lower)
    }
}

/// The full option list plus the subsequence currently eligible for
/// navigation and display.
///
/// The eligible subsequence keeps the original order and is the whole list
/// whenever the filter text is empty.
#[derive(Debug, Clone)]
pub struct OptionStore {
    all: Vec<SelectOption>,
    eligible: Vec<usize>,
}

impl OptionStore {
    /// Validate and take ownership of `options`.
    pub fn new(options: Vec<SelectOption>) -> Result<Self, ConfigError> {
        let mut seen = HashSet::new();
        for (index, opt) in options.iter().enumerate() {
            if opt.value.is_empty() {
                return Err(ConfigError::MissingValue { index });
            }
            if opt.label.is_empty() {
                return Err(ConfigError::MissingLabel { index });
            }
            if !seen.insert(opt.value.as_str()) {
                return Err(ConfigError::DuplicateValue(opt.value.clone()));
            }
        }
        let eligible = (0..options.len()).collect();
        Ok(Self {
            all: options,
            eligible,
        })
    }

    /// Every option, in caller order.
    pub fn all(&self) -> &[SelectOption] {
        &self.all
    }

    /// Number of eligible options.
    pub fn len(&self) -> usize {
        self.eligible.len()
    }

    pub fn is_empty(&self) -> bool {
        self.eligible.is_empty()
    }

    pub fn is_filtered(&self) -> bool {
        self.eligible.len() != self.all.len()
    }

    /// Eligible options, in caller order.
    pub fn iter(&self) -> impl Iterator<Item = &SelectOption> {
        self.eligible.iter().map(|&i| &self.all[i])
    }

    /// The eligible option at `position`.
    pub fn get(&self, position: usize) -> Option<&SelectOption> {
        self.eligible.get(position).map(|&i| &self.all[i])
    }

    /// Position of `value` among the eligible options.
    pub fn position(&self, value: &str) -> Option<usize> {
        self.iter().position(|o| o.value == value)
    }

    /// Look `value` up in the full list, ignoring the filter.
    pub fn find(&self, value: &str) -> Option<&SelectOption> {
        self.all.iter().find(|o| o.value == value)
    }

    /// Narrow the eligible options to those whose search text contains
    /// `text`, ignoring case. Empty text restores the full list.
    pub fn apply_filter(&mut self, text: &str) {
        if text.is_empty() {
            self.reset();
            return;
        }
        let needle = text.to_lowercase();
        self.eligible = self
            .all
            .iter()
            .enumerate()
            .filter(|(_, o)| o.matches(&needle))
            .map(|(i, _)| i)
            .collect();
        tracing::trace!(filter = text, matches = self.eligible.len(), "filter applied");
    }

    /// Make every option eligible again.
    pub fn reset(&mut self) {
        self.eligible = (0..self.all.len()).collect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fruit() -> OptionStore {
        OptionStore::new(vec![
            SelectOption::new("a", "Apple"),
            SelectOption::new("b", "Banana"),
            SelectOption::new("c", "Cherry"),
        ])
        .unwrap()
    }

    fn values(store: &OptionStore) -> Vec<&str> {
        store.iter().map(|o| o.value.as_str()).collect()
    }

    #[test]
    fn empty_filter_is_full_list_in_order() {
        let mut store = fruit();
        store.apply_filter("an");
        store.apply_filter("");
        assert_eq!(values(&store), vec!["a", "b", "c"]);
        assert!(!store.is_filtered());
    }

    #[test]
    fn filter_is_case_insensitive() {
        let mut store = OptionStore::new(vec![SelectOption::new("x", "Abacus")]).unwrap();
        store.apply_filter("AB");
        assert_eq!(store.len(), 1);
        store.apply_filter("ab");
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn filter_keeps_relative_order() {
        let mut store = fruit();
        store.apply_filter("e");
        assert_eq!(values(&store), vec!["a", "c"]);
        assert_eq!(store.position("c"), Some(1));
        assert_eq!(store.position("b"), None);
        assert_eq!(store.find("b").map(|o| o.label.as_str()), Some("Banana"));
    }

    #[test]
    fn verbose_label_is_searched_instead() {
        let mut store = OptionStore::new(vec![
            SelectOption::new("de", "DE").with_verbose("Germany"),
            SelectOption::new("fr", "FR").with_verbose("France"),
        ])
        .unwrap();
        store.apply_filter("germ");
        assert_eq!(values(&store), vec!["de"]);
        store.apply_filter("DE");
        assert!(store.is_empty());
    }

    #[test]
    fn rejects_bad_options() {
        assert_eq!(
            OptionStore::new(vec![SelectOption::new("", "Empty")]).unwrap_err(),
            ConfigError::MissingValue { index: 0 }
        );
        assert_eq!(
            OptionStore::new(vec![SelectOption::new("a", "A"), SelectOption::new("b", "")])
                .unwrap_err(),
            ConfigError::MissingLabel { index: 1 }
        );
        assert_eq!(
            OptionStore::new(vec![SelectOption::new("a", "A"), SelectOption::new("a", "B")])
                .unwrap_err(),
            ConfigError::DuplicateValue("a".into())
        );
    }
}
