//! Configuration errors reported by widget constructors.

/// A widget was configured in a way it cannot work with.
///
/// These are caller bugs: constructors refuse to build the widget instead of
/// rendering something half-working.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("autocomplete requires a non-empty option list")]
    AutocompleteWithoutOptions,
    #[error("menu mode requires toggler text for the trigger")]
    MenuWithoutToggler,
    #[error("option {index} has an empty value")]
    MissingValue { index: usize },
    #[error("option {index} has an empty label")]
    MissingLabel { index: usize },
    #[error("option value {0:?} appears more than once")]
    DuplicateValue(String),
    #[error("max_items must be at least 1")]
    ZeroMaxItems,
    #[error("a menu needs at least one item")]
    EmptyMenu,
}
