//! Interactive widgets for **pearl**.
//!
//! Every widget implements [`pearl_core::Component`] and is embedded in a
//! [`pearl_core::Model`] the usual way: wrap its messages in a parent
//! variant, forward key events while it has focus, lift its commands with
//! [`Command::map`](pearl_core::Command::map) and merge its subscriptions
//! into the parent's.
//!
//! # Widgets
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`select`] | Dropdown select with autocomplete, menu mode and outside-click dismissal |
//! | [`modal`] | Dialog with a caller-controlled open flag and busy refusal |
//! | [`menu`] | Inline or slideout navigation menu |
//! | [`text_input`] | Text field with floating label, description and error line |
//! | [`activity`] | Spinning ring busy indicator |
//!
//! # Utilities
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`options`] | Option list with case-insensitive filtering |
//! | [`selection`] | Non-wrapping cursor and scroll window |
//! | [`focus`] | [`FocusGroup`](focus::FocusGroup) and the select's focus targets |
//! | [`key`] | Key bindings with exact modifier matching |
//! | [`overlay`] | Anchored and centered overlay placement |
//! | [`text`] | Unicode-aware width and truncation |
//! | [`error`] | Configuration errors |

pub mod activity;
pub mod error;
pub mod focus;
pub mod key;
pub mod menu;
pub mod modal;
pub mod options;
pub mod overlay;
pub mod select;
pub mod selection;
pub mod text;
pub mod text_input;

pub use error::ConfigError;
pub use options::SelectOption;
pub use select::{Select, SelectConfig};
