//! Per-user settings used by the panel's checkbox options and text inputs.
//!
//! Storage itself belongs to the host. The panel only needs string get/set/remove by key;
//! [`MemorySettings`] is an in-process implementation.

use std::collections::BTreeMap;

/// Key/value storage for user settings.
pub trait SettingsStore {
    /// Stored value for `key`.
    fn get(&self, key: &str) -> Option<String>;
    /// Store `value` under `key`.
    fn set(&mut self, key: &str, value: &str);
    /// Remove `key`.
    fn remove(&mut self, key: &str);
}

/// In-memory settings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemorySettings {
    values: BTreeMap<String, String>,
}

impl MemorySettings {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl SettingsStore for MemorySettings {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
    }

    fn remove(&mut self, key: &str) {
        self.values.remove(key);
    }
}

/// Callback invoked after a checkbox option changes.
///
/// Receives whether the option's flag key is present in the store after the change.
pub type OptionChanged = Box<dyn FnMut(bool)>;

/// A checkbox bound to a settings flag.
pub struct SettingOption {
    /// Settings key; also the checkbox id.
    pub flag: String,
    /// Bold label.
    pub display: String,
    /// Explanation shown after the label.
    pub blurb: String,
    /// Keep label and blurb on one line.
    pub one_line: bool,
    /// Inverted logic: an absent key means enabled, checking removes the key.
    pub empty_implies_enabled: bool,
    /// Called after every change.
    pub on_change: Option<OptionChanged>,
}

impl SettingOption {
    /// An option for `flag`.
    pub fn new(flag: impl Into<String>, display: impl Into<String>, blurb: impl Into<String>) -> Self {
        Self {
            flag: flag.into(),
            display: display.into(),
            blurb: blurb.into(),
            one_line: false,
            empty_implies_enabled: false,
            on_change: None,
        }
    }

    /// Use inverted logic.
    pub fn enabled_by_default(mut self) -> Self {
        self.empty_implies_enabled = true;
        self
    }

    /// Keep label and blurb on one line.
    pub fn one_line(mut self) -> Self {
        self.one_line = true;
        self
    }

    /// Set the change callback.
    pub fn on_change(mut self, callback: impl FnMut(bool) + 'static) -> Self {
        self.on_change = Some(Box::new(callback));
        self
    }

    /// Whether the checkbox shows as checked given the stored value.
    pub fn is_checked(&self, store: &dyn SettingsStore) -> bool {
        let stored = store.get(&self.flag).is_some();
        if self.empty_implies_enabled {
            !stored
        } else {
            stored
        }
    }

    /// Persist a checkbox change and return whether the flag key is now stored.
    pub fn apply(&self, store: &mut dyn SettingsStore, checked: bool) -> bool {
        // Inverted options store the key when the user turns them off.
        if checked != self.empty_implies_enabled {
            store.set(&self.flag, "true");
        } else {
            store.remove(&self.flag);
        }
        store.get(&self.flag).is_some()
    }
}

impl std::fmt::Debug for SettingOption {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SettingOption")
            .field("flag", &self.flag)
            .field("display", &self.display)
            .field("one_line", &self.one_line)
            .field("empty_implies_enabled", &self.empty_implies_enabled)
            .finish_non_exhaustive()
    }
}

/// Layout of an option list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OptionListStyle {
    /// Spaced-out items.
    Separated,
    /// Compact items.
    #[default]
    Tight,
    /// Compact items with label and blurb forced onto one line.
    Rows,
}

/// Predicate deciding whether a text input's initial value is acceptable.
pub type InputValidator = Box<dyn Fn(&str) -> bool>;

/// Callback invoked on every text input change with the raw value.
pub type InputChanged = Box<dyn FnMut(&str)>;

/// Configuration of a text input.
pub struct TextInputConfig {
    /// Element id; also part of the storage key.
    pub id: String,
    /// Placeholder text.
    pub placeholder: String,
    /// Initial value. Takes precedence over a stored value.
    pub value: Option<String>,
    /// Persist the (trimmed) value and restore it next time.
    pub keep_value_across_reloads: bool,
    /// Marks the input `good` or `bad` based on its initial value.
    pub is_enabled: Option<InputValidator>,
    /// Called on every change.
    pub on_changed: Option<InputChanged>,
}

impl TextInputConfig {
    /// An input with `id` and `placeholder`.
    pub fn new(id: impl Into<String>, placeholder: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            placeholder: placeholder.into(),
            value: None,
            keep_value_across_reloads: false,
            is_enabled: None,
            on_changed: None,
        }
    }

    /// Set the initial value.
    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Persist the value in the settings store.
    pub fn keep_value_across_reloads(mut self) -> Self {
        self.keep_value_across_reloads = true;
        self
    }

    /// Set the validator.
    pub fn is_enabled(mut self, validator: impl Fn(&str) -> bool + 'static) -> Self {
        self.is_enabled = Some(Box::new(validator));
        self
    }

    /// Set the change callback.
    pub fn on_changed(mut self, callback: impl FnMut(&str) + 'static) -> Self {
        self.on_changed = Some(Box::new(callback));
        self
    }
}

impl std::fmt::Debug for TextInputConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextInputConfig")
            .field("id", &self.id)
            .field("placeholder", &self.placeholder)
            .field("value", &self.value)
            .field("keep_value_across_reloads", &self.keep_value_across_reloads)
            .finish_non_exhaustive()
    }
}
