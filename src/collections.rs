//! Ordered, token-indexed collections of switches and options.

use crate::definition::{OptionDef, SwitchDef};

/// A descriptor addressed by a long token and an optional short token.
pub trait Flag {
    fn switch(&self) -> &str;

    fn switch_short(&self) -> Option<&str>;

    /// Check if this descriptor answers to the given token.
    fn matches(&self, token: &str) -> bool {
        token == self.switch() || self.switch_short() == Some(token)
    }
}

impl Flag for SwitchDef {
    fn switch(&self) -> &str {
        &self.switch
    }

    fn switch_short(&self) -> Option<&str> {
        self.switch_short.as_deref()
    }
}

impl Flag for OptionDef {
    fn switch(&self) -> &str {
        &self.switch
    }

    fn switch_short(&self) -> Option<&str> {
        self.switch_short.as_deref()
    }
}

/// Whether a token looks like a switch or option, regardless of what is declared.
///
/// A lone `-` is positional (the usual "read stdin" placeholder).
pub fn is_switch(token: &str) -> bool {
    token.len() > 1 && token.starts_with('-')
}

/// Declaration-ordered set of flags.
#[derive(Debug, Clone)]
pub struct FlagSet<T> {
    items: Vec<T>,
}

/// Declared switches.
pub type Switches = FlagSet<SwitchDef>;
/// Declared options.
pub type Options = FlagSet<OptionDef>;

impl<T> Default for FlagSet<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T: Flag> FlagSet<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, item: T) {
        self.items.push(item);
    }

    /// Look up by long or short token. A later declaration shadows an earlier one.
    pub fn find(&self, token: &str) -> Option<&T> {
        self.items.iter().rev().find(|item| item.matches(token))
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl FlagSet<OptionDef> {
    /// Options that must be supplied on the command line.
    pub fn mandatory(&self) -> Vec<&OptionDef> {
        self.items.iter().filter(|o| o.mandatory).collect()
    }

    /// Options with a declared default.
    pub fn defaults(&self) -> impl Iterator<Item = &OptionDef> {
        self.items.iter().filter(|o| o.has_default())
    }
}

impl<'a, T> IntoIterator for &'a FlagSet<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
