//! Record keys.
//!
//! The key strings are the persisted names, so they must never change.

use std::fmt;

/// One of the five named records that make up the application state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StateKey {
    Categories,
    Products,
    Sales,
    Notifications,
    Settings,
}

impl StateKey {
    pub const ALL: [StateKey; 5] = [
        StateKey::Categories,
        StateKey::Products,
        StateKey::Sales,
        StateKey::Notifications,
        StateKey::Settings,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            StateKey::Categories => "pos-categories",
            StateKey::Products => "pos-products",
            StateKey::Sales => "pos-sales",
            StateKey::Notifications => "pos-notifications",
            StateKey::Settings => "pos-settings",
        }
    }
}

impl fmt::Display for StateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
