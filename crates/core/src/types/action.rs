//! User activity actions recorded in the `logs` collection.

use serde::{Deserialize, Serialize};

/// Kind of user activity stored on a log entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogAction {
    ViewProduct,
    AddToCart,
    Checkout,
    Login,
}

impl LogAction {
    /// Every action, used by the generator to pick one uniformly.
    pub const ALL: [Self; 4] = [
        Self::ViewProduct,
        Self::AddToCart,
        Self::Checkout,
        Self::Login,
    ];

    /// Wire name stored in the `action` field.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ViewProduct => "view_product",
            Self::AddToCart => "add_to_cart",
            Self::Checkout => "checkout",
            Self::Login => "login",
        }
    }
}

impl std::fmt::Display for LogAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for LogAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "view_product" => Ok(Self::ViewProduct),
            "add_to_cart" => Ok(Self::AddToCart),
            "checkout" => Ok(Self::Checkout),
            "login" => Ok(Self::Login),
            _ => Err(format!("invalid log action: {s}")),
        }
    }
}
