//! Names of the collections the dashboard manages.

use serde::{Deserialize, Serialize};

/// One of the three collections in the e-commerce database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CollectionName {
    /// Product catalog: name, category, price, stock.
    #[default]
    Products,
    /// Customers: name, email, state.
    Users,
    /// User activity: timestamp, user, action, product.
    Logs,
}

impl CollectionName {
    /// All collections, in the order the selector offers them.
    pub const ALL: [Self; 3] = [Self::Products, Self::Users, Self::Logs];

    /// Collection name as stored in the database.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Products => "products",
            Self::Users => "users",
            Self::Logs => "logs",
        }
    }
}

impl std::fmt::Display for CollectionName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for CollectionName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "products" => Ok(Self::Products),
            "users" => Ok(Self::Users),
            "logs" => Ok(Self::Logs),
            _ => Err(format!("unknown collection: {s}")),
        }
    }
}
