use serde::{Deserialize, Serialize};
use std::fmt;

/// A role in the identity system, keyed by `K`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct IdentityRole<K>
where
    K: PartialEq,
{
    pub id: K,
    pub name: Option<String>,
}

impl<K> IdentityRole<K>
where
    K: PartialEq + Default,
{
    pub fn new() -> Self {
        Self {
            id: K::default(),
            name: None,
        }
    }

    pub fn with_name(name: impl Into<String>) -> Self {
        Self {
            id: K::default(),
            name: Some(name.into()),
        }
    }
}

impl<K: PartialEq> fmt::Display for IdentityRole<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name.as_deref().unwrap_or_default())
    }
}
