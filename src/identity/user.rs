use serde::{Deserialize, Serialize};
use std::fmt;

/// A user in the identity system.
///
/// `K` is the primary key type; it only needs to support equality.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct IdentityUser<K>
where
    K: PartialEq,
{
    pub id: K,
    pub user_name: Option<String>,
    /// Salted and hashed representation of the password.
    pub password: Option<String>,
    pub name: Option<String>,
}

impl<K> IdentityUser<K>
where
    K: PartialEq + Default,
{
    pub fn new() -> Self {
        Self {
            id: K::default(),
            user_name: None,
            password: None,
            name: None,
        }
    }

    pub fn with_user_name(user_name: impl Into<String>) -> Self {
        Self {
            user_name: Some(user_name.into()),
            ..Self::new()
        }
    }
}

impl<K: PartialEq> fmt::Display for IdentityUser<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.user_name.as_deref().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn displays_user_name() {
        let user: IdentityUser<i64> = IdentityUser::with_user_name("alice");
        assert_eq!(user.to_string(), "alice");
        assert_eq!(user.id, 0);
        assert!(user.password.is_none());
    }

    #[test]
    fn displays_empty_until_user_name_is_set() {
        let mut user: IdentityUser<String> = IdentityUser::new();
        assert_eq!(user.to_string(), "");

        user.user_name = Some("bob".to_string());
        user.id = "u-1".to_string();
        assert_eq!(format!("{user}"), "bob");
    }

    #[test]
    fn name_does_not_affect_display() {
        let mut user: IdentityUser<u32> = IdentityUser::with_user_name("carol");
        user.name = Some("Carol Danvers".to_string());
        assert_eq!(user.to_string(), "carol");
    }
}
