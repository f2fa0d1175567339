use std::borrow::Cow;
use std::fmt::{Display, Formatter};

use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::types::{UserId, null_as_default};
use crate::listing::{FilterField, Filterable};

/// Role attached to every account by the remote API.
///
/// Decoding is case-insensitive; any role other than `admin` is treated as
/// a plain `user`.
#[derive(Clone, Copy, Debug, Default, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    #[default]
    User,
}

impl UserRole {
    pub const ALL: [UserRole; 2] = [UserRole::Admin, UserRole::User];

    pub fn as_str(self) -> &'static str {
        match self {
            UserRole::Admin => "admin",
            UserRole::User => "user",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|role| role.as_str().eq_ignore_ascii_case(value.trim()))
    }
}

impl<'de> Deserialize<'de> for UserRole {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw
            .as_deref()
            .and_then(UserRole::parse)
            .unwrap_or_default())
    }
}

impl Display for UserRole {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Account as returned by `user` and `all-user`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub email: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub role: UserRole,
    #[serde(default, deserialize_with = "null_as_default")]
    pub profile_picture_url: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub phone_number: Option<String>,
}

/// Body of `update-user-role/{id}`.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct UpdateUserRole {
    pub role: UserRole,
}

/// Dropdown targets the role; search text is matched against name, email
/// and id at once.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum UserField {
    #[default]
    Role,
    Name,
    Email,
    Id,
}

impl UserField {
    pub const SEARCHED: &'static [UserField] = &[UserField::Name, UserField::Email, UserField::Id];
}

impl FilterField for UserField {
    const ALL: &'static [Self] = &[UserField::Role];

    fn as_str(self) -> &'static str {
        match self {
            UserField::Role => "role",
            UserField::Name => "name",
            UserField::Email => "email",
            UserField::Id => "id",
        }
    }

    fn label(self) -> &'static str {
        match self {
            UserField::Role => "Role",
            UserField::Name => "Name",
            UserField::Email => "Email",
            UserField::Id => "ID",
        }
    }
}

impl Filterable for User {
    type Field = UserField;

    fn field_value(&self, field: UserField) -> Option<Cow<'_, str>> {
        let value = match field {
            UserField::Role => self.role.as_str(),
            UserField::Name => self.name.as_str(),
            UserField::Email => self.email.as_str(),
            UserField::Id => self.id.as_str(),
        };
        Some(Cow::Borrowed(value))
    }
}
