use serde::Deserialize;

use crate::domain::user::{UpdateUserRole, UserRole};
use crate::forms::FormError;

#[derive(Debug, Deserialize)]
pub struct UserRoleForm {
    pub role: String,
}

impl TryFrom<UserRoleForm> for UpdateUserRole {
    type Error = FormError;

    fn try_from(form: UserRoleForm) -> Result<Self, Self::Error> {
        let role = UserRole::parse(&form.role).ok_or(FormError::Invalid("role"))?;
        Ok(Self { role })
    }
}
