//! Login and registration forms.

use serde::Deserialize;
use validator::Validate;

use crate::domain::auth::{Credentials, Registration};
use crate::domain::types::{Password, PhoneNumber, UserEmail, UserName};
use crate::domain::user::UserRole;
use crate::forms::FormError;

#[derive(Deserialize, Validate)]
pub struct LoginForm {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

impl TryFrom<LoginForm> for Credentials {
    type Error = FormError;

    fn try_from(form: LoginForm) -> Result<Self, Self::Error> {
        form.validate()?;
        Ok(Self {
            email: UserEmail::new(form.email).map_err(|_| FormError::InvalidEmail)?,
            password: Password::new(form.password).map_err(|_| FormError::InvalidPassword)?,
        })
    }
}

#[derive(Deserialize, Validate)]
pub struct RegisterForm {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    pub password: String,
    pub password_repeat: String,
    #[serde(default)]
    pub phone_number: String,
}

impl TryFrom<RegisterForm> for Registration {
    type Error = FormError;

    fn try_from(form: RegisterForm) -> Result<Self, Self::Error> {
        form.validate()?;
        if form.password != form.password_repeat {
            return Err(FormError::PasswordMismatch);
        }

        let password = Password::new(form.password).map_err(|_| FormError::InvalidPassword)?;
        let phone_number = match form.phone_number.trim() {
            "" => None,
            phone => Some(PhoneNumber::new(phone).map_err(|_| FormError::InvalidPhoneNumber)?),
        };

        Ok(Self {
            email: UserEmail::new(form.email).map_err(|_| FormError::InvalidEmail)?,
            name: UserName::new(form.name).map_err(|_| FormError::InvalidName)?,
            password_repeat: password.clone(),
            password,
            // Self-registration always creates customer accounts.
            role: UserRole::User,
            profile_picture_url: None,
            phone_number,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn register_form(password_repeat: &str) -> RegisterForm {
        RegisterForm {
            name: " Ana ".into(),
            email: "Ana@Example.com".into(),
            password: "secret1".into(),
            password_repeat: password_repeat.into(),
            phone_number: String::new(),
        }
    }

    #[test]
    fn registration_normalizes_fields() {
        let registration = Registration::try_from(register_form("secret1")).unwrap();
        assert_eq!(registration.email.as_str(), "ana@example.com");
        assert_eq!(registration.name.as_str(), "Ana");
        assert_eq!(registration.role, UserRole::User);
        assert!(registration.phone_number.is_none());
    }

    #[test]
    fn registration_rejects_mismatched_passwords() {
        assert!(matches!(
            Registration::try_from(register_form("secret2")),
            Err(FormError::PasswordMismatch)
        ));
    }

    #[test]
    fn login_rejects_bad_email() {
        let form = LoginForm {
            email: "nope".into(),
            password: "secret1".into(),
        };
        assert!(matches!(
            Credentials::try_from(form),
            Err(FormError::Validation(_))
        ));
    }
}
