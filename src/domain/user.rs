use crate::domain::error::DomainError;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError, ValidationErrors};

pub type UserId = i32;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub surname: String,
    pub email: String,
    pub password: String,
}

/// A user that has not been stored yet and therefore has no id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub name: String,
    pub surname: String,
    pub email: String,
    pub password: String,
}

impl NewUser {
    pub fn with_id(self, id: UserId) -> User {
        User {
            id,
            name: self.name,
            surname: self.surname,
            email: self.email,
            password: self.password,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateUser {
    #[validate(custom(function = "not_blank", message = "must not be blank"))]
    pub name: String,
    #[validate(custom(function = "not_blank", message = "must not be blank"))]
    pub surname: String,
    #[validate(
        custom(function = "not_blank", message = "must not be blank"),
        email(message = "must be a well-formed email address")
    )]
    pub email: String,
    #[validate(custom(function = "not_blank", message = "must not be blank"))]
    pub password: String,
}

impl CreateUser {
    const FIELDS: [&'static str; 4] = ["name", "surname", "email", "password"];

    pub fn check(&self) -> Result<(), DomainError> {
        self.validate()
            .map_err(|errors| to_domain_error(&errors, &Self::FIELDS))
    }
}

impl From<CreateUser> for NewUser {
    fn from(req: CreateUser) -> Self {
        NewUser {
            name: req.name,
            surname: req.surname,
            email: req.email,
            password: req.password,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateUser {
    #[validate(custom(function = "not_blank", message = "must not be blank"))]
    pub name: String,
    #[validate(custom(function = "not_blank", message = "must not be blank"))]
    pub surname: String,
}

impl UpdateUser {
    const FIELDS: [&'static str; 2] = ["name", "surname"];

    pub fn check(&self) -> Result<(), DomainError> {
        self.validate()
            .map_err(|errors| to_domain_error(&errors, &Self::FIELDS))
    }

    /// Applies the new names; email and password are never touched here.
    pub fn apply_to(self, user: &mut User) {
        user.name = self.name;
        user.surname = self.surname;
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

/// Reports the first failing rule of the first failing field, walking
/// `fields` in declaration order so the message is stable.
fn to_domain_error(errors: &ValidationErrors, fields: &[&str]) -> DomainError {
    let field_errors = errors.field_errors();
    let message = fields
        .iter()
        .find_map(|field| {
            let first = field_errors.get(*field)?.first()?;
            let reason = first
                .message
                .as_deref()
                .map(str::to_string)
                .unwrap_or_else(|| first.code.to_string());
            Some(format!("{field} {reason}"))
        })
        .unwrap_or_else(|| errors.to_string());
    DomainError::Validation(message)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_request(name: &str, surname: &str, email: &str, password: &str) -> CreateUser {
        CreateUser {
            name: name.to_string(),
            surname: surname.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[test]
    fn test_well_formed_emails_pass_create_validation() {
        for email in [
            "john@example.com",
            "john.doe@example.com",
            "j+tag@sub.example.co.uk",
            "x_y-z@my-host.org",
            "john@[127.0.0.1]",
        ] {
            let req = create_request("John", "Doe", email, "pw");
            assert!(req.check().is_ok(), "{email} should be accepted");
        }
    }

    #[test]
    fn test_malformed_emails_fail_create_validation() {
        for email in [
            "plainaddress",
            "@example.com",
            "john@",
            "john doe@example.com",
            "john@example..com",
            "john@-example.com",
        ] {
            let req = create_request("John", "Doe", email, "pw");
            assert_eq!(
                req.check(),
                Err(DomainError::Validation(
                    "email must be a well-formed email address".to_string()
                )),
                "{email} should be rejected"
            );
        }
    }

    #[test]
    fn test_email_local_part_length_is_bounded() {
        let long_local = format!("{}@example.com", "a".repeat(65));
        assert!(create_request("John", "Doe", &long_local, "pw").check().is_err());
        let max_local = format!("{}@example.com", "a".repeat(64));
        assert!(create_request("John", "Doe", &max_local, "pw").check().is_ok());
    }

    #[test]
    fn test_create_user_validation_reports_first_blank_field() {
        let req = create_request("John", "   ", "john@example.com", "pw");
        assert_eq!(
            req.check(),
            Err(DomainError::Validation("surname must not be blank".to_string()))
        );

        let req = create_request("John", "Doe", "john@example.com", "");
        assert_eq!(
            req.check(),
            Err(DomainError::Validation("password must not be blank".to_string()))
        );

        let req = create_request(" ", "", "bad", "");
        assert_eq!(
            req.check(),
            Err(DomainError::Validation("name must not be blank".to_string()))
        );
    }

    #[test]
    fn test_blank_email_is_reported_as_validation_error() {
        let req = create_request("John", "Doe", "   ", "pw");
        let err = req.check().unwrap_err();
        assert!(matches!(err, DomainError::Validation(ref msg) if msg.starts_with("email ")));
    }

    #[test]
    fn test_update_user_validation() {
        let ok = UpdateUser {
            name: "Jane".to_string(),
            surname: "Smith".to_string(),
        };
        assert!(ok.check().is_ok());

        let blank = UpdateUser {
            name: "\t".to_string(),
            surname: "Smith".to_string(),
        };
        assert_eq!(
            blank.check(),
            Err(DomainError::Validation("name must not be blank".to_string()))
        );
    }

    #[test]
    fn test_update_only_touches_names() {
        let mut user = NewUser::from(create_request("John", "Doe", "john@example.com", "pw"))
            .with_id(7);
        UpdateUser {
            name: "Jane".to_string(),
            surname: "Smith".to_string(),
        }
        .apply_to(&mut user);

        assert_eq!(user.id, 7);
        assert_eq!(user.name, "Jane");
        assert_eq!(user.surname, "Smith");
        assert_eq!(user.email, "john@example.com");
        assert_eq!(user.password, "pw");
    }
}
