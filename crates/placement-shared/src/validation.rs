//! Synchronous input checks run before anything is dispatched.
//!
//! Every function here is pure: it either returns the parsed value or a
//! [`ValidationError`] carrying the message shown to the user.

use crate::error::ValidationError;
use crate::models::marks_in_range;
use crate::types::Role;

pub fn parse_marks(text: &str) -> Result<f64, ValidationError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(ValidationError::MarksEmpty);
    }
    let marks: f64 = text.parse().map_err(|_| ValidationError::MarksFormat)?;
    if !marks_in_range(marks) {
        return Err(ValidationError::MarksOutOfRange);
    }
    Ok(marks)
}

pub fn parse_salary(text: &str) -> Result<f64, ValidationError> {
    let salary: f64 = text
        .trim()
        .parse()
        .map_err(|_| ValidationError::SalaryFormat)?;
    check_salary(salary)
}

pub fn check_salary(salary: f64) -> Result<f64, ValidationError> {
    // NaN fails this comparison too
    if salary > 0.0 && salary.is_finite() {
        Ok(salary)
    } else {
        Err(ValidationError::SalaryNotPositive)
    }
}

/// Minimum-marks filter input.  Empty or unparseable text means no threshold.
pub fn parse_min_marks(text: &str) -> f64 {
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|m| m.is_finite())
        .unwrap_or(0.0)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

pub fn validate_login(email: &str, password: &str) -> Result<Credentials, ValidationError> {
    let email = email.trim();
    let password = password.trim();
    if email.is_empty() || password.is_empty() {
        return Err(ValidationError::MissingCredentials);
    }
    Ok(Credentials {
        email: email.to_string(),
        password: password.to_string(),
    })
}

/// Raw sign-up form input, as typed.
#[derive(Debug, Clone, Default)]
pub struct SignUpForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub role: String,
    pub company_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
    pub company_name: Option<String>,
}

pub fn validate_sign_up(form: &SignUpForm) -> Result<Registration, ValidationError> {
    let name = form.name.trim();
    let email = form.email.trim();
    if name.is_empty()
        || email.is_empty()
        || form.password.is_empty()
        || form.confirm_password.is_empty()
    {
        return Err(ValidationError::MissingFields);
    }
    if form.password != form.confirm_password {
        return Err(ValidationError::PasswordMismatch);
    }

    let role: Role = form.role.parse()?;
    let company_name = match role {
        Role::Recruiter => {
            let company = form.company_name.trim();
            if company.is_empty() {
                return Err(ValidationError::CompanyRequired);
            }
            Some(company.to_string())
        }
        Role::Candidate => None,
    };

    Ok(Registration {
        name: name.to_string(),
        email: email.to_string(),
        password: form.password.clone(),
        role,
        company_name,
    })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordReset {
    pub email: String,
    pub new_password: String,
}

pub fn validate_reset(
    email: &str,
    new_password: &str,
    confirm_password: &str,
) -> Result<PasswordReset, ValidationError> {
    let email = email.trim();
    if email.is_empty() || new_password.is_empty() || confirm_password.is_empty() {
        return Err(ValidationError::MissingFields);
    }
    if new_password != confirm_password {
        return Err(ValidationError::PasswordMismatch);
    }
    Ok(PasswordReset {
        email: email.to_string(),
        new_password: new_password.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_marks() {
        assert_eq!(parse_marks(" 75 "), Ok(75.0));
        assert_eq!(parse_marks("0"), Ok(0.0));
        assert_eq!(parse_marks("100"), Ok(100.0));
        assert_eq!(parse_marks(""), Err(ValidationError::MarksEmpty));
        assert_eq!(parse_marks("   "), Err(ValidationError::MarksEmpty));
        assert_eq!(parse_marks("abc"), Err(ValidationError::MarksFormat));
        assert_eq!(parse_marks("-1"), Err(ValidationError::MarksOutOfRange));
        assert_eq!(parse_marks("100.5"), Err(ValidationError::MarksOutOfRange));
        assert_eq!(parse_marks("NaN"), Err(ValidationError::MarksOutOfRange));
    }

    #[test]
    fn test_parse_salary() {
        assert_eq!(parse_salary("50000"), Ok(50_000.0));
        assert_eq!(parse_salary("0"), Err(ValidationError::SalaryNotPositive));
        assert_eq!(parse_salary("-10"), Err(ValidationError::SalaryNotPositive));
        assert_eq!(parse_salary("lots"), Err(ValidationError::SalaryFormat));
        assert_eq!(parse_salary("inf"), Err(ValidationError::SalaryNotPositive));
    }

    #[test]
    fn test_min_marks_defaults_to_zero() {
        assert_eq!(parse_min_marks(""), 0.0);
        assert_eq!(parse_min_marks("sixty"), 0.0);
        assert_eq!(parse_min_marks("NaN"), 0.0);
        assert_eq!(parse_min_marks(" 60 "), 60.0);
    }

    #[test]
    fn test_login_requires_both_fields() {
        assert_eq!(
            validate_login("a@b.c", "  "),
            Err(ValidationError::MissingCredentials)
        );
        let creds = validate_login(" a@b.c ", "pw").unwrap();
        assert_eq!(creds.email, "a@b.c");
    }

    fn form(role: &str) -> SignUpForm {
        SignUpForm {
            name: "Ravi".into(),
            email: "ravi@example.com".into(),
            password: "pw".into(),
            confirm_password: "pw".into(),
            role: role.into(),
            company_name: String::new(),
        }
    }

    #[test]
    fn test_sign_up_candidate() {
        let reg = validate_sign_up(&form("Candidate")).unwrap();
        assert_eq!(reg.role, Role::Candidate);
        assert!(reg.company_name.is_none());
    }

    #[test]
    fn test_sign_up_recruiter_needs_company() {
        assert_eq!(
            validate_sign_up(&form("Recruiter")),
            Err(ValidationError::CompanyRequired)
        );
        let mut f = form("Recruiter");
        f.company_name = " Acme ".into();
        assert_eq!(
            validate_sign_up(&f).unwrap().company_name.as_deref(),
            Some("Acme")
        );
    }

    #[test]
    fn test_sign_up_password_mismatch() {
        let mut f = form("Candidate");
        f.confirm_password = "other".into();
        assert_eq!(validate_sign_up(&f), Err(ValidationError::PasswordMismatch));
    }

    #[test]
    fn test_sign_up_missing_fields() {
        let mut f = form("Candidate");
        f.name = "  ".into();
        assert_eq!(validate_sign_up(&f), Err(ValidationError::MissingFields));
    }

    #[test]
    fn test_reset_validation() {
        assert_eq!(
            validate_reset("a@b.c", "x", "y"),
            Err(ValidationError::PasswordMismatch)
        );
        assert!(validate_reset("a@b.c", "x", "x").is_ok());
        assert_eq!(
            validate_reset("", "x", "x"),
            Err(ValidationError::MissingFields)
        );
    }
}
