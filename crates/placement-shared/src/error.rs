use thiserror::Error;

/// Bad user input, caught before anything is dispatched to the store.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Please fill in all fields")]
    MissingFields,

    #[error("Please enter both email and password.")]
    MissingCredentials,

    #[error("Passwords do not match")]
    PasswordMismatch,

    #[error("Company name is required for recruiters")]
    CompanyRequired,

    #[error("Marks cannot be empty")]
    MarksEmpty,

    #[error("Invalid marks format")]
    MarksFormat,

    #[error("Marks must be between 0 and 100")]
    MarksOutOfRange,

    #[error("Please enter a valid salary amount")]
    SalaryFormat,

    #[error("Salary must be a positive number")]
    SalaryNotPositive,

    #[error("Please select a candidate first")]
    NoCandidateSelected,

    #[error("Offer ID is missing. Cannot update status.")]
    MissingOfferId,

    #[error("Selected CV file is empty")]
    EmptyCv,

    #[error("No CV available for {0}")]
    NoCv(String),

    #[error("Session is missing a user id. Please log in again.")]
    NotLoggedIn,

    #[error("Unknown role: {0}")]
    UnknownRole(String),
}

#[derive(Error, Debug)]
pub enum CodecError {
    #[error("CV is not valid base64: {0}")]
    InvalidBase64(#[from] base64::DecodeError),
}
