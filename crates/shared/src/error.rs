use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProfileError {
    #[error("name is required")]
    MissingName,
    #[error("birthdate is required")]
    MissingBirthdate,
    #[error("birthdate '{0}' is not a YYYY-MM-DD date")]
    InvalidBirthdate(String),
}
