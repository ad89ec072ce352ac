/// Minimum accepted password length.
const MIN_LENGTH: usize = 8;

/// Check whether a candidate password meets the strength requirements.
///
/// A password is accepted when it is at least 8 characters long and
/// contains at least one letter and one digit. Length is counted in
/// characters, not bytes. Callers run this before hashing.
///
/// # Arguments
/// * `password` - Candidate plaintext password
///
/// # Returns
/// True when the password satisfies all requirements
pub fn meets_strength_requirements(password: &str) -> bool {
    if password.chars().count() < MIN_LENGTH {
        return false;
    }

    let has_letter = password.chars().any(|c| c.is_alphabetic());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());

    has_letter && has_digit
}
