use rand::distributions::Alphanumeric;
use rand::thread_rng;
use rand::Rng;

/// Default length of generated one-time tokens.
const DEFAULT_TOKEN_LENGTH: usize = 25;

/// Generator for unpredictable one-time tokens.
///
/// Tokens are case-sensitive alphanumeric strings drawn from a
/// cryptographically seeded RNG. A 25-character token carries roughly
/// 148 bits of entropy.
pub struct TokenGenerator {
    length: usize,
}

impl TokenGenerator {
    /// Create a generator producing tokens of the default length.
    pub fn new() -> Self {
        Self {
            length: DEFAULT_TOKEN_LENGTH,
        }
    }

    /// Create a generator producing tokens of a custom length.
    ///
    /// # Arguments
    /// * `length` - Number of alphanumeric characters per token
    pub fn with_length(length: usize) -> Self {
        Self { length }
    }

    /// Generate a fresh token.
    ///
    /// # Returns
    /// Alphanumeric token string
    pub fn generate(&self) -> String {
        let rng = thread_rng();
        rng.sample_iter(&Alphanumeric)
            .take(self.length)
            .map(char::from)
            .collect()
    }
}

impl Default for TokenGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generates_tokens_of_requested_length() {
        assert_eq!(TokenGenerator::new().generate().len(), 25);
        assert_eq!(TokenGenerator::with_length(40).generate().len(), 40);
    }

    #[test]
    fn test_tokens_are_alphanumeric() {
        let token = TokenGenerator::new().generate();
        assert!(token.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_tokens_are_unique() {
        let generator = TokenGenerator::new();
        let first = generator.generate();
        let second = generator.generate();
        assert_ne!(first, second);
    }
}
