//! Score one guess against a secret

use crate::core::{Feedback, Word};
use anyhow::{Context, Result};

/// A single scored guess
#[derive(Debug, Clone)]
pub struct ScoreResult {
    pub guess: Word,
    pub secret: Word,
    pub feedback: Feedback,
}

/// Evaluate `guess` against `secret`
///
/// # Errors
/// Returns an error if either word is invalid or the lengths differ.
pub fn score_guess(guess: &str, secret: &str) -> Result<ScoreResult> {
    let guess = Word::new(guess).with_context(|| format!("Invalid guess '{guess}'"))?;
    let secret = Word::new(secret).with_context(|| format!("Invalid secret '{secret}'"))?;
    let feedback = Feedback::calculate(&guess, &secret)?;

    Ok(ScoreResult {
        guess,
        secret,
        feedback,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scores_duplicates() {
        let result = score_guess("ERASE", "speed").unwrap();
        assert_eq!(result.feedback.to_string(), "Y--YY");
        assert_eq!(result.guess.text(), "erase");
    }

    #[test]
    fn rejects_length_mismatch() {
        assert!(score_guess("crane", "planet").is_err());
        assert!(score_guess("cr4ne", "crane").is_err());
    }
}
