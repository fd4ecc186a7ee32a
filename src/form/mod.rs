//! Selection state for one form session and the operations that mutate it.

pub mod randomize;
pub mod state;

pub use randomize::random_fill;
pub use state::{FormState, ScalarField};

/// Helper text shown next to the most recently picked token.
pub fn describe_token(token: &str) -> String {
    format!("A concise description of '{}' for creative prompting.", token.trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn describe_token_quotes_trimmed_token() {
        assert_eq!(
            describe_token(" Neon "),
            "A concise description of 'Neon' for creative prompting."
        );
    }
}
