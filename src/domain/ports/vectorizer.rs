use crate::domain::values::term_vector::TermVector;

/// Turns topic texts into sparse term vectors.
///
/// Weights are relative to the texts passed in a single call; callers
/// must not reuse vectors across calls.
pub trait Vectorizer: Send + Sync {
    fn name(&self) -> &'static str;

    /// One vector per input text, index-aligned.
    fn vectorize(&self, texts: &[String]) -> Vec<TermVector>;
}
