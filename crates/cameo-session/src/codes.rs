//! Game code generation.
//!
//! A generator only proposes codes. Uniqueness is the registry's job: it
//! checks each proposal against live sessions and asks again on a
//! collision, up to a bounded number of attempts.

use cameo_protocol::GameCode;
use rand::Rng;

/// Proposes candidate game codes.
///
/// `Send + 'static` because the registry that owns the generator lives
/// behind the server's mutex and is touched from many connection tasks.
pub trait CodeGenerator: Send + 'static {
    /// Returns a code in `GameCode::MIN..=GameCode::MAX`. May repeat.
    fn generate(&mut self) -> GameCode;
}

/// Draws codes uniformly at random from the full six-digit range.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomCodeGenerator;

impl CodeGenerator for RandomCodeGenerator {
    fn generate(&mut self) -> GameCode {
        let n = rand::rng().random_range(GameCode::MIN..=GameCode::MAX);
        GameCode::from_number(n)
    }
}
