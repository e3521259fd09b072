//! Deterministic code and identity sources for tests.
//!
//! Both replay a fixed script and wrap around at the end, so a one-entry
//! script yields the same value forever (handy for forcing collisions).

use cameo_protocol::GameCode;

use crate::{CodeGenerator, IdentityPool};

/// Replays a list of game codes in order, cycling.
#[derive(Debug, Clone)]
pub struct ScriptedCodes {
    script: Vec<GameCode>,
    next: usize,
}

impl ScriptedCodes {
    /// # Panics
    /// If `codes` is empty.
    pub fn new<I, S>(codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let script: Vec<GameCode> = codes.into_iter().map(GameCode::new).collect();
        assert!(!script.is_empty(), "ScriptedCodes needs at least one code");
        Self { script, next: 0 }
    }
}

impl CodeGenerator for ScriptedCodes {
    fn generate(&mut self) -> GameCode {
        let code = self.script[self.next % self.script.len()].clone();
        self.next += 1;
        code
    }
}

/// Replays a list of identities in order, cycling.
#[derive(Debug, Clone)]
pub struct ScriptedIdentities {
    script: Vec<String>,
    next: usize,
}

impl ScriptedIdentities {
    /// # Panics
    /// If `names` is empty.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let script: Vec<String> = names.into_iter().map(Into::into).collect();
        assert!(!script.is_empty(), "ScriptedIdentities needs at least one name");
        Self { script, next: 0 }
    }
}

impl IdentityPool for ScriptedIdentities {
    fn pick(&mut self) -> String {
        let name = self.script[self.next % self.script.len()].clone();
        self.next += 1;
        name
    }
}
