/// Bounds on a single parse.
///
/// Grammars are free to recurse, so evaluation is bounded by a step budget
/// and a node nesting limit; the native stack grows on demand.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ParseLimits {
    /// Maximum number of expectation evaluations.
    pub(crate) exec_fuel: u32,
    /// Maximum depth of nested node evaluations.
    pub(crate) recursion_limit: u32,
}

impl Default for ParseLimits {
    fn default() -> Self {
        Self {
            exec_fuel: 1_000_000,
            recursion_limit: 256,
        }
    }
}

impl ParseLimits {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn exec_fuel(mut self, fuel: u32) -> Self {
        self.exec_fuel = fuel;
        self
    }

    pub fn recursion_limit(mut self, limit: u32) -> Self {
        self.recursion_limit = limit;
        self
    }

    pub fn get_exec_fuel(&self) -> u32 {
        self.exec_fuel
    }

    pub fn get_recursion_limit(&self) -> u32 {
        self.recursion_limit
    }
}
