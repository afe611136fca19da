/// Universal interface for self-play policies.
///
/// An agent only ever sees the legal columns, never the live board. It is
/// expected to answer with one of them; the episode driver retries an
/// illegal answer with the same agent and does not guard against an agent
/// that never produces a legal column.
pub trait Agent {
    /// Select a column from `legal_columns`. `exploration_rate` is the
    /// probability of taking the exploratory branch.
    fn choose_action(&mut self, legal_columns: &[usize], exploration_rate: f64) -> usize;

    /// Return the agent's display name.
    fn name(&self) -> &str;
}
