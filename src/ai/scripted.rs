use super::agent::Agent;

/// An agent that replays a fixed list of columns, cycling when it runs out.
///
/// It ignores the legal set on purpose, which makes it useful for replaying
/// recorded games and for exercising the driver's handling of rejected moves.
pub struct ScriptedAgent {
    script: Vec<usize>,
    cursor: usize,
}

impl ScriptedAgent {
    /// Panics if `script` is empty.
    pub fn new(script: Vec<usize>) -> Self {
        assert!(!script.is_empty(), "script must contain at least one column");
        ScriptedAgent { script, cursor: 0 }
    }
}

impl Agent for ScriptedAgent {
    fn choose_action(&mut self, _legal_columns: &[usize], _exploration_rate: f64) -> usize {
        let action = self.script[self.cursor % self.script.len()];
        self.cursor += 1;
        action
    }

    fn name(&self) -> &str {
        "Scripted"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scripted_agent_cycles() {
        let mut agent = ScriptedAgent::new(vec![3, 9]);
        let picks: Vec<usize> = (0..5).map(|_| agent.choose_action(&[0], 0.0)).collect();
        assert_eq!(picks, vec![3, 9, 3, 9, 3]);
    }

    #[test]
    #[should_panic(expected = "at least one column")]
    fn test_empty_script_rejected() {
        ScriptedAgent::new(Vec::new());
    }
}
