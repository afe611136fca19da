use crate::game::Grid;

/// One recorded step: the grid before the move, the column played, and the
/// reward attached when the episode ended.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub state: Grid,
    pub action: usize,
    pub reward: f32,
}

/// Append-only, in-order store of an agent's recorded transitions.
///
/// Stores are never reset between episodes; a training process reads them
/// once the batch has finished.
#[derive(Debug, Clone, Default)]
pub struct Trajectory {
    transitions: Vec<Transition>,
}

impl Trajectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, transition: Transition) {
        self.transitions.push(transition);
    }

    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }

    pub fn transitions(&self) -> &[Transition] {
        &self.transitions
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Transition> {
        self.transitions.iter()
    }

    pub fn last(&self) -> Option<&Transition> {
        self.transitions.last()
    }

    /// Recorded states, in recording order.
    pub fn states(&self) -> impl Iterator<Item = &Grid> {
        self.transitions.iter().map(|t| &t.state)
    }

    /// Recorded rewards, in recording order.
    pub fn rewards(&self) -> impl Iterator<Item = f32> + '_ {
        self.transitions.iter().map(|t| t.reward)
    }

    pub fn into_transitions(self) -> Vec<Transition> {
        self.transitions
    }
}

impl<'a> IntoIterator for &'a Trajectory {
    type Item = &'a Transition;
    type IntoIter = std::slice::Iter<'a, Transition>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
