use serde::{Deserialize, Serialize};

use crate::ai::Agent;
use crate::game::{Board, Grid, Player, WinLine};
use crate::training::trajectory::{Trajectory, Transition};

/// Where an episode stands after a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EpisodeStatus {
    Ongoing,
    PlayerOneWon,
    PlayerTwoWon,
    Draw,
}

impl EpisodeStatus {
    pub fn is_terminal(self) -> bool {
        self != EpisodeStatus::Ongoing
    }

    pub fn winner(self) -> Option<Player> {
        match self {
            EpisodeStatus::PlayerOneWon => Some(Player::One),
            EpisodeStatus::PlayerTwoWon => Some(Player::Two),
            EpisodeStatus::Ongoing | EpisodeStatus::Draw => None,
        }
    }

    /// Terminal reward, scored from player one's side whichever seat moved.
    pub fn reward(self) -> f32 {
        match self {
            EpisodeStatus::PlayerOneWon => 1.0,
            EpisodeStatus::PlayerTwoWon => -1.0,
            EpisodeStatus::Ongoing | EpisodeStatus::Draw => 0.0,
        }
    }
}

/// Which moves of an episode end up in the trajectories.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RecordingMode {
    /// Only the move that ended the game, stored with the mover.
    #[default]
    TerminalOnly,
    /// Every accepted move, stored with its mover and labelled with the
    /// terminal reward.
    EveryStep,
}

/// An agent together with the trajectory recorded on its behalf.
pub struct Seat {
    agent: Box<dyn Agent>,
    trajectory: Trajectory,
}

impl Seat {
    pub fn new(agent: impl Agent + 'static) -> Self {
        Seat {
            agent: Box::new(agent),
            trajectory: Trajectory::new(),
        }
    }

    pub fn name(&self) -> &str {
        self.agent.name()
    }

    pub fn trajectory(&self) -> &Trajectory {
        &self.trajectory
    }

    /// Hand the accumulated trajectory off, leaving an empty one behind.
    pub fn take_trajectory(&mut self) -> Trajectory {
        std::mem::take(&mut self.trajectory)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EpisodeOptions {
    pub exploration_rate: f64,
    pub recording: RecordingMode,
}

impl Default for EpisodeOptions {
    fn default() -> Self {
        EpisodeOptions {
            exploration_rate: 0.1,
            recording: RecordingMode::TerminalOnly,
        }
    }
}

/// Result of playing a single episode.
#[derive(Debug, Clone)]
pub struct EpisodeReport {
    pub status: EpisodeStatus,
    /// Accepted moves.
    pub moves: usize,
    /// Drop attempts the board refused.
    pub rejected: usize,
    pub winning_line: Option<WinLine>,
    pub final_grid: Grid,
}

struct PendingMove {
    seat: usize,
    state: Grid,
    action: usize,
}

/// Play `board` to a terminal state. `first` moves first, as whichever player
/// the board says is current.
///
/// A refused drop is retried with the same seat and no switch. Agents must
/// eventually answer with a legal column; there is no retry limit.
pub fn play_episode(
    mut board: Board,
    first: &mut Seat,
    second: &mut Seat,
    options: &EpisodeOptions,
) -> EpisodeReport {
    let mut seats = [first, second];
    let mut turn = 0;
    let mut pending: Vec<PendingMove> = Vec::new();
    let mut moves = 0;
    let mut rejected = 0;

    loop {
        let state = board.snapshot();
        let legal = state.legal_columns();

        let action = loop {
            let action = seats[turn]
                .agent
                .choose_action(&legal, options.exploration_rate);
            match board.drop_piece(action) {
                Ok((row, col)) => {
                    log::trace!(
                        "{} ({}) dropped at ({row}, {col})",
                        seats[turn].name(),
                        board.current_player().name()
                    );
                    break action;
                }
                Err(err) => {
                    rejected += 1;
                    log::debug!(
                        "{} chose column {action}: {err}, retrying",
                        seats[turn].name()
                    );
                }
            }
        };
        moves += 1;

        let (status, winning_line) = if let Some(line) = board.check_win(Player::One) {
            (EpisodeStatus::PlayerOneWon, Some(line))
        } else if let Some(line) = board.check_win(Player::Two) {
            (EpisodeStatus::PlayerTwoWon, Some(line))
        } else if board.is_full() {
            (EpisodeStatus::Draw, None)
        } else {
            (EpisodeStatus::Ongoing, None)
        };

        if options.recording == RecordingMode::TerminalOnly {
            pending.clear();
        }
        pending.push(PendingMove {
            seat: turn,
            state,
            action,
        });

        if status.is_terminal() {
            let reward = status.reward();
            for step in pending.drain(..) {
                seats[step.seat].trajectory.push(Transition {
                    state: step.state,
                    action: step.action,
                    reward,
                });
            }
            log::debug!("episode ended {status:?} after {moves} moves ({rejected} rejected)");

            return EpisodeReport {
                status,
                moves,
                rejected,
                winning_line,
                final_grid: board.snapshot(),
            };
        }

        turn = 1 - turn;
        board.switch_player();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::{RandomAgent, ScriptedAgent};
    use crate::game::Cell;

    fn scripted(script: &[usize]) -> Seat {
        Seat::new(ScriptedAgent::new(script.to_vec()))
    }

    #[test]
    fn test_play_episode_terminates() {
        let mut first = Seat::new(RandomAgent::seeded(3));
        let mut second = Seat::new(RandomAgent::seeded(4));
        let report = play_episode(Board::new(), &mut first, &mut second, &EpisodeOptions::default());

        assert!(report.status.is_terminal());
        assert!(report.moves >= 7);
        assert_eq!(report.rejected, 0);
        assert_eq!(report.final_grid.pieces(), report.moves);
        assert_eq!(first.trajectory().len() + second.trajectory().len(), 1);
    }

    #[test]
    fn test_player_one_vertical_win() {
        // First seat stacks column 0, second seat stacks column 1
        let mut first = scripted(&[0]);
        let mut second = scripted(&[1]);
        let report = play_episode(Board::new(), &mut first, &mut second, &EpisodeOptions::default());

        assert_eq!(report.status, EpisodeStatus::PlayerOneWon);
        assert_eq!(report.moves, 7);
        assert_eq!(report.winning_line, Some([(0, 0), (1, 0), (2, 0), (3, 0)]));
        assert_eq!(report.final_grid.get(0, 1), Cell::PlayerTwo);

        // Only the winning move is recorded, with the mover
        assert!(second.trajectory().is_empty());
        let recorded = first.trajectory().transitions();
        assert_eq!(recorded.len(), 1);
        assert_eq!(recorded[0].action, 0);
        assert_eq!(recorded[0].reward, 1.0);
        // State is taken before the winning drop
        assert_eq!(recorded[0].state.pieces(), 6);
        assert_eq!(recorded[0].state.get(3, 0), Cell::Empty);
    }

    #[test]
    fn test_player_two_win_rewards_minus_one() {
        // First seat scatters, second seat stacks column 6
        let mut first = scripted(&[0, 1, 2, 0]);
        let mut second = scripted(&[6]);
        let report = play_episode(Board::new(), &mut first, &mut second, &EpisodeOptions::default());

        assert_eq!(report.status, EpisodeStatus::PlayerTwoWon);
        assert_eq!(report.status.winner(), Some(Player::Two));
        assert_eq!(report.moves, 8);
        assert!(first.trajectory().is_empty());
        let last = second.trajectory().last().unwrap();
        assert_eq!(last.action, 6);
        assert_eq!(last.reward, -1.0);
    }

    #[test]
    fn test_rejected_drop_retries_same_seat() {
        // Column 9 does not exist; the first seat must retry before column 0 lands
        let mut first = scripted(&[9, 0]);
        let mut second = scripted(&[1]);
        let report = play_episode(Board::new(), &mut first, &mut second, &EpisodeOptions::default());

        // The script cycles, so every first-seat turn starts with a refusal
        assert_eq!(report.status, EpisodeStatus::PlayerOneWon);
        assert_eq!(report.rejected, 4);
        assert_eq!(report.moves, 7);
        // Player two's pieces sit in column 1 only, so no turn was skipped
        for row in 0..3 {
            assert_eq!(report.final_grid.get(row, 1), Cell::PlayerTwo);
        }
    }

    #[test]
    fn test_full_column_retries_same_seat() {
        let mut board = Board::with_size(4, 4);
        for _ in 0..4 {
            board.drop_piece(0).unwrap();
            board.switch_player();
        }
        assert!(board.grid().is_column_full(0));

        let mut first = scripted(&[0, 1]);
        let mut second = scripted(&[2]);
        let report = play_episode(board, &mut first, &mut second, &EpisodeOptions::default());
        assert!(report.rejected >= 1);
        assert_eq!(report.final_grid.get(0, 2), Cell::PlayerTwo);
    }

    #[test]
    fn test_draw_records_zero_reward() {
        // On a 2x2 board nobody can line up four
        let mut first = scripted(&[0, 1]);
        let mut second = scripted(&[0, 1]);
        let report = play_episode(
            Board::with_size(2, 2),
            &mut first,
            &mut second,
            &EpisodeOptions::default(),
        );

        assert_eq!(report.status, EpisodeStatus::Draw);
        assert_eq!(report.moves, 4);
        assert!(report.final_grid.is_full());
        assert!(first.trajectory().is_empty());
        let last = second.trajectory().last().unwrap();
        assert_eq!(last.reward, 0.0);
        assert_eq!(last.action, 1);
    }

    #[test]
    fn test_full_board_draw_on_standard_board() {
        // Column pairs (0,1), (2,3), (4,5) filled in blocks of three, then column 6
        // alone: every line of four is broken up, so the board fills without a win.
        let order = [
            0, 1, 0, 1, 0, 1, 1, 0, 1, 0, 1, 0, 2, 3, 2, 3, 2, 3, 3, 2, 3, 2, 3, 2, 4, 5, 4, 5,
            4, 5, 5, 4, 5, 4, 5, 4, 6, 6, 6, 6, 6, 6,
        ];
        let mut board = Board::new();
        for &col in &order {
            board.drop_piece(col).unwrap();
            assert_eq!(board.check_win(Player::One), None);
            assert_eq!(board.check_win(Player::Two), None);
            board.switch_player();
        }
        assert!(board.is_full());
    }

    #[test]
    fn test_every_step_records_all_moves() {
        let mut first = scripted(&[0]);
        let mut second = scripted(&[1]);
        let options = EpisodeOptions {
            recording: RecordingMode::EveryStep,
            ..EpisodeOptions::default()
        };
        let report = play_episode(Board::new(), &mut first, &mut second, &options);

        assert_eq!(report.moves, 7);
        assert_eq!(first.trajectory().len(), 4);
        assert_eq!(second.trajectory().len(), 3);
        assert!(first.trajectory().rewards().all(|r| r == 1.0));
        assert!(second.trajectory().rewards().all(|r| r == 1.0));

        // States are chronological and captured before each move
        let pieces: Vec<usize> = first.trajectory().states().map(|s| s.pieces()).collect();
        assert_eq!(pieces, vec![0, 2, 4, 6]);
    }

    #[test]
    fn test_trajectories_accumulate_across_episodes() {
        let mut first = Seat::new(RandomAgent::seeded(10));
        let mut second = Seat::new(RandomAgent::seeded(20));
        let options = EpisodeOptions::default();
        for _ in 0..25 {
            play_episode(Board::new(), &mut first, &mut second, &options);
        }
        assert_eq!(first.trajectory().len() + second.trajectory().len(), 25);

        let taken = first.take_trajectory();
        assert!(first.trajectory().is_empty());
        assert_eq!(taken.len() + second.trajectory().len(), 25);
    }

    #[test]
    fn test_status_rewards() {
        assert_eq!(EpisodeStatus::PlayerOneWon.reward(), 1.0);
        assert_eq!(EpisodeStatus::PlayerTwoWon.reward(), -1.0);
        assert_eq!(EpisodeStatus::Draw.reward(), 0.0);
        assert!(!EpisodeStatus::Ongoing.is_terminal());
        assert_eq!(EpisodeStatus::Draw.winner(), None);
    }
}
