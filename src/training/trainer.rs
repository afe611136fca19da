use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::ai::RandomAgent;
use crate::config::BoardConfig;
use crate::game::{Board, Player};
use crate::training::episode::{
    play_episode, EpisodeOptions, EpisodeReport, EpisodeStatus, RecordingMode, Seat,
};
use crate::training::metrics::{EpisodeResult, TrainingMetrics};

/// Self-play batch configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SelfPlayConfig {
    pub num_episodes: usize,
    pub exploration_rate: f64,
    pub recording: RecordingMode,
    pub log_interval: usize,
    /// Base seed for the random agents; OS entropy when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for SelfPlayConfig {
    fn default() -> Self {
        SelfPlayConfig {
            num_episodes: 1000,
            exploration_rate: 0.1,
            recording: RecordingMode::TerminalOnly,
            log_interval: 100,
            seed: None,
        }
    }
}

/// Totals for a finished batch, handed to whatever consumes the trajectories.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SelfPlaySummary {
    pub episodes: usize,
    pub player_one_wins: usize,
    pub player_two_wins: usize,
    pub draws: usize,
    pub total_moves: usize,
    pub rejected_moves: usize,
    pub average_game_length: f32,
    pub first_seat_transitions: usize,
    pub second_seat_transitions: usize,
}

impl SelfPlaySummary {
    fn record(&mut self, report: &EpisodeReport) {
        self.episodes += 1;
        self.total_moves += report.moves;
        self.rejected_moves += report.rejected;
        match report.status {
            EpisodeStatus::PlayerOneWon => self.player_one_wins += 1,
            EpisodeStatus::PlayerTwoWon => self.player_two_wins += 1,
            EpisodeStatus::Draw => self.draws += 1,
            EpisodeStatus::Ongoing => {}
        }
    }
}

/// Runs batches of independent self-play episodes between two seats.
pub struct SelfPlay {
    config: SelfPlayConfig,
    board: BoardConfig,
}

impl SelfPlay {
    pub fn new(config: SelfPlayConfig, board: BoardConfig) -> Self {
        SelfPlay { config, board }
    }

    pub fn config(&self) -> &SelfPlayConfig {
        &self.config
    }

    /// Two uniform-random seats, seeded from the configured base seed when
    /// there is one.
    pub fn random_seats(&self) -> (Seat, Seat) {
        match self.config.seed {
            Some(seed) => (
                Seat::new(RandomAgent::seeded(stream_seed(seed, 0))),
                Seat::new(RandomAgent::seeded(stream_seed(seed, 1))),
            ),
            None => (Seat::new(RandomAgent::new()), Seat::new(RandomAgent::new())),
        }
    }

    /// Play the configured number of episodes, each on a fresh board. The
    /// seats' trajectories keep growing across episodes.
    pub fn run(&self, first: &mut Seat, second: &mut Seat) -> SelfPlaySummary {
        let options = EpisodeOptions {
            exploration_rate: self.config.exploration_rate,
            recording: self.config.recording,
        };
        let window = self.config.log_interval.max(1);
        let mut metrics = TrainingMetrics::with_capacity(window);
        let mut summary = SelfPlaySummary::default();
        let started = Instant::now();

        log::info!(
            "Starting self-play: {} episodes on a {}x{} board ({} vs {}, {:?})",
            self.config.num_episodes,
            self.board.rows,
            self.board.cols,
            first.name(),
            second.name(),
            self.config.recording,
        );

        for episode in 1..=self.config.num_episodes {
            let board = Board::with_size(self.board.rows, self.board.cols);
            let report = play_episode(board, first, second, &options);
            summary.record(&report);
            metrics.record_episode(EpisodeResult::from(&report));

            if episode % window == 0 {
                log::info!(
                    "Episode {}/{} | p1 win({}): {:.1}% | p2 win: {:.1}% | draw: {:.1}% | avg_len: {:.1}",
                    episode,
                    self.config.num_episodes,
                    window,
                    metrics.win_rate(Player::One, window) * 100.0,
                    metrics.win_rate(Player::Two, window) * 100.0,
                    metrics.draw_rate(window) * 100.0,
                    metrics.average_game_length(window),
                );
            }
        }

        if summary.episodes > 0 {
            summary.average_game_length = summary.total_moves as f32 / summary.episodes as f32;
        }
        summary.first_seat_transitions = first.trajectory().len();
        summary.second_seat_transitions = second.trajectory().len();

        log::info!(
            "Self-play complete: {} episodes in {:.2}s ({} / {} / {} p1 wins / p2 wins / draws)",
            metrics.total_episodes(),
            started.elapsed().as_secs_f64(),
            summary.player_one_wins,
            summary.player_two_wins,
            summary.draws,
        );
        summary
    }
}

/// Derive an independent, deterministic seed for one random stream.
pub fn stream_seed(base_seed: u64, stream: usize) -> u64 {
    // FNV-style mixing so neighbouring streams land far apart
    let mut hash = base_seed ^ 0x517cc1b727220a95;
    let index = stream as u64;
    hash = hash.wrapping_mul(0x100000001b3);
    hash ^= index;
    hash = hash.wrapping_mul(0x100000001b3);
    hash ^= index >> 32;
    hash
}
