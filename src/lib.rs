//! # Self-play Connect Four
//!
//! A Connect Four board state machine and a self-play loop that pits two
//! policy agents against each other and records labelled trajectories for an
//! external training process.
//!
//! ## Modules
//!
//! - [`game`] — Board, grid snapshots, players, win detection
//! - [`ai`] — Agent trait, random and scripted policies
//! - [`training`] — Episode driver, trajectory stores, batch loop, metrics
//! - [`config`] — TOML configuration loading and validation
//! - [`error`] — Structured error types

pub mod ai;
pub mod config;
pub mod error;
pub mod game;
pub mod training;
