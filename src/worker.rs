//! Background move search
//!
//! Runs a decision on a worker thread so a caller's event loop stays
//! responsive. Every request gets a generation number; cancelling (new game,
//! retracted move) bumps the generation and any late result of an older
//! request is dropped when it arrives.

use std::sync::mpsc::{channel, Receiver, RecvTimeoutError, Sender};
use std::thread;
use std::time::{Duration, Instant};

use crate::board::Board;
use crate::config::EngineConfig;
use crate::engine::{GomokuAI, MoveResult};
use crate::error::EngineError;

struct SearchReply {
    generation: u64,
    result: Result<MoveResult, EngineError>,
}

/// Worker state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchState {
    Idle,
    Thinking { generation: u64, start_time: Instant },
}

/// One outstanding decision at a time, computed off-thread.
pub struct BackgroundSearch {
    sender: Sender<SearchReply>,
    receiver: Receiver<SearchReply>,
    generation: u64,
    state: SearchState,
    think_delay: Duration,
}

impl BackgroundSearch {
    /// `think_delay` is the minimum time a request takes before its result
    /// is delivered.
    pub fn new(think_delay: Duration) -> Self {
        let (sender, receiver) = channel();
        Self {
            sender,
            receiver,
            generation: 0,
            state: SearchState::Idle,
            think_delay,
        }
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(Duration::from_millis(config.think_delay_ms))
    }

    pub fn set_think_delay(&mut self, think_delay: Duration) {
        self.think_delay = think_delay;
    }

    pub fn state(&self) -> SearchState {
        self.state
    }

    pub fn is_thinking(&self) -> bool {
        matches!(self.state, SearchState::Thinking { .. })
    }

    /// Generation of the most recent request
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Time since the outstanding request started
    pub fn elapsed(&self) -> Option<Duration> {
        match self.state {
            SearchState::Thinking { start_time, .. } => Some(start_time.elapsed()),
            SearchState::Idle => None,
        }
    }

    /// Start deciding a move for `engine` on a snapshot of `board`.
    ///
    /// The worker uses a fork of the engine, so the chosen move is not in
    /// `engine`'s history; record it with [`GomokuAI::record_move`] once it
    /// is played. A request still running is superseded.
    pub fn start(&mut self, engine: &mut GomokuAI, board: &Board) -> u64 {
        self.generation += 1;
        let generation = self.generation;

        let mut forked = engine.fork();
        let board = board.clone();
        let sender = self.sender.clone();
        let think_delay = self.think_delay;

        thread::spawn(move || {
            let started = Instant::now();
            let result = forked.find_best_move_with_stats(&board);
            if let Some(rest) = think_delay.checked_sub(started.elapsed()) {
                thread::sleep(rest);
            }
            // The receiver lives as long as the BackgroundSearch
            let _ = sender.send(SearchReply { generation, result });
        });

        tracing::debug!(generation, "background search started");
        self.state = SearchState::Thinking {
            generation,
            start_time: Instant::now(),
        };
        generation
    }

    /// Drop the outstanding request. Its result will be discarded.
    pub fn cancel(&mut self) {
        if self.is_thinking() {
            tracing::debug!(generation = self.generation, "background search cancelled");
        }
        self.generation += 1;
        self.state = SearchState::Idle;
    }

    /// Non-blocking check for the outstanding request's result.
    pub fn poll(&mut self) -> Option<Result<MoveResult, EngineError>> {
        while let Ok(reply) = self.receiver.try_recv() {
            if let Some(result) = self.accept(reply) {
                return Some(result);
            }
        }
        None
    }

    /// Block until the outstanding request finishes or `timeout` passes.
    ///
    /// Returns `None` when idle or on timeout.
    pub fn wait(&mut self, timeout: Duration) -> Option<Result<MoveResult, EngineError>> {
        let deadline = Instant::now() + timeout;
        while self.is_thinking() {
            let left = deadline.checked_duration_since(Instant::now())?;
            match self.receiver.recv_timeout(left) {
                Ok(reply) => {
                    if let Some(result) = self.accept(reply) {
                        return Some(result);
                    }
                }
                Err(RecvTimeoutError::Timeout | RecvTimeoutError::Disconnected) => return None,
            }
        }
        None
    }

    fn accept(&mut self, reply: SearchReply) -> Option<Result<MoveResult, EngineError>> {
        match self.state {
            SearchState::Thinking { generation, .. } if generation == reply.generation => {
                self.state = SearchState::Idle;
                Some(reply.result)
            }
            _ => {
                tracing::debug!(
                    stale = reply.generation,
                    current = self.generation,
                    "discarding stale search result"
                );
                None
            }
        }
    }
}

impl Default for BackgroundSearch {
    fn default() -> Self {
        Self::from_config(&EngineConfig::default())
    }
}
