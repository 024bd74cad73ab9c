//! Random selection of playlist entries under a budget. This is sampling without replacement,
//! not bin-packing: each draw removes one candidate from the bag, and we either take it, or
//! put up with it not fitting for a limited number of consecutive draws.
//!
use crate::size::human_size;
use crate::types::{Budget, Candidate, CandidateList, RetryLimit, StopReason};
use rand::Rng;

pub struct Selector<R> {
    candidates: CandidateList,
    remaining: Budget,
    retry: RetryLimit,
    misses: usize,
    rng: R,
    stop: Option<StopReason>,
}

impl<R: Rng> Selector<R> {
    pub fn new(candidates: CandidateList, budget: Budget, retry: RetryLimit, rng: R) -> Self {
        Self {
            candidates,
            remaining: budget,
            retry,
            misses: 0,
            rng,
            stop: None,
        }
    }

    /// What's left of the budget after everything accepted so far.
    pub fn remaining(&self) -> Budget {
        self.remaining
    }

    /// Candidates which have not yet been drawn.
    pub fn candidates_left(&self) -> usize {
        self.candidates.len()
    }

    /// Why selection finished. `None` until the iterator has returned `None`.
    pub fn stop_reason(&self) -> Option<StopReason> {
        self.stop
    }

    fn finish(&mut self, reason: StopReason) -> Option<Candidate> {
        log::debug!("selection finished: {:?}", reason);
        self.stop = Some(reason);
        None
    }

    fn draw(&mut self) -> Candidate {
        let index = self.rng.gen_range(0..self.candidates.len());
        self.candidates.swap_remove(index)
    }
}

impl<R: Rng> Iterator for Selector<R> {
    type Item = Candidate;

    fn next(&mut self) -> Option<Candidate> {
        if self.stop.is_some() {
            return None;
        }

        loop {
            if self.remaining.items == Some(0) {
                return self.finish(StopReason::ItemLimit);
            }

            if self.candidates.is_empty() {
                return self.finish(StopReason::CandidatesExhausted);
            }

            let candidate = self.draw();

            if candidate.size > self.remaining.bytes {
                if !self.retry.allows(self.misses) {
                    log::debug!(
                        "{} ({}) does not fit in {}, giving up",
                        candidate.path,
                        human_size(candidate.size),
                        human_size(self.remaining.bytes)
                    );
                    return self.finish(StopReason::BudgetExhausted);
                }

                self.misses += 1;
                log::debug!(
                    "{} ({}) does not fit in {}, miss {}",
                    candidate.path,
                    human_size(candidate.size),
                    human_size(self.remaining.bytes),
                    self.misses
                );
                continue;
            }

            self.remaining.bytes -= candidate.size;
            if let Some(items) = self.remaining.items.as_mut() {
                *items -= 1;
            }
            self.misses = 0;

            return Some(candidate);
        }
    }
}
