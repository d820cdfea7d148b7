// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use std::cmp::Reverse;
use std::time::Instant;

use rayon::prelude::*;

use crate::eval::{Evaluator, StandardEvaluator};
use crate::moves::Move;
use crate::position::Position;
use crate::types::Alliance;

pub struct SearchResult {
    pub best_move: Move,
    pub score: i32,
    pub nodes_searched: u64,
}

/// Fixed-depth minimax with alpha-beta pruning. White maximizes and
/// Black minimizes; scores come from the evaluator and are signed from
/// White's perspective throughout.
///
/// The root fans out: each legal root move's subtree is scored as an
/// independent unit of work on a bounded pool of `workers` threads.
/// Subtrees do not share alpha/beta bounds — each starts from the
/// widest window, trading some cross-subtree pruning for lock-free
/// parallelism over the immutable positions.
pub struct Minimax<E> {
    evaluator: E,
    depth: u32,
    workers: usize,
}

impl<E: Evaluator + Sync> Minimax<E> {
    pub fn new(depth: u32, workers: usize) -> Minimax<E> {
        assert!(depth > 0, "search depth must be at least one ply");
        assert!(workers > 0, "search requires at least one worker");
        Minimax {
            evaluator: Default::default(),
            depth,
            workers,
        }
    }

    /// Picks the strongest move for the side to move. Runs to
    /// completion at the configured depth and blocks until every root
    /// subtree finishes. It is a contract violation to call this on a
    /// position that is already checkmate or stalemate.
    pub fn execute(&self, position: &Position) -> SearchResult {
        let player = position.current_player();
        assert!(
            !player.legal_moves().is_empty(),
            "cannot search a position with no legal moves"
        );

        info!("{} thinking with depth {}", player.alliance(), self.depth);
        let start = Instant::now();
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.workers)
            .build()
            .expect("failed to build search worker pool");

        let subtrees: Vec<(Move, i32, u64)> = pool.install(|| {
            player
                .legal_moves()
                .par_iter()
                .filter_map(|mov| {
                    let transition = position.make_move(mov);
                    if !transition.is_done() {
                        // only possible on mis-generated candidates;
                        // legal moves always apply
                        return None;
                    }
                    let successor = transition.position();
                    let mut nodes = 0;
                    let score = match successor.side_to_move() {
                        Alliance::White => {
                            self.max(successor, self.depth - 1, i32::MIN, i32::MAX, &mut nodes)
                        }
                        Alliance::Black => {
                            self.min(successor, self.depth - 1, i32::MIN, i32::MAX, &mut nodes)
                        }
                    };
                    Some((mov.clone(), score, nodes))
                })
                .collect()
        });

        let maximizing = position.side_to_move().is_white();
        let mut nodes_searched = 0;
        let mut best: Option<(Move, i32)> = None;
        for (mov, score, nodes) in subtrees {
            nodes_searched += nodes;
            debug!("root move {} scored {}", mov, score);
            // strict comparison keeps the first move on ties
            let improves = match &best {
                None => true,
                Some((_, best_score)) => {
                    if maximizing {
                        score > *best_score
                    } else {
                        score < *best_score
                    }
                }
            };
            if improves {
                best = Some((mov, score));
            }
        }

        let (best_move, score) = best.expect("no root subtree produced a score");
        info!(
            "search done in {:?}: {} ({}), {} nodes",
            start.elapsed(),
            best_move,
            score,
            nodes_searched
        );
        SearchResult {
            best_move,
            score,
            nodes_searched,
        }
    }

    fn max(
        &self,
        position: &Position,
        depth: u32,
        alpha: i32,
        beta: i32,
        nodes: &mut u64,
    ) -> i32 {
        let player = position.current_player();
        if depth == 0 || player.is_in_checkmate() || player.is_in_stalemate() {
            *nodes += 1;
            return self.evaluator.evaluate(position, depth);
        }
        let mut highest = alpha;
        for mov in ordered(player.legal_moves()) {
            let transition = position.make_move(&mov);
            if !transition.is_done() {
                continue;
            }
            let value = self.min(transition.position(), depth - 1, highest, beta, nodes);
            if value >= highest {
                highest = value;
            }
            if beta <= highest {
                break;
            }
        }
        highest
    }

    fn min(
        &self,
        position: &Position,
        depth: u32,
        alpha: i32,
        beta: i32,
        nodes: &mut u64,
    ) -> i32 {
        let player = position.current_player();
        if depth == 0 || player.is_in_checkmate() || player.is_in_stalemate() {
            *nodes += 1;
            return self.evaluator.evaluate(position, depth);
        }
        let mut lowest = beta;
        for mov in ordered(player.legal_moves()) {
            let transition = position.make_move(&mov);
            if !transition.is_done() {
                continue;
            }
            let value = self.max(transition.position(), depth - 1, alpha, lowest, nodes);
            if value <= lowest {
                lowest = value;
            }
            if lowest <= alpha {
                break;
            }
        }
        lowest
    }
}

/// Orders moves to tighten pruning: captures first, then castles, then
/// the most valuable mover. Purely a search-cost optimization; the
/// chosen move never depends on it.
fn ordered(moves: &[Move]) -> Vec<Move> {
    let mut ordered = moves.to_vec();
    ordered.sort_by_key(|mov| {
        (
            Reverse(mov.is_capture()),
            Reverse(mov.is_castle()),
            Reverse(mov.piece().value()),
        )
    });
    ordered
}

/// Searches `position` to `depth` plies with the standard evaluator,
/// fanning root subtrees over `workers` threads, and returns the
/// strongest move for the side to move. The side to move must be
/// neither checkmated nor stalemated.
pub fn best_move(position: &Position, depth: u32, workers: usize) -> Move {
    Minimax::<StandardEvaluator>::new(depth, workers)
        .execute(position)
        .best_move
}
