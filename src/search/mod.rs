//! High-level shape location: vote, rank, and optionally prune.
//!
//! `Locator` owns a compiled [`ShapeModel`] and runs the full pipeline
//! against any number of scenes. The counter width is resolved per scene
//! from the vote bound, so callers never pick an overflowing width by
//! accident.

use crate::accum::{Accumulator, Counter, CounterWidth};
use crate::edges::EdgePointSet;
use crate::model::ShapeModel;
use crate::rank::nms::suppress_neighbors;
use crate::rank::topk::{rank_top_n, RankedResult};
use crate::trace::{count_event, stage_span};
use crate::util::math::grid_len;
use crate::util::{HoughMatchError, HoughMatchResult};
use crate::vote::{self, vote_bound, CancelToken, VoteStats};

/// Configuration for [`Locator`].
#[derive(Clone, Debug)]
pub struct LocateConfig {
    /// Vote in parallel (only effective with the `rayon` feature).
    pub parallel: bool,
    /// Smallest number of scene edge points handed to one worker.
    pub min_points_per_worker: usize,
    /// Counter width for the accumulator.
    pub counter: CounterWidth,
    /// Chebyshev radius for neighbour suppression (0 disables it).
    pub nms_radius: usize,
    /// Results scoring below this are dropped after ranking.
    pub min_score: u64,
}

impl Default for LocateConfig {
    fn default() -> Self {
        Self {
            parallel: false,
            min_points_per_worker: 256,
            counter: CounterWidth::Auto,
            nms_radius: 0,
            min_score: 0,
        }
    }
}

impl LocateConfig {
    /// Checks the configuration for values that cannot work.
    pub fn validate(&self) -> HoughMatchResult<()> {
        if self.min_points_per_worker == 0 {
            return Err(HoughMatchError::InvalidConfig(
                "min_points_per_worker must be at least 1",
            ));
        }
        Ok(())
    }
}

/// Runs vote and rank for a fixed shape model.
pub struct Locator {
    model: ShapeModel,
    cfg: LocateConfig,
}

impl Locator {
    /// Creates a locator with the default configuration.
    pub fn new(model: ShapeModel) -> Self {
        Self {
            model,
            cfg: LocateConfig::default(),
        }
    }

    /// Replaces the configuration.
    pub fn with_config(mut self, cfg: LocateConfig) -> Self {
        self.cfg = cfg;
        self
    }

    /// Returns the shape model.
    pub fn model(&self) -> &ShapeModel {
        &self.model
    }

    /// Returns the active configuration.
    pub fn config(&self) -> &LocateConfig {
        &self.cfg
    }

    /// Votes `scene` into a fresh accumulator with an explicit counter type.
    pub fn accumulate<C: Counter>(
        &self,
        scene: &EdgePointSet,
        width: usize,
        height: usize,
    ) -> HoughMatchResult<(Accumulator<C>, VoteStats)> {
        self.cfg.validate()?;
        self.accumulate_with(scene, width, height, None)
    }

    /// Cancellable variant of [`Locator::accumulate`].
    pub fn accumulate_cancellable<C: Counter>(
        &self,
        scene: &EdgePointSet,
        width: usize,
        height: usize,
        cancel: &CancelToken,
    ) -> HoughMatchResult<(Accumulator<C>, VoteStats)> {
        self.cfg.validate()?;
        self.accumulate_with(scene, width, height, Some(cancel))
    }

    /// Returns the `n` best reference-point locations in `scene`.
    ///
    /// With the default configuration this is exactly `rank_top_n` applied
    /// to the vote of `scene`. Neighbour suppression and `min_score` run
    /// after ranking and can only shorten the list.
    pub fn locate(
        &self,
        scene: &EdgePointSet,
        width: usize,
        height: usize,
        n: usize,
    ) -> HoughMatchResult<Vec<RankedResult>> {
        self.locate_with(scene, width, height, n, None)
    }

    /// Cancellable variant of [`Locator::locate`].
    pub fn locate_cancellable(
        &self,
        scene: &EdgePointSet,
        width: usize,
        height: usize,
        n: usize,
        cancel: &CancelToken,
    ) -> HoughMatchResult<Vec<RankedResult>> {
        self.locate_with(scene, width, height, n, Some(cancel))
    }

    fn locate_with(
        &self,
        scene: &EdgePointSet,
        width: usize,
        height: usize,
        n: usize,
        cancel: Option<&CancelToken>,
    ) -> HoughMatchResult<Vec<RankedResult>> {
        self.cfg.validate()?;
        let _stage = stage_span!("locate", edges = scene.len(), n = n);

        let bound = vote_bound(scene.points(), self.model.table().offsets());
        let width_choice = self.cfg.counter.resolve(bound)?;
        count_event!("counter", bound = bound, bits = width_choice.bits().unwrap_or(0));

        let ranked = match width_choice {
            CounterWidth::U16 => self.vote_and_rank::<u16>(scene, width, height, n, cancel)?,
            CounterWidth::U32 => self.vote_and_rank::<u32>(scene, width, height, n, cancel)?,
            CounterWidth::U64 | CounterWidth::Auto => {
                self.vote_and_rank::<u64>(scene, width, height, n, cancel)?
            }
        };

        let mut results = suppress_neighbors(&ranked, self.cfg.nms_radius);
        if self.cfg.min_score > 0 {
            results.retain(|r| r.score >= self.cfg.min_score);
        }

        count_event!("results", count = results.len());
        Ok(results)
    }

    fn vote_and_rank<C: Counter>(
        &self,
        scene: &EdgePointSet,
        width: usize,
        height: usize,
        n: usize,
        cancel: Option<&CancelToken>,
    ) -> HoughMatchResult<Vec<RankedResult>> {
        // Validate n before spending time on the vote.
        let available = grid_len(width, height)?;
        if n > available {
            return Err(HoughMatchError::TopNOutOfRange {
                requested: n,
                available,
            });
        }
        let (acc, _stats) = self.accumulate_with::<C>(scene, width, height, cancel)?;
        rank_top_n(&acc, n)
    }

    fn accumulate_with<C: Counter>(
        &self,
        scene: &EdgePointSet,
        width: usize,
        height: usize,
        cancel: Option<&CancelToken>,
    ) -> HoughMatchResult<(Accumulator<C>, VoteStats)> {
        let table = self.model.table();

        #[cfg(feature = "rayon")]
        {
            if self.cfg.parallel {
                let min_points = self.cfg.min_points_per_worker;
                return match cancel {
                    Some(cancel) => vote::rayon::vote_parallel_cancellable(
                        scene, table, width, height, min_points, cancel,
                    ),
                    None => vote::rayon::vote_parallel(scene, table, width, height, min_points),
                };
            }
        }

        match cancel {
            Some(cancel) => vote::vote_cancellable(scene, table, width, height, cancel),
            None => vote::vote(scene, table, width, height),
        }
    }
}
