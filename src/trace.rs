//! Stage spans and count events for the voting pipeline.
//!
//! Each stage (offset build, vote, merge, rank, locate) opens a debug span
//! under the `houghmatch` target and reports its counts as debug events.
//! Without the `tracing` feature the macros only evaluate their field values.

use crate::vote::VoteStats;

/// Target shared by every span and event this crate emits.
#[cfg(feature = "tracing")]
pub(crate) const TARGET: &str = "houghmatch";

/// Opens and enters a stage span; bind the result to keep it open.
#[cfg(feature = "tracing")]
macro_rules! stage_span {
    ($stage:literal $(, $key:ident = $value:expr)* $(,)?) => {
        tracing::debug_span!(target: $crate::trace::TARGET, $stage $(, $key = $value)*).entered()
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! stage_span {
    ($stage:literal $(, $key:ident = $value:expr)* $(,)?) => {{
        $(let _ = &$value;)*
        $crate::trace::StageGuard
    }};
}

/// Reports counts for the current stage.
#[cfg(feature = "tracing")]
macro_rules! count_event {
    ($what:literal, $($key:ident = $value:expr),+ $(,)?) => {
        tracing::debug!(target: $crate::trace::TARGET, what = $what, $($key = $value),+)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! count_event {
    ($what:literal, $($key:ident = $value:expr),+ $(,)?) => {{
        $(let _ = &$value;)+
    }};
}

pub(crate) use count_event;
pub(crate) use stage_span;

/// Reports the outcome of a finished vote.
#[inline]
pub(crate) fn record_votes(stats: VoteStats) {
    count_event!("votes", cast = stats.cast, dropped = stats.dropped);
}

/// Guard returned by `stage_span!` when tracing is compiled out.
#[cfg(not(feature = "tracing"))]
#[must_use]
pub(crate) struct StageGuard;
