use crate::destination::destination_path;
use crate::error::FillError;
use crate::file_copier::copy_selection;
use crate::free_space::available_bytes;
use crate::selector::Selector;
use crate::size::human_size;
use crate::types::{Budget, ByteLimit, CandidateList, FillConfig, Report, Selection, StopReason};
use rand::Rng;
use std::io::Write;

/// The number of bytes we are allowed to write. Free space is only looked at if the user
/// didn't give us a size.
///
pub fn resolve_byte_budget(config: &FillConfig) -> Result<u64, FillError> {
    match config.byte_limit {
        ByteLimit::Explicit(bytes) => Ok(bytes),
        ByteLimit::FreeSpace => available_bytes(&config.target),
    }
}

/// Picks files from `candidates` and copies each one into the target before picking the next.
/// Any copy failure ends the run, leaving what was already copied in place. Destinations are
/// listed on `out`, in copy order, when verbose.
///
pub fn fill<R: Rng, W: Write>(
    config: &FillConfig,
    candidates: CandidateList,
    rng: R,
    out: &mut W,
) -> Result<Report, FillError> {
    let budget = Budget {
        bytes: resolve_byte_budget(config)?,
        items: config.item_limit,
    };

    log::info!(
        "filling {} with up to {} from {} candidates",
        config.target,
        human_size(budget.bytes),
        candidates.len()
    );

    let mut selector = Selector::new(candidates, budget, config.retry, rng);
    let mut selections = Vec::new();
    let mut bytes = 0;

    for candidate in selector.by_ref() {
        let selection = Selection {
            destination: destination_path(&candidate.path, config.depth)?,
            source: candidate.path,
            size: candidate.size,
        };

        copy_selection(&config.target, &selection, &config.opts, out)?;
        bytes += selection.size;
        selections.push(selection);
    }

    let stop = selector
        .stop_reason()
        .unwrap_or(StopReason::CandidatesExhausted);

    log::info!(
        "{} {} files ({}), stopped by {:?} with {} candidates undrawn",
        if config.opts.noop { "would copy" } else { "copied" },
        selections.len(),
        human_size(bytes),
        stop,
        selector.candidates_left()
    );

    Ok(Report {
        selections,
        bytes,
        stop,
    })
}
