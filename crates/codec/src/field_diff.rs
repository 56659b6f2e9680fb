//! Field diff run-length coding
//!
//! A page's field is stored as the cell-wise difference from the previous
//! page's committed field. The 240 wire cells run row 22 first, left to right,
//! down to row 0, followed by the 10 block-up cells. Runs of equal difference
//! are stored as `(diff + 8) * 240 + (run - 1)` in two symbols.

use fumen_core::types::{FIELD_BLOCKS, FIELD_TOP, FIELD_WIDTH, PLAY_BLOCKS};
use fumen_core::{Field, FieldLine, Result};

use crate::values::{ValueWriter, Values};

/// Symbols per run
pub const RUN_SYMBOLS: usize = 2;

/// Offset applied to a difference so it is never negative
const DIFF_BIAS: i32 = 8;

/// Where a wire cell lives
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WireCell {
    Field { x: i8, y: i8 },
    BlockUp { x: i8 },
}

/// Map a wire index (0..240) to its cell
pub fn wire_cell(index: usize) -> WireCell {
    let x = (index % FIELD_WIDTH) as i8;
    if index < PLAY_BLOCKS {
        WireCell::Field {
            x,
            y: (FIELD_TOP - 1 - index / FIELD_WIDTH) as i8,
        }
    } else {
        WireCell::BlockUp { x }
    }
}

/// Split a run value into `(diff, run_length)`, with `run_length` one less than the cells covered
pub fn split_run(value: u32) -> (i32, usize) {
    let blocks = FIELD_BLOCKS as u32;
    ((value / blocks) as i32 - DIFF_BIAS, (value % blocks) as usize)
}

/// Inverse of [`split_run`]
pub fn join_run(diff: i32, run_length: usize) -> u32 {
    (diff + DIFF_BIAS) as u32 * FIELD_BLOCKS as u32 + run_length as u32
}

/// Value of a single run saying "nothing changed"
pub fn unchanged_run() -> u32 {
    join_run(0, FIELD_BLOCKS - 1)
}

/// Apply one page of runs to `field` and `block_up`
///
/// Returns true when the page is a single zero run over every cell, which
/// means a repeat count follows.
pub fn read_field_diff(values: &mut Values, field: &mut Field, block_up: &mut FieldLine) -> Result<bool> {
    let mut index = 0;
    let mut unchanged = false;

    while index < FIELD_BLOCKS {
        let (diff, run_length) = split_run(values.poll(RUN_SYMBOLS)?);
        if index == 0 && diff == 0 && run_length == FIELD_BLOCKS - 1 {
            unchanged = true;
        }

        let end = (index + run_length + 1).min(FIELD_BLOCKS);
        if diff != 0 {
            for wire in index..end {
                match wire_cell(wire) {
                    WireCell::Field { x, y } => field.add(x, y, diff)?,
                    WireCell::BlockUp { x } => block_up.add(x, diff)?,
                }
            }
        }
        index = end;
    }

    Ok(unchanged)
}

fn wire_values(field: &Field, block_up: &FieldLine) -> [i32; FIELD_BLOCKS] {
    let mut out = [0; FIELD_BLOCKS];
    for (wire, slot) in out.iter_mut().enumerate() {
        let piece = match wire_cell(wire) {
            WireCell::Field { x, y } => field.get(x, y),
            WireCell::BlockUp { x } => block_up.get(x),
        };
        *slot = piece.map_or(0, |p| p.value() as i32);
    }
    out
}

/// Runs describing the change from `(prev, prev_block_up)` to `(field, block_up)`
pub fn diff_runs(
    prev: &Field,
    prev_block_up: &FieldLine,
    field: &Field,
    block_up: &FieldLine,
) -> Vec<u32> {
    let before = wire_values(prev, prev_block_up);
    let after = wire_values(field, block_up);

    let mut runs = Vec::new();
    let mut current = after[0] - before[0];
    let mut length = 0;
    for wire in 1..FIELD_BLOCKS {
        let diff = after[wire] - before[wire];
        if diff == current {
            length += 1;
        } else {
            runs.push(join_run(current, length));
            current = diff;
            length = 0;
        }
    }
    runs.push(join_run(current, length));
    runs
}

/// Write the runs for one page
pub fn write_field_diff(writer: &mut ValueWriter, runs: &[u32]) {
    for &run in runs {
        writer.push(run, RUN_SYMBOLS);
    }
}

/// True when `runs` is the single "nothing changed" run
pub fn is_unchanged(runs: &[u32]) -> bool {
    runs == [unchanged_run()]
}
