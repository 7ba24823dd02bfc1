// Other modules in this crate `use crate::errors::*;` to get access to everything
// `error_chain!` creates: the Error, ErrorKind, ResultExt, and Result types.
// Result is a typedef of std `Result` with the error type our own `Error`.
// ResultExt adds the `chain_err` trait method.
use error_chain::*;

error_chain! {

    errors {
        InvalidDimensions(rows: usize, columns: usize) {
            description("invalid grid dimensions")
            display("invalid grid dimensions: {} rows by {} columns, both must be non-zero",
                    rows, columns)
        }

        InvalidCheckpoint(row: isize, col: isize) {
            description("invalid checkpoint position")
            display("checkpoint at row {} column {} is off the grid or on the start or goal cell",
                    row, col)
        }

        TooManyCheckpoints(requested: usize, available: usize) {
            description("too many checkpoints requested")
            display("requested {} random checkpoints but only {} cells can hold one",
                    requested, available)
        }
    }
}
