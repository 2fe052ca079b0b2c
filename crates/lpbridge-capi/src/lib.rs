//! C ABI for lpbridge.
//!
//! Exposes a single solve entry point taking a coordinate-format matrix,
//! bound vectors and a parameter struct, and returning four termination
//! flags. The matching declarations live in `include/lpbridge.h`.

mod interface;
mod types;

pub use interface::{lpbridge_solve, lpbridge_version};
pub use types::{
    LPBRIDGE_USE_BARRIER, LPBRIDGE_USE_DUAL, LPBRIDGE_USE_PRIMAL, lpbridge_coo_matrix_t,
    lpbridge_params_t, lpbridge_result_t,
};
