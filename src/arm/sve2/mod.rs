//! SVE2 demonstrations.
//!
//! SVE2 keeps the SVE programming model and adds, among others, non-temporal
//! gathers and scatters and complex-number arithmetic. Like SVE, these run on
//! the software model in [`crate::arm::sve::model`].

pub mod complex_add;
pub mod gather_nt;
pub mod load_store;
pub mod scatter_nt;
