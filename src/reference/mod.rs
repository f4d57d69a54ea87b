// Reference data: closed catalogs plus static agronomic tables. No logic
// beyond lookups lives here.

pub mod agronomy;
pub mod catalog;

pub use catalog::{Crop, State};
