pub mod comparison;
pub mod contribution;
pub mod input;
pub mod italy;
pub mod regime;

// Flat public surface for domain types and functions.
#[allow(unused_imports)]
pub use comparison::{compare, simulate, Comparison};
#[allow(unused_imports)]
pub use contribution::{contribution, ContributionScheme};
pub use input::{parse_amount, read_input_json, SimulationError, SimulationInput};
pub use italy::{ActivityCategory, SubstituteRate, ACTIVITY_CATEGORIES};
#[allow(unused_imports)]
pub use regime::{
    compute_forfetario, compute_ordinario, progressive_income_tax, Regime, RegimeResult,
};
