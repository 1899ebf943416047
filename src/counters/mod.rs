pub mod counter_base;
pub mod dual_counter;
pub mod exact_counter;
pub mod morris_counter;

pub use counter_base::{is_greater, Counter};
pub use dual_counter::DualCounter;
pub use exact_counter::ExactCounter;
pub use morris_counter::MorrisCounter;
