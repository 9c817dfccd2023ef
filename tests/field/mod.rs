pub mod fixtures;
pub mod reference;
pub mod tolerances;
