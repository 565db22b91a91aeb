pub mod calculators;
pub mod consult;
pub mod health;
pub mod specialties;
