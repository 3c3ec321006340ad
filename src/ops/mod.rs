pub mod complete;
pub mod decorate;
pub mod mutate;
pub mod notes;
pub mod relocate;
pub mod sort;
