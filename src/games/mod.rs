//! Game implementations.

pub mod quiz_four;
