//! Game implementations.

pub mod war;
