pub mod config;
pub mod crossover;
pub mod evolution;
pub mod mutation;
pub mod selection;
pub mod solver;
