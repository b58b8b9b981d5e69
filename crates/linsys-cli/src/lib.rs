pub mod commands;
pub mod problem;
