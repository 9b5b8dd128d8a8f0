pub mod commands;

pub use commands::{Cli, Commands, ShapeArgs, read_collection, run};
