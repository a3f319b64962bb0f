pub mod config;
pub mod detect;
pub mod error;
pub mod generate;
pub mod io;
pub mod materialize;
pub mod paths;
pub mod runner;
pub mod scan;
pub mod select;
pub mod substitute;
pub mod template;
pub mod types;

pub use error::{ForgeError, Result};
