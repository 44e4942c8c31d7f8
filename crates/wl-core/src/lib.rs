pub mod config;
pub mod error;
pub mod generator;
pub mod io;
pub mod paths;
pub mod placeholder;
pub mod replacements;
pub mod splice;
pub mod sql;
pub mod template;
pub mod transform;
pub mod types;
pub mod urlcheck;

pub use error::{Result, WlError};
