pub mod config;
pub mod error;
pub mod killsource;
pub mod output;
pub mod run;

pub use error::Error;
pub use run::{run, Summary};
