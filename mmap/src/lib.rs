pub mod config;
pub mod error;
pub mod facts;
pub mod inspect;
pub mod msg;
pub mod outcome;
mod output;
pub mod pipeline;
pub mod report;
pub mod scan;

pub use config::{Config, Paths};
pub use error::Error;
pub use facts::Facts;
pub use inspect::{read_sections, read_symbols, Fixture, Inspector, Tools};
pub use outcome::{Outcome, Status};
pub use pipeline::{collect, Collected};
pub use report::Report;
