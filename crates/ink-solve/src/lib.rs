pub mod client;
pub mod config;
pub mod error;
pub mod payload;

pub use client::{HttpSolveService, SolveService};
pub use config::SolverConfig;
pub use error::{Result, SolveError};
pub use payload::{SolveRequest, decode_data_uri, encode_png, parse_response, png_data_uri};
