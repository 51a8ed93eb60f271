pub mod bench;
pub mod binary;
pub mod config;
pub mod corpus;
pub mod errors;
pub mod metrics;
pub mod report;
pub mod results;
pub mod search;

pub use bench::run;
pub use binary::{binary_search, BinaryProbe};
pub use config::{BenchConfig, CliOverrides, EncodingMode};
pub use errors::{BenchError, BenchResult};
pub use results::{BenchReport, Summary};
pub use search::{Algorithm, MatchOutcome, Matcher, Symbol};
