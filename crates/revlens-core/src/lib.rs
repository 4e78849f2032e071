pub mod corpus;
pub mod readiness;
pub mod verdict;

pub use corpus::Corpus;
pub use readiness::Readiness;
pub use verdict::{RawPrediction, SentimentLabel, Verdict};
