//! Bootstrapped mining of bilingual discourse-connective pairs from a
//! word-aligned parallel corpus.

pub mod config;
pub mod error;
pub mod types {
    pub mod alignment_data;
    pub mod tables;
}
pub mod parsing;
pub mod corpus;
pub mod mining;
pub mod alignment_io;
pub mod relations;
pub mod concordance;

pub use config::{Config, RoundParams};
pub use corpus::ParallelCorpus;
pub use error::{Error, Result};
pub use mining::{LanguageSide, Lexicon, Session, WordAlignmentIndex};
pub use types::alignment_data::{AlignmentPair, Direction, SentencePair};
