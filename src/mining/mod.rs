pub mod bootstrap;
pub mod evidence;
pub mod filter;
pub mod lexicon;
pub mod phrases;
pub mod projector;
pub mod span;
pub mod word_index;

pub use bootstrap::{LanguageSide, RoundReport, Session};
pub use lexicon::Lexicon;
pub use word_index::{build_indexes, WordAlignmentIndex};
