pub mod dimlex;
pub mod lexicon;
pub mod pharaoh;

pub use dimlex::{parse_xml_lexicon, parse_xml_relations};
pub use lexicon::{normalize_connective, parse_text_lexicon};
pub use pharaoh::parse_alignment_line;
