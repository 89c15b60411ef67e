//! Recursive-descent grammars: the version grammar here, and the
//! range grammar in [`crate::range::parser`].

pub mod version_grammar;
