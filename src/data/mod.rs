//! Static, read-only battle data: the move catalog and the starter roster.

pub mod moves;
pub mod species;
