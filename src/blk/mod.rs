//! Export von Visier-Dateien im Block-Format des Spiels.
//!
//! Jede Zeile ist ein Kommentar (`// ...`), eine typisierte Zuweisung
//! (`key:tag = value`) oder ein Block-Begrenzer (`name {` / `}`).

pub mod sight;
pub mod value;
pub mod writer;

pub use sight::{sight_config_lines, write_sight_config};
pub use value::{format_real, BlkValue, Num};
pub use writer::BlkWriter;
