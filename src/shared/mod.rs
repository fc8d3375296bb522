//! Geteilte Typen: Export-Optionen und Build-Kennung.

mod build_info;
pub mod options;

pub use build_info::BuildInfo;
pub use options::EncoderOptions;
