//! line-csv Library
//!
//! A line-oriented CSV codec. Each physical line is one row; fields are
//! separated by commas and a field containing a comma or double quote is
//! wrapped in double quotes with internal quotes doubled.
//!
//! The [`codec`] module holds the decoder and encoder together with the
//! file reader/writer that bind them to line sources and sinks. The
//! [`checker`], [`normalizer`] and [`transcode`] modules build the CLI tools
//! on top of it.

pub mod checker;
pub mod cli;
pub mod codec;
pub mod error;
pub mod normalizer;
pub mod transcode;
