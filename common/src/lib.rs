//! Everything fill-player needs to pick a random set of files from a playlist and copy them
//! onto a device, short of parsing the command line.
//!
pub mod destination;
pub mod error;
pub mod file_copier;
pub mod filler;
pub mod free_space;
pub mod macros;
pub mod playlist;
pub mod selector;
pub mod size;
pub mod types;

#[cfg(test)]
mod fixtures;
