//! Studio configuration: the serde schema for `config.toml` plus the XDG
//! path helpers shared with the collection store and the log file.

mod load;
mod schema;

pub use load::default_data_dir;
pub use schema::*;

#[cfg(test)]
mod tests;
