//! Track catalog: the `Track` record shared by the catalog, the store and
//! the player, plus the compiled-in demo tracks.

mod builtin;
mod model;

pub use builtin::builtin_tracks;
pub use model::*;

#[cfg(test)]
mod tests;
