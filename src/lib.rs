// Library root
// -----------
// This crate exposes the pieces the `gist-sync` binary wires together.
//
// Module responsibilities:
// - `config`: Reads the token and the per-example gist ids from the
//   environment into an explicit `Config` value.
// - `api`: Small blocking HTTP client that PATCHes a gist with new file
//   content.
// - `sync`: The loop over the example table: load each file, push it, and
//   record what happened.
pub mod api;
pub mod config;
pub mod sync;
