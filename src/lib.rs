//=========================================================================
// Bastion Core — Library Root
//
// This crate is the orchestration core of a base-defense game: it
// drives the top-level flow through scene states, routes every
// cross-subsystem call through one facade, decouples event producers
// from consumers over a typed event bus, and assembles characters
// through a factory + builder + director pipeline.
//
// Responsibilities:
// - Expose the runtime driver (`GameLoop`) and the facade it owns
// - Keep the host environment behind the `GameHost` trait (windowing,
//   rendering, raycasting, and scene swapping all live host-side)
// - Provide clean separation between the high-level facade and the
//   subsystems it sequences
//
// Typical usage:
// ```no_run
// use bastion_core::{GameLoopBuilder, host::ChannelHost};
//
// fn main() {
//     let (mut host, _shell) = ChannelHost::new(128);
//     GameLoopBuilder::new().build().run(&mut host);
// }
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------
//
// `core` contains the game logic (facade, scenes, events, pipeline,
// subsystems). `host` carries the environment contract and the
// channel-fed host implementation shells embed.
//
pub mod core;
pub mod host;
pub mod prelude;

//--- Internal Modules ----------------------------------------------------
//
// `runtime` defines the frame driver and its builder.
//
mod runtime;

//--- Public Exports ------------------------------------------------------
//
// Re-exports the loop types as the main entry points so applications
// can `use bastion_core::GameLoopBuilder;` without knowing the module
// structure.
//
pub use runtime::{GameLoop, GameLoopBuilder};
