//! Domain layer: post list invariants independent of transport and state.

pub mod posts;
