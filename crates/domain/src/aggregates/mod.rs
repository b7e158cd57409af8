//! Aggregate roots - domain objects that own their related data
//!
//! The observer has a single aggregate: the `World`, whose clock may be
//! advanced by the live stream between full fetches. Everything else the
//! service sends is a plain snapshot entity (see `entities`).

pub mod world;

pub use world::{
    GenesisProgress, SeedFaction, World, WorldListing, WorldStatus, WorldTag, GENESIS_PROGRESS_KEY,
    SEED_FACTIONS_KEY,
};
