//! Types shared between the roster API, storage layer and tooling.

pub mod caller;
pub mod params;
pub mod views;
