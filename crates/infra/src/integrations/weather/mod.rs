//! Weather capability implementations

pub mod reference;

pub use reference::ReferenceWeatherOracle;
