pub mod aircraft;
pub mod airports;
pub mod filters;
pub mod legs;
pub mod trip;

use thiserror::Error;

/// Input-contract violations. The engine fails soft on missing filter
/// dimensions, but a catalogue referencing an unknown airport or carrying
/// a malformed leg key is unrecoverable and reported loudly.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("unknown ICAO code: {0}")]
    UnknownIcao(String),
    #[error("malformed leg key (expected \"FROM-TO\"): {0}")]
    BadLegKey(String),
}
