//! Touchstone network-parameter conversion.
//!
//! Two operations are exposed: extracting a 2-port from an N-port file
//! ([`convert::convert_nport_to_two_port`]) and rewriting a 2-port file in
//! another complex representation ([`convert::convert_two_port_representation`]).
//! Both are pure text-in, text-out transforms.
pub mod convert;
pub mod error;
pub mod file;
pub mod format;
pub mod frequency;
pub mod options;
pub mod ordering;
pub mod parameter;
pub mod point;
pub mod prelude;
pub mod record;
