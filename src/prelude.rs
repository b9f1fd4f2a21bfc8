//! rfconvert prelude.
//!
//! This module contains the most used types and functions, which you can
//! import easily as a group.
//!
//! ```
//! use rfconvert::prelude::*;
//!
//! let out = convert_two_port_representation(
//!     "# GHz S RI R 50\n1 0.5 0 0 0 0 0 0.5 0\n",
//!     &TwoPortOptions::new(),
//! )
//! .unwrap();
//! assert_eq!(out.points, 1);
//! ```

#[doc(no_inline)]
pub use crate::convert::{
    convert_nport_to_two_port, convert_two_port_representation, Diagnostics, NPortConversion,
    NPortOptions, TwoPortConversion, TwoPortOptions,
};

#[doc(no_inline)]
pub use crate::error::ConvertError;

#[doc(no_inline)]
pub use crate::format::{ComplexNumberType, Degenerate, DB_FLOOR};

#[doc(no_inline)]
pub use crate::frequency::FrequencyUnit;

#[doc(no_inline)]
pub use crate::options::OptionsHeader;

#[doc(no_inline)]
pub use crate::ordering::{OrderMode, OrderScores};

#[doc(no_inline)]
pub use crate::parameter::RFParameter;

#[doc(no_inline)]
pub use crate::point::{MatrixOrder, Point};

#[doc(no_inline)]
pub use crate::record::{Record, RecordAssembler};
