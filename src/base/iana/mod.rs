//! IANA Definitions for DNS.
//!
//! This module contains types for parameters defined in IANA registries
//! that are relevant for this crate.
//!
//! All types defined hereunder follow the same basic structure. They are
//! newtypes around the raw integer value with associated constants for all
//! well-defined values. Since we cannot restrict that integer to only the
//! defined values, we generally allow the full set of possible values.
//!
//! There are two methods `from_int()` and `to_int()` to convert from and
//! to raw integer values as well as implementations of the `From` trait
//! for these. `FromStr` and `Display` are implemented to convert from
//! the string codes to the values and back.
//!
//! Types also implement `parse()` for creation from wire format as well as
//! a `compose()` method for composing into wire format data.

pub use self::class::Class;
pub use self::opcode::Opcode;
pub use self::rcode::{Rcode, TsigRcode};
pub use self::rtype::Rtype;

#[macro_use]
mod macros;

pub mod class;
pub mod opcode;
pub mod rcode;
pub mod rtype;

//------------ FromStrError --------------------------------------------------

/// A string could not be converted into an IANA value.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct FromStrError(());

//--- Display and Error

impl core::fmt::Display for FromStrError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.write_str("unknown mnemonic")
    }
}

#[cfg(feature = "std")]
impl std::error::Error for FromStrError {}
