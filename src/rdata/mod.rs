//! Resource data implementations.
//!
//! This module contains implementations for the record data of the record
//! types needed when signing and verifying messages plus a few common types
//! for building ordinary queries and responses.
//!
//! The types are named identically to the [`Rtype`] constant they implement.
//! They are grouped into submodules for the RFCs they are defined in. All
//! types are also re-exported at the top level here. Ie., for the AAAA
//! record type, you can simple `use domain_tsig::rdata::Aaaa` instead of
//! `use domain_tsig::rdata::aaaa::Aaaa`.
//!
//! Record types without an implementation of their own are parsed into
//! [`UnknownRecordData`] via the [`AllRecordData`] enum.
//!
//! [`Rtype`]: crate::base::iana::Rtype
//! [`UnknownRecordData`]: crate::base::rdata::UnknownRecordData

pub mod aaaa;
pub mod rfc1035;
pub mod tsig;

#[macro_use]
mod macros;

// The rdata_types! macro (defined in self::macros) reexports the record data
// types here and creates the AllRecordData enum containing all record types.
//
// All record data types listed here MUST have the same name as the
// `Rtype` constant they implement, written in upper camel case.

rdata_types! {
    rfc1035::{
        A,
        Cname,
        Ns,
    }
    aaaa::{
        Aaaa,
    }
    tsig::{
        Tsig,
    }
}

pub use self::tsig::Time48;

//============ Testing =======================================================
