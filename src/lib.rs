//! Signing and verifying DNS messages with TSIG.
//!
//! This crate implements transaction signatures for DNS messages as defined
//! in [RFC 2845] and [RFC 4635]. Two parties sharing a secret key can use
//! them to make sure a message was sent by the other party and hasn’t been
//! tampered with on the way.
//!
//! # Modules
//!
//! * [base] contains the owned DNS message model needed to create, encode,
//!   and decode the messages that are signed and verified,
//! * [rdata] contains the record data types, most importantly the
//!   [TSIG record data][rdata::Tsig],
//! * [tsig] contains the actual signing and verification, and
//! * [utils] has the Base 16 and Base 64 encodings.
//!
//! # Example
//!
//! ```
//! use domain_tsig::base::{Dname, Message, Rtype};
//! use domain_tsig::tsig::{self, Credentials, DEFAULT_FUDGE};
//! use std::str::FromStr;
//!
//! let credentials = Credentials::from_strs(
//!     "hmac-sha256.", "key.example.", "c2VjcmV0LWtleQ=="
//! ).unwrap();
//!
//! // The sender signs the message and sends its wire format.
//! let mut query = Message::query(
//!     Dname::from_str("example.com.").unwrap(), Rtype::A
//! );
//! tsig::sign(&mut query, &credentials, DEFAULT_FUDGE, None).unwrap();
//! let wire = query.to_wire().unwrap();
//!
//! // The receiver parses the message and verifies it.
//! let mut received = Message::from_octets(&wire).unwrap();
//! assert!(tsig::verify(&mut received, &wire, &credentials, None));
//! ```
//!
//! # Reference of Feature Flags
//!
//! * `std`: support for the Rust std library. This feature is enabled by
//!   default and is needed for taking the time signed from the system
//!   clock.
//!
//! [RFC 2845]: https://tools.ietf.org/html/rfc2845
//! [RFC 4635]: https://tools.ietf.org/html/rfc4635

#![allow(renamed_and_removed_lints)]
#![allow(clippy::unknown_clippy_lints)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod base;
pub mod rdata;
pub mod tsig;
pub mod utils;
