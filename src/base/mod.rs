//! Basics.
//!
//! This module provides types and traits for working with DNS data. The types
//! allow creating such data from scratch and processing it. Crucially, the
//! module provides means to extract the data from wire-format DNS messages
//! and assemble such messages.
//!
//!
//! ## Parsing and Composing Messages
//!
//! In order to easily distinguish the process of creating and disecting
//! wire-format messages other forms of representation conversion such as
//! reading from a master file, we use the term *parsing* for extracting data
//! from a wire-format representation and *composing* for producing such a
//! representation.
//!
//! Parsing always happens on a buffer holding a complete DNS message via
//! the [`Parser`][octseq::parse::Parser] type. This allows following
//! compression pointers in domain names. Composing appends to a
//! [`BytesMut`][bytes::BytesMut] buffer and never compresses names.
//!
//! The [`Message`] type takes the binary data of a DNS message and provides
//! access to its four sections. It can also be built from scratch and turned
//! back into wire format.
//!
//!
//! # Types for DNS Data
//!
//! The module contains a number of types for DNS data, both fundamental
//! and composed. Because they often come with a number of support types,
//! they are arranged in submodules. You will find detailed explanations for
//! all of them in their module. These are:
//!
//! * [header] for the header of DNS messages,
//! * [iana] for IANA-maintained values such as record types and classes,
//! * [name] for domain names,
//! * [question] for questions,
//! * [rdata] for the basic traits of record data,
//! * [record] for DNS resource records including their data.

//--- Re-exports

pub use self::header::{Header, HeaderCounts, HeaderSection};
pub use self::iana::Rtype;
pub use self::message::Message;
pub use self::name::Dname;
pub use self::question::Question;
pub use self::rdata::{ParseRecordData, RecordData, UnknownRecordData};
pub use self::record::{Record, RecordHeader};
pub use self::wire::{ComposeError, ParseError};

//--- Modules

pub mod header;
pub mod iana;
pub mod message;
pub mod name;
pub mod question;
pub mod rdata;
pub mod record;
pub mod wire;
