//! Resource record data.
//!
//! Each resource record type has it’s own definition of the content and
//! formatting of its data. This module provides the basics for implementing
//! specific types for this record data. The concrete implementations for
//! well-known record types live in the top-level [`rdata`] module.
//!
//! There are two traits herein: [`RecordData`] is implemented by all record
//! data types and allows composing the data. [`ParseRecordData`] allows
//! parsing the data for some record types out of a message.
//!
//! The module also provides a type, [`UnknownRecordData`], that can be used
//! to deal with record types whose specification is not known (or has not
//! been implemented yet).
//!
//! [`rdata`]: crate::rdata

use super::iana::Rtype;
use super::wire::{parse_slice, Compose, ParseError};
use crate::utils::base16;
use bytes::{BufMut, Bytes, BytesMut};
use core::fmt;
use octseq::parse::Parser;

//----------- RecordData -----------------------------------------------------

/// A type that represents record data.
///
/// The type needs to be able to provide the record type of a record with a
/// value’s data via the [`rtype`][Self::rtype] method. Its wire format is
/// provided via the [`Compose`] trait. It does not include the length
/// prefix, which is added by the record.
pub trait RecordData: Compose {
    /// Returns the record type associated with this record data instance.
    ///
    /// This is a method rather than an associated function to allow one
    /// type to be used for several real record types.
    fn rtype(&self) -> Rtype;
}

impl<'a, T: RecordData> RecordData for &'a T {
    fn rtype(&self) -> Rtype {
        (*self).rtype()
    }
}

//------------ ParseRecordData -----------------------------------------------

/// A record data type that can be parsed from a message.
///
/// When record data types are generic – typically over a domain name type –,
/// they may not in all cases be parseable. They may still represent record
/// data to be used when constructing the message.
///
/// To reflect this asymmetry, parsing of record data has its own trait.
pub trait ParseRecordData: RecordData + Sized {
    /// Parses the record data.
    ///
    /// The record data is for a record of type `rtype`. The function may
    /// decide whether it wants to parse data for that type. It should
    /// return `Ok(None)` if it doesn’t.
    ///
    /// The `parser` is positioned at the beginning of the record data and
    /// is limited to the length of the data. The method only needs to parse
    /// as much data as it needs. The caller has to make sure to deal with
    /// data remaining in the parser.
    ///
    /// If the function doesn’t want to process the data, it must not touch
    /// the parser. In particual, it must not advance it.
    fn parse_rdata(
        rtype: Rtype,
        parser: &mut Parser<'_, [u8]>,
    ) -> Result<Option<Self>, ParseError>;
}

//------------ UnknownRecordData ---------------------------------------------

/// A type for parsing any type of record data.
///
/// This type accepts any record type and stores the plain, unparsed record
/// data as an octets sequence.
///
/// Because some record types allow compressed domain names in their record
/// data, this type cannot be used safely with these record types. For these
/// record types, the structure of the content needs to be known.
///
/// [RFC 3597] limits the types for which compressed names are allowed in the
/// record data to those defined in [RFC 1035] itself. Specific types for all
/// these record types exist in [`rdata::rfc1035`][crate::rdata::rfc1035].
///
/// [RFC 1035]: https://tools.ietf.org/html/rfc1035
/// [RFC 3597]: https://tools.ietf.org/html/rfc3597
#[derive(Clone, Eq, PartialEq)]
pub struct UnknownRecordData {
    /// The record type of this data.
    rtype: Rtype,

    /// The record data.
    data: Bytes,
}

impl UnknownRecordData {
    /// Creates generic record data from a bytes value containing raw data.
    pub fn from_octets(
        rtype: Rtype,
        data: Bytes,
    ) -> Result<Self, LongRecordData> {
        if data.len() > usize::from(u16::MAX) {
            return Err(LongRecordData(()));
        }
        Ok(UnknownRecordData { rtype, data })
    }

    /// Returns the record type this data is for.
    pub fn rtype(&self) -> Rtype {
        self.rtype
    }

    /// Returns a reference to the record data.
    pub fn data(&self) -> &Bytes {
        &self.data
    }
}

//--- Compose, RecordData, and ParseRecordData

impl Compose for UnknownRecordData {
    fn compose_len(&self) -> usize {
        self.data.len()
    }

    fn compose(&self, target: &mut BytesMut) {
        target.put_slice(self.data.as_ref())
    }
}

impl RecordData for UnknownRecordData {
    fn rtype(&self) -> Rtype {
        self.rtype
    }
}

impl ParseRecordData for UnknownRecordData {
    fn parse_rdata(
        rtype: Rtype,
        parser: &mut Parser<'_, [u8]>,
    ) -> Result<Option<Self>, ParseError> {
        let data = parse_slice(parser, parser.remaining())?;
        Ok(Some(UnknownRecordData {
            rtype,
            data: Bytes::copy_from_slice(data),
        }))
    }
}

//--- Display and Debug

impl fmt::Display for UnknownRecordData {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "\\# {}", self.data.len())?;
        if !self.data.is_empty() {
            f.write_str(" ")?;
            base16::display(self.data.as_ref(), f)?;
        }
        Ok(())
    }
}

impl fmt::Debug for UnknownRecordData {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("UnknownRecordData(")?;
        fmt::Display::fmt(self, f)?;
        f.write_str(")")
    }
}

//------------ LongRecordData ------------------------------------------------

/// The octets sequence to be used for record data is too long.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct LongRecordData(());

impl LongRecordData {
    pub(crate) const fn new() -> Self {
        LongRecordData(())
    }
}

impl fmt::Display for LongRecordData {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("record data too long")
    }
}

#[cfg(feature = "std")]
impl std::error::Error for LongRecordData {}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn unknown_display() {
        let data = UnknownRecordData::from_octets(
            Rtype::from_int(1234),
            Bytes::from_static(b"\x12\xab"),
        )
        .unwrap();
        assert_eq!(format!("{}", data), "\\# 2 12ab");
    }

    #[test]
    fn unknown_parse() {
        let buf = b"\x01\x02\x03";
        let mut parser = Parser::from_ref(&buf[..]);
        let data =
            UnknownRecordData::parse_rdata(Rtype::from_int(1234), &mut parser)
                .unwrap()
                .unwrap();
        assert_eq!(data.data().as_ref(), b"\x01\x02\x03");
        assert_eq!(parser.remaining(), 0);
    }
}
