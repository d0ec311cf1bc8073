//! Resource Records.
//!
//! This module defines types related to DNS resource records. The most
//! complete type is [`Record`] which contains a complete record for a
//! certain record type. [`RecordHeader`] contains the data from a record’s
//! header, the first couple of octets common to all records.
//!
//! In addition, [`Record::skip`] walks over a record in a message without
//! looking at its content. This is all that is needed to find out where a
//! record ends.

use super::iana::{Class, Rtype};
use super::name::Dname;
use super::rdata::{ParseRecordData, RecordData};
use super::wire::{Compose, ComposeError, Parse, ParseError};
use bytes::{BufMut, BytesMut};
use core::fmt;
use octseq::parse::Parser;

//------------ Record --------------------------------------------------------

/// A DNS resource record.
///
/// All information available through the DNS is stored in resource records.
/// They have a three part key of a domain name, resource record type, and
/// class. Data is arranged in a tree which is navigated using the domain
/// name. Each node in the tree carries a label, starting with the root
/// label as the top-most node. The tree is traversed by stepping through the
/// name from right to left, finding a child node carring the label of each
/// step.
///
/// The record type describes the kind of data the record holds, such as IP
/// addresses. The class, finally, describes which sort of network the
/// information is for since DNS was originally intended to be used for
/// networks other than the Internet as well. In practice, the only relevant
/// class is IN, the Internet. Note that each class has its own tree of nodes.
///
/// The payload of a resource record is its data. Its purpose, meaning, and
/// format is determined by the record type. For each unique three-part key
/// there can be multiple resource records. All these records for the same
/// key are called *resource record sets,* most often shortened to ‘RRset.’
///
/// There is one more piece of data: the TTL or time to live. This value
/// says how long a record remains valid before it should be refreshed from
/// its original source, given in seconds.
///
/// The record type is not part of the type itself but provided by the
/// record data through the [`RecordData`] trait.
#[derive(Clone, Eq, PartialEq)]
pub struct Record<Data> {
    /// The owner of the record.
    owner: Dname,

    /// The class of the record.
    class: Class,

    /// The time-to-live value of the record.
    ttl: u32,

    /// The record data. The value also specifies the record’s type.
    data: Data,
}

/// # Creation and Element Access
///
impl<Data> Record<Data> {
    /// Creates a new record from its parts.
    pub fn new(owner: Dname, class: Class, ttl: u32, data: Data) -> Self {
        Record {
            owner,
            class,
            ttl,
            data,
        }
    }

    /// Returns a reference to the owner domain name.
    pub fn owner(&self) -> &Dname {
        &self.owner
    }

    /// Returns the record type.
    pub fn rtype(&self) -> Rtype
    where
        Data: RecordData,
    {
        self.data.rtype()
    }

    /// Returns the record class.
    pub fn class(&self) -> Class {
        self.class
    }

    /// Returns the record’s time-to-live.
    pub fn ttl(&self) -> u32 {
        self.ttl
    }

    /// Return a reference to the record data.
    pub fn data(&self) -> &Data {
        &self.data
    }

    /// Returns a mutable reference to the record data.
    pub fn data_mut(&mut self) -> &mut Data {
        &mut self.data
    }

    /// Trades the record for its record data.
    pub fn into_data(self) -> Data {
        self.data
    }

    /// Trades the record for its owner name and data.
    pub fn into_owner_and_data(self) -> (Dname, Data) {
        (self.owner, self.data)
    }
}

/// # Parsing and Composing
///
impl<Data: ParseRecordData> Record<Data> {
    /// Parses a record from the beginning of a parser.
    ///
    /// Returns `Ok(None)` if the record data type doesn’t accept records of
    /// the encountered record type. The parser is still moved past the
    /// record in this case.
    pub fn parse(
        parser: &mut Parser<'_, [u8]>,
    ) -> Result<Option<Self>, ParseError> {
        let header = RecordHeader::parse(parser)?;
        header.parse_into_record(parser)
    }
}

impl<Data> Record<Data> {
    /// Skips over a record at the beginning of a parser.
    ///
    /// The record data is not looked at at all. Only the record header is
    /// parsed in order to learn the length of the data.
    pub fn skip(parser: &mut Parser<'_, [u8]>) -> Result<(), ParseError> {
        RecordHeader::parse_and_skip(parser).map(|_| ())
    }
}

impl<Data: RecordData> Record<Data> {
    /// Returns the length of the record’s wire format.
    pub fn compose_len(&self) -> usize {
        self.owner.compose_len()
            + Rtype::COMPOSE_LEN
            + Class::COMPOSE_LEN
            + 4
            + 2
            + self.data.compose_len()
    }

    /// Appends the record’s wire format to `target`.
    ///
    /// The owner name is never compressed. Fails if the record data is
    /// too long to be described by its length field in which case nothing
    /// will have been appended.
    pub fn compose(&self, target: &mut BytesMut) -> Result<(), ComposeError> {
        let rdlen = u16::try_from(self.data.compose_len())
            .map_err(|_| ComposeError::LongData)?;
        target.reserve(self.compose_len());
        self.owner.compose(target);
        self.rtype().compose(target);
        self.class.compose(target);
        target.put_u32(self.ttl);
        target.put_u16(rdlen);
        self.data.compose(target);
        Ok(())
    }
}

//--- From

impl<Data> From<(Dname, Class, u32, Data)> for Record<Data> {
    fn from((owner, class, ttl, data): (Dname, Class, u32, Data)) -> Self {
        Self::new(owner, class, ttl, data)
    }
}

//--- Display and Debug

impl<Data: RecordData + fmt::Display> fmt::Display for Record<Data> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}\t{}\t{}\t{}\t{}",
            self.owner,
            self.ttl,
            self.class,
            self.data.rtype(),
            self.data
        )
    }
}

impl<Data: fmt::Debug> fmt::Debug for Record<Data> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Record")
            .field("owner", &self.owner)
            .field("class", &self.class)
            .field("ttl", &self.ttl)
            .field("data", &self.data)
            .finish()
    }
}

//------------ RecordHeader --------------------------------------------------

/// The header of a resource record.
///
/// This type encapsulates the common header of a resource record. It
/// consists of the owner, record type, class, TTL, and the length of the
/// record data. It is effectively a helper type for dealing with resource
/// records encoded in a DNS message.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RecordHeader {
    owner: Dname,
    rtype: Rtype,
    class: Class,
    ttl: u32,
    rdlen: u16,
}

impl RecordHeader {
    /// Returns a reference to the owner of the record.
    pub fn owner(&self) -> &Dname {
        &self.owner
    }

    /// Returns the record type of the record.
    pub fn rtype(&self) -> Rtype {
        self.rtype
    }

    /// Returns the class of the record.
    pub fn class(&self) -> Class {
        self.class
    }

    /// Returns the TTL of the record.
    pub fn ttl(&self) -> u32 {
        self.ttl
    }

    /// Returns the data length of the record.
    pub fn rdlen(&self) -> u16 {
        self.rdlen
    }

    /// Parses a record header from the beginning of a parser.
    pub fn parse(parser: &mut Parser<'_, [u8]>) -> Result<Self, ParseError> {
        Ok(RecordHeader {
            owner: Dname::parse(parser)?,
            rtype: Rtype::parse(parser)?,
            class: Class::parse(parser)?,
            ttl: u32::parse(parser)?,
            rdlen: u16::parse(parser)?,
        })
    }

    /// Parses a record header and then skips over the data.
    ///
    /// The owner name is only skipped, not resolved. The returned value
    /// is the length of the record data.
    pub fn parse_and_skip(
        parser: &mut Parser<'_, [u8]>,
    ) -> Result<u16, ParseError> {
        Dname::skip(parser)?;
        parser.advance(Rtype::COMPOSE_LEN + Class::COMPOSE_LEN + 4)?;
        let rdlen = u16::parse(parser)?;
        parser.advance(usize::from(rdlen))?;
        Ok(rdlen)
    }

    /// Parses the remainder of the record and returns it.
    ///
    /// The method assumes that the parser is currently positioned right
    /// after the end of the record header. If the record data type accepts
    /// the record, the data is parsed and checked to cover exactly the
    /// record data length.
    pub fn parse_into_record<Data: ParseRecordData>(
        self,
        parser: &mut Parser<'_, [u8]>,
    ) -> Result<Option<Record<Data>>, ParseError> {
        let mut rdata = parser.parse_parser(usize::from(self.rdlen))?;
        let res = match Data::parse_rdata(self.rtype, &mut rdata)? {
            Some(data) => {
                if rdata.remaining() > 0 {
                    return Err(ParseError::form_error(
                        "trailing record data",
                    ));
                }
                Some(Record::new(self.owner, self.class, self.ttl, data))
            }
            None => None,
        };
        Ok(res)
    }
}

//============ Testing =======================================================
