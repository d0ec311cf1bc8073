//! Accessing and assembling complete DNS messages.
//!
//! This module defines [`Message`], an owned representation of a DNS
//! message. It consists of the header and the four sections, each held as a
//! vector of their entries. A message can be decoded from its wire format
//! via [`Message::from_octets`] and turned back into wire format via
//! [`Message::to_wire`].
//!
//! Domain names are never compressed when a message is encoded. This way,
//! the wire format of a message with an additional record appended is the
//! wire format of the message without that record plus the record, with
//! only the additional count in the header changed.

use super::header::{Header, HeaderCounts, HeaderSection};
use super::iana::{Class, Rtype};
use super::name::Dname;
use super::question::Question;
use super::record::Record;
use super::wire::{Compose, ComposeError, Parse, ParseError};
use crate::rdata::{AllRecordData, Tsig};
use bytes::{Bytes, BytesMut};
use octseq::parse::Parser;

//------------ Message -------------------------------------------------------

/// A DNS message.
///
/// The message owns all its data. Records are kept as
/// [`Record<AllRecordData>`] so that the well-known record types are
/// available in their parsed form while all other types are kept as raw
/// data.
///
/// The header counts are not stored but derived from the sections when the
/// message is encoded.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Message {
    header: Header,
    question: Vec<Question>,
    answer: Vec<Record<AllRecordData>>,
    authority: Vec<Record<AllRecordData>>,
    additional: Vec<Record<AllRecordData>>,
}

/// # Creation and Conversion
///
impl Message {
    /// Creates a new, empty message with a default header.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a query for the given name and record type in class IN.
    ///
    /// The message will have a random ID and the RD bit set.
    pub fn query(qname: Dname, qtype: Rtype) -> Self {
        let mut res = Self::new();
        res.header.set_random_id();
        res.header.set_rd(true);
        res.push_question(Question::new(qname, qtype, Class::IN));
        res
    }

    /// Decodes a message from its wire format.
    ///
    /// The octets must contain exactly one message.
    pub fn from_octets(octets: &[u8]) -> Result<Self, ParseError> {
        let mut parser = Parser::from_ref(octets);
        let section = HeaderSection::parse(&mut parser)?;
        let counts = *section.counts();
        let mut res = Message {
            header: *section.header(),
            ..Default::default()
        };
        for _ in 0..counts.qdcount() {
            res.question.push(Question::parse(&mut parser)?);
        }
        for _ in 0..counts.ancount() {
            res.answer.push(Self::parse_record(&mut parser)?);
        }
        for _ in 0..counts.nscount() {
            res.authority.push(Self::parse_record(&mut parser)?);
        }
        for _ in 0..counts.arcount() {
            res.additional.push(Self::parse_record(&mut parser)?);
        }
        if parser.remaining() > 0 {
            return Err(ParseError::form_error("trailing data in message"));
        }
        Ok(res)
    }

    fn parse_record(
        parser: &mut Parser<'_, [u8]>,
    ) -> Result<Record<AllRecordData>, ParseError> {
        // AllRecordData accepts all record types.
        Record::parse(parser)?
            .ok_or_else(|| ParseError::form_error("unsupported record"))
    }

    /// Encodes the message into its wire format.
    ///
    /// The section counts in the header are set from the number of entries
    /// in each section. Fails if a section has more entries than fit into
    /// its count or if some record data is too long.
    pub fn to_wire(&self) -> Result<Bytes, ComposeError> {
        let mut target = BytesMut::with_capacity(512);
        HeaderSection::from_parts(self.header, self.counts()?)
            .compose(&mut target);
        for question in &self.question {
            question.compose(&mut target);
        }
        for record in self.records() {
            record.compose(&mut target)?;
        }
        Ok(target.freeze())
    }

    /// Returns the header counts for the current content of the message.
    pub fn counts(&self) -> Result<HeaderCounts, ComposeError> {
        fn count(len: usize) -> Result<u16, ComposeError> {
            u16::try_from(len).map_err(|_| ComposeError::ShortBuf)
        }

        let mut res = HeaderCounts::new();
        res.set_qdcount(count(self.question.len())?);
        res.set_ancount(count(self.answer.len())?);
        res.set_nscount(count(self.authority.len())?);
        res.set_arcount(count(self.additional.len())?);
        Ok(res)
    }
}

/// # Access to the Header and Sections
///
impl Message {
    /// Returns the message header.
    pub fn header(&self) -> Header {
        self.header
    }

    /// Returns a mutable reference to the message header.
    pub fn header_mut(&mut self) -> &mut Header {
        &mut self.header
    }

    /// Returns the question section.
    pub fn question(&self) -> &[Question] {
        &self.question
    }

    /// Returns the answer section.
    pub fn answer(&self) -> &[Record<AllRecordData>] {
        &self.answer
    }

    /// Returns the authority section.
    pub fn authority(&self) -> &[Record<AllRecordData>] {
        &self.authority
    }

    /// Returns the additional section.
    pub fn additional(&self) -> &[Record<AllRecordData>] {
        &self.additional
    }

    /// Returns an iterator over all records in message order.
    pub fn records(&self) -> impl Iterator<Item = &Record<AllRecordData>> {
        self.answer
            .iter()
            .chain(self.authority.iter())
            .chain(self.additional.iter())
    }

    /// Returns the TSIG record if the message has one.
    ///
    /// Only the last record of the additional section is considered since
    /// that is the only place a TSIG record is allowed to appear.
    pub fn tsig(&self) -> Option<Record<Tsig>> {
        let record = self.additional.last()?;
        match *record.data() {
            AllRecordData::Tsig(ref tsig) => Some(Record::new(
                record.owner().clone(),
                record.class(),
                record.ttl(),
                tsig.clone(),
            )),
            _ => None,
        }
    }
}

/// # Modification
///
impl Message {
    /// Appends a question to the question section.
    pub fn push_question(&mut self, question: impl Into<Question>) {
        self.question.push(question.into())
    }

    /// Appends a record to the answer section.
    pub fn push_answer<Data: Into<AllRecordData>>(
        &mut self,
        record: Record<Data>,
    ) {
        self.answer.push(Self::convert_record(record))
    }

    /// Appends a record to the authority section.
    pub fn push_authority<Data: Into<AllRecordData>>(
        &mut self,
        record: Record<Data>,
    ) {
        self.authority.push(Self::convert_record(record))
    }

    /// Appends a record to the additional section.
    pub fn push_additional<Data: Into<AllRecordData>>(
        &mut self,
        record: Record<Data>,
    ) {
        self.additional.push(Self::convert_record(record))
    }

    /// Removes the last record of the additional section and returns it.
    pub fn remove_last_additional(&mut self) -> Option<Record<AllRecordData>> {
        self.additional.pop()
    }

    fn convert_record<Data: Into<AllRecordData>>(
        record: Record<Data>,
    ) -> Record<AllRecordData> {
        let (class, ttl) = (record.class(), record.ttl());
        let (owner, data) = record.into_owner_and_data();
        Record::new(owner, class, ttl, data.into())
    }
}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;
    use crate::base::iana::TsigRcode;
    use crate::rdata::{Time48, A};
    use core::str::FromStr;

    fn name(s: &str) -> Dname {
        Dname::from_str(s).unwrap()
    }

    fn response() -> Message {
        let mut msg = Message::query(name("example.com"), Rtype::A);
        msg.header_mut().set_qr(true);
        msg.push_answer(Record::new(
            name("example.com"),
            Class::IN,
            3600,
            A::from_octets(192, 0, 2, 1),
        ));
        msg
    }

    #[test]
    fn query() {
        let msg = Message::query(name("example.com"), Rtype::A);
        assert!(msg.header().rd());
        assert!(!msg.header().qr());
        assert_eq!(msg.question().len(), 1);
        assert_eq!(msg.question()[0].qname(), &name("example.com."));
    }

    #[test]
    fn to_wire_from_octets() {
        let msg = response();
        let wire = msg.to_wire().unwrap();
        let counts = HeaderCounts::for_message_slice(&wire);
        assert_eq!(counts.qdcount(), 1);
        assert_eq!(counts.ancount(), 1);
        assert_eq!(counts.arcount(), 0);
        assert_eq!(Message::from_octets(&wire).unwrap(), msg);
    }

    #[test]
    fn trailing_data() {
        let wire = response().to_wire().unwrap();
        let mut octets = wire.to_vec();
        octets.push(0);
        assert!(Message::from_octets(&octets).is_err());
        assert_eq!(
            Message::from_octets(&wire[..wire.len() - 1]),
            Err(ParseError::ShortInput)
        );
    }

    #[test]
    fn compressed_input() {
        // Header, question example.com/A/IN, answer with owner compressed
        // to the question name.
        let wire = b"\x12\x34\x81\x80\0\x01\0\x01\0\0\0\0\
                     \x07example\x03com\0\0\x01\0\x01\
                     \xc0\x0c\0\x01\0\x01\0\0\x0e\x10\0\x04\xc0\0\x02\x01";
        let msg = Message::from_octets(wire).unwrap();
        assert_eq!(msg.answer()[0].owner(), &name("example.com"));
        assert_eq!(msg.header().id(), 0x1234);
    }

    #[test]
    fn tsig_access() {
        let mut msg = response();
        assert!(msg.tsig().is_none());
        let tsig = Tsig::new(
            name("hmac-sha256"),
            Time48::from_u64(1_600_000_000),
            300,
            Bytes::from_static(b"mac"),
            msg.header().id(),
            TsigRcode::NOERROR,
            Bytes::new(),
        )
        .unwrap();
        msg.push_additional(Record::new(
            name("key.example"),
            Class::ANY,
            0,
            tsig.clone(),
        ));
        let record = msg.tsig().unwrap();
        assert_eq!(record.owner(), &name("key.example"));
        assert_eq!(record.data(), &tsig);

        let wire = msg.to_wire().unwrap();
        assert_eq!(Message::from_octets(&wire).unwrap().tsig(), Some(record));

        assert!(msg.remove_last_additional().is_some());
        assert!(msg.tsig().is_none());
        assert!(msg.remove_last_additional().is_none());
    }
}
