//! A single question in a DNS message.
//!
//! This module defines the type `Question` which represents an entry in
//! the question section of a DNS message.

use super::iana::{Class, Rtype};
use super::name::Dname;
use super::wire::{Compose, Parse, ParseError};
use bytes::BytesMut;
use core::fmt;
use octseq::parse::Parser;

//------------ Question ------------------------------------------------------

/// A question in a DNS message.
///
/// In DNS, a question describes what is requested in a query. It consists
/// of three elements: a domain name, a record type, and a class. This type
/// represents such a question.
#[derive(Clone, Eq, Hash, PartialEq)]
pub struct Question {
    /// The domain name of the question.
    qname: Dname,

    /// The record type of the question.
    qtype: Rtype,

    /// The class of the quesiton.
    qclass: Class,
}

/// # Creation and Conversion
///
impl Question {
    /// Creates a new question from its three componets.
    pub fn new(qname: Dname, qtype: Rtype, qclass: Class) -> Self {
        Question {
            qname,
            qtype,
            qclass,
        }
    }

    /// Creates a new question from a name and record type, assuming class IN.
    pub fn new_in(qname: Dname, qtype: Rtype) -> Self {
        Question::new(qname, qtype, Class::IN)
    }

    /// Converts the question into the qname.
    pub fn into_qname(self) -> Dname {
        self.qname
    }
}

/// # Field Access
///
impl Question {
    /// Returns a reference to the domain nmae in the question,
    pub fn qname(&self) -> &Dname {
        &self.qname
    }

    /// Returns the record type of the question.
    pub fn qtype(&self) -> Rtype {
        self.qtype
    }

    /// Returns the class of the question.
    pub fn qclass(&self) -> Class {
        self.qclass
    }
}

//--- From

impl From<(Dname, Rtype, Class)> for Question {
    fn from((name, rtype, class): (Dname, Rtype, Class)) -> Self {
        Question::new(name, rtype, class)
    }
}

impl From<(Dname, Rtype)> for Question {
    fn from((name, rtype): (Dname, Rtype)) -> Self {
        Question::new(name, rtype, Class::IN)
    }
}

//--- Parse and Compose

impl Parse for Question {
    fn parse(parser: &mut Parser<'_, [u8]>) -> Result<Self, ParseError> {
        Ok(Question::new(
            Dname::parse(parser)?,
            Rtype::parse(parser)?,
            Class::parse(parser)?,
        ))
    }

    fn skip(parser: &mut Parser<'_, [u8]>) -> Result<(), ParseError> {
        Dname::skip(parser)?;
        parser.advance(Rtype::COMPOSE_LEN + Class::COMPOSE_LEN)?;
        Ok(())
    }
}

impl Compose for Question {
    fn compose_len(&self) -> usize {
        self.qname.compose_len() + Rtype::COMPOSE_LEN + Class::COMPOSE_LEN
    }

    fn compose(&self, target: &mut BytesMut) {
        self.qname.compose(target);
        self.qtype.compose(target);
        self.qclass.compose(target);
    }
}

//--- Display and Debug

impl fmt::Display for Question {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}\t{}\t{}", self.qname, self.qclass, self.qtype)
    }
}

impl fmt::Debug for Question {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Question")
            .field("qname", &self.qname)
            .field("qtype", &self.qtype)
            .field("qclass", &self.qclass)
            .finish()
    }
}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;
    use core::str::FromStr;

    #[test]
    fn compose_parse() {
        let question = Question::new_in(
            Dname::from_str("example.com").unwrap(),
            Rtype::A,
        );
        let mut buf = BytesMut::new();
        question.compose(&mut buf);
        assert_eq!(&buf[..], b"\x07example\x03com\0\0\x01\0\x01");
        assert_eq!(buf.len(), question.compose_len());

        let mut parser = Parser::from_ref(&buf[..]);
        assert_eq!(Question::parse(&mut parser).unwrap(), question);
        assert_eq!(parser.remaining(), 0);
    }

    #[test]
    fn display() {
        let question = Question::new_in(
            Dname::from_str("example.com").unwrap(),
            Rtype::A,
        );
        assert_eq!(format!("{}", question), "example.com.\tIN\tA");
    }
}
