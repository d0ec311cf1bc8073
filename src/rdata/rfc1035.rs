//! Record data from [RFC 1035].
//!
//! This RFC defines the initial set of record types. Only those needed to
//! build ordinary queries and responses are implemented here.
//!
//! [RFC 1035]: https://tools.ietf.org/html/rfc1035

use crate::base::iana::Rtype;
use crate::base::name::Dname;
use crate::base::rdata::{ParseRecordData, RecordData};
use crate::base::wire::{Compose, Parse, ParseError};
use bytes::{BufMut, BytesMut};
use core::{fmt, str};
use std::net::Ipv4Addr;

//------------ dname_type! --------------------------------------------------

/// A macro for implementing a record data type with a single domain name.
///
/// Implements some basic methods plus the `RecordData`, `ParseRecordData`,
/// `Compose`, and `Display` traits.
macro_rules! dname_type {
    ($(#[$attr:meta])* $target:ident, $rtype:ident, $field:ident) => {
        $(#[$attr])*
        #[derive(Clone, Debug, Eq, Hash, PartialEq)]
        pub struct $target {
            $field: Dname,
        }

        impl $target {
            pub fn new($field: Dname) -> Self {
                $target { $field }
            }

            pub fn $field(&self) -> &Dname {
                &self.$field
            }

            pub fn into_dname(self) -> Dname {
                self.$field
            }
        }

        impl From<Dname> for $target {
            fn from(name: Dname) -> Self {
                Self::new(name)
            }
        }

        impl str::FromStr for $target {
            type Err = <Dname as str::FromStr>::Err;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Dname::from_str(s).map(Self::new)
            }
        }

        impl Compose for $target {
            fn compose_len(&self) -> usize {
                self.$field.compose_len()
            }

            fn compose(&self, target: &mut BytesMut) {
                self.$field.compose(target)
            }
        }

        impl RecordData for $target {
            fn rtype(&self) -> Rtype {
                Rtype::$rtype
            }
        }

        impl ParseRecordData for $target {
            fn parse_rdata(
                rtype: Rtype,
                parser: &mut octseq::parse::Parser<'_, [u8]>,
            ) -> Result<Option<Self>, ParseError> {
                if rtype == Rtype::$rtype {
                    Dname::parse(parser).map(|name| Some(Self::new(name)))
                } else {
                    Ok(None)
                }
            }
        }

        impl fmt::Display for $target {
            fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
                fmt::Display::fmt(&self.$field, f)
            }
        }
    };
}

//------------ A ------------------------------------------------------------

/// A record data.
///
/// A records convey the IPv4 address of a host. The wire format is the 32
/// bit IPv4 address in network byte order. The representation file format
/// is the usual dotted notation.
///
/// The A record type is defined in RFC 1035, section 3.4.1.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct A {
    addr: Ipv4Addr,
}

impl A {
    /// Creates a new A record data from an IPv4 address.
    pub fn new(addr: Ipv4Addr) -> A {
        A { addr }
    }

    /// Creates a new A record from the IPv4 address components.
    pub fn from_octets(a: u8, b: u8, c: u8, d: u8) -> A {
        A::new(Ipv4Addr::new(a, b, c, d))
    }

    pub fn addr(&self) -> Ipv4Addr {
        self.addr
    }

    pub fn set_addr(&mut self, addr: Ipv4Addr) {
        self.addr = addr
    }
}

//--- From and FromStr

impl From<Ipv4Addr> for A {
    fn from(addr: Ipv4Addr) -> Self {
        Self::new(addr)
    }
}

impl From<A> for Ipv4Addr {
    fn from(a: A) -> Self {
        a.addr
    }
}

impl str::FromStr for A {
    type Err = <Ipv4Addr as str::FromStr>::Err;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ipv4Addr::from_str(s).map(A::new)
    }
}

//--- Compose, RecordData, ParseRecordData

impl Compose for A {
    fn compose_len(&self) -> usize {
        4
    }

    fn compose(&self, target: &mut BytesMut) {
        target.put_slice(&self.addr.octets())
    }
}

impl RecordData for A {
    fn rtype(&self) -> Rtype {
        Rtype::A
    }
}

impl ParseRecordData for A {
    fn parse_rdata(
        rtype: Rtype,
        parser: &mut octseq::parse::Parser<'_, [u8]>,
    ) -> Result<Option<Self>, ParseError> {
        if rtype == Rtype::A {
            u32::parse(parser).map(|addr| Some(A::new(addr.into())))
        } else {
            Ok(None)
        }
    }
}

//--- Display

impl fmt::Display for A {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(&self.addr, f)
    }
}

//------------ Cname --------------------------------------------------------

dname_type! {
    /// CNAME record data.
    ///
    /// The CNAME record specifies the canonical or primary name for domain
    /// name alias.
    ///
    /// The CNAME type is defined in RFC 1035, section 3.3.1.
    Cname, CNAME, cname
}

//------------ Ns -----------------------------------------------------------

dname_type! {
    /// NS record data.
    ///
    /// NS records specify hosts that are authoritative for a class and domain.
    ///
    /// The NS record type is defined in RFC 1035, section 3.3.11.
    Ns, NS, nsdname
}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;
    use core::str::FromStr;
    use octseq::parse::Parser;

    #[test]
    fn a_compose_parse() {
        let rdata = A::from_str("192.0.2.1").unwrap();
        let mut buf = BytesMut::new();
        rdata.compose(&mut buf);
        assert_eq!(&buf[..], b"\xc0\x00\x02\x01");
        let mut parser = Parser::from_ref(&buf[..]);
        assert_eq!(
            A::parse_rdata(Rtype::A, &mut parser).unwrap(),
            Some(rdata)
        );
        assert_eq!(format!("{}", rdata), "192.0.2.1");
    }

    #[test]
    fn ns_compose_parse() {
        let rdata = Ns::from_str("ns.example.com").unwrap();
        let mut buf = BytesMut::new();
        rdata.compose(&mut buf);
        assert_eq!(buf.len(), rdata.compose_len());
        let mut parser = Parser::from_ref(&buf[..]);
        assert_eq!(
            Ns::parse_rdata(Rtype::NS, &mut parser).unwrap(),
            Some(rdata.clone())
        );
        let mut parser = Parser::from_ref(&buf[..]);
        assert_eq!(Cname::parse_rdata(Rtype::NS, &mut parser).unwrap(), None);
        assert_eq!(parser.pos(), 0);
        assert_eq!(format!("{}", rdata), "ns.example.com.");
    }
}
