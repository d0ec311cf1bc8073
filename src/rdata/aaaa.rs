//! Record data from [RFC 3596]: AAAA records.
//!
//! This RFC defines the Aaaa record type.
//!
//! [RFC 3596]: https://tools.ietf.org/html/rfc3596

use crate::base::iana::Rtype;
use crate::base::rdata::{ParseRecordData, RecordData};
use crate::base::wire::{Compose, ParseError};
use bytes::{BufMut, BytesMut};
use core::{fmt, str};
use octseq::parse::Parser;
use std::net::Ipv6Addr;

//------------ Aaaa ---------------------------------------------------------

/// AAAA record data.
///
/// AAAA records convey the IPv6 address of a host.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Aaaa {
    addr: Ipv6Addr,
}

impl Aaaa {
    pub fn new(addr: Ipv6Addr) -> Aaaa {
        Aaaa { addr }
    }

    pub fn addr(&self) -> Ipv6Addr {
        self.addr
    }
    pub fn set_addr(&mut self, addr: Ipv6Addr) {
        self.addr = addr
    }
}

//--- From and FromStr

impl From<Ipv6Addr> for Aaaa {
    fn from(addr: Ipv6Addr) -> Self {
        Self::new(addr)
    }
}

impl From<Aaaa> for Ipv6Addr {
    fn from(data: Aaaa) -> Self {
        data.addr
    }
}

impl str::FromStr for Aaaa {
    type Err = <Ipv6Addr as str::FromStr>::Err;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ipv6Addr::from_str(s).map(Aaaa::new)
    }
}

//--- Compose, RecordData, ParseRecordData

impl Compose for Aaaa {
    fn compose_len(&self) -> usize {
        16
    }

    fn compose(&self, target: &mut BytesMut) {
        target.put_slice(&self.addr.octets())
    }
}

impl RecordData for Aaaa {
    fn rtype(&self) -> Rtype {
        Rtype::AAAA
    }
}

impl ParseRecordData for Aaaa {
    fn parse_rdata(
        rtype: Rtype,
        parser: &mut Parser<'_, [u8]>,
    ) -> Result<Option<Self>, ParseError> {
        if rtype == Rtype::AAAA {
            let mut buf = [0u8; 16];
            parser.parse_buf(&mut buf)?;
            Ok(Some(Aaaa::new(buf.into())))
        } else {
            Ok(None)
        }
    }
}

//--- Display

impl fmt::Display for Aaaa {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(&self.addr, f)
    }
}

//============ Testing =======================================================
