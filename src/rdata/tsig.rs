//! Record data from [RFC 2845]: TSIG records.
//!
//! This RFC defines the TSIG record type used for signing DNS messages.
//!
//! [RFC 2845]: https://tools.ietf.org/html/rfc2845

use crate::base::iana::{Rtype, TsigRcode};
use crate::base::name::Dname;
use crate::base::rdata::{LongRecordData, ParseRecordData, RecordData};
use crate::base::wire::{parse_slice, Compose, Parse, ParseError};
use crate::utils::base64;
use bytes::{BufMut, Bytes, BytesMut};
use core::fmt;
use octseq::parse::Parser;
#[cfg(feature = "std")]
use std::time::SystemTime;

//------------ Tsig ----------------------------------------------------------

/// TSIG record data.
///
/// The TSIG record carries the signature of a message signed with a
/// shared secret. It is always the last record of the additional section.
/// Its owner is the name of the key and its class is ANY.
#[derive(Clone, Eq, Hash, PartialEq)]
pub struct Tsig {
    /// The signature algorithm as a domain name.
    algorithm: Dname,

    /// The Unix epoch time at which the signature was created.
    ///
    /// Note that this is an unsigned 48 bit value in wire format.
    time_signed: Time48,

    /// Seconds of error perimitted in time signed.
    fudge: u16,

    /// MAC.
    ///
    /// In wire format, consists of a unsigned 16 bit integer containing the
    /// length followed by that many octets of actual MAC.
    mac: Bytes,

    /// Original message ID.
    original_id: u16,

    /// TSIG response code.
    error: TsigRcode,

    /// Other.
    ///
    /// This is normally empty unless a BADTIME error happened. In wire
    /// format, it is encoded as a unsigned 16 bit integer followed by that
    /// many octets.
    other: Bytes,
}

impl Tsig {
    /// Creates new TSIG record data from its components.
    ///
    /// See the access methods for an explanation of these components. The
    /// function will return an error if the wire format length of the record
    /// would exceed 65,535 octets.
    pub fn new(
        algorithm: Dname,
        time_signed: Time48,
        fudge: u16,
        mac: Bytes,
        original_id: u16,
        error: TsigRcode,
        other: Bytes,
    ) -> Result<Self, LongRecordData> {
        let res = Tsig {
            algorithm,
            time_signed,
            fudge,
            mac,
            original_id,
            error,
            other,
        };
        if res.compose_len() > usize::from(u16::MAX) {
            return Err(LongRecordData::new());
        }
        Ok(res)
    }

    /// Returns a reference to the algorithm name.
    ///
    /// TSIG encodes the algorithm used for keys and signatures as a domain
    /// name. It does, however, only use the format. No structure is used at
    /// all.
    pub fn algorithm(&self) -> &Dname {
        &self.algorithm
    }

    /// Returns the Unix time when the signature is created.
    ///
    /// Despite its type, this is actually a 48 bit number. The upper 16 bits
    /// will never be set.
    pub fn time_signed(&self) -> Time48 {
        self.time_signed
    }

    /// Return the number of seconds of offset from signing time permitted.
    ///
    /// When a signature is checked, the local system time needs to be within
    /// this many seconds from `time_signed` to be accepted.
    pub fn fudge(&self) -> u16 {
        self.fudge
    }

    /// Returns a reference to the bytes value containing the MAC.
    pub fn mac(&self) -> &Bytes {
        &self.mac
    }

    /// Returns an octet slice containing the MAC.
    pub fn mac_slice(&self) -> &[u8] {
        self.mac.as_ref()
    }

    /// Converts the record data into the MAC.
    pub fn into_mac(self) -> Bytes {
        self.mac
    }

    /// Returns the original message ID.
    ///
    /// Since the message ID is part of the signature generation but may be
    /// changed for a forwarded message, it is included in the TSIG record.
    pub fn original_id(&self) -> u16 {
        self.original_id
    }

    /// Returns the TSIG error.
    pub fn error(&self) -> TsigRcode {
        self.error
    }

    /// Returns a reference to the other bytes.
    ///
    /// This field is only used for BADTIME errors to return the server time.
    /// Otherwise it is empty.
    pub fn other(&self) -> &Bytes {
        &self.other
    }

    /// Returns the other bytes as the server time.
    ///
    /// If the other bytes field is exactly 6 bytes long, this methods
    /// returns it as the Unix time contained.
    pub fn other_time(&self) -> Option<Time48> {
        Time48::from_slice(self.other.as_ref())
    }

    /// Returns whether the record is valid at the given time.
    ///
    /// The method checks whether the given time is within [`fudge`]
    /// seconds of the [`time_signed`].
    ///
    /// [`fudge`]: Self::fudge
    /// [`time_signed`]: Self::time_signed
    pub fn is_valid_at(&self, now: Time48) -> bool {
        now.eq_fudged(self.time_signed, self.fudge.into())
    }

    /// Returns whether the record is valid right now.
    ///
    /// The method checks whether the current system time is within [`fudge`]
    /// seconds of the [`time_signed`]. If the system time cannot be
    /// determined, the record is not valid.
    ///
    /// [`fudge`]: Self::fudge
    /// [`time_signed`]: Self::time_signed
    #[cfg(feature = "std")]
    pub fn is_valid_now(&self) -> bool {
        Time48::checked_now().map_or(false, |now| self.is_valid_at(now))
    }
}

//--- Parse and Compose

impl Parse for Tsig {
    fn parse(parser: &mut Parser<'_, [u8]>) -> Result<Self, ParseError> {
        let algorithm = Dname::parse(parser)?;
        let time_signed = Time48::parse(parser)?;
        let fudge = u16::parse(parser)?;
        let mac_size = u16::parse(parser)?;
        let mac = parse_slice(parser, usize::from(mac_size))?;
        let original_id = u16::parse(parser)?;
        let error = TsigRcode::parse(parser)?;
        let other_len = u16::parse(parser)?;
        let other = parse_slice(parser, usize::from(other_len))?;
        Ok(Tsig {
            algorithm,
            time_signed,
            fudge,
            mac: Bytes::copy_from_slice(mac),
            original_id,
            error,
            other: Bytes::copy_from_slice(other),
        })
    }

    fn skip(parser: &mut Parser<'_, [u8]>) -> Result<(), ParseError> {
        Dname::skip(parser)?;
        parser.advance(Time48::COMPOSE_LEN + 2)?;
        let mac_size = u16::parse(parser)?;
        parser.advance(usize::from(mac_size) + 4)?;
        let other_len = u16::parse(parser)?;
        parser.advance(usize::from(other_len))?;
        Ok(())
    }
}

impl Compose for Tsig {
    fn compose_len(&self) -> usize {
        self.algorithm.compose_len()
            + Time48::COMPOSE_LEN
            + 2 // fudge
            + 2 // MAC length
            + self.mac.len()
            + 2 // original ID
            + TsigRcode::COMPOSE_LEN
            + 2 // other length
            + self.other.len()
    }

    fn compose(&self, target: &mut BytesMut) {
        // The length of both mac and other has been checked by `new` and
        // `parse` already, so the casts below can’t truncate.
        self.algorithm.compose(target);
        self.time_signed.compose(target);
        target.put_u16(self.fudge);
        target.put_u16(self.mac.len() as u16);
        target.put_slice(self.mac.as_ref());
        target.put_u16(self.original_id);
        self.error.compose(target);
        target.put_u16(self.other.len() as u16);
        target.put_slice(self.other.as_ref());
    }
}

//--- RecordData and ParseRecordData

impl RecordData for Tsig {
    fn rtype(&self) -> Rtype {
        Rtype::TSIG
    }
}

impl ParseRecordData for Tsig {
    fn parse_rdata(
        rtype: Rtype,
        parser: &mut Parser<'_, [u8]>,
    ) -> Result<Option<Self>, ParseError> {
        if rtype == Rtype::TSIG {
            Self::parse(parser).map(Some)
        } else {
            Ok(None)
        }
    }
}

//--- Display and Debug

impl fmt::Display for Tsig {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} {} {} ",
            self.algorithm, self.time_signed, self.fudge
        )?;
        base64::display(&self.mac, f)?;
        write!(f, " {} {} \"", self.original_id, self.error)?;
        base64::display(&self.other, f)?;
        write!(f, "\"")
    }
}

impl fmt::Debug for Tsig {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Tsig")
            .field("algorithm", &self.algorithm)
            .field("time_signed", &self.time_signed)
            .field("fudge", &self.fudge)
            .field("mac", &self.mac.as_ref())
            .field("original_id", &self.original_id)
            .field("error", &self.error)
            .field("other", &self.other.as_ref())
            .finish()
    }
}

//------------ Time48 --------------------------------------------------------

/// A 48-bit Unix timestamp.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Time48(u64);

impl Time48 {
    /// The length of the wire format of a value.
    pub const COMPOSE_LEN: usize = 6;

    /// Returns the timestamp of the current moment.
    ///
    /// Returns `None` if the system clock is set to before the Unix epoch
    /// or so far into the future that the time doesn’t fit into 48 bits.
    #[cfg(feature = "std")]
    pub fn checked_now() -> Option<Time48> {
        let secs = SystemTime::now()
            .duration_since(SystemTime::UNIX_EPOCH)
            .ok()?
            .as_secs();
        Self::checked_from_u64(secs)
    }

    /// Creates a value from a 64 bit integer.
    ///
    /// The upper 16 bits of the arument must be zero or else this function
    /// panics. This is also why we don’t implement `From`.
    pub fn from_u64(value: u64) -> Self {
        assert!(value & 0xFFFF_0000_0000_0000 == 0);
        Time48(value)
    }

    /// Creates a value from a 64 bit integer if it fits into 48 bits.
    pub fn checked_from_u64(value: u64) -> Option<Self> {
        if value & 0xFFFF_0000_0000_0000 == 0 {
            Some(Time48(value))
        } else {
            None
        }
    }

    /// Creates a value from an octet slice.
    ///
    /// This slice should contain the octets of the value in network byte
    /// order. Returns `None` if the slice isn’t exactly six octets long.
    pub fn from_slice(slice: &[u8]) -> Option<Self> {
        let slice: &[u8; 6] = slice.try_into().ok()?;
        Some(Time48(
            (u64::from(slice[0]) << 40)
                | (u64::from(slice[1]) << 32)
                | (u64::from(slice[2]) << 24)
                | (u64::from(slice[3]) << 16)
                | (u64::from(slice[4]) << 8)
                | (u64::from(slice[5])),
        ))
    }

    /// Converts a value into its wire format.
    ///
    /// Returns the octets of the encoded value in network byte order.
    pub fn into_octets(self) -> [u8; 6] {
        let mut res = [0u8; 6];
        res[0] = (self.0 >> 40) as u8;
        res[1] = (self.0 >> 32) as u8;
        res[2] = (self.0 >> 24) as u8;
        res[3] = (self.0 >> 16) as u8;
        res[4] = (self.0 >> 8) as u8;
        res[5] = self.0 as u8;
        res
    }

    /// Returns whether the time is within a given period.
    ///
    /// Returns `true` iff `other` is at most `fudge` seconds before or after
    /// this value’s time.
    pub fn eq_fudged(self, other: Self, fudge: u64) -> bool {
        self.0.saturating_sub(fudge) <= other.0
            && self.0.saturating_add(fudge) >= other.0
    }

    pub fn parse(parser: &mut Parser<'_, [u8]>) -> Result<Self, ParseError> {
        let mut buf = [0u8; 6];
        parser.parse_buf(&mut buf)?;
        Ok(Time48(
            buf.iter().fold(0u64, |res, &octet| (res << 8) | u64::from(octet)),
        ))
    }

    pub fn compose(&self, target: &mut BytesMut) {
        target.put_slice(&self.into_octets())
    }
}

//--- From

impl From<Time48> for u64 {
    fn from(value: Time48) -> u64 {
        value.0
    }
}

//--- Display

impl fmt::Display for Time48 {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;
    use core::str::FromStr;

    fn tsig() -> Tsig {
        Tsig::new(
            Dname::from_str("hmac-sha256.").unwrap(),
            Time48::from_u64(1_600_000_000),
            300,
            Bytes::from_static(b"\x01\x02\x03\x04"),
            0x1234,
            TsigRcode::NOERROR,
            Bytes::new(),
        )
        .unwrap()
    }

    #[test]
    fn tsig_compose_parse() {
        let rdata = tsig();
        let mut buf = BytesMut::new();
        rdata.compose(&mut buf);
        assert_eq!(buf.len(), rdata.compose_len());

        let mut parser = Parser::from_ref(&buf[..]);
        assert_eq!(Tsig::parse(&mut parser).unwrap(), rdata);
        assert_eq!(parser.remaining(), 0);

        let mut parser = Parser::from_ref(&buf[..]);
        Tsig::skip(&mut parser).unwrap();
        assert_eq!(parser.remaining(), 0);
    }

    #[test]
    fn tsig_display() {
        assert_eq!(
            format!("{}", tsig()),
            "hmac-sha256. 1600000000 300 AQIDBA== 4660 NOERROR \"\""
        );
    }

    #[test]
    fn validity() {
        let rdata = tsig();
        assert!(rdata.is_valid_at(Time48::from_u64(1_600_000_000)));
        assert!(rdata.is_valid_at(Time48::from_u64(1_600_000_300)));
        assert!(rdata.is_valid_at(Time48::from_u64(1_599_999_700)));
        assert!(!rdata.is_valid_at(Time48::from_u64(1_600_000_301)));
        assert!(!rdata.is_valid_at(Time48::from_u64(1_599_999_699)));
        assert!(!rdata.is_valid_now());
    }

    #[test]
    fn time48() {
        let time = Time48::from_u64(0x0102_0304_0506);
        assert_eq!(time.into_octets(), [1, 2, 3, 4, 5, 6]);
        assert_eq!(Time48::from_slice(&[1, 2, 3, 4, 5, 6]), Some(time));
        assert_eq!(Time48::from_slice(&[1, 2, 3]), None);
        assert_eq!(Time48::checked_from_u64(1 << 48), None);
        assert!(Time48::checked_now().is_some());

        let mut parser = Parser::from_ref(&[1u8, 2, 3, 4, 5, 6][..]);
        assert_eq!(Time48::parse(&mut parser).unwrap(), time);
    }
}
