//! Domain names.
//!
//! This module provides [`Dname`], an owned, uncompressed, absolute domain
//! name. Names found in messages may be compressed. [`Dname::parse`]
//! resolves compression while [`Dname::skip`] merely walks past the name,
//! which is all that is needed to find the boundaries of records.
//!
//! Domain names compare ignoring ASCII case as required by [RFC 4343].
//!
//! [RFC 4343]: https://tools.ietf.org/html/rfc4343

use super::wire::{parse_slice, Compose, FormError, ParseError};
use bytes::{BufMut, Bytes, BytesMut};
use core::{fmt, hash, str};
use octseq::parse::Parser;

/// The maximum length of a domain name in wire format.
const MAX_NAME_LEN: usize = 255;

/// The maximum length of a single label.
const MAX_LABEL_LEN: usize = 63;

/// The maximum number of compression pointers we follow for a single name.
///
/// Any name with more pointers than this would have to contain a loop or
/// be longer than the maximum name length.
const MAX_POINTERS: usize = 127;

//------------ Dname ---------------------------------------------------------

/// An uncompressed, absolute domain name.
///
/// The type wraps a `Bytes` value and guarantees that it always contains a
/// correctly encoded, absolute domain name that is no longer than 255
/// octets.
///
/// You can construct a domain name from a string via the `FromStr` trait or
/// parse it from a message via [`Dname::parse`].
#[derive(Clone)]
pub struct Dname(Bytes);

/// # Creating Values
///
impl Dname {
    /// Creates a domain name from the underlying octets without any check.
    ///
    /// Since this will allow to actually construct an incorrectly encoded
    /// domain name value, the function is unsafe.
    ///
    /// # Safety
    ///
    /// The octets sequence passed in `octets` must contain a correctly
    /// encoded absolute domain name. It must be at most 255 octets long.
    /// It must contain the root label exactly once as its last label.
    pub const unsafe fn from_octets_unchecked(octets: Bytes) -> Self {
        Dname(octets)
    }

    /// Creates a domain name from an octet sequence.
    ///
    /// This will only succeed if `octets` contains a properly encoded
    /// absolute, uncompressed domain name.
    pub fn from_octets(octets: Bytes) -> Result<Self, DnameError> {
        Self::check_slice(octets.as_ref())?;
        Ok(Dname(octets))
    }

    /// Creates a domain name from a static octets slice.
    pub fn from_static(octets: &'static [u8]) -> Result<Self, DnameError> {
        Self::from_octets(Bytes::from_static(octets))
    }

    /// Returns the domain name for the root label only.
    pub fn root() -> Self {
        Dname(Bytes::from_static(b"\0"))
    }

    /// Checks whether an octet slice contains a correctly encoded name.
    fn check_slice(mut slice: &[u8]) -> Result<(), DnameError> {
        if slice.len() > MAX_NAME_LEN {
            return Err(DnameError::LongName);
        }
        loop {
            let (&len, tail) =
                slice.split_first().ok_or(DnameError::RelativeName)?;
            let len = usize::from(len);
            if len > MAX_LABEL_LEN {
                return Err(DnameError::BadLabel);
            }
            if len == 0 {
                if tail.is_empty() {
                    return Ok(());
                }
                return Err(DnameError::TrailingData);
            }
            slice = tail.get(len..).ok_or(DnameError::ShortInput)?;
        }
    }
}

/// # Properties
///
impl Dname {
    /// Returns a reference to the underlying octets of the name.
    pub fn as_slice(&self) -> &[u8] {
        self.0.as_ref()
    }

    /// Returns the underlying octets.
    pub fn into_octets(self) -> Bytes {
        self.0
    }

    /// Returns whether the name is the root name.
    pub fn is_root(&self) -> bool {
        self.0.len() == 1
    }

    /// Returns an iterator over the content of the labels.
    ///
    /// The root label at the end is not included.
    pub fn iter_labels(&self) -> LabelIter<'_> {
        LabelIter {
            slice: self.as_slice(),
        }
    }

    /// Returns the number of labels, not counting the root label.
    pub fn label_count(&self) -> usize {
        self.iter_labels().count()
    }

    /// Appends the canonical wire format of the name to `target`.
    ///
    /// The canonical form has all ASCII letters converted to lower case.
    pub fn compose_canonical(&self, target: &mut BytesMut) {
        target.reserve(self.0.len());
        for &ch in self.as_slice() {
            target.put_u8(ch.to_ascii_lowercase())
        }
    }
}

/// # Parsing
///
impl Dname {
    /// Parses a possibly compressed domain name.
    ///
    /// The parser needs to cover the complete message so that compression
    /// pointers can be followed. Upon success, the parser is positioned
    /// right after the name as it appears in the message, i.e., after the
    /// first compression pointer if there is one.
    pub fn parse(parser: &mut Parser<'_, [u8]>) -> Result<Self, ParseError> {
        let mut res = BytesMut::with_capacity(32);
        let mut sub = Parser::from_ref(parser.octets_ref());
        sub.seek(parser.pos())?;
        let mut end = None;
        let mut pointers = 0;
        loop {
            match LabelType::parse(&mut sub)? {
                LabelType::Normal(0) => {
                    res.put_u8(0);
                    break;
                }
                LabelType::Normal(len) => {
                    if res.len() + len + 2 > MAX_NAME_LEN {
                        return Err(DnameError::LongName.into());
                    }
                    res.put_u8(len as u8);
                    res.put_slice(parse_slice(&mut sub, len)?);
                }
                LabelType::Compressed(ptr) => {
                    if end.is_none() {
                        end = Some(sub.pos());
                    }
                    pointers += 1;
                    if pointers > MAX_POINTERS {
                        return Err(DnameError::ExcessiveCompression.into());
                    }
                    sub.seek(ptr)?;
                }
            }
        }
        parser.seek(end.unwrap_or_else(|| sub.pos()))?;
        Ok(Dname(res.freeze()))
    }

    /// Skips over a possibly compressed domain name.
    ///
    /// This only walks the labels up to the root label or the first
    /// compression pointer. The name the pointer refers to is not checked.
    pub fn skip(parser: &mut Parser<'_, [u8]>) -> Result<(), ParseError> {
        let mut len = 0;
        loop {
            match LabelType::parse(parser)? {
                LabelType::Normal(0) => {
                    return Ok(());
                }
                LabelType::Normal(label_len) => {
                    parser.advance(label_len)?;
                    len += label_len + 1;
                    if len >= MAX_NAME_LEN {
                        return Err(DnameError::LongName.into());
                    }
                }
                LabelType::Compressed(_) => return Ok(()),
            }
        }
    }
}

//--- Compose

impl Compose for Dname {
    fn compose_len(&self) -> usize {
        self.0.len()
    }

    fn compose(&self, target: &mut BytesMut) {
        target.put_slice(self.as_slice())
    }
}

//--- FromStr

impl str::FromStr for Dname {
    type Err = DnameError;

    /// Parses a domain name in presentation format.
    ///
    /// The trailing dot is optional, all names are considered absolute.
    /// Characters can be escaped either as `\X` or via their decimal value
    /// as `\DDD`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "." {
            return Ok(Self::root());
        }
        let mut res = BytesMut::with_capacity(s.len() + 2);
        let mut label_start = 0;
        res.put_u8(0);
        let mut chars = s.chars();
        let mut label_done = false;
        while let Some(ch) = chars.next() {
            if label_done {
                // Only a single trailing dot is allowed.
                return Err(DnameError::EmptyLabel);
            }
            match ch {
                '.' => {
                    let len = res.len() - label_start - 1;
                    if len == 0 {
                        return Err(DnameError::EmptyLabel);
                    }
                    res[label_start] = len as u8;
                    if chars.as_str().is_empty() {
                        label_done = true;
                    } else {
                        label_start = res.len();
                        res.put_u8(0);
                    }
                    continue;
                }
                '\\' => {
                    let ch = chars.next().ok_or(DnameError::BadEscape)?;
                    if let Some(d1) = ch.to_digit(10) {
                        let d2 = chars
                            .next()
                            .and_then(|ch| ch.to_digit(10))
                            .ok_or(DnameError::BadEscape)?;
                        let d3 = chars
                            .next()
                            .and_then(|ch| ch.to_digit(10))
                            .ok_or(DnameError::BadEscape)?;
                        let val = u8::try_from(d1 * 100 + d2 * 10 + d3)
                            .map_err(|_| DnameError::BadEscape)?;
                        res.put_u8(val);
                    } else if ch.is_ascii() {
                        res.put_u8(ch as u8);
                    } else {
                        return Err(DnameError::BadEscape);
                    }
                }
                ch if ch.is_ascii() && ch != ' ' => res.put_u8(ch as u8),
                _ => return Err(DnameError::IllegalCharacter),
            }
            if res.len() - label_start - 1 > MAX_LABEL_LEN {
                return Err(DnameError::BadLabel);
            }
        }
        if !label_done {
            let len = res.len() - label_start - 1;
            if len == 0 {
                return Err(DnameError::EmptyLabel);
            }
            res[label_start] = len as u8;
        }
        res.put_u8(0);
        if res.len() > MAX_NAME_LEN {
            return Err(DnameError::LongName);
        }
        Ok(Dname(res.freeze()))
    }
}

//--- PartialEq, Eq, and Hash

impl PartialEq for Dname {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice().eq_ignore_ascii_case(other.as_slice())
    }
}

impl Eq for Dname {}

impl hash::Hash for Dname {
    fn hash<H: hash::Hasher>(&self, state: &mut H) {
        for ch in self.as_slice() {
            ch.to_ascii_lowercase().hash(state)
        }
    }
}

//--- Display and Debug

impl fmt::Display for Dname {
    /// Formats the domain name in presentation format.
    ///
    /// The name is always given with its trailing dot.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.is_root() {
            return f.write_str(".");
        }
        for label in self.iter_labels() {
            for &ch in label {
                if ch == b' ' || ch == b'.' || ch == b'\\' {
                    write!(f, "\\{}", ch as char)?;
                } else if !(0x20..0x7F).contains(&ch) {
                    write!(f, "\\{:03}", ch)?;
                } else {
                    write!(f, "{}", (ch as char))?;
                }
            }
            f.write_str(".")?;
        }
        Ok(())
    }
}

impl fmt::Debug for Dname {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Dname({})", self)
    }
}

//------------ LabelIter -----------------------------------------------------

/// An iterator over the content of the labels of a domain name.
#[derive(Clone, Debug)]
pub struct LabelIter<'a> {
    slice: &'a [u8],
}

impl<'a> Iterator for LabelIter<'a> {
    type Item = &'a [u8];

    fn next(&mut self) -> Option<Self::Item> {
        let (&len, tail) = self.slice.split_first()?;
        let len = usize::from(len);
        if len == 0 {
            return None;
        }
        let (label, tail) = tail.split_at(len);
        self.slice = tail;
        Some(label)
    }
}

//------------ LabelType -----------------------------------------------------

/// The type of a label as encoded in its first octet.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum LabelType {
    /// A normal label with its length.
    Normal(usize),

    /// A compressed label with the position of where to continue.
    Compressed(usize),
}

impl LabelType {
    /// Parses the label type from the beginning of `parser`.
    fn parse(parser: &mut Parser<'_, [u8]>) -> Result<Self, ParseError> {
        let ltype = parser.parse_u8()?;
        match ltype {
            0..=0x3F => Ok(LabelType::Normal(ltype.into())),
            0xC0..=0xFF => {
                let res = usize::from(parser.parse_u8()?);
                let res = res | ((usize::from(ltype) & 0x3F) << 8);
                Ok(LabelType::Compressed(res))
            }
            _ => Err(ParseError::Form(FormError::new("invalid label type"))),
        }
    }
}

//------------ DnameError ----------------------------------------------------

/// A domain name could not be created.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DnameError {
    /// A label was longer than 63 octets or used an unknown label type.
    BadLabel,

    /// The name was longer than 255 octets.
    LongName,

    /// The name did not end in the root label.
    RelativeName,

    /// There was data after the root label.
    TrailingData,

    /// The octets ended in the middle of a label.
    ShortInput,

    /// The presentation format contained an empty label.
    EmptyLabel,

    /// The presentation format contained an invalid escape sequence.
    BadEscape,

    /// The presentation format contained a character that must be escaped.
    IllegalCharacter,

    /// A compressed name contained too many compression pointers.
    ExcessiveCompression,
}

//--- From

impl From<DnameError> for ParseError {
    fn from(err: DnameError) -> ParseError {
        match err {
            DnameError::ShortInput => ParseError::ShortInput,
            DnameError::LongName => {
                ParseError::form_error("long domain name")
            }
            DnameError::ExcessiveCompression => {
                ParseError::form_error("too many compression pointers")
            }
            _ => ParseError::form_error("invalid domain name"),
        }
    }
}

//--- Display and Error

impl fmt::Display for DnameError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match *self {
            DnameError::BadLabel => "invalid label",
            DnameError::LongName => "long domain name",
            DnameError::RelativeName => "relative domain name",
            DnameError::TrailingData => "trailing data",
            DnameError::ShortInput => "unexpected end of input",
            DnameError::EmptyLabel => "empty label",
            DnameError::BadEscape => "invalid escape sequence",
            DnameError::IllegalCharacter => "illegal character",
            DnameError::ExcessiveCompression => {
                "too many compression pointers"
            }
        })
    }
}

#[cfg(feature = "std")]
impl std::error::Error for DnameError {}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;
    use core::str::FromStr;

    #[test]
    fn from_str() {
        assert_eq!(
            Dname::from_str("example.com.").unwrap().as_slice(),
            b"\x07example\x03com\0"
        );
        assert_eq!(
            Dname::from_str("example.com").unwrap().as_slice(),
            b"\x07example\x03com\0"
        );
        assert_eq!(Dname::from_str(".").unwrap().as_slice(), b"\0");
        assert_eq!(
            Dname::from_str("a\\.b.c").unwrap().as_slice(),
            b"\x03a.b\x01c\0"
        );
        assert_eq!(
            Dname::from_str("\\065.b").unwrap().as_slice(),
            b"\x01A\x01b\0"
        );
        assert_eq!(Dname::from_str(""), Err(DnameError::EmptyLabel));
        assert_eq!(Dname::from_str("a..b"), Err(DnameError::EmptyLabel));
        assert_eq!(Dname::from_str("a.b.."), Err(DnameError::EmptyLabel));
        assert_eq!(Dname::from_str("a\\25"), Err(DnameError::BadEscape));
        assert_eq!(
            Dname::from_str(&"a".repeat(64)),
            Err(DnameError::BadLabel)
        );
    }

    #[test]
    fn display() {
        for name in ["example.com.", ".", "a\\.b.c.", "\\000.x."] {
            assert_eq!(format!("{}", Dname::from_str(name).unwrap()), name);
        }
    }

    #[test]
    fn eq_ignores_case() {
        assert_eq!(
            Dname::from_str("Example.COM").unwrap(),
            Dname::from_str("example.com.").unwrap()
        );
        assert_ne!(
            Dname::from_str("example.com").unwrap(),
            Dname::from_str("example.net").unwrap()
        );
    }

    #[test]
    fn canonical() {
        let mut buf = BytesMut::new();
        Dname::from_str("Example.COM")
            .unwrap()
            .compose_canonical(&mut buf);
        assert_eq!(&buf[..], b"\x07example\x03com\0");
    }

    #[test]
    fn from_octets() {
        assert!(Dname::from_static(b"\x03com\0").is_ok());
        assert_eq!(
            Dname::from_static(b"\x03co"),
            Err(DnameError::ShortInput)
        );
        assert_eq!(
            Dname::from_static(b"\x03com"),
            Err(DnameError::RelativeName)
        );
        assert_eq!(
            Dname::from_static(b"\x03com\0\0"),
            Err(DnameError::TrailingData)
        );
        assert_eq!(Dname::from_static(b""), Err(DnameError::RelativeName));
    }

    #[test]
    fn parse_compressed() {
        // "example.com." at 0, "www" + pointer to 0 at 13, "x" after.
        let msg = b"\x07example\x03com\0\x03www\xc0\x00x";
        let mut parser = Parser::from_ref(&msg[..]);
        assert_eq!(
            Dname::parse(&mut parser).unwrap(),
            Dname::from_str("example.com.").unwrap()
        );
        assert_eq!(parser.pos(), 13);
        assert_eq!(
            Dname::parse(&mut parser).unwrap(),
            Dname::from_str("www.example.com.").unwrap()
        );
        assert_eq!(parser.pos(), 19);

        let mut parser = Parser::from_ref(&msg[..]);
        parser.seek(13).unwrap();
        Dname::skip(&mut parser).unwrap();
        assert_eq!(parser.pos(), 19);
    }

    #[test]
    fn parse_pointer_loop() {
        let msg = b"\xc0\x00";
        let mut parser = Parser::from_ref(&msg[..]);
        assert_eq!(
            Dname::parse(&mut parser),
            Err(ParseError::form_error("too many compression pointers"))
        );
    }

    #[test]
    fn parse_short() {
        let msg = b"\x07exam";
        let mut parser = Parser::from_ref(&msg[..]);
        assert_eq!(Dname::parse(&mut parser), Err(ParseError::ShortInput));
    }
}
