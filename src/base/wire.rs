//! Creating and consuming data in wire format.

use bytes::{BufMut, BytesMut};
use core::fmt;
use octseq::parse::{Parser, ShortInput};

//------------ compose functions ---------------------------------------------

/// Composes some data prefixed by its length.
///
/// The length is added as a 16 bit big-endian unsigned integer. If the data
/// is longer than 65,535 octets, nothing is appended and an error is
/// returned.
pub fn compose_len_prefixed(
    target: &mut BytesMut,
    data: &[u8],
) -> Result<(), ComposeError> {
    let len = u16::try_from(data.len()).map_err(|_| ComposeError::LongData)?;
    target.reserve(2 + data.len());
    target.put_u16(len);
    target.put_slice(data);
    Ok(())
}

//------------ Compose -------------------------------------------------------

/// A type that can append its wire format to an octets builder.
///
/// Composing into a `BytesMut` cannot fail, the buffer simply grows. Any
/// limits imposed by the wire format, such as the maximum length of record
/// data, have to be checked by whoever assembles a complete message.
pub trait Compose {
    /// Returns the length of the wire format of the value.
    fn compose_len(&self) -> usize;

    /// Appends the wire format of the value to the end of `target`.
    fn compose(&self, target: &mut BytesMut);
}

impl<'a, T: Compose + ?Sized> Compose for &'a T {
    fn compose_len(&self) -> usize {
        (*self).compose_len()
    }

    fn compose(&self, target: &mut BytesMut) {
        (*self).compose(target)
    }
}

macro_rules! compose_to_be_bytes {
    ( $type:ident ) => {
        impl Compose for $type {
            fn compose_len(&self) -> usize {
                core::mem::size_of::<$type>()
            }

            fn compose(&self, target: &mut BytesMut) {
                target.put_slice(&self.to_be_bytes())
            }
        }
    };
}

compose_to_be_bytes!(u8);
compose_to_be_bytes!(u16);
compose_to_be_bytes!(u32);

//------------ Parse ---------------------------------------------------------

/// A type that can extract a value from a parser.
///
/// The parser always covers the complete message. This allows types that
/// contain domain names to follow compression pointers.
pub trait Parse: Sized {
    /// Extracts a value from the beginning of `parser`.
    ///
    /// If parsing fails and an error is returned, the parser’s position
    /// should be considered to be undefined.
    fn parse(parser: &mut Parser<'_, [u8]>) -> Result<Self, ParseError>;

    /// Skips over a value of this type at the beginning of `parser`.
    ///
    /// This function is the same as `parse` but doesn’t return the result.
    /// It can be used to check if the content of `parser` is correct or to
    /// skip over unneeded parts of the parser.
    fn skip(parser: &mut Parser<'_, [u8]>) -> Result<(), ParseError>;
}

impl Parse for u8 {
    fn parse(parser: &mut Parser<'_, [u8]>) -> Result<Self, ParseError> {
        parser.parse_u8().map_err(Into::into)
    }

    fn skip(parser: &mut Parser<'_, [u8]>) -> Result<(), ParseError> {
        parser.advance(1).map_err(Into::into)
    }
}

impl Parse for u16 {
    fn parse(parser: &mut Parser<'_, [u8]>) -> Result<Self, ParseError> {
        parser.parse_u16_be().map_err(Into::into)
    }

    fn skip(parser: &mut Parser<'_, [u8]>) -> Result<(), ParseError> {
        parser.advance(2).map_err(Into::into)
    }
}

impl Parse for u32 {
    fn parse(parser: &mut Parser<'_, [u8]>) -> Result<Self, ParseError> {
        parser.parse_u32_be().map_err(Into::into)
    }

    fn skip(parser: &mut Parser<'_, [u8]>) -> Result<(), ParseError> {
        parser.advance(4).map_err(Into::into)
    }
}

/// Takes `len` octets from the parser and returns them as a slice.
pub fn parse_slice<'a>(
    parser: &mut Parser<'a, [u8]>,
    len: usize,
) -> Result<&'a [u8], ParseError> {
    let start = parser.pos();
    parser.advance(len)?;
    Ok(&parser.octets_ref()[start..start + len])
}

/// Takes a 16 bit length followed by that many octets from the parser.
pub fn parse_len_prefixed<'a>(
    parser: &mut Parser<'a, [u8]>,
) -> Result<&'a [u8], ParseError> {
    let len = u16::parse(parser)?;
    parse_slice(parser, usize::from(len))
}

//============ Error Types ===================================================

//------------ ComposeError --------------------------------------------------

/// An error happened while composing data.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ComposeError {
    /// Some data was too long for its length field.
    LongData,

    /// The message grew beyond what its header can describe.
    ShortBuf,
}

//--- Display and Error

impl fmt::Display for ComposeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            ComposeError::LongData => f.write_str("long data"),
            ComposeError::ShortBuf => f.write_str("buffer size exceeded"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ComposeError {}

//------------ ParseError ----------------------------------------------------

/// An error happened while parsing data.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ParseError {
    /// An attempt was made to go beyond the end of the parser.
    ShortInput,

    /// A formatting error occurred.
    Form(FormError),
}

impl ParseError {
    /// Creates a new parse error as a form error with the given message.
    pub fn form_error(msg: &'static str) -> Self {
        FormError::new(msg).into()
    }
}

//--- From

impl From<ShortInput> for ParseError {
    fn from(_: ShortInput) -> Self {
        ParseError::ShortInput
    }
}

impl From<FormError> for ParseError {
    fn from(err: FormError) -> Self {
        ParseError::Form(err)
    }
}

//--- Display and Error

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            ParseError::ShortInput => f.write_str("unexpected end of input"),
            ParseError::Form(ref err) => fmt::Display::fmt(err, f),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ParseError {}

//------------ FormError -----------------------------------------------------

/// A formatting error occured.
///
/// This is a generic error for all kinds of error cases that result in data
/// not being accepted. For diagnostics, the error is being given a static
/// string describing the error.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct FormError(&'static str);

impl FormError {
    /// Creates a new form error value with the given diagnostics string.
    pub fn new(msg: &'static str) -> Self {
        FormError(msg)
    }
}

//--- Display and Error

impl fmt::Display for FormError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.0)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for FormError {}

//============ Testing =======================================================
