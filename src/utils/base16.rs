//! Encoding of Base 16 a.k.a. hex digits.
//!
//! The Base 16 encoding is defined in [RFC 4648]. It really is just a normal
//! hex-encoding using the (case-insensitive) letters ‘A’ to ‘F’ as
//! additional values for the digits. It is used in the generic presentation
//! format of record data and when printing digests for diagnostics.
//!
//! [RFC 4648]: https://tools.ietf.org/html/rfc4648

use core::fmt;
#[cfg(feature = "std")]
use std::string::String;

/// Encodes binary data in Base 16 and writes it into a format stream.
///
/// Letters are written in lower case.
pub fn display<Octets, Target>(octets: &Octets, f: &mut Target) -> fmt::Result
where
    Octets: AsRef<[u8]> + ?Sized,
    Target: fmt::Write,
{
    for &octet in octets.as_ref() {
        write!(f, "{:02x}", octet)?;
    }
    Ok(())
}

/// Encodes binary data in Base 16 and returns the encoded data as a string.
#[cfg(feature = "std")]
pub fn encode_string<B: AsRef<[u8]> + ?Sized>(bytes: &B) -> String {
    let mut res = String::with_capacity(bytes.as_ref().len() * 2);
    // Writing to a string never fails.
    let _ = display(bytes, &mut res);
    res
}

//============ Test ==========================================================

#[cfg(test)]
mod test {
    #[test]
    fn encode() {
        assert_eq!(super::encode_string(b""), "");
        assert_eq!(super::encode_string(b"\x00\x0f\xab\xff"), "000fabff");
    }
}
