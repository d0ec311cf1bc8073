//! The TSIG algorithms.

use crate::base::name::Dname;
use bytes::Bytes;
use core::{fmt, str};
use ring::hmac;

//------------ Algorithm -----------------------------------------------------

/// The supported TSIG algorithms.
///
/// These are the algorithms [RFC 4635] declares mandatory to implement.
/// Algorithms are identified by their name, which is written as an absolute
/// domain name. When converting from a name, the name is matched ignoring
/// ASCII case but must otherwise be identical to one of the names, including
/// the trailing dot.
///
/// [RFC 4635]: https://tools.ietf.org/html/rfc4635
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Algorithm {
    /// HMAC-MD5 from RFC 2845, `hmac-md5.sig-alg.reg.int.`
    Md5,

    /// HMAC-SHA1 from RFC 4635, `hmac-sha1.`
    Sha1,

    /// HMAC-SHA256 from RFC 4635, `hmac-sha256.`
    Sha256,
}

impl Algorithm {
    /// All supported algorithms.
    pub const ALL: [Algorithm; 3] =
        [Algorithm::Md5, Algorithm::Sha1, Algorithm::Sha256];

    /// Returns the algorithm for its name in presentation format.
    pub fn from_name(name: &str) -> Result<Self, AlgorithmError> {
        Self::ALL
            .into_iter()
            .find(|alg| alg.name().eq_ignore_ascii_case(name))
            .ok_or(AlgorithmError)
    }

    /// Returns the algorithm for its name as a domain name.
    pub fn from_dname(name: &Dname) -> Result<Self, AlgorithmError> {
        Self::ALL
            .into_iter()
            .find(|alg| alg.wire_slice().eq_ignore_ascii_case(name.as_slice()))
            .ok_or(AlgorithmError)
    }

    /// Returns the name of the algorithm in presentation format.
    pub fn name(self) -> &'static str {
        match self {
            Algorithm::Md5 => "hmac-md5.sig-alg.reg.int.",
            Algorithm::Sha1 => "hmac-sha1.",
            Algorithm::Sha256 => "hmac-sha256.",
        }
    }

    /// Returns a octet slice with the wire-format domain name for this value.
    pub(crate) fn wire_slice(self) -> &'static [u8] {
        match self {
            Algorithm::Md5 => b"\x08hmac-md5\x07sig-alg\x03reg\x03int\0",
            Algorithm::Sha1 => b"\x09hmac-sha1\0",
            Algorithm::Sha256 => b"\x0Bhmac-sha256\0",
        }
    }

    /// Returns a domain name for this value.
    pub fn to_dname(self) -> Dname {
        // The wire slices above are all correctly encoded absolute names.
        unsafe {
            Dname::from_octets_unchecked(Bytes::from_static(
                self.wire_slice(),
            ))
        }
    }

    /// Returns the ring HMAC algorithm for this TSIG algorithm.
    ///
    /// Ring doesn’t do MD5, so there is no algorithm for [`Algorithm::Md5`].
    pub(crate) fn ring_algorithm(self) -> Option<hmac::Algorithm> {
        match self {
            Algorithm::Md5 => None,
            Algorithm::Sha1 => Some(hmac::HMAC_SHA1_FOR_LEGACY_USE_ONLY),
            Algorithm::Sha256 => Some(hmac::HMAC_SHA256),
        }
    }

    /// Returns the native length of a signature created with this algorithm.
    pub fn native_len(self) -> usize {
        match self {
            Algorithm::Md5 => 16,
            Algorithm::Sha1 => 20,
            Algorithm::Sha256 => 32,
        }
    }
}

//--- FromStr

impl str::FromStr for Algorithm {
    type Err = AlgorithmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s)
    }
}

//--- Display

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

//------------ AlgorithmError ------------------------------------------------

/// An invalid algorithm was provided.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct AlgorithmError;

//--- Display and Error

impl fmt::Display for AlgorithmError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("unknown algorithm")
    }
}

#[cfg(feature = "std")]
impl std::error::Error for AlgorithmError {}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;
    use core::str::FromStr;
    use rstest::rstest;

    #[rstest]
    #[case("hmac-md5.sig-alg.reg.int.", Algorithm::Md5)]
    #[case("HMAC-MD5.SIG-ALG.REG.INT.", Algorithm::Md5)]
    #[case("hmac-sha1.", Algorithm::Sha1)]
    #[case("Hmac-Sha1.", Algorithm::Sha1)]
    #[case("hmac-sha256.", Algorithm::Sha256)]
    #[case("HMAC-SHA256.", Algorithm::Sha256)]
    fn known_names(#[case] name: &str, #[case] alg: Algorithm) {
        assert_eq!(Algorithm::from_name(name), Ok(alg));
        assert_eq!(
            Algorithm::from_dname(&Dname::from_str(name).unwrap()),
            Ok(alg)
        );
    }

    #[rstest]
    #[case("hmac-md5.sig-alg.reg.int")]
    #[case("hmac-sha1")]
    #[case("hmac-sha256")]
    #[case("hmac-sha384.")]
    #[case("hmac-sha512.")]
    #[case("hmac-md5.")]
    #[case("hmac-sha256..")]
    #[case("xhmac-sha256.")]
    #[case("")]
    fn unknown_names(#[case] name: &str) {
        assert_eq!(Algorithm::from_name(name), Err(AlgorithmError));
        assert_eq!(Algorithm::from_str(name), Err(AlgorithmError));
    }

    #[test]
    fn unknown_dname() {
        assert_eq!(
            Algorithm::from_dname(&Dname::from_str("hmac-sha384").unwrap()),
            Err(AlgorithmError)
        );
        assert_eq!(
            Algorithm::from_dname(&Dname::from_str("hmac-sha1.x").unwrap()),
            Err(AlgorithmError)
        );
    }

    #[test]
    fn names_round_trip() {
        for alg in Algorithm::ALL {
            assert_eq!(alg.to_dname(), Dname::from_str(alg.name()).unwrap());
            assert_eq!(format!("{}", alg), alg.name());
            assert_eq!(alg.to_string().parse::<Algorithm>(), Ok(alg));
        }
    }

    #[test]
    fn native_len() {
        for alg in Algorithm::ALL {
            if let Some(ring_alg) = alg.ring_algorithm() {
                let key = hmac::Key::new(ring_alg, b"key");
                assert_eq!(
                    hmac::sign(&key, b"data").as_ref().len(),
                    alg.native_len()
                );
            }
        }
    }
}
