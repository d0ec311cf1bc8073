//! Credentials, secrets, and MACs.
//!
//! The shared secret of a TSIG key is handed around in its Base 64 encoded
//! form as part of [`Credentials`]. It is only decoded into a [`Secret`]
//! when a MAC is actually needed. Computing a MAC produces a [`Mac`] holding
//! the digest at the native length of the algorithm.

use super::algorithm::{Algorithm, AlgorithmError};
use crate::base::name::{Dname, DnameError};
use crate::base::wire::{compose_len_prefixed, ComposeError};
use crate::utils::{base16, base64};
use bytes::{Bytes, BytesMut};
use core::fmt;
use core::str::FromStr;
use hmac::{Hmac, Mac as _};
use md5::Md5;
use ring::{constant_time, hmac as ring_hmac};

//------------ Credentials ---------------------------------------------------

/// The credentials for signing and verifying messages.
///
/// Credentials consist of the name of the algorithm to use, the name of the
/// key, and the shared secret encoded in Base 64. The algorithm and the
/// secret are kept as given and only resolved when used. Thus, an unknown
/// algorithm or a secret that isn’t valid Base 64 will only be noticed when
/// signing or verifying a message.
#[derive(Clone)]
pub struct Credentials {
    /// The name of the algorithm in presentation format.
    algorithm: String,

    /// The name of the key.
    key_name: Dname,

    /// The secret encoded in Base 64.
    secret: String,
}

impl Credentials {
    /// Creates new credentials from their components.
    pub fn new(
        algorithm: impl Into<String>,
        key_name: Dname,
        secret: impl Into<String>,
    ) -> Self {
        Credentials {
            algorithm: algorithm.into(),
            key_name,
            secret: secret.into(),
        }
    }

    /// Creates new credentials from strings.
    ///
    /// The key name is parsed from presentation format which is the only
    /// thing that can fail.
    pub fn from_strs(
        algorithm: &str,
        key_name: &str,
        secret: &str,
    ) -> Result<Self, DnameError> {
        Ok(Self::new(algorithm, Dname::from_str(key_name)?, secret))
    }

    /// Returns the name of the algorithm as given.
    pub fn algorithm(&self) -> &str {
        &self.algorithm
    }

    /// Returns a reference to the key name.
    pub fn key_name(&self) -> &Dname {
        &self.key_name
    }

    /// Returns the Base 64 encoded secret.
    pub fn secret(&self) -> &str {
        &self.secret
    }

    /// Resolves the algorithm name into one of the supported algorithms.
    pub fn resolve_algorithm(&self) -> Result<Algorithm, AlgorithmError> {
        Algorithm::from_name(&self.algorithm)
    }

    /// Decodes the secret.
    pub fn decode_secret(&self) -> Result<Secret, KeyError> {
        Secret::from_base64(&self.secret)
    }
}

//--- Debug

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("algorithm", &self.algorithm)
            .field("key_name", &self.key_name)
            .finish_non_exhaustive()
    }
}

//------------ Secret --------------------------------------------------------

/// The decoded shared secret of a key.
#[derive(Clone)]
pub struct Secret(Bytes);

impl Secret {
    /// Creates a secret from its raw octets.
    pub fn from_octets(octets: Bytes) -> Self {
        Secret(octets)
    }

    /// Decodes a secret from its Base 64 encoding.
    pub fn from_base64(s: &str) -> Result<Self, KeyError> {
        base64::decode(s).map(Secret).map_err(KeyError::Encoding)
    }

    /// Computes the MAC over `data` using this secret as the key.
    ///
    /// The MAC will have the native length of the algorithm’s digest.
    pub fn mac(
        &self,
        algorithm: Algorithm,
        data: &[u8],
    ) -> Result<Mac, KeyError> {
        let digest = match algorithm.ring_algorithm() {
            Some(ring_alg) => {
                let key = ring_hmac::Key::new(ring_alg, self.0.as_ref());
                Bytes::copy_from_slice(ring_hmac::sign(&key, data).as_ref())
            }
            None => {
                let mut context = Hmac::<Md5>::new_from_slice(self.0.as_ref())
                    .map_err(|_| KeyError::Length)?;
                context.update(data);
                Bytes::copy_from_slice(&context.finalize().into_bytes())
            }
        };
        Ok(Mac(digest))
    }
}

//--- Debug

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Secret({} octets)", self.0.len())
    }
}

//------------ Mac -----------------------------------------------------------

/// A message authentication code.
///
/// This is the digest part only. In wire format, the digest is preceded by
/// its length as a 16 bit unsigned integer. Since all supported digests are
/// short, the length always fits.
#[derive(Clone, Eq, PartialEq)]
pub struct Mac(Bytes);

impl Mac {
    /// Creates a MAC from the octets of a digest.
    pub fn from_octets(octets: Bytes) -> Self {
        Mac(octets)
    }

    /// Creates a MAC by copying the octets of a digest.
    pub fn from_slice(digest: &[u8]) -> Self {
        Mac(Bytes::copy_from_slice(digest))
    }

    /// Returns a slice of the digest.
    pub fn as_slice(&self) -> &[u8] {
        self.0.as_ref()
    }

    /// Converts the MAC into the octets of the digest.
    pub fn into_octets(self) -> Bytes {
        self.0
    }

    /// Returns the length of the digest.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns whether the digest is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Appends the wire format of the MAC to `target`.
    ///
    /// This is the 16 bit length followed by the octets of the digest. Fails
    /// if the digest is too long for the length field.
    pub fn compose(
        &self,
        target: &mut BytesMut,
    ) -> Result<(), ComposeError> {
        compose_len_prefixed(target, self.0.as_ref())
    }

    /// Compares the MAC to the provided octets in constant time.
    pub fn matches(&self, provided: &[u8]) -> bool {
        constant_time::verify_slices_are_equal(self.0.as_ref(), provided)
            .is_ok()
    }
}

//--- AsRef

impl AsRef<[u8]> for Mac {
    fn as_ref(&self) -> &[u8] {
        self.as_slice()
    }
}

//--- Display and Debug

impl fmt::Display for Mac {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        base64::display(&self.0, f)
    }
}

impl fmt::Debug for Mac {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("Mac(")?;
        base16::display(&self.0, f)?;
        f.write_str(")")
    }
}

//------------ KeyError ------------------------------------------------------

/// The secret of a key could not be used.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum KeyError {
    /// The secret was not correctly encoded in Base 64.
    Encoding(base64::DecodeError),

    /// The hash primitive rejected the length of the secret.
    Length,
}

//--- Display and Error

impl fmt::Display for KeyError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            KeyError::Encoding(ref err) => {
                write!(f, "invalid key encoding: {}", err)
            }
            KeyError::Length => f.write_str("invalid key length"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for KeyError {}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;
    use rstest::rstest;

    // The test vectors from RFC 2202 and RFC 4231.
    #[rstest]
    #[case(
        Algorithm::Md5,
        "Jefe",
        "what do ya want for nothing?",
        "750c783e6ab0b503eaa86e310a5db738"
    )]
    #[case(
        Algorithm::Sha1,
        "Jefe",
        "what do ya want for nothing?",
        "effcdf6ae5eb2fa2d27416d5f184df9c259a7c79"
    )]
    #[case(
        Algorithm::Sha256,
        "Jefe",
        "what do ya want for nothing?",
        "5bdcc146bf60754e6a042426089575c75a003f089d2739839dec58b964ec3843"
    )]
    fn mac_vectors(
        #[case] alg: Algorithm,
        #[case] key: &str,
        #[case] data: &str,
        #[case] digest: &str,
    ) {
        let secret =
            Secret::from_octets(Bytes::copy_from_slice(key.as_bytes()));
        let mac = secret.mac(alg, data.as_bytes()).unwrap();
        assert_eq!(mac.len(), alg.native_len());
        assert_eq!(base16::encode_string(mac.as_slice()), digest);
    }

    #[test]
    fn deterministic() {
        let secret = Secret::from_base64("c2VjcmV0").unwrap();
        for alg in Algorithm::ALL {
            assert_eq!(
                secret.mac(alg, b"message").unwrap(),
                secret.mac(alg, b"message").unwrap()
            );
            assert_ne!(
                secret.mac(alg, b"message").unwrap(),
                secret.mac(alg, b"messagf").unwrap()
            );
        }
    }

    #[test]
    fn mac_wire() {
        let mac = Mac::from_octets(Bytes::from_static(b"\x01\x02\x03"));
        let mut buf = BytesMut::new();
        mac.compose(&mut buf).unwrap();
        assert_eq!(buf.as_ref(), b"\0\x03\x01\x02\x03");
        let long = Mac::from_octets(Bytes::from(vec![0u8; 0x10000]));
        assert_eq!(long.compose(&mut buf), Err(ComposeError::LongData));
        assert!(mac.matches(b"\x01\x02\x03"));
        assert!(!mac.matches(b"\x01\x02\x04"));
        assert!(!mac.matches(b"\x01\x02"));
        assert_eq!(format!("{:?}", mac), "Mac(010203)");
    }

    #[test]
    fn credentials() {
        let creds = Credentials::from_strs(
            "hmac-sha256.",
            "Key.Example.",
            "c2VjcmV0",
        )
        .unwrap();
        assert_eq!(creds.resolve_algorithm(), Ok(Algorithm::Sha256));
        assert_eq!(creds.key_name(), &Dname::from_str("key.example").unwrap());
        assert_eq!(
            format!("{:?}", creds.decode_secret().unwrap()),
            "Secret(6 octets)"
        );
        assert!(!format!("{:?}", creds).contains("c2VjcmV0"));

        let creds = Credentials::new(
            "hmac-sha256",
            Dname::root(),
            "not base64!",
        );
        assert_eq!(creds.resolve_algorithm(), Err(AlgorithmError));
        assert!(matches!(
            creds.decode_secret(),
            Err(KeyError::Encoding(base64::DecodeError::IllegalChar(' ')))
        ));
    }
}
