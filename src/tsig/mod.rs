//! Support for TSIG.
//!
//! This module provides signing and verification of DNS messages with TSIG
//! as defined in [RFC 2845].
//!
//! TSIG is intended to provide authentication for message exchanges.
//! Messages are signed using a secret key shared between the two
//! participants. The sender generates a MAC over the message it is about to
//! send using that key and adds it in a special record of record type
//! [TSIG] to the end of the additional section of the message. The receiver
//! recalculates the MAC using the same key and compares it to the one in the
//! record.
//!
//! The specification requires support for HMAC-MD5 defined in [RFC 2104]
//! while [RFC 4635] adds the SHA-based algorithms. We support exactly the
//! mandatory ones, HMAC-MD5, HMAC-SHA1, and HMAC-SHA256. The
//! [`Algorithm`] enum names them.
//!
//! The key is described by [`Credentials`]: the name of the algorithm, the
//! name of the key, and the shared secret in its Base 64 encoding. These
//! are resolved whenever a message is signed or verified.
//!
//! A message is signed via [`sign`]. It encodes the message, calculates the
//! MAC over the encoded message and the TSIG variables, and appends the TSIG
//! record. If the message is part of a sequence, such as the answers to an
//! AXFR request, the MAC of the previous message is included, too. Keeping
//! track of that MAC is left to the caller.
//!
//! A received message is verified via [`verify`]. Since the MAC covers the
//! message exactly as it was sent, verification needs both the parsed
//! message and the octets as received. The result is a simple `bool`. If
//! you need to know why verification failed, use [`verify_message`]
//! instead. Either way, the message is left exactly as it was.
//!
//! Note that verification checks the MAC only. Whether the time signed is
//! within the fudge of the current time can be checked separately through
//! [`Tsig::is_valid_now`].
//!
//! [RFC 2104]: https://tools.ietf.org/html/rfc2104
//! [RFC 2845]: https://tools.ietf.org/html/rfc2845
//! [RFC 4635]: https://tools.ietf.org/html/rfc4635
//! [TSIG]: crate::rdata::Tsig
//! [`Tsig::is_valid_now`]: crate::rdata::Tsig::is_valid_now

mod algorithm;
mod canonical;
mod key;
mod signing;

pub use self::algorithm::{Algorithm, AlgorithmError};
pub use self::canonical::prepare_wire;
pub use self::key::{Credentials, KeyError, Mac, Secret};
pub use self::signing::{SigningData, Variables};

use crate::base::iana::Class;
use crate::base::message::Message;
use crate::base::record::Record;
use crate::base::wire::{ComposeError, ParseError};
use crate::rdata::{AllRecordData, Time48};
use core::fmt;
use tracing::{debug, trace};

//------------ DEFAULT_FUDGE -------------------------------------------------

/// The fudge to use when there is no reason to pick another one.
///
/// This is the value recommended by RFC 2845.
pub const DEFAULT_FUDGE: u16 = 300;

//------------ Signing -------------------------------------------------------

/// Signs a message.
///
/// The current system time is used as the time signed. Apart from that,
/// this is the same as [`sign_at`].
#[cfg(feature = "std")]
pub fn sign(
    message: &mut Message,
    credentials: &Credentials,
    fudge: u16,
    prior_mac: Option<&[u8]>,
) -> Result<(), SignError> {
    let now = Time48::checked_now().ok_or(SignError::Clock)?;
    sign_at(message, credentials, fudge, prior_mac, now)
}

/// Signs a message using the given time signed.
///
/// The MAC is calculated over the wire format of the message as it is now.
/// If the message is part of a sequence, `prior_mac` has to be the MAC of
/// the previous message. The resulting TSIG record is appended to the
/// additional section with the current message ID as its original ID.
///
/// If signing fails, the message is left unchanged.
pub fn sign_at(
    message: &mut Message,
    credentials: &Credentials,
    fudge: u16,
    prior_mac: Option<&[u8]>,
    time_signed: Time48,
) -> Result<(), SignError> {
    let algorithm = credentials.resolve_algorithm()?;
    let secret = credentials.decode_secret()?;

    // There needs to be room for one more record in the additional section.
    if message.additional().len() >= usize::from(u16::MAX) {
        return Err(ComposeError::ShortBuf.into());
    }
    let wire = message.to_wire()?;

    let variables = Variables::new(time_signed, fudge);
    let prior_mac = prior_mac.map(Mac::from_slice);
    let data = SigningData::new(
        prior_mac.as_ref(),
        &wire,
        credentials.key_name(),
        algorithm,
        &variables,
    )?;
    let mac = secret.mac(algorithm, data.as_slice())?;
    let original_id = message.header().id();
    let tsig = variables
        .to_tsig(algorithm, mac.into_octets(), original_id)
        .map_err(|_| ComposeError::LongData)?;

    message.push_additional(Record::new(
        credentials.key_name().clone(),
        Class::ANY,
        0,
        tsig,
    ));
    debug!(
        key = %credentials.key_name(),
        %algorithm,
        %time_signed,
        fudge,
        original_id,
        "signed message"
    );
    Ok(())
}

//------------ Verification --------------------------------------------------

/// Verifies the TSIG record of a received message.
///
/// The `message` must be the message parsed from `wire`, the octets as
/// they were received. If the message is part of a sequence, `prior_mac`
/// has to be the MAC of the previous message.
///
/// Returns whether the message carries a correct MAC for the key described
/// by `credentials`. Any kind of failure, including an unusable key or a
/// broken message, results in `false`. The message is always left the way
/// it was passed in.
pub fn verify(
    message: &mut Message,
    wire: &[u8],
    credentials: &Credentials,
    prior_mac: Option<&[u8]>,
) -> bool {
    match verify_message(message, wire, credentials, prior_mac) {
        Ok(()) => {
            debug!(key = %credentials.key_name(), "verified message");
            true
        }
        Err(err) => {
            debug!(
                key = %credentials.key_name(),
                %err,
                "message failed verification"
            );
            false
        }
    }
}

/// Verifies the TSIG record of a received message, reporting failures.
///
/// This is the same as [`verify`] but returns the reason if verification
/// fails.
///
/// The message needs to end in a TSIG record for the key in `credentials`,
/// that is, the owner of the record must be the key name and its algorithm
/// must be the one of the credentials. Both names are compared octet by
/// octet, including their case. While the MAC is being recalculated,
/// the TSIG record is removed from the message and the message ID is
/// replaced by the original ID of the record. Both are restored before the
/// function returns, whatever the outcome.
///
/// The time signed and the fudge are included in the MAC but are not
/// compared against the current time. Neither is the error field checked.
pub fn verify_message(
    message: &mut Message,
    wire: &[u8],
    credentials: &Credentials,
    prior_mac: Option<&[u8]>,
) -> Result<(), ValidationError> {
    let record = message.tsig().ok_or(ValidationError::MissingAuthRecord)?;
    let algorithm = credentials.resolve_algorithm()?;
    // Both names must match the credentials octet for octet.
    Algorithm::from_dname(record.data().algorithm())?;
    if record.data().algorithm().as_slice() != algorithm.wire_slice()
        || record.owner().as_slice() != credentials.key_name().as_slice()
    {
        return Err(ValidationError::BadKey);
    }
    let variables = Variables::from_tsig(record.data());

    let expected = {
        let _detached =
            DetachedTsig::detach(message, record.data().original_id());
        recalculate(wire, credentials, algorithm, &variables, prior_mac)
    }?;

    if expected.matches(record.data().mac_slice()) {
        Ok(())
    } else {
        Err(ValidationError::BadSig)
    }
}

/// Calculates the MAC a received message should have.
fn recalculate(
    wire: &[u8],
    credentials: &Credentials,
    algorithm: Algorithm,
    variables: &Variables,
    prior_mac: Option<&[u8]>,
) -> Result<Mac, ValidationError> {
    let prepared = prepare_wire(wire)?;
    let prior_mac = prior_mac.map(Mac::from_slice);
    let data = SigningData::new(
        prior_mac.as_ref(),
        &prepared,
        credentials.key_name(),
        algorithm,
        variables,
    )?;
    let mac = credentials.decode_secret()?.mac(algorithm, data.as_slice())?;
    trace!(len = mac.len(), "recalculated MAC");
    Ok(mac)
}

//------------ DetachedTsig --------------------------------------------------

/// A message with its TSIG record temporarily removed.
///
/// While a value of this type exists, the message lacks its last additional
/// record and has its ID set to the original ID of the TSIG record. Both are
/// put back when the value is dropped.
struct DetachedTsig<'a> {
    /// The message in question.
    message: &'a mut Message,

    /// The record removed from the message.
    record: Option<Record<AllRecordData>>,

    /// The ID the message had before.
    id: u16,
}

impl<'a> DetachedTsig<'a> {
    fn detach(message: &'a mut Message, original_id: u16) -> Self {
        let id = message.header().id();
        let record = message.remove_last_additional();
        message.header_mut().set_id(original_id);
        DetachedTsig {
            message,
            record,
            id,
        }
    }
}

impl<'a> Drop for DetachedTsig<'a> {
    fn drop(&mut self) {
        if let Some(record) = self.record.take() {
            self.message.push_additional(record);
        }
        self.message.header_mut().set_id(self.id);
    }
}

//============ Error Types ===================================================

//------------ SignError -----------------------------------------------------

/// A message could not be signed.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SignError {
    /// The algorithm of the credentials is not supported.
    UnknownAlgorithm,

    /// The secret of the credentials is not usable.
    InvalidKeyEncoding,

    /// The message or the signing data could not be encoded.
    Compose(ComposeError),

    /// The system time is not available.
    Clock,
}

//--- From

impl From<AlgorithmError> for SignError {
    fn from(_: AlgorithmError) -> Self {
        SignError::UnknownAlgorithm
    }
}

impl From<KeyError> for SignError {
    fn from(_: KeyError) -> Self {
        SignError::InvalidKeyEncoding
    }
}

impl From<ComposeError> for SignError {
    fn from(err: ComposeError) -> Self {
        SignError::Compose(err)
    }
}

//--- Display and Error

impl fmt::Display for SignError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            SignError::UnknownAlgorithm => f.write_str("unknown algorithm"),
            SignError::InvalidKeyEncoding => {
                f.write_str("invalid key encoding")
            }
            SignError::Compose(ref err) => fmt::Display::fmt(err, f),
            SignError::Clock => f.write_str("system time not available"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for SignError {}

//------------ ValidationError -----------------------------------------------

/// An error happened while validating a TSIG-signed message.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ValidationError {
    /// The message does not end in a TSIG record.
    MissingAuthRecord,

    /// The received message could not be parsed.
    MalformedWire,

    /// The algorithm of the credentials or the record is not supported.
    UnknownAlgorithm,

    /// The secret of the credentials is not usable.
    InvalidKeyEncoding,

    /// The TSIG record is for a different key.
    BadKey,

    /// The MAC does not match.
    BadSig,
}

//--- From

impl From<AlgorithmError> for ValidationError {
    fn from(_: AlgorithmError) -> Self {
        ValidationError::UnknownAlgorithm
    }
}

impl From<KeyError> for ValidationError {
    fn from(_: KeyError) -> Self {
        ValidationError::InvalidKeyEncoding
    }
}

impl From<ParseError> for ValidationError {
    fn from(_: ParseError) -> Self {
        ValidationError::MalformedWire
    }
}

impl From<ComposeError> for ValidationError {
    fn from(_: ComposeError) -> Self {
        ValidationError::MalformedWire
    }
}

//--- Display and Error

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            ValidationError::MissingAuthRecord => {
                f.write_str("missing TSIG record")
            }
            ValidationError::MalformedWire => f.write_str("format error"),
            ValidationError::UnknownAlgorithm => {
                f.write_str("unknown algorithm")
            }
            ValidationError::InvalidKeyEncoding => {
                f.write_str("invalid key encoding")
            }
            ValidationError::BadKey => f.write_str("unknown key"),
            ValidationError::BadSig => f.write_str("bad signature"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ValidationError {}

//============ Testing =======================================================
