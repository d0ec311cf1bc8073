//! Assembling the data that goes into the MAC.
//!
//! The MAC of a TSIG record covers more than just the message. [RFC 2845]
//! defines the exact sequence of octets to feed into the hash function:
//!
//! 1. the MAC of the previous message in a sequence, if any, in its wire
//!    format including the length,
//! 2. the message itself without the TSIG record,
//! 3. the key name in canonical wire format,
//! 4. the class of the TSIG record which is always ANY,
//! 5. the TTL of the TSIG record which is always zero,
//! 6. the algorithm name in canonical wire format,
//! 7. the time the MAC was created as a 48 bit value,
//! 8. the fudge,
//! 9. the TSIG error,
//! 10. the other data including its length.
//!
//! The items from 3 on are called the TSIG variables. The ones that change
//! between messages are kept in [`Variables`]. [`SigningData`] puts it all
//! together.
//!
//! [RFC 2845]: https://tools.ietf.org/html/rfc2845

use super::algorithm::Algorithm;
use super::key::Mac;
use crate::base::iana::{Class, TsigRcode};
use crate::base::name::Dname;
use crate::base::rdata::LongRecordData;
use crate::base::wire::{compose_len_prefixed, Compose, ComposeError};
use crate::rdata::tsig::{Time48, Tsig};
use bytes::{BufMut, Bytes, BytesMut};
use tracing::trace;

//------------ Variables -----------------------------------------------------

/// The TSIG variables that differ between messages.
///
/// The remaining variables are either fixed or taken from the key.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Variables {
    /// The time the MAC in question was created.
    time_signed: Time48,

    /// The permitted difference between the signer’s and verifier’s clocks.
    fudge: u16,

    /// The TSIG error code.
    error: TsigRcode,

    /// The content of the ‘other’ field.
    other: Bytes,
}

impl Variables {
    /// Creates variables for signing a message.
    ///
    /// The error is set to NOERROR and the other data is left empty.
    pub fn new(time_signed: Time48, fudge: u16) -> Self {
        Self::from_parts(time_signed, fudge, TsigRcode::NOERROR, Bytes::new())
    }

    /// Creates variables from all their parts.
    pub fn from_parts(
        time_signed: Time48,
        fudge: u16,
        error: TsigRcode,
        other: Bytes,
    ) -> Self {
        Variables {
            time_signed,
            fudge,
            error,
            other,
        }
    }

    /// Takes the variables from the data of a received TSIG record.
    pub fn from_tsig(tsig: &Tsig) -> Self {
        Self::from_parts(
            tsig.time_signed(),
            tsig.fudge(),
            tsig.error(),
            tsig.other().clone(),
        )
    }

    pub fn time_signed(&self) -> Time48 {
        self.time_signed
    }

    pub fn fudge(&self) -> u16 {
        self.fudge
    }

    pub fn error(&self) -> TsigRcode {
        self.error
    }

    pub fn other(&self) -> &Bytes {
        &self.other
    }

    /// Returns the length of the variables in the signing data.
    fn signing_len(&self, key_name: &Dname, algorithm: Algorithm) -> usize {
        key_name.compose_len()
            + Class::COMPOSE_LEN
            + 4
            + algorithm.wire_slice().len()
            + Time48::COMPOSE_LEN
            + 2
            + TsigRcode::COMPOSE_LEN
            + 2
            + self.other.len()
    }

    /// Appends the variables to the signing data.
    fn compose_signing(
        &self,
        key_name: &Dname,
        algorithm: Algorithm,
        target: &mut BytesMut,
    ) -> Result<(), ComposeError> {
        // Key name, in canonical wire format
        key_name.compose_canonical(target);
        // CLASS (Always ANY in the current specification)
        Class::ANY.compose(target);
        // TTL (Always 0 in the current specification)
        target.put_u32(0);
        // Algorithm Name (in canonical wire format)
        target.put_slice(algorithm.wire_slice());
        // Time Signed
        self.time_signed.compose(target);
        // Fudge
        target.put_u16(self.fudge);
        // Error
        self.error.compose(target);
        // Other Len and Other
        compose_len_prefixed(target, self.other.as_ref())
    }

    /// Creates the record data of a TSIG record carrying these variables.
    pub fn to_tsig(
        &self,
        algorithm: Algorithm,
        mac: Bytes,
        original_id: u16,
    ) -> Result<Tsig, LongRecordData> {
        Tsig::new(
            algorithm.to_dname(),
            self.time_signed,
            self.fudge,
            mac,
            original_id,
            self.error,
            self.other.clone(),
        )
    }
}

//------------ SigningData ---------------------------------------------------

/// The complete sequence of octets that the MAC is calculated over.
#[derive(Clone, Debug)]
pub struct SigningData(Bytes);

impl SigningData {
    /// Assembles the signing data.
    ///
    /// The `message` has to be the wire format of the message without its
    /// TSIG record. If `prior_mac` is given, it must be the MAC of the
    /// previous message. Fails if the prior MAC or the other data are too
    /// long for their 16 bit length fields.
    pub fn new(
        prior_mac: Option<&Mac>,
        message: &[u8],
        key_name: &Dname,
        algorithm: Algorithm,
        variables: &Variables,
    ) -> Result<Self, ComposeError> {
        let len = prior_mac.map(|mac| mac.len() + 2).unwrap_or(0)
            + message.len()
            + variables.signing_len(key_name, algorithm);
        let mut target = BytesMut::with_capacity(len);
        if let Some(mac) = prior_mac {
            mac.compose(&mut target)?;
        }
        target.put_slice(message);
        variables.compose_signing(key_name, algorithm, &mut target)?;
        trace!(
            len = target.len(),
            chained = prior_mac.is_some(),
            "assembled signing data"
        );
        Ok(SigningData(target.freeze()))
    }

    pub fn as_slice(&self) -> &[u8] {
        self.0.as_ref()
    }
}

//--- AsRef

impl AsRef<[u8]> for SigningData {
    fn as_ref(&self) -> &[u8] {
        self.as_slice()
    }
}

//============ Testing =======================================================
