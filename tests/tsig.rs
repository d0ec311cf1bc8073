mod common;

use core::str::FromStr;

use bytes::Bytes;
use rstest::rstest;

use domain_tsig::base::iana::Class;
use domain_tsig::base::{Dname, Message, Record, Rtype};
use domain_tsig::rdata::{Time48, A};
use domain_tsig::tsig::{
    self, Algorithm, Credentials, SignError, ValidationError, DEFAULT_FUDGE,
};

use common::init_logging;

//----------- Helpers --------------------------------------------------------

const KEY_NAME: &str = "key.example.";
const SECRET: &str = "vo1xeKhwUxRqe+TIH1+tyRrbNmGsBH5w1IH8sWNaMOg=";

fn name(s: &str) -> Dname {
    Dname::from_str(s).unwrap()
}

fn credentials(algorithm: Algorithm) -> Credentials {
    Credentials::from_strs(algorithm.name(), KEY_NAME, SECRET).unwrap()
}

fn response() -> Message {
    let mut msg = Message::query(name("www.example.com"), Rtype::A);
    msg.header_mut().set_qr(true);
    msg.header_mut().set_aa(true);
    msg.push_answer(Record::new(
        name("www.example.com"),
        Class::IN,
        3600,
        A::from_octets(192, 0, 2, 80),
    ));
    msg.push_additional(Record::new(
        name("ns.example.com"),
        Class::IN,
        3600,
        A::from_octets(192, 0, 2, 53),
    ));
    msg
}

/// Signs a message and returns the wire format.
fn sign_to_wire(
    mut msg: Message,
    creds: &Credentials,
    prior_mac: Option<&[u8]>,
) -> Vec<u8> {
    tsig::sign(&mut msg, creds, DEFAULT_FUDGE, prior_mac).unwrap();
    msg.to_wire().unwrap().to_vec()
}

/// Returns the MAC of the TSIG record of a message.
fn mac_of(wire: &[u8]) -> Bytes {
    Message::from_octets(wire)
        .unwrap()
        .tsig()
        .unwrap()
        .data()
        .mac()
        .clone()
}

/// Parses a received message and verifies it.
///
/// Also checks that verification leaves the message untouched.
fn receive(
    wire: &[u8],
    creds: &Credentials,
    prior_mac: Option<&[u8]>,
) -> Result<(), ValidationError> {
    let mut msg = Message::from_octets(wire).unwrap();
    let before = msg.clone();
    let res = tsig::verify_message(&mut msg, wire, creds, prior_mac);
    assert_eq!(msg, before);
    assert_eq!(tsig::verify(&mut msg, wire, creds, prior_mac), res.is_ok());
    assert_eq!(msg, before);
    res
}

//----------- Tests ----------------------------------------------------------

#[rstest]
#[case(Algorithm::Md5)]
#[case(Algorithm::Sha1)]
#[case(Algorithm::Sha256)]
fn round_trip(#[case] alg: Algorithm) {
    init_logging();
    let creds = credentials(alg);
    let wire = sign_to_wire(response(), &creds, None);
    assert_eq!(mac_of(&wire).len(), alg.native_len());
    assert_eq!(receive(&wire, &creds, None), Ok(()));

    let msg = Message::from_octets(&wire).unwrap();
    let tsig = msg.tsig().unwrap();
    assert!(tsig.data().is_valid_now());
    assert_eq!(tsig.data().fudge(), DEFAULT_FUDGE);
    assert_eq!(tsig.data().original_id(), msg.header().id());
}

/// The parts of a signed message that can be tampered with.
#[derive(Clone, Copy, Debug)]
enum Field {
    /// A letter of the question name.
    Body,

    /// A letter of the owner of the TSIG record.
    KeyName,

    /// A letter of the algorithm name.
    AlgorithmName,

    /// The least significant octet of the time signed.
    TimeSigned,

    /// The least significant octet of the fudge.
    Fudge,

    /// The first octet of the MAC.
    Mac,
}

impl Field {
    /// Returns the position of the field in a message signed with SHA-256.
    fn offset(self, wire: &[u8]) -> usize {
        // From the end: other (2), error (2), original ID (2), MAC (32),
        // MAC size (2), fudge (2), time signed (6).
        let mac = wire.len() - 6 - 32;
        let fudge = mac - 2 - 2;
        let time_signed = fudge - 6;
        let algorithm =
            time_signed - Algorithm::Sha256.to_dname().as_slice().len();
        let key_name = algorithm - 10 - name(KEY_NAME).as_slice().len();
        match self {
            Field::Body => 13,
            Field::KeyName => key_name + 1,
            Field::AlgorithmName => algorithm + 1,
            Field::TimeSigned => time_signed + 5,
            Field::Fudge => fudge + 1,
            Field::Mac => mac,
        }
    }
}

#[rstest]
#[case(Field::Body, ValidationError::BadSig)]
#[case(Field::KeyName, ValidationError::BadKey)]
#[case(Field::AlgorithmName, ValidationError::UnknownAlgorithm)]
#[case(Field::TimeSigned, ValidationError::BadSig)]
#[case(Field::Fudge, ValidationError::BadSig)]
#[case(Field::Mac, ValidationError::BadSig)]
fn tampered(#[case] field: Field, #[case] err: ValidationError) {
    init_logging();
    let creds = credentials(Algorithm::Sha256);
    let mut wire = sign_to_wire(response(), &creds, None);
    assert_eq!(receive(&wire, &creds, None), Ok(()));

    let offset = field.offset(&wire);
    wire[offset] ^= 0x01;
    assert_eq!(receive(&wire, &creds, None), Err(err));
}

#[test]
fn tampered_field_offsets() {
    let creds = credentials(Algorithm::Sha256);
    let wire = sign_to_wire(response(), &creds, None);
    let mac = mac_of(&wire);
    let offset = Field::Mac.offset(&wire);
    assert_eq!(&wire[offset..offset + 32], mac.as_ref());
    assert_eq!(wire[Field::Body.offset(&wire)], b'w');
    assert_eq!(wire[Field::KeyName.offset(&wire)], b'k');
    assert_eq!(wire[Field::AlgorithmName.offset(&wire)], b'h');
    assert_eq!(
        u16::from_be_bytes([wire[offset - 2], wire[offset - 1]]),
        32
    );
}

#[rstest]
#[case(Field::KeyName)]
#[case(Field::AlgorithmName)]
fn name_case_changed(#[case] field: Field) {
    init_logging();
    let creds = credentials(Algorithm::Sha256);
    let mut wire = sign_to_wire(response(), &creds, None);
    let offset = field.offset(&wire);
    wire[offset] = wire[offset].to_ascii_uppercase();
    assert_eq!(receive(&wire, &creds, None), Err(ValidationError::BadKey));
}

#[test]
fn key_name_case_must_match() {
    init_logging();
    let signer =
        Credentials::from_strs("hmac-sha256.", "Key.Example.", SECRET)
            .unwrap();
    let wire = sign_to_wire(response(), &signer, None);
    assert_eq!(receive(&wire, &signer, None), Ok(()));
    assert_eq!(
        receive(&wire, &credentials(Algorithm::Sha256), None),
        Err(ValidationError::BadKey)
    );
}

#[test]
fn chained() {
    init_logging();
    let creds = credentials(Algorithm::Sha256);
    let first = sign_to_wire(response(), &creds, None);
    let first_mac = mac_of(&first);
    assert_eq!(receive(&first, &creds, None), Ok(()));

    let second = sign_to_wire(response(), &creds, Some(first_mac.as_ref()));
    assert_eq!(receive(&second, &creds, Some(first_mac.as_ref())), Ok(()));

    assert_eq!(
        receive(&second, &creds, None),
        Err(ValidationError::BadSig)
    );
    let second_mac = mac_of(&second);
    assert_eq!(
        receive(&second, &creds, Some(second_mac.as_ref())),
        Err(ValidationError::BadSig)
    );
    let mut wrong_mac = first_mac.to_vec();
    wrong_mac[0] ^= 0xFF;
    assert_eq!(
        receive(&second, &creds, Some(wrong_mac.as_slice())),
        Err(ValidationError::BadSig)
    );
}

#[test]
fn hmac_md5_query() {
    init_logging();
    // Sixteen octets 0x00 to 0x0F.
    let creds = Credentials::from_strs(
        "hmac-md5.sig-alg.reg.int.",
        "example.key.",
        "AAECAwQFBgcICQoLDA0ODw==",
    )
    .unwrap();
    assert_eq!(
        format!("{:?}", creds.decode_secret().unwrap()),
        "Secret(16 octets)"
    );

    let mut query = Message::new();
    query.header_mut().set_random_id();
    query.push_question((name("example.com."), Rtype::A, Class::IN));
    tsig::sign(&mut query, &creds, DEFAULT_FUDGE, None).unwrap();

    let tsig = query.tsig().unwrap();
    assert_eq!(tsig.owner(), &name("example.key."));
    assert_eq!(tsig.data().algorithm(), &Algorithm::Md5.to_dname());
    assert_eq!(tsig.data().mac().len(), 16);

    let mut wire = query.to_wire().unwrap().to_vec();
    // MAC size field sits before the MAC, followed by 6 more octets.
    let mac_start = wire.len() - 6 - 16;
    assert_eq!(&wire[mac_start - 2..mac_start], b"\0\x10");
    assert_eq!(receive(&wire, &creds, None), Ok(()));

    wire[mac_start + 7] ^= 0x80;
    assert_eq!(receive(&wire, &creds, None), Err(ValidationError::BadSig));
}

#[test]
fn unsigned_message() {
    init_logging();
    let creds = credentials(Algorithm::Sha1);
    let mut msg = response();
    let wire = msg.to_wire().unwrap();
    let before = msg.clone();
    assert!(!tsig::verify(&mut msg, &wire, &creds, None));
    assert_eq!(msg, before);
    assert_eq!(
        receive(&wire, &creds, None),
        Err(ValidationError::MissingAuthRecord)
    );
}

#[test]
fn stale_signature_still_verifies() {
    // The time signed is part of the MAC but not checked against the
    // current time.
    init_logging();
    let creds = credentials(Algorithm::Sha1);
    let mut msg = response();
    tsig::sign_at(&mut msg, &creds, 10, None, Time48::from_u64(1_000))
        .unwrap();
    let wire = msg.to_wire().unwrap();
    let received = Message::from_octets(&wire).unwrap();
    assert!(!received.tsig().unwrap().data().is_valid_now());
    assert_eq!(receive(&wire, &creds, None), Ok(()));
}

#[test]
fn relayed_with_new_id() {
    // An intermediary changing the ID after signing breaks the MAC since
    // it covers the octets as received.
    init_logging();
    let creds = credentials(Algorithm::Sha256);
    let mut wire = sign_to_wire(response(), &creds, None);
    wire[0] ^= 0xFF;
    assert_eq!(receive(&wire, &creds, None), Err(ValidationError::BadSig));
}

#[test]
fn sign_errors() {
    init_logging();
    let orig = response();

    let mut msg = orig.clone();
    let creds = Credentials::from_strs("hmac-sha512.", KEY_NAME, SECRET)
        .unwrap();
    assert_eq!(
        tsig::sign(&mut msg, &creds, DEFAULT_FUDGE, None),
        Err(SignError::UnknownAlgorithm)
    );
    assert_eq!(msg, orig);

    let creds =
        Credentials::from_strs("hmac-sha1.", KEY_NAME, "not=base64").unwrap();
    assert_eq!(
        tsig::sign(&mut msg, &creds, DEFAULT_FUDGE, None),
        Err(SignError::InvalidKeyEncoding)
    );
    assert_eq!(msg, orig);
}
