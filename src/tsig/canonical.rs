//! Restoring the wire format a received message had before signing.

use crate::base::header::{HeaderCounts, HeaderSection};
use crate::base::question::Question;
use crate::base::record::RecordHeader;
use crate::base::wire::{Parse, ParseError};
use bytes::{Bytes, BytesMut};
use octseq::parse::Parser;
use tracing::trace;

/// Returns the wire format of a message without its trailing TSIG record.
///
/// The function expects `wire` to hold a complete message whose last record
/// in the additional section is the TSIG record. It walks over all sections
/// of the message, skipping each question and record, until it has consumed
/// all but the last additional record. Everything up to this point is copied
/// into a new buffer and the ARCOUNT of the copy is decreased by one. This
/// is exactly the message the signer fed into the MAC.
///
/// The trailing record itself is neither parsed nor checked. Returns an
/// error if the message has no additional records at all or if any part of
/// the message before the TSIG record fails to parse.
pub fn prepare_wire(wire: &[u8]) -> Result<Bytes, ParseError> {
    let mut parser = Parser::from_ref(wire);
    let section = HeaderSection::parse(&mut parser)?;
    let counts = *section.counts();
    let arcount = match counts.arcount().checked_sub(1) {
        Some(count) => count,
        None => return Err(ParseError::form_error("no TSIG record")),
    };

    for _ in 0..counts.qdcount() {
        Question::skip(&mut parser)?;
    }
    let records = u32::from(counts.ancount())
        + u32::from(counts.nscount())
        + u32::from(arcount);
    for _ in 0..records {
        RecordHeader::parse_and_skip(&mut parser)?;
    }

    let boundary = parser.pos();
    let mut res = BytesMut::from(&wire[..boundary]);
    HeaderCounts::for_message_slice_mut(res.as_mut()).set_arcount(arcount);
    trace!(
        boundary,
        received = wire.len(),
        arcount,
        "stripped TSIG record"
    );
    Ok(res.freeze())
}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;
    use crate::base::iana::{Class, Rtype, TsigRcode};
    use crate::base::message::Message;
    use crate::base::name::Dname;
    use crate::base::record::Record;
    use crate::rdata::{Time48, Tsig, A};
    use crate::tsig::Algorithm;
    use core::str::FromStr;

    fn name(s: &str) -> Dname {
        Dname::from_str(s).unwrap()
    }

    fn tsig_record() -> Record<Tsig> {
        Record::new(
            name("key.example"),
            Class::ANY,
            0,
            Tsig::new(
                Algorithm::Sha256.to_dname(),
                Time48::from_u64(1_600_000_000),
                300,
                Bytes::from_static(&[0xAB; 32]),
                0x1234,
                TsigRcode::NOERROR,
                Bytes::new(),
            )
            .unwrap(),
        )
    }

    fn message() -> Message {
        let mut msg = Message::query(name("example.com"), Rtype::A);
        msg.push_answer(Record::new(
            name("example.com"),
            Class::IN,
            3600,
            A::from_octets(192, 0, 2, 1),
        ));
        msg.push_additional(Record::new(
            name("ns.example.com"),
            Class::IN,
            3600,
            A::from_octets(192, 0, 2, 53),
        ));
        msg
    }

    #[test]
    fn strips_last_record() {
        let unsigned = message();
        let before = unsigned.to_wire().unwrap();
        let mut signed = unsigned.clone();
        signed.push_additional(tsig_record());
        let after = signed.to_wire().unwrap();
        assert_eq!(HeaderCounts::for_message_slice(&after).arcount(), 2);

        let prepared = prepare_wire(&after).unwrap();
        assert!(prepared.len() < after.len());
        assert_eq!(HeaderCounts::for_message_slice(&prepared).arcount(), 1);
        assert_eq!(prepared, before);
    }

    #[test]
    fn only_tsig() {
        let mut msg = Message::query(name("example.com"), Rtype::A);
        let before = msg.to_wire().unwrap();
        msg.push_additional(tsig_record());
        let prepared = prepare_wire(&msg.to_wire().unwrap()).unwrap();
        assert_eq!(HeaderCounts::for_message_slice(&prepared).arcount(), 0);
        assert_eq!(prepared, before);
    }

    #[test]
    fn compressed_names() {
        // Query for example.com A with an answer whose owner is a pointer
        // to the question name, followed by a fake last additional record.
        let wire = b"\x12\x34\x81\x80\0\x01\0\x01\0\0\0\x01\
                     \x07example\x03com\0\0\x01\0\x01\
                     \xc0\x0c\0\x01\0\x01\0\0\x0e\x10\0\x04\xc0\0\x02\x01\
                     \xc0\x0c\0\xfa\0\xff\0\0\0\0\0\x02\xab\xcd";
        let prepared = prepare_wire(wire).unwrap();
        assert_eq!(prepared.len(), wire.len() - 14);
        assert_eq!(&prepared[..10], &wire[..10]);
        assert_eq!(&prepared[10..12], b"\0\0");
        assert_eq!(&prepared[12..], &wire[12..wire.len() - 14]);
    }

    #[test]
    fn no_additional() {
        let wire = Message::query(name("example.com"), Rtype::A)
            .to_wire()
            .unwrap();
        assert_eq!(
            prepare_wire(&wire),
            Err(ParseError::form_error("no TSIG record"))
        );
    }

    #[test]
    fn truncated() {
        let mut msg = message();
        msg.push_additional(tsig_record());
        let wire = msg.to_wire().unwrap();
        assert!(prepare_wire(&wire[..20]).is_err());
        assert!(prepare_wire(&wire[..8]).is_err());
    }
}
