//! DNS response codes and extended response codes.

use super::FromStrError;

//------------ Rcode --------------------------------------------------------

int_enum! {
    /// DNS Response Codes.
    ///
    /// The response code of a response indicates what happend on the server
    /// when trying to answer the query. The code is a 4 bit value and part
    /// of the header of a DNS message.
    ///
    /// See [RFC 1035] for the definition and the [IANA registry] for the
    /// assigned values.
    ///
    /// [RFC 1035]: https://tools.ietf.org/html/rfc1035
    /// [IANA registry]: http://www.iana.org/assignments/dns-parameters/dns-parameters.xhtml#dns-parameters-6
    =>
    Rcode, u8;

    /// No error condition.
    (NOERROR => 0, "NOERROR")

    /// Format error.
    (FORMERR => 1, "FORMERR")

    /// Server failure.
    (SERVFAIL => 2, "SERVFAIL")

    /// Name error.
    (NXDOMAIN => 3, "NXDOMAIN")

    /// Not implemented.
    (NOTIMP => 4, "NOTIMP")

    /// Query refused.
    (REFUSED => 5, "REFUSED")

    /// Server not authoritative for zone or client not authorized.
    ///
    /// This is also the response code used with TSIG errors.
    (NOTAUTH => 9, "NOTAUTH")
}

int_enum_str_decimal!(Rcode, u8);

//------------ TsigRcode ----------------------------------------------------

int_enum! {
    /// Response codes for transaction authentication (TSIG).
    ///
    /// TSIG and TKEY resource records contain a 16 bit wide error field whose
    /// values are an extension of the standard DNS [`Rcode`]. While it was
    /// intended to also share the same space with the extended response
    /// codes used by EDNS (see [`Rcode`]), both used the value 16. To allow
    /// distinguish between the two uses of this value, we have two separate
    /// types.
    ///
    /// The values for this type are defined in the [IANA registry].
    ///
    /// [IANA registry]: http://www.iana.org/assignments/dns-parameters/dns-parameters.xhtml#dns-parameters-6
    =>
    TsigRcode, u16;

    /// No error condition.
    (NOERROR => 0, "NOERROR")

    /// Format error.
    (FORMERR => 1, "FORMERR")

    /// Server failure.
    (SERVFAIL => 2, "SERVFAIL")

    /// Name error.
    (NXDOMAIN => 3, "NXDOMAIN")

    /// Not implemented.
    (NOTIMP => 4, "NOTIMP")

    /// Query refused.
    (REFUSED => 5, "REFUSED")

    /// Server not authoritative for zone.
    (NOTAUTH => 9, "NOTAUTH")

    /// TSIG signature failure.
    (BADSIG => 16, "BADSIG")

    /// Key not recognized.
    (BADKEY => 17, "BADKEY")

    /// Signature out of time window.
    (BADTIME => 18, "BADTIME")

    /// Bad truncation.
    (BADTRUNC => 22, "BADTRUNC")
}

int_enum_str_decimal!(TsigRcode, u16);

//============ Tests =========================================================

#[cfg(test)]
mod test {
    use super::{Rcode, TsigRcode};

    #[test]
    fn display() {
        assert_eq!(format!("{}", TsigRcode::BADSIG), "BADSIG");
        assert_eq!(format!("{}", TsigRcode::from_int(1000)), "1000");
        assert_eq!(format!("{}", Rcode::NOTAUTH), "NOTAUTH");
        assert_eq!("badkey".parse::<TsigRcode>().unwrap(), TsigRcode::BADKEY);
    }
}
