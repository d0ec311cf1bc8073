//! Resource Record (RR) TYPEs

use super::FromStrError;

//------------ Rtype ---------------------------------------------------------

int_enum! {
    /// Resource Record Types.
    ///
    /// Each resource records has a 16 bit type value indicating what kind of
    /// information is represented by the record. Normal query includes the
    /// type of record information is requested for.
    ///
    /// Only the types this crate actually deals with have constants. All
    /// other values are still accepted and shown in the generic `TYPEnnn`
    /// form.
    ///
    /// See the [DNS parameters IANA registry] for an overview of assigned
    /// values.
    ///
    /// [DNS parameters IANA registry]: http://www.iana.org/assignments/dns-parameters/dns-parameters.xhtml#dns-parameters-4
    =>
    Rtype, u16;

    /// A host address.
    (A => 1, "A")

    /// An authoritative name server.
    (NS => 2, "NS")

    /// The canonical name for an alias.
    (CNAME => 5, "CNAME")

    /// Marks the start of a zone of authority.
    (SOA => 6, "SOA")

    /// Mail exchange.
    (MX => 15, "MX")

    /// Text strings.
    (TXT => 16, "TXT")

    /// IPv6 address.
    (AAAA => 28, "AAAA")

    /// Option.
    (OPT => 41, "OPT")

    /// Transaction signature.
    ///
    /// See [RFC 2845].
    ///
    /// [RFC 2845]: https://tools.ietf.org/html/rfc2845
    (TSIG => 250, "TSIG")

    /// Incremental transfer.
    (IXFR => 251, "IXFR")

    /// Transfer of entire zone.
    (AXFR => 252, "AXFR")

    /// A request for all records the server/cache has available.
    (ANY => 255, "ANY")
}

int_enum_str_with_prefix!(Rtype, "TYPE", u16);

//============ Tests =========================================================

#[cfg(test)]
mod test {
    use super::Rtype;
    use core::str::FromStr;

    #[test]
    fn mnemonics() {
        assert_eq!(Rtype::from_str("tsig").unwrap(), Rtype::TSIG);
        assert_eq!(Rtype::from_str("TYPE28").unwrap(), Rtype::AAAA);
        assert_eq!(format!("{}", Rtype::from_int(65)), "TYPE65");
        assert_eq!(format!("{:?}", Rtype::A), "Rtype::A");
    }
}
