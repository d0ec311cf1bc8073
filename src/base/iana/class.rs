//! DNS CLASSes.

use super::FromStrError;

//------------ Class ---------------------------------------------------------

int_enum! {
    /// DNS CLASSes.
    ///
    /// The domain name space is partitioned into separate classes for different
    /// network types. That is, each class has its own separate record tree
    /// starting at the root. However, in practice, only the IN class is really
    /// relevant.
    ///
    /// In addition, there are query classes or QCLASSes that are used in
    /// questions or UPDATE queries, namely NONE and ANY (or *). TSIG records
    /// always use class ANY.
    ///
    /// See [RFC 1034] for the introduction of classes and
    /// the [DNS CLASSes IANA registry] for an overview of assigned values.
    ///
    /// [RFC 1034]: https://tools.ietf.org/html/rfc1034
    /// [DNS CLASSes IANA registry]: http://www.iana.org/assignments/dns-parameters/dns-parameters.xhtml#dns-parameters-2
    =>
    Class, u16;

    /// Internet (IN).
    (IN => 1, "IN")

    /// Chaosnet (CH).
    (CH => 3, "CH")

    /// Hesiod (HS).
    (HS => 4, "HS")

    /// Query class None.
    (NONE => 0xFE, "NONE")

    /// Query class * (ANY).
    (ANY => 0xFF, "ANY")
}

int_enum_str_with_prefix!(Class, "CLASS", u16);

//============ Tests =========================================================

#[cfg(test)]
mod test {
    use super::Class;
    use core::str::FromStr;

    #[test]
    fn from_str_and_display() {
        assert_eq!(Class::from_str("in").unwrap(), Class::IN);
        assert_eq!(Class::from_str("ANY").unwrap(), Class::ANY);
        assert_eq!(Class::from_str("CLASS255").unwrap(), Class::ANY);
        assert_eq!(Class::from_str("class17").unwrap(), Class::from_int(17));
        assert!(Class::from_str("CLASS").is_err());
        assert!(Class::from_str("foo").is_err());
        assert_eq!(format!("{}", Class::IN), "IN");
        assert_eq!(format!("{}", Class::from_int(17)), "CLASS17");
    }
}
