//! Macros for use in rdata definitions.
//!
//! These macros are not public but are used by the super module only. They
//! are here so that `mod.rs` doesn’t become too unwieldly.

macro_rules! rdata_types {
    ( $(
        $module:ident::{ $( $rtype:ident, )* }
    )* ) => {
        $(
            pub use self::$module::{ $( $rtype, )* };
        )*

        //------------- AllRecordData ----------------------------------------

        /// Record data for all record types.
        ///
        /// This enum collects the record data types for all currently
        /// implemented record types. Any other record type is kept as
        /// [`UnknownRecordData`] in the `Other` variant.
        ///
        /// [`UnknownRecordData`]: crate::base::rdata::UnknownRecordData
        #[derive(Clone, Eq, PartialEq)]
        #[non_exhaustive]
        pub enum AllRecordData {
            $( $(
                $rtype($rtype),
            )* )*
            Other($crate::base::rdata::UnknownRecordData),
        }

        //--- From

        $( $(
            impl From<$rtype> for AllRecordData {
                fn from(value: $rtype) -> Self {
                    AllRecordData::$rtype(value)
                }
            }
        )* )*

        impl From<$crate::base::rdata::UnknownRecordData> for AllRecordData {
            fn from(value: $crate::base::rdata::UnknownRecordData) -> Self {
                AllRecordData::Other(value)
            }
        }

        //--- Compose, RecordData, and ParseRecordData

        impl $crate::base::wire::Compose for AllRecordData {
            fn compose_len(&self) -> usize {
                match *self {
                    $( $(
                        AllRecordData::$rtype(ref inner) => {
                            $crate::base::wire::Compose::compose_len(inner)
                        }
                    )* )*
                    AllRecordData::Other(ref inner) => {
                        $crate::base::wire::Compose::compose_len(inner)
                    }
                }
            }

            fn compose(&self, target: &mut bytes::BytesMut) {
                match *self {
                    $( $(
                        AllRecordData::$rtype(ref inner) => {
                            $crate::base::wire::Compose::compose(inner, target)
                        }
                    )* )*
                    AllRecordData::Other(ref inner) => {
                        $crate::base::wire::Compose::compose(inner, target)
                    }
                }
            }
        }

        impl $crate::base::rdata::RecordData for AllRecordData {
            fn rtype(&self) -> $crate::base::iana::Rtype {
                match *self {
                    $( $(
                        AllRecordData::$rtype(ref inner) => {
                            $crate::base::rdata::RecordData::rtype(inner)
                        }
                    )* )*
                    AllRecordData::Other(ref inner) => inner.rtype(),
                }
            }
        }

        impl $crate::base::rdata::ParseRecordData for AllRecordData {
            fn parse_rdata(
                rtype: $crate::base::iana::Rtype,
                parser: &mut octseq::parse::Parser<'_, [u8]>,
            ) -> Result<Option<Self>, $crate::base::wire::ParseError> {
                $( $(
                    if let Some(data) = <
                        $rtype as $crate::base::rdata::ParseRecordData
                    >::parse_rdata(rtype, parser)? {
                        return Ok(Some(AllRecordData::$rtype(data)))
                    }
                )* )*
                <
                    $crate::base::rdata::UnknownRecordData
                    as $crate::base::rdata::ParseRecordData
                >::parse_rdata(
                    rtype, parser
                ).map(|res| res.map(AllRecordData::Other))
            }
        }

        //--- Display and Debug

        impl core::fmt::Display for AllRecordData {
            fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
                match *self {
                    $( $(
                        AllRecordData::$rtype(ref inner) => {
                            core::fmt::Display::fmt(inner, f)
                        }
                    )* )*
                    AllRecordData::Other(ref inner) => {
                        core::fmt::Display::fmt(inner, f)
                    }
                }
            }
        }

        impl core::fmt::Debug for AllRecordData {
            fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
                match *self {
                    $( $(
                        AllRecordData::$rtype(ref inner) => {
                            f.write_str(
                                concat!(
                                    "AllRecordData::",
                                    stringify!($rtype),
                                    "("
                                )
                            )?;
                            core::fmt::Debug::fmt(inner, f)?;
                            f.write_str(")")
                        }
                    )* )*
                    AllRecordData::Other(ref inner) => {
                        f.write_str("AllRecordData::Unknown(")?;
                        core::fmt::Debug::fmt(inner, f)?;
                        f.write_str(")")
                    }
                }
            }
        }
    }
}
