use crate::Error;

macro_rules! declare_countries {
    ($($code: ident: $str_code: literal $name: literal $val:literal),* $(,)?) => {
        /// Two-letter country codes as specified by ISO 3166-1 alpha-2.
        #[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
        #[repr(u16)]
        pub enum Country {$(
            #[doc = $name]
            $code = $val
        ),*}

        impl Country {
            const CODES: &'static [&'static str] = &[$(
                $str_code
            ),*];
            const NAMES: &'static [&'static str] = &[$(
                $name
            ),*];

            pub const ALL: &'static [Country] = &[$(
                Country::$code
            ),*];
        }

        impl std::str::FromStr for Country {
            type Err = Error;

            /// Country codes are matched case-insensitively.
            fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
                Ok(match s.to_ascii_lowercase().as_str() {
                    $(
                        $str_code => Country::$code,
                    )*
                    _ => return Err(Error::CountryNotAvailable),
                })
            }
        }
    };
}

declare_countries![
    AU: "au" "Australia" 0,
    JP: "jp" "Japan" 1,
    KR: "kr" "South Korea" 2,
    SG: "sg" "Singapore" 3,
    TW: "tw" "Taiwan" 4,
    US: "us" "United States" 5,
];

impl Country {
    // Returns a long name
    pub fn name(&self) -> &'static str {
        unsafe {
            // SAFETY: Name lookup table is of identical size as country enum
            // value count
            Self::NAMES.get_unchecked(*self as usize)
        }
    }
}

impl std::fmt::Display for Country {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_ref())
    }
}

impl AsRef<str> for Country {
    fn as_ref(&self) -> &str {
        unsafe {
            // SAFETY: Code lookup table is of identical size as country enum
            // value count
            Self::CODES.get_unchecked(*self as usize)
        }
    }
}
