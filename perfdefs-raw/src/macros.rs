//! Declarative macros that turn a counter name list into typed tables

/// Define a counter enum from a single list of names and ABI codes
///
/// Each entry maps a variant to its member name (as spelled in the perf
/// ABI, without prefix) and its numeric code. The category label is used
/// in error messages and the prefix is prepended by `full_name()`.
///
/// # Example
/// ```
/// use perfdefs_raw::counter_enum;
///
/// counter_enum! {
///     pub enum Flavor: ("flavor", "FLAVOR_") {
///         Sweet => ("SWEET", 0),
///         Sour => ("SOUR", 1),
///     }
/// }
///
/// let flavor = Flavor::Sour;
/// assert_eq!(flavor.name(), "SOUR");
/// assert_eq!(flavor.full_name(), "FLAVOR_SOUR");
/// assert_eq!(flavor.code(), 1);
/// assert_eq!(Flavor::from_name("flavor_sweet"), Some(Flavor::Sweet));
/// assert_eq!(Flavor::COUNT, 2);
/// assert!("bitter".parse::<Flavor>().is_err());
/// ```
///
/// Expands to:
/// - An enum with Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord derives
/// - `CATEGORY`, `PREFIX` and `COUNT` associated constants
/// - `name()`, `full_name()`, `code()`, `all()`, `from_name()`, `from_code()`
/// - `Display` (member name) and `FromStr` (via `from_name`)
#[macro_export]
macro_rules! counter_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident: ($category:literal, $prefix:literal) {
            $(
                $(#[$vmeta:meta])*
                $variant:ident => ($str:literal, $code:expr)
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        $vis enum $name {
            $($(#[$vmeta])* $variant,)*
        }

        impl $name {
            pub const CATEGORY: &'static str = $category;
            pub const PREFIX: &'static str = $prefix;
            pub const COUNT: usize = [$($str),*].len();

            pub fn name(&self) -> &'static str {
                match self {
                    $($name::$variant => $str,)*
                }
            }

            pub fn full_name(&self) -> &'static str {
                match self {
                    $($name::$variant => concat!($prefix, $str),)*
                }
            }

            pub fn code(&self) -> u64 {
                match self {
                    $($name::$variant => $code,)*
                }
            }

            pub fn all() -> Vec<$name> {
                vec![$($name::$variant,)*]
            }

            /// Case-insensitive lookup by bare or prefixed name
            pub fn from_name(name: &str) -> Option<$name> {
                let name = name.trim();
                Self::all().into_iter().find(|v| {
                    v.name().eq_ignore_ascii_case(name) || v.full_name().eq_ignore_ascii_case(name)
                })
            }

            pub fn from_code(code: u64) -> Option<$name> {
                Self::all().into_iter().find(|v| v.code() == code)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.name())
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::error::RawError;

            fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
                Self::from_name(s).ok_or_else(|| $crate::error::RawError::UnknownName {
                    category: $category,
                    name: s.to_string(),
                })
            }
        }

        impl TryFrom<u64> for $name {
            type Error = $crate::error::RawError;

            fn try_from(code: u64) -> std::result::Result<Self, Self::Error> {
                Self::from_code(code).ok_or($crate::error::RawError::UnknownCode {
                    category: $category,
                    code,
                })
            }
        }
    };
}
