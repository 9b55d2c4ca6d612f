//! Serde helpers for the tag enums that appear in config files

/// Implement `Deserialize` for a unit-only enum, accepting its names in any
/// case and with `-` in place of `_`.
///
/// Usage:
/// ```
/// # use filekind_core::impl_case_insensitive_deserialize;
/// #[derive(Debug, PartialEq)]
/// enum Mode {
///     Fast,
///     VerySlow,
/// }
///
/// impl_case_insensitive_deserialize!(
///     Mode,
///     Fast => "fast",
///     VerySlow => "very_slow"
/// );
///
/// let mode: Mode = serde_json::from_str(r#""Very-Slow""#).unwrap();
/// assert_eq!(mode, Mode::VerySlow);
/// ```
#[macro_export]
macro_rules! impl_case_insensitive_deserialize {
    ($enum_type:ty, $($variant:ident => $str_val:expr),+ $(,)?) => {
        impl<'de> serde::Deserialize<'de> for $enum_type {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let s = String::deserialize(deserializer)?;
                let normalized = s.trim().to_lowercase().replace('-', "_");
                match normalized.as_str() {
                    $(
                        $str_val => Ok(Self::$variant),
                    )+
                    _ => Err(serde::de::Error::custom(format!(
                        "unknown variant '{}', expected one of: {}",
                        s,
                        [$($str_val),+].join(", ")
                    ))),
                }
            }
        }
    };
}
