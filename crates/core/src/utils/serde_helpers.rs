//! Serde helpers for lenient enum names in config files

/// Normalize an enum name for comparison: lowercase, `_` read as `-`
pub fn normalize_variant_name(name: &str) -> String {
    name.trim().to_lowercase().replace('_', "-")
}

/// Implement `Deserialize` for a fieldless enum, matching names without
/// regard to case or to `-`/`_`
///
/// Usage:
/// ```ignore
/// impl_case_insensitive_deserialize!(
///     Operation,
///     Enhance => "enhance",
///     EnhanceCheck => "enhance-check"
/// );
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
                let key = $crate::utils::serde_helpers::normalize_variant_name(&s);
                $(
                    if key == $crate::utils::serde_helpers::normalize_variant_name($str_val) {
                        return Ok(Self::$variant);
                    }
                )+
                Err(serde::de::Error::custom(format!(
                    "unknown variant '{}', expected one of: {}",
                    s,
                    [$($str_val),+].join(", ")
                )))
            }
        }
    };
}
