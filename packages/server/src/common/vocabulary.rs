//! String-backed enums.
//!
//! Every status column in the portal stores a fixed vocabulary. `text_enum!`
//! declares the enum once and derives the string mapping used for JSON, SQL
//! columns and URL path segments from that single table, so `"not paid"` can
//! only ever parse as a welfare status and `"not_paid"` only as a loan or
//! contribution status.

use thiserror::Error;

/// A string that is not part of an enum's vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid {kind}: {value:?}")]
pub struct ParseEnumError {
    pub kind: &'static str,
    pub value: String,
}

macro_rules! text_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident as $kind:literal {
            $(
                $(#[$vmeta:meta])*
                $variant:ident => ($text:literal, $label:literal)
            ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis enum $name {
            $(
                $(#[$vmeta])*
                $variant,
            )+
        }

        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Stored / wire representation.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $text,)+
                }
            }

            /// Human-readable label.
            pub fn label(&self) -> &'static str {
                match self {
                    $($name::$variant => $label,)+
                }
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl ::std::str::FromStr for $name {
            type Err = $crate::common::vocabulary::ParseEnumError;

            fn from_str(s: &str) -> ::std::result::Result<Self, Self::Err> {
                match s {
                    $($text => Ok($name::$variant),)+
                    _ => Err($crate::common::vocabulary::ParseEnumError {
                        kind: $kind,
                        value: s.to_string(),
                    }),
                }
            }
        }

        impl ::serde::Serialize for $name {
            fn serialize<S: ::serde::Serializer>(
                &self,
                serializer: S,
            ) -> ::std::result::Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> ::serde::Deserialize<'de> for $name {
            fn deserialize<D: ::serde::Deserializer<'de>>(
                deserializer: D,
            ) -> ::std::result::Result<Self, D::Error> {
                let raw = <String as ::serde::Deserialize>::deserialize(deserializer)?;
                raw.parse().map_err(::serde::de::Error::custom)
            }
        }

        impl ::sqlx::Type<::sqlx::Postgres> for $name {
            fn type_info() -> ::sqlx::postgres::PgTypeInfo {
                <String as ::sqlx::Type<::sqlx::Postgres>>::type_info()
            }

            fn compatible(ty: &::sqlx::postgres::PgTypeInfo) -> bool {
                <String as ::sqlx::Type<::sqlx::Postgres>>::compatible(ty)
            }
        }

        impl<'q> ::sqlx::Encode<'q, ::sqlx::Postgres> for $name {
            fn encode_by_ref(
                &self,
                buf: &mut ::sqlx::postgres::PgArgumentBuffer,
            ) -> ::std::result::Result<::sqlx::encode::IsNull, ::sqlx::error::BoxDynError> {
                <&str as ::sqlx::Encode<'q, ::sqlx::Postgres>>::encode_by_ref(&self.as_str(), buf)
            }
        }

        impl<'r> ::sqlx::Decode<'r, ::sqlx::Postgres> for $name {
            fn decode(
                value: ::sqlx::postgres::PgValueRef<'r>,
            ) -> ::std::result::Result<Self, ::sqlx::error::BoxDynError> {
                let raw = <&str as ::sqlx::Decode<'r, ::sqlx::Postgres>>::decode(value)?;
                Ok(raw.parse::<$name>()?)
            }
        }
    };
}

pub(crate) use text_enum;

/// Upper-cases the first character and lower-cases the rest ("not paid" -> "Not paid").
pub fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    text_enum! {
        enum Shade as "shade" {
            Light => ("light", "Light"),
            PitchBlack => ("pitch black", "Pitch Black"),
        }
    }

    #[test]
    fn test_parse_uses_exact_vocabulary() {
        assert_eq!("pitch black".parse::<Shade>().unwrap(), Shade::PitchBlack);
        let err = "pitch_black".parse::<Shade>().unwrap_err();
        assert_eq!(err.kind, "shade");
        assert_eq!(err.value, "pitch_black");
    }

    #[test]
    fn test_serde_uses_stored_form() {
        assert_eq!(
            serde_json::to_string(&Shade::PitchBlack).unwrap(),
            "\"pitch black\""
        );
        assert!(serde_json::from_str::<Shade>("\"Light\"").is_err());
    }

    #[test]
    fn test_all_lists_every_variant() {
        assert_eq!(Shade::ALL, &[Shade::Light, Shade::PitchBlack]);
        assert_eq!(Shade::Light.label(), "Light");
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("not paid"), "Not paid");
        assert_eq!(capitalize("APPROVED"), "Approved");
        assert_eq!(capitalize(""), "");
    }
}
