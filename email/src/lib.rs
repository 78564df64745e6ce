use std::{fmt::Display, ops::Deref, str::FromStr};

/// An email address, validated on construction.
///
/// Wraps [`lettre::Address`] so anything holding an `Email` can be handed to
/// the mail transport without re-parsing.
#[derive(Debug, Clone, PartialEq)]
pub struct Email(lettre::Address);

pub const PARSE_ERROR_MSG: &str = "expected valid email format as specified by the HTML5 Specification https://html.spec.whatwg.org/multipage/input.html#valid-e-mail-address";

impl TryFrom<String> for Email {
    type Error = &'static str;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl FromStr for Email {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<lettre::Address>()
            .map(Email)
            .map_err(|_| PARSE_ERROR_MSG)
    }
}

impl Deref for Email {
    type Target = lettre::Address;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<lettre::Address> for Email {
    fn from(value: lettre::Address) -> Self {
        Self(value)
    }
}

impl From<Email> for lettre::Address {
    fn from(value: Email) -> Self {
        value.0
    }
}

impl Display for Email {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(feature = "sqlite")]
impl sqlx::Type<sqlx::Sqlite> for Email {
    fn type_info() -> <sqlx::Sqlite as sqlx::Database>::TypeInfo {
        <String as sqlx::Type<sqlx::Sqlite>>::type_info()
    }
}

#[cfg(feature = "sqlite")]
impl sqlx::Encode<'_, sqlx::Sqlite> for Email {
    fn encode_by_ref(
        &self,
        buf: &mut <sqlx::Sqlite as sqlx::Database>::ArgumentBuffer<'_>,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <String as sqlx::Encode<sqlx::Sqlite>>::encode_by_ref(&self.0.to_string(), buf)
    }
}
