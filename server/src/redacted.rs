use std::{
    fmt::{Debug, Display},
    str::FromStr,
};

/// Wrapper that keeps secrets (the SMTP password) out of `Debug`/`Display`
/// output and therefore out of logs.
#[derive(Clone)]
pub struct Redacted<T>(T);

impl<T: Clone> Redacted<T> {
    pub fn reveal(&self) -> T {
        self.0.clone()
    }
}

impl<T> From<T> for Redacted<T> {
    fn from(value: T) -> Self {
        Self(value)
    }
}

impl<T: FromStr> FromStr for Redacted<T> {
    type Err = T::Err;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        T::from_str(s).map(Self)
    }
}

impl<T> Debug for Redacted<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", redacted::<T>())
    }
}

impl<T> Display for Redacted<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", redacted::<T>())
    }
}

fn redacted<T>() -> String {
    format!("<REDACTED {}>", std::any::type_name::<T>())
}
