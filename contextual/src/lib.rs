//! Attach a short human readable context string to a typed source error.
//!
//! Unlike `anyhow::Context` the source error type is preserved, so callers
//! can still match on it (and `thiserror` enums can `#[from]` it).

use std::fmt::{Debug, Display};

pub struct Error<E> {
    pub context: String,
    pub source: E,
}

pub trait Context<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T, Error<E>>;
}

impl<T, E> Context<T, E> for Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T, Error<E>> {
        self.map_err(|source| Error {
            context: context.into(),
            source,
        })
    }
}

impl<E: Display> Display for Error<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} :: {}", self.context, self.source)
    }
}

impl<E: Debug> Debug for Error<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} :: {:?}", self.context, self.source)
    }
}

impl<E> std::error::Error for Error<E>
where
    E: std::error::Error + 'static,
{
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preserves_source_and_prepends_context() {
        let res: Result<(), std::num::ParseIntError> = "nope".parse::<i64>().map(|_| ());
        let err = res.context("parse code").unwrap_err();
        assert!(err.to_string().starts_with("parse code :: "));
        let _typed: &std::num::ParseIntError = &err.source;
    }
}
