//! Result of an operation that the operator may abort.

/// Either a completed value or an operator cancellation.
///
/// Cancellation is not an error: it is carried next to the `Ok` side of a
/// `Result` so every layer can tell it apart from both success and failure.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub enum Outcome<T> {
    Done(T),
    Cancelled,
}

impl<T> Outcome<T> {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Outcome::Cancelled)
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        match self {
            Outcome::Done(v) => Outcome::Done(f(v)),
            Outcome::Cancelled => Outcome::Cancelled,
        }
    }

    /// Convert into an `Option`, dropping the cancellation marker.
    pub fn done(self) -> Option<T> {
        match self {
            Outcome::Done(v) => Some(v),
            Outcome::Cancelled => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn map_keeps_cancellation() {
        let out: Outcome<u32> = Outcome::Cancelled;
        assert!(out.map(|v| v + 1).is_cancelled());
        assert_eq!(Outcome::Done(1).map(|v| v + 1), Outcome::Done(2));
    }
}
