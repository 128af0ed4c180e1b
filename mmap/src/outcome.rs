use layout::Tally;

use crate::{error::Error, msg::Msg};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Found(usize),
    Empty,
    Degraded,
}

/// Result of one best-effort extraction step.
///
/// The value is always usable; `issues` records what went wrong on the way,
/// so a missing binary and a binary with no symbols can be told apart.
#[derive(Debug)]
pub struct Outcome<T> {
    pub value: T,
    pub issues: Vec<Error>,
}

impl<T: Tally> Outcome<T> {
    pub fn found(value: T) -> Self {
        Outcome {
            value,
            issues: vec![],
        }
    }

    pub fn degraded(value: T, issue: Error) -> Self {
        Outcome {
            value,
            issues: vec![issue],
        }
    }

    pub fn status(&self) -> Status {
        if !self.issues.is_empty() {
            Status::Degraded
        } else if self.value.is_blank() {
            Status::Empty
        } else {
            Status::Found(self.value.tally())
        }
    }

    /// Print one diagnostic per issue.
    pub fn report(&self) {
        for issue in &self.issues {
            Msg::from(issue).print();
        }
    }
}

impl<T: Tally + Default> Outcome<T> {
    pub fn failed(issue: Error) -> Self {
        Outcome::degraded(T::default(), issue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use layout::SymbolTable;

    #[test]
    fn status_separates_empty_from_degraded() {
        let empty = Outcome::found(SymbolTable::new());
        assert_eq!(empty.status(), Status::Empty);

        let missing: Outcome<SymbolTable> =
            Outcome::failed(Error::MissingInput("kernel.elf".to_string()));
        assert_eq!(missing.status(), Status::Degraded);
        assert!(missing.value.is_empty());

        let found = Outcome::found(SymbolTable::parse("10 T a\n20 T b\n"));
        assert_eq!(found.status(), Status::Found(2));
    }
}
