//! The validation finding taxonomy.

/// Labels a [`super::Finding`] as one of the validator's errors or
/// warnings. Errors and warnings share one enum since both are
/// carried by the same `Finding` type; [`Category::is_error`] is the
/// only thing that distinguishes severity at the type level. Callers
/// that already hold a `Finding` from `ValidationResult::errors` vs.
/// `::warnings` don't need it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    UnknownDataName,
    TypeError,
    RangeError,
    EnumerationError,
    MissingMandatory,
    UnknownItem,
    DeprecatedAlias,
    CaseMismatch,
    DictionaryConflict,
}

impl Category {
    pub fn is_error(&self) -> bool {
        matches!(
            self,
            Category::UnknownDataName
                | Category::TypeError
                | Category::RangeError
                | Category::EnumerationError
                | Category::MissingMandatory
        )
    }
}
