//! Outcome conversion for handler return values.

use crate::error::BoxError;

/// Trait for converting a handler's return value into a success or a fault.
///
/// # Default Implementations
///
/// - `()` → success
/// - `Result<T, E>` → delegates to `T` on `Ok`, faults with `E` on `Err`
/// - `Option<T>` → `None` is success
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not an `IntoOutcome`",
    label = "handlers must return `()` or `Result<(), E>`",
    note = "Return `()` for infallible handlers or `Result<(), E>` where `E: Into<BoxError>`."
)]
pub trait IntoOutcome {
    /// Convert the handler output into a success or a boxed error.
    fn into_outcome(self) -> Result<(), BoxError>;
}

impl IntoOutcome for () {
    fn into_outcome(self) -> Result<(), BoxError> {
        Ok(())
    }
}

impl<T, E> IntoOutcome for Result<T, E>
where
    T: IntoOutcome,
    E: Into<BoxError>,
{
    fn into_outcome(self) -> Result<(), BoxError> {
        match self {
            Ok(t) => t.into_outcome(),
            Err(e) => Err(e.into()),
        }
    }
}

impl<T: IntoOutcome> IntoOutcome for Option<T> {
    fn into_outcome(self) -> Result<(), BoxError> {
        match self {
            Some(t) => t.into_outcome(),
            None => Ok(()),
        }
    }
}
