use crate::set::Backend;

/// Errors raised by set construction and set algebra.
///
/// Expected outcomes such as inserting a duplicate, removing an absent key
/// or inserting into a full array are not errors; those operations report
/// them through their `bool` result instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A backend tag other than `0` (tree) or `1` (array).
    #[error("unknown backend tag {0}, expected 0 (tree) or 1 (array)")]
    UnknownBackend(i64),
    /// Union or intersection was requested for sets of different backends.
    #[error("cannot combine sets of different backends ({lhs} and {rhs})")]
    BackendMismatch { lhs: Backend, rhs: Backend },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
