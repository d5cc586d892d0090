//! The [`Entity`] trait ties a persisted row type to its id, its insert
//! payload and its partial-update patch.

use std::fmt::{Debug, Display};

pub trait Entity: Clone + Debug + Send + Sync + 'static {
    type Id: Copy + Ord + Debug + Display + From<i32> + Into<i32> + Send + Sync + 'static;
    /// Validated payload for an insert.
    type New: Debug + Send + 'static;
    /// Partial update; `None` fields are left untouched.
    type Patch: Debug + Send + 'static;

    /// Human-readable entity name used in error messages.
    const NAME: &'static str;
    /// Backing table.
    const TABLE: &'static str;

    fn id(&self) -> Self::Id;

    /// Builds the row a store would return after inserting `new` under `id`.
    fn from_new(id: Self::Id, new: Self::New) -> Self;

    /// Overwrites the fields present in `patch`.
    fn apply(&mut self, patch: Self::Patch);
}

/// Assigns `value` to `target` when present.
#[inline]
pub(crate) fn set<T>(target: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *target = value;
    }
}

/// Same as [`set`] for nullable columns: a present value always becomes `Some`.
#[inline]
pub(crate) fn set_opt<T>(target: &mut Option<T>, value: Option<T>) {
    if value.is_some() {
        *target = value;
    }
}
