//! Capability introspection.
//!
//! Composition instead of a base class: [`supports`] answers for the
//! introspection capability itself, and every implementor ORs it with a check
//! for its own identifier.

use sec_proto::{IERC165_ID, InterfaceId};

/// "Does this component support capability `id`?"
pub trait Introspection {
    /// Must be pure and must return false for [`InterfaceId::INVALID`].
    fn supports_interface(&self, id: InterfaceId) -> bool;
}

/// Default answer shared by every implementor.
pub fn supports(id: InterfaceId) -> bool {
    id == IERC165_ID
}
