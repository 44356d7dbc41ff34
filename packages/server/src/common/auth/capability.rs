/// Operations that require the admin session flag
///
/// There is a single operator role; every capability maps to "is admin".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminCapability {
    /// Read the full registration list
    ViewRegistrations,

    /// Approve or reject a registration
    ReviewRegistrations,
}
