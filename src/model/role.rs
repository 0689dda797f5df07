/// Capability carried by the signed-in profile.
///
/// The profile store only distinguishes HR from everybody else.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Role {
    Employee,
    Hr,
}

impl Role {
    pub fn from_claim(role: &str) -> Self {
        if role.trim().eq_ignore_ascii_case("hr") {
            Role::Hr
        } else {
            Role::Employee
        }
    }

    /// HR can approve leave, mark attendance and see anyone's calendar.
    pub fn can_approve(&self) -> bool {
        matches!(self, Role::Hr)
    }
}
