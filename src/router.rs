use std::collections::HashMap;

use crate::{
    error::RoutingError,
    models::{DestinationId, Role},
};

/// RoleDestinationMap
///
/// Immutable `Role -> DestinationId` table with exactly one entry per role. Coverage is
/// checked when the table is built, so a lookup by a typed `Role` can never miss.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleDestinationMap {
    student: DestinationId,
    lecturer: DestinationId,
    admin: DestinationId,
}

impl RoleDestinationMap {
    /// Builds a table from `(role, destination)` pairs. Later pairs for the same role
    /// replace earlier ones. Fails if any role is left without a destination.
    pub fn new<I>(pairs: I) -> Result<Self, RoutingError>
    where
        I: IntoIterator<Item = (Role, DestinationId)>,
    {
        let mut entries: HashMap<Role, DestinationId> = pairs.into_iter().collect();
        let mut take = |role: Role| {
            entries
                .remove(&role)
                .ok_or(RoutingError::MissingDestination(role))
        };

        Ok(Self {
            student: take(Role::Student)?,
            lecturer: take(Role::Lecturer)?,
            admin: take(Role::Admin)?,
        })
    }

    pub fn get(&self, role: Role) -> &DestinationId {
        match role {
            Role::Student => &self.student,
            Role::Lecturer => &self.lecturer,
            Role::Admin => &self.admin,
        }
    }
}

impl Default for RoleDestinationMap {
    fn default() -> Self {
        Self {
            student: DestinationId::new("student-dashboard"),
            lecturer: DestinationId::new("lecturer-dashboard"),
            admin: DestinationId::new("admin-dashboard"),
        }
    }
}

/// RoleRouter
///
/// Resolves where an authenticated user should land. Holds no mutable state and can be
/// shared freely across concurrent logins.
#[derive(Debug, Clone, Default)]
pub struct RoleRouter {
    destinations: RoleDestinationMap,
}

impl RoleRouter {
    pub fn new(destinations: RoleDestinationMap) -> Self {
        Self { destinations }
    }

    /// resolve_destination
    ///
    /// Looks up a role given by name, as a collaborator would report it. A name outside
    /// the closed role set is a contract violation by that collaborator.
    pub fn resolve_destination(&self, role_name: &str) -> Result<DestinationId, RoutingError> {
        Role::from_name(role_name)
            .map(|role| self.destination_for(role).clone())
            .ok_or_else(|| RoutingError::UnknownRole(role_name.to_string()))
    }

    pub fn destination_for(&self, role: Role) -> &DestinationId {
        self.destinations.get(role)
    }
}
