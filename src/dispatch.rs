use std::{collections::HashMap, sync::Arc};

use crate::{
    error::DispatchError,
    models::{AuthenticatedIdentity, DestinationId, LoginOutcome},
};

/// AcceptsIdentity
///
/// Implemented by every destination that needs to know who just signed in (dashboards,
/// report browsers, ...). The dispatcher calls it the same way for all of them.
pub trait AcceptsIdentity: Send + Sync {
    fn accept_identity(&self, identity: &AuthenticatedIdentity);
}

/// ViewDispatcher
///
/// Destination-side registry: maps each `DestinationId` to the collaborator that should
/// receive the identity. Built once at startup and read-only afterwards.
#[derive(Default, Clone)]
pub struct ViewDispatcher {
    views: HashMap<DestinationId, Arc<dyn AcceptsIdentity>>,
}

impl ViewDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(mut self, destination: DestinationId, view: Arc<dyn AcceptsIdentity>) -> Self {
        self.views.insert(destination, view);
        self
    }

    /// dispatch
    ///
    /// Hands the identity from a successful login to the view registered for its
    /// destination.
    pub fn dispatch(&self, outcome: &LoginOutcome) -> Result<(), DispatchError> {
        let view = self
            .views
            .get(&outcome.destination)
            .ok_or_else(|| DispatchError::UnregisteredDestination(outcome.destination.clone()))?;

        tracing::debug!(destination = %outcome.destination, "handing identity to destination");
        view.accept_identity(&outcome.identity);
        Ok(())
    }
}
