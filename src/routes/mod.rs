/// Router Module Index
///
/// Every endpoint of this service is reachable without a session: logging in is what
/// establishes one, and that session is owned by the client.

/// Routes accessible to all clients (login, role inference, health).
pub mod public;
