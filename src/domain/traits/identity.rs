/// Identity of the local user, supplied by the host application
///
/// The engine never works out who the user is on its own. Role checks are
/// advisory; the server remains the authority.
pub trait Identity: Send + Sync {
    fn current_user(&self) -> String;

    fn is_privileged(&self) -> bool;
}
