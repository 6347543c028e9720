use kernel::id::Id;

pub struct UserMarker;

/// Opaque, stable identifier of a user record
pub type UserId = Id<UserMarker>;
