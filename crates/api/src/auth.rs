// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Actor identity for write operations.
//!
//! There is no credential check: the caller names itself, and the name is
//! only recorded in `created_by`/`updated_by`/`deleted_by`.

use karat_registry_domain::ActorId;

use crate::error::AuthError;

/// HTTP header carrying the actor identity.
pub const ACTOR_HEADER: &str = "x-actor-id";

/// Resolves the acting identity for a write.
///
/// # Arguments
///
/// * `raw` - The identity as supplied by the caller, if any
///
/// # Errors
///
/// Returns `AuthError::AuthenticationFailed` if the identity is absent or
/// blank.
pub fn authenticate_actor(raw: Option<&str>) -> Result<ActorId, AuthError> {
    let raw: &str = raw.ok_or_else(|| AuthError::AuthenticationFailed {
        reason: format!("Missing '{ACTOR_HEADER}' header"),
    })?;

    ActorId::parse(raw).map_err(|e| AuthError::AuthenticationFailed {
        reason: e.to_string(),
    })
}
