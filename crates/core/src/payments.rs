//! Payment method resolution and ordering.
//!
//! Which methods actually appear on a rendered checkout is the
//! intersection of the checkout's stored method list and the tenant's
//! gateway flags, evaluated at render time. Flags are always an explicit
//! argument - there is no ambient settings global.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{GatewayFlags, PaymentMethod};

/// Errors from mutating a checkout's method list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MethodError {
    /// The tenant has not enabled this gateway, so it cannot be added.
    #[error("the {0} gateway is disabled for this store")]
    GatewayDisabled(PaymentMethod),
    /// The method is already on the checkout.
    #[error("{0} is already enabled on this checkout")]
    AlreadyPresent(PaymentMethod),
}

/// Direction for an adjacent-neighbor reorder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveDirection {
    Up,
    Down,
}

/// The ordered subset of `stored` methods that may actually be offered.
///
/// Preserves the checkout's stored order; the first entry is the default
/// selection. An empty result is a terminal "no payment methods
/// available" state the renderer must surface, never silently render past.
#[must_use]
pub fn resolve_offerable(stored: &[PaymentMethod], flags: &GatewayFlags) -> Vec<PaymentMethod> {
    stored
        .iter()
        .copied()
        .filter(|method| flags.enabled(*method))
        .collect()
}

/// Add `method` to the list, refusing globally disabled gateways.
///
/// The filter applies at add time only: disabling a gateway globally later
/// does not remove stored entries, it only shrinks the resolved list.
///
/// # Errors
///
/// Rejects methods whose gateway is globally disabled, and duplicates.
pub fn add_method(
    stored: &mut Vec<PaymentMethod>,
    method: PaymentMethod,
    flags: &GatewayFlags,
) -> Result<(), MethodError> {
    if !flags.enabled(method) {
        return Err(MethodError::GatewayDisabled(method));
    }
    if stored.contains(&method) {
        return Err(MethodError::AlreadyPresent(method));
    }
    stored.push(method);
    Ok(())
}

/// Remove `method` from the list; returns whether it was present.
pub fn remove_method(stored: &mut Vec<PaymentMethod>, method: PaymentMethod) -> bool {
    let before = stored.len();
    stored.retain(|candidate| *candidate != method);
    stored.len() != before
}

/// Swap `method` with its adjacent neighbor.
///
/// Boundary moves and unknown methods are no-ops; returns whether the
/// order changed.
pub fn move_method(
    stored: &mut [PaymentMethod],
    method: PaymentMethod,
    direction: MoveDirection,
) -> bool {
    let Some(index) = stored.iter().position(|candidate| *candidate == method) else {
        return false;
    };
    let target = match direction {
        MoveDirection::Up if index > 0 => index - 1,
        MoveDirection::Down if index + 1 < stored.len() => index + 1,
        _ => return false,
    };
    stored.swap(index, target);
    true
}
