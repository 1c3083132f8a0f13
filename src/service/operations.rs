//! Dispenser operations as effects over a [`ServiceEnv`].
//!
//! Each operation loads what it needs from the store, lets the pure core
//! decide, and writes the outcome back. The clock is read here, once per
//! operation, and passed into the core as a plain value.

use crate::billing::{summarize_spending, SpendingSummary};
use crate::core::{Dispenser, DispenserId, DispenserStatus, NewDispenser};
use crate::lifecycle::{apply_transition, DispenserPatch};
use crate::service::clock::Clock;
use crate::service::env::ServiceEnv;
use crate::service::error::ServiceError;
use crate::service::store::{DispenserStore, StoreError};
use crate::validation::new_dispenser_rules;
use stillwater::effect::BoxedEffect;
use stillwater::prelude::*;
use tracing::{debug, info, warn};

fn load<E: ServiceEnv>(env: &E, id: &DispenserId) -> Result<Dispenser, ServiceError> {
    match env.store().load_by_id(id)? {
        Some(dispenser) => Ok(dispenser),
        None => {
            debug!(dispenser_id = %id, "dispenser not found");
            Err(ServiceError::NotFound { id: *id })
        }
    }
}

/// Validate the request and store a new, closed dispenser.
pub fn create_dispenser<E: ServiceEnv>(
    request: NewDispenser,
) -> BoxedEffect<Dispenser, ServiceError, E> {
    from_fn(move |env: &E| -> Result<Dispenser, ServiceError> {
        new_dispenser_rules().check(&request).map_err(|violations| {
            warn!(flow_volume = request.flow_volume, "rejected dispenser creation");
            ServiceError::InvalidRequest(violations)
        })?;

        let dispenser = request.into_dispenser(env.clock().now());
        env.store().insert(dispenser.clone())?;

        info!(
            dispenser_id = %dispenser.id,
            flow_volume = dispenser.flow_volume,
            "dispenser created"
        );
        Ok(dispenser)
    })
    .boxed()
}

/// Fetch a dispenser by id.
pub fn find_dispenser<E: ServiceEnv>(id: DispenserId) -> BoxedEffect<Dispenser, ServiceError, E> {
    from_fn(move |env: &E| -> Result<Dispenser, ServiceError> { load(env, &id) }).boxed()
}

/// Open or close a dispenser at the environment's current time.
///
/// Returns the patch that was stored. A closing patch carries the new
/// usage record.
pub fn set_status<E: ServiceEnv>(
    id: DispenserId,
    requested: DispenserStatus,
) -> BoxedEffect<DispenserPatch, ServiceError, E> {
    from_fn(move |env: &E| -> Result<DispenserPatch, ServiceError> {
        let dispenser = load(env, &id)?;
        let timestamp = env.clock().now();

        let patch = apply_transition(&dispenser, requested, timestamp, &env.pricing())
            .map_err(|err| {
                warn!(dispenser_id = %id, status = %requested, error = %err, "transition rejected");
                err
            })?;

        env.store().apply_patch(&id, &patch).map_err(|err| {
            if let StoreError::Conflict { .. } = err {
                warn!(dispenser_id = %id, error = %err, "concurrent status change");
            }
            err
        })?;

        match patch.usage() {
            Some(usage) => info!(
                dispenser_id = %id,
                elapsed_seconds = usage.elapsed_seconds(),
                total_spent = usage.total_spent,
                "dispenser closed"
            ),
            None => info!(dispenser_id = %id, "dispenser opened"),
        }
        Ok(patch)
    })
    .boxed()
}

/// Total spend and usage history of a dispenser.
pub fn get_spending<E: ServiceEnv>(
    id: DispenserId,
) -> BoxedEffect<SpendingSummary, ServiceError, E> {
    from_fn(move |env: &E| -> Result<SpendingSummary, ServiceError> {
        let dispenser = load(env, &id)?;
        let summary = summarize_spending(&dispenser);
        debug!(
            dispenser_id = %id,
            usages = summary.usages.len(),
            amount = summary.amount,
            "spending summarized"
        );
        Ok(summary)
    })
    .boxed()
}
