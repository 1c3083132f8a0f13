//! Environment the service effects run against.

use crate::billing::Pricing;
use crate::service::clock::Clock;
use crate::service::store::DispenserStore;

/// Collaborators a service operation needs.
pub trait ServiceEnv: Clone + Send + Sync + 'static {
    type Store: DispenserStore;
    type Clock: Clock;

    fn store(&self) -> &Self::Store;
    fn clock(&self) -> &Self::Clock;
    fn pricing(&self) -> Pricing;
}

/// Plain bundle of a store, a clock and a price.
#[derive(Clone, Debug)]
pub struct DispenserEnv<S, C> {
    pub store: S,
    pub clock: C,
    pub pricing: Pricing,
}

impl<S, C> DispenserEnv<S, C> {
    pub fn new(store: S, clock: C, pricing: Pricing) -> Self {
        Self {
            store,
            clock,
            pricing,
        }
    }
}

impl<S, C> ServiceEnv for DispenserEnv<S, C>
where
    S: DispenserStore + Clone + 'static,
    C: Clock + Clone + 'static,
{
    type Store = S;
    type Clock = C;

    fn store(&self) -> &S {
        &self.store
    }

    fn clock(&self) -> &C {
        &self.clock
    }

    fn pricing(&self) -> Pricing {
        self.pricing
    }
}
