//! Imperative shell around the pure dispenser core.
//!
//! Operations are Stillwater effects over a [`ServiceEnv`] that supplies
//! the storage, clock and pricing collaborators. This is where the clock
//! is read, where patches are persisted, and where logging happens. The
//! core modules do none of that.
//!
//! # Example
//!
//! ```rust
//! use stillwater::prelude::*;
//! use tapmeter::billing::Pricing;
//! use tapmeter::core::{DispenserStatus, NewDispenser};
//! use tapmeter::service::{
//!     create_dispenser, get_spending, set_status, DispenserEnv, InMemoryStore, SystemClock,
//! };
//!
//! type Env = DispenserEnv<InMemoryStore, SystemClock>;
//!
//! # #[tokio::main]
//! # async fn main() {
//! let env: Env = DispenserEnv::new(InMemoryStore::new(), SystemClock, Pricing::default());
//!
//! let dispenser = create_dispenser::<Env>(NewDispenser { flow_volume: 0.064 })
//!     .run(&env)
//!     .await
//!     .unwrap();
//! set_status::<Env>(dispenser.id, DispenserStatus::Open).run(&env).await.unwrap();
//! set_status::<Env>(dispenser.id, DispenserStatus::Closed).run(&env).await.unwrap();
//!
//! let summary = get_spending::<Env>(dispenser.id).run(&env).await.unwrap();
//! assert_eq!(summary.usages.len(), 1);
//! # }
//! ```

mod clock;
mod env;
mod error;
mod operations;
mod store;

pub use clock::{Clock, FixedClock, SystemClock};
pub use env::{DispenserEnv, ServiceEnv};
pub use error::ServiceError;
pub use operations::{create_dispenser, find_dispenser, get_spending, set_status};
pub use store::{DispenserStore, InMemoryStore, StoreError};
