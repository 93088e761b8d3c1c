mod helpers;
mod mocks;
mod reconcile;
mod shipments;
