pub mod address;
pub mod amm;
pub mod asset;
pub mod exchange;
pub mod exchange_factory;
pub mod synth_ledger;
pub mod wrapper;
pub mod wrapper_factory;
