pub mod mock_amm;
pub mod mock_synth_ledger;
pub mod multitest;
pub mod testing_mocks;
pub mod utils;
