pub use interface::exchange_factory::{
    AddressResponse, ConfigResponse, ExecuteMsg, InstantiateMsg, QueryMsg,
};
