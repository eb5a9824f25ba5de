pub use interface::wrapper_factory::{
    AddressResponse, ConfigResponse, ExecuteMsg, InstantiateMsg, QueryMsg,
};
