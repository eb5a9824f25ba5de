pub use interface::wrapper::{
    BalanceResponse, ExecuteMsg, InstantiateMsg, QueryMsg, ReserveResponse, TokenInfoResponse,
    WrappedReceiveMsg, WrapperInfoResponse,
};
