use soroban_sdk::{contractevent, Address, Bytes};

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TransactionSubmitted {
    #[topic]
    pub id: u64,
    pub destination: Address,
    pub value: i128,
    pub data: Bytes,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TransactionConfirmed {
    #[topic]
    pub id: u64,
    #[topic]
    pub owner: Address,
    pub confirmations: u32,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ConfirmationRevoked {
    #[topic]
    pub id: u64,
    #[topic]
    pub owner: Address,
    pub confirmations: u32,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TransactionExecuted {
    #[topic]
    pub id: u64,
    pub executor: Address,
    pub destination: Address,
    pub value: i128,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FundsDeposited {
    #[topic]
    pub from: Address,
    pub amount: i128,
}
