use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum WalletError {
    NotInitialized = 0,
    InvalidThreshold = 2,
    EmptyOwnerList = 3,
    DuplicateOwner = 4,
    ThresholdExceedsOwners = 5,
    InvalidAmount = 6,
    Unauthorized = 10,
    NotFound = 11,
    AlreadyExecuted = 12,
    InsufficientConfirmations = 13,
    InsufficientFunds = 14,
    TransferFailed = 15,
}
