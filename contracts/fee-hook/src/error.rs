// Fee hook error module

use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum FeeHookError {
    // Initialization errors (100-199)
    NotInitialized = 100,

    // Tier errors (200-299)
    TiersNotAscending = 200,
    InvalidDiscount = 201,
    NegativeThreshold = 202,
    TooManyTiers = 203,
}
