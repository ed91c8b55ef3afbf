// Allow dead_code because these helpers are used across different test files
// which are compiled separately
#![allow(dead_code)]

use anyhow::Result;
use caderneta::application::LedgerService;
use caderneta::storage::CustomerDirectory;

pub const ALICE_TAX_ID: &str = "11122233344";
pub const BOB_TAX_ID: &str = "55566677788";

/// Helper to create a test service over a fresh, empty directory
pub fn test_service() -> LedgerService {
    LedgerService::new(CustomerDirectory::new())
}

/// Helper to create a service with Alice already registered
pub fn service_with_alice() -> Result<LedgerService> {
    let service = test_service();
    service.register_customer(ALICE_TAX_ID, "Alice")?;
    Ok(service)
}

/// Helper to create a service with Alice and Bob registered
pub fn service_with_alice_and_bob() -> Result<LedgerService> {
    let service = service_with_alice()?;
    service.register_customer(BOB_TAX_ID, "Bob")?;
    Ok(service)
}
