//! Simulated central-bank swap book
//!
//! Stand-in for the Fed fxs dataset: a fixed set of overnight liquidity
//! operations used by the pressure simulation. The record shape matches
//! the live feed so swapping in a real client changes nothing downstream.

use crate::types::SwapOperation;

pub const USD_LIQUIDITY_SWAP: &str = "U.S. Dollar Liquidity Swap";
pub const VND_LIQUIDITY_PRESSURE: &str = "Vietnamese Dong Liquidity Pressure";

/// The simulated book of open swap operations
#[derive(Debug, Clone)]
pub struct SwapBook {
    operations: Vec<SwapOperation>,
}

impl SwapBook {
    pub fn new(operations: Vec<SwapOperation>) -> Self {
        Self { operations }
    }

    /// Fixed simulated dataset: one overnight USD liquidity swap, one
    /// small-value JPY swap, one VND liquidity pressure entry.
    pub fn simulated() -> Self {
        Self::new(vec![
            SwapOperation {
                operation_type: USD_LIQUIDITY_SWAP.to_string(),
                counterparty: "European Central Bank".to_string(),
                currency: "USD".to_string(),
                term_in_days: 1,
                amount: 150_000_000,
                interest_rate: 5.5,
                is_small_value: false,
            },
            SwapOperation {
                operation_type: "Non-U.S. Dollar Liquidity Swap".to_string(),
                counterparty: "Bank of Japan".to_string(),
                currency: "JPY".to_string(),
                term_in_days: 1,
                amount: 7_000_000_000,
                interest_rate: 1.2,
                is_small_value: true,
            },
            SwapOperation {
                operation_type: VND_LIQUIDITY_PRESSURE.to_string(),
                counterparty: "State Bank of Vietnam".to_string(),
                currency: "VND".to_string(),
                term_in_days: 1,
                amount: 2_500_000_000_000,
                interest_rate: 4.8,
                is_small_value: false,
            },
        ])
    }

    pub fn operations(&self) -> &[SwapOperation] {
        &self.operations
    }
}
