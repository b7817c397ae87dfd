//! Liquidation detection.
//!
//! Deciding "this wallet was liquidated" from raw call data would need
//! structured decoding of protocol calls. The default detector uses a
//! cheaper heuristic instead: match the `liquidateBorrow` method
//! selector and look for the borrower address as a hex substring of the
//! payload. The heuristic can over-count (the address bytes may appear
//! in unrelated arguments) and under-count (proxied or internal
//! liquidations never match), so it lives behind a trait and can be
//! swapped for a structured decoder without touching the extractor.

use crate::blockchain::traits::Transaction;

/// Method selector of Compound v2 `liquidateBorrow(address,uint256,address)`.
pub const LIQUIDATE_BORROW_SELECTOR: &str = "0xf5e3c462";

/// Decides whether a transaction is a liquidation targeting `wallet`.
pub trait LiquidationDetector: Send + Sync {
    /// `wallet` is the lowercased 0x-prefixed borrower address.
    fn is_liquidation_of(&self, wallet: &str, tx: &Transaction) -> bool;
}

/// Default selector-prefix + borrower-substring heuristic.
#[derive(Debug, Clone, Copy, Default)]
pub struct SelectorSubstringDetector;

impl LiquidationDetector for SelectorSubstringDetector {
    fn is_liquidation_of(&self, wallet: &str, tx: &Transaction) -> bool {
        let input = tx.input.to_lowercase();
        if !input.starts_with(LIQUIDATE_BORROW_SELECTOR) {
            return false;
        }
        let bare = wallet.trim_start_matches("0x");
        !bare.is_empty() && input.contains(bare)
    }
}
