//! Configuration-change notification contract

/// Receives configuration-change notices pushed by a bank.
///
/// A bank notifies subscribed clients when product terms change (rates,
/// commissions, limits). Delivery is synchronous and in-process; the
/// receiver should only record the notice, never call back into the bank.
pub trait ConfigObserver {
    /// Handle one pushed notice.
    fn update(&mut self, notice: &str);
}
