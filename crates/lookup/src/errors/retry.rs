/// Classification for retry policy.
///
/// Used by the retry runner to decide whether a failed lookup attempt is
/// worth repeating against the same provider.
///
/// # Behavior Summary
///
/// | Class | Retry same provider? | Minimum delay |
/// |-------|----------------------|---------------|
/// | `Never` | No | - |
/// | `Retry` | Yes | policy backoff |
/// | `WithBackoff` | Yes | policy backoff, at least the rate-limit floor |
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RetryClass {
    /// Never retry - the race is already decided.
    Never,

    /// Retry with whatever delay the policy prescribes (possibly none).
    ///
    /// Used for transport, read and decode failures. The provider may well
    /// answer correctly on the next attempt.
    Retry,

    /// Retry, but never sooner than the rate-limit floor.
    ///
    /// Used when the provider explicitly asked us to slow down (HTTP 429).
    WithBackoff,
}
