/// Identifies one tileset construction.
///
/// Every show issues a fresh request, so a readiness notification can always
/// be matched against the registry entry it was issued for. A notification
/// carrying a request the registry no longer holds is stale.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Request(pub u64);
