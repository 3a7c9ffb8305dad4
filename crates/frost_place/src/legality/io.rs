//! IO pad placement.

use super::{Rejection, Verdict};
use frost_arch::{Architecture, SiteId};

/// An IO cell needs a site bonded to a package pin.
///
/// This is the only IO rule. How IO cells interact with the global clock
/// network (for example a pad and a global buffer competing for the same
/// tile's clock routing) is not checked.
pub(super) fn check_io(arch: &dyn Architecture, site: SiteId) -> Verdict {
    if arch.package_pin(site).is_empty() {
        Verdict::Illegal(Rejection::NoPackagePin)
    } else {
        Verdict::Legal
    }
}
