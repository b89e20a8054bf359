//! `AT+CGNSINF` response parsing.
//!
//! The reply is a comma list after `+CGNSINF:`. Field 1 is the fix flag and
//! fields 2 and 3 carry latitude and longitude in decimal degrees:
//!
//! ```text
//! +CGNSINF: 1,1,40.712800,-74.006000,20240101120000.000,...
//! ```

const TAG: &str = "+CGNSINF:";

/// Fix flag value meaning "position available".
const FIX_AVAILABLE: &str = "1";

/// Extract `(latitude, longitude)` from a CGNSINF response.
///
/// Returns `None` if the tag is missing, fewer than five fields are
/// present, the fix flag is not `1`, or either coordinate is empty, not a
/// number, or outside the valid range.
pub fn parse_cgnsinf(response: &str) -> Option<(f64, f64)> {
    let start = response.find(TAG)? + TAG.len();
    let line = response[start..].lines().next()?;

    let mut fields = line.split(',');
    if line.split(',').count() <= 4 {
        return None;
    }

    let _run_status = fields.next()?;
    if fields.next()?.trim() != FIX_AVAILABLE {
        return None;
    }
    let latitude: f64 = fields.next()?.trim().parse().ok()?;
    let longitude: f64 = fields.next()?.trim().parse().ok()?;

    if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
        return None;
    }
    Some((latitude, longitude))
}
