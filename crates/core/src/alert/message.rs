//! Emergency SMS body.

use core::fmt::Write;

use heapless::String;

use crate::location::LocationFix;

/// Single-segment SMS limit.
pub const MAX_MESSAGE_LEN: usize = 160;

pub type AlertMessage = String<MAX_MESSAGE_LEN>;

const HEADLINE: &str = "EMERGENCY: Car accident detected!";
const MAPS_URL: &str = "https://www.google.com/maps?q=";

/// Compose the alert text.
///
/// A valid fix becomes a maps link; anything else, including a stale fix,
/// produces the "location unknown" body.
pub fn compose_alert_message(fix: Option<&LocationFix>) -> AlertMessage {
    if let Some(fix) = fix.filter(|f| f.valid) {
        let mut message = AlertMessage::new();
        if write!(
            message,
            "{} Location: {}{:.6},{:.6}",
            HEADLINE, MAPS_URL, fix.latitude, fix.longitude
        )
        .is_ok()
        {
            return message;
        }
    }
    location_unknown()
}

fn location_unknown() -> AlertMessage {
    let mut message = AlertMessage::new();
    // fits: 53 bytes
    let _ = write!(message, "{} Location unknown.", HEADLINE);
    message
}
