// Unit tests for the application error type

use crate::error::CaplinkError;

use bridge_core::error::BridgeError;
use bridge_core::error::surface::SurfaceError;

use common::ErrorLocation;

/// **VALUE**: Verifies that errors render their message and call-site
/// location.
///
/// **WHY THIS MATTERS**: Shell errors surface only through logs; a
/// display impl that loses the location makes startup failures
/// needlessly hard to place.
///
/// **BUG THIS CATCHES**: Would catch the location being dropped from
/// the error format string.
#[test]
fn given_caplink_error_when_displayed_then_message_and_location_present() {
    let error = CaplinkError::Caplink {
        message: String::from("something went sideways"),
        location: ErrorLocation::caller(),
    };

    let rendered = format!("{error}");
    assert!(rendered.contains("something went sideways"));
    assert!(rendered.contains("error.rs"), "missing call site: {rendered}");
}

/// **VALUE**: Verifies that bridge errors convert into the shell's
/// error type with their message intact.
///
/// **WHY THIS MATTERS**: `main` propagates every bridge failure with
/// `?` through this conversion; a lossy From impl would blind the one
/// place startup errors get reported.
///
/// **BUG THIS CATCHES**: Would catch the From impl discarding the
/// underlying error text.
#[test]
fn given_bridge_error_when_converted_then_message_preserved() {
    let bridge_error = BridgeError::from(SurfaceError::Unavailable {
        name: String::from("open-shell"),
        location: ErrorLocation::caller(),
    });

    let converted = CaplinkError::from(bridge_error);

    let rendered = format!("{converted}");
    assert!(rendered.contains("Bridge Error"));
    assert!(rendered.contains("open-shell"));
}
