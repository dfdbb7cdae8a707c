//! [`RecordBackend`] on a pair of x11rb connections.
//!
//! Both connections speak the X11 protocol in pure Rust, so a broken
//! connection surfaces as a `ConnectionError` from the call that noticed it
//! rather than terminating the process.

use std::io;

use tracing::{debug, trace};
use x11rb::connection::{Connection, RequestConnection};
use x11rb::errors::{ConnectionError, ReplyError, ReplyOrIdError};
use x11rb::protocol::record::{self, ConnectionExt as _};
use x11rb::protocol::xproto::{self, ConnectionExt as _};
use x11rb::rust_connection::RustConnection;
use xtap_core::{KeyboardMapping, RecordReply, ReplyCategory};

use super::{ContextId, RecordBackend, RecordError};

/// Highest RECORD version we know how to talk to.
const RECORD_MAJOR_VERSION: u16 = 1;
const RECORD_MINOR_VERSION: u16 = 13;

/// No extra headers in front of intercepted data.
const NO_ELEMENT_HEADER: record::ElementHeader = 0;

/// Display `N` listens on TCP port `6000 + N`, which must fit in a `u16`.
const X_TCP_PORT_BASE: u32 = 6000;
const MAX_DISPLAY_NUMBER: u32 = u16::MAX as u32 - X_TCP_PORT_BASE;

/// Observer and recorder connections to one display.
pub struct X11Backend {
    observer: RustConnection,
    recorder: RustConnection,
}

impl X11Backend {
    /// Opens both connections to `display` (`$DISPLAY` when `None`).
    ///
    /// # Errors
    ///
    /// Returns [`RecordError::Connect`] when the display cannot be reached
    /// and [`RecordError::ExtensionMissing`] when the server does not offer
    /// RECORD.
    pub fn open(display: Option<&str>) -> Result<Self, RecordError> {
        let name = match display {
            Some(name) => name.to_owned(),
            None => std::env::var("DISPLAY").unwrap_or_default(),
        };
        check_display_number(&name)?;

        let observer = connect(display)?;
        ensure_record_support(&observer)?;
        let recorder = connect(display)?;

        debug!(display = %name, "opened observer and recorder connections");
        Ok(Self { observer, recorder })
    }
}

impl RecordBackend for X11Backend {
    fn keyboard_mapping(&self) -> Result<KeyboardMapping, RecordError> {
        let setup = self.observer.setup();
        let min_keycode = setup.min_keycode;
        let count = setup
            .max_keycode
            .saturating_sub(min_keycode)
            .saturating_add(1);

        let reply = self
            .observer
            .get_keyboard_mapping(min_keycode, count)
            .map_err(from_connection)?
            .reply()
            .map_err(from_reply)?;

        trace!(
            min_keycode,
            count,
            keysyms_per_keycode = reply.keysyms_per_keycode,
            "fetched keyboard mapping"
        );
        Ok(KeyboardMapping::new(
            min_keycode,
            reply.keysyms_per_keycode,
            reply.keysyms,
        ))
    }

    fn create_context(&self) -> Result<ContextId, RecordError> {
        let context = self.observer.generate_id().map_err(from_reply_or_id)?;
        let range = record::Range {
            device_events: record::Range8 {
                first: xproto::KEY_PRESS_EVENT,
                last: xproto::MOTION_NOTIFY_EVENT,
            },
            ..Default::default()
        };

        // Checked, so the context exists before the recorder refers to it.
        self.observer
            .record_create_context(
                context,
                NO_ELEMENT_HEADER,
                &[u32::from(record::CS::ALL_CLIENTS)],
                &[range],
            )
            .map_err(from_connection)?
            .check()
            .map_err(from_reply)?;
        Ok(context)
    }

    fn enable_context(
        &self,
        context: ContextId,
        sink: &mut dyn FnMut(RecordReply),
    ) -> Result<(), RecordError> {
        let replies = self
            .recorder
            .record_enable_context(context)
            .map_err(from_connection)?;

        for reply in replies {
            let reply = reply.map_err(from_reply)?;
            let category = ReplyCategory::from(reply.category);
            sink(RecordReply {
                category,
                client_swapped: reply.client_swapped,
                data: reply.data,
            });
            if category == ReplyCategory::EndOfData {
                break;
            }
        }
        Ok(())
    }

    fn disable_context(&self, context: ContextId) -> Result<(), RecordError> {
        // Disabling an already-disabled context yields an error nobody waits
        // for; it is discarded.
        self.observer
            .record_disable_context(context)
            .map_err(from_connection)?
            .ignore_error();
        self.observer.flush().map_err(from_connection)
    }

    fn free_context(&self, context: ContextId) -> Result<(), RecordError> {
        self.observer
            .record_free_context(context)
            .map_err(from_connection)?
            .check()
            .map_err(from_reply)
    }
}

impl Drop for X11Backend {
    fn drop(&mut self) {
        let _ = self.observer.flush();
        let _ = self.recorder.flush();
    }
}

fn connect(display: Option<&str>) -> Result<RustConnection, RecordError> {
    let (conn, _screen) =
        RustConnection::connect(display).map_err(|e| RecordError::Connect(e.to_string()))?;
    Ok(conn)
}

/// Rejects display numbers x11rb cannot turn into a TCP port.
///
/// Names without a parsable number are left for the connect call to reject.
fn check_display_number(name: &str) -> Result<(), RecordError> {
    let Some((_, rest)) = name.rsplit_once(':') else {
        return Ok(());
    };
    let number = rest.split('.').next().unwrap_or_default();
    match number.parse::<u64>() {
        Ok(n) if n > u64::from(MAX_DISPLAY_NUMBER) => Err(RecordError::Connect(format!(
            "display number {n} out of range (max {MAX_DISPLAY_NUMBER})"
        ))),
        _ => Ok(()),
    }
}

fn ensure_record_support(conn: &RustConnection) -> Result<(), RecordError> {
    if conn
        .extension_information(record::X11_EXTENSION_NAME)
        .map_err(from_connection)?
        .is_none()
    {
        return Err(RecordError::ExtensionMissing);
    }

    let version = conn
        .record_query_version(RECORD_MAJOR_VERSION, RECORD_MINOR_VERSION)
        .map_err(from_connection)?
        .reply()
        .map_err(from_reply)?;
    debug!(
        major = version.major_version,
        minor = version.minor_version,
        "RECORD extension available"
    );
    Ok(())
}

// ── Error mapping ─────────────────────────────────────────────────────────────

fn from_connection(err: ConnectionError) -> RecordError {
    match err {
        ConnectionError::IoError(ref io) if io.kind() == io::ErrorKind::Interrupted => {
            RecordError::Interrupted
        }
        other => RecordError::ConnectionLost(other.to_string()),
    }
}

fn from_reply(err: ReplyError) -> RecordError {
    match err {
        ReplyError::ConnectionError(e) => from_connection(e),
        ReplyError::X11Error(e) => RecordError::Protocol(format!("{e:?}")),
    }
}

fn from_reply_or_id(err: ReplyOrIdError) -> RecordError {
    match err {
        ReplyOrIdError::ConnectionError(e) => from_connection(e),
        ReplyOrIdError::X11Error(e) => RecordError::Protocol(format!("{e:?}")),
        ReplyOrIdError::IdsExhausted => RecordError::Protocol("resource ids exhausted".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_with_unparsable_display_is_connect_error() {
        let result = X11Backend::open(Some("definitely not a display"));
        assert!(matches!(result, Err(RecordError::Connect(_))));
    }

    #[test]
    fn test_open_with_unreachable_display_is_connect_error() {
        // No server listens on a display this high.
        let result = X11Backend::open(Some(":59000"));
        assert!(matches!(result, Err(RecordError::Connect(_))));
    }

    #[test]
    fn test_open_with_display_number_past_port_range_is_connect_error() {
        // Arrange: 6000 + 64999 does not fit in a TCP port.
        let display = Some(":64999");

        // Act
        let result = X11Backend::open(display);

        // Assert
        assert!(matches!(result, Err(RecordError::Connect(ref m)) if m.contains("out of range")));
    }

    #[test]
    fn test_display_number_check_bounds() {
        assert!(check_display_number(":59535").is_ok());
        assert!(check_display_number("localhost:59536.0").is_err());
        assert!(check_display_number("host/unix:0.1").is_ok());
        assert!(check_display_number("not a display").is_ok());
    }

    #[test]
    fn test_interrupted_io_maps_to_interrupted() {
        let err = ConnectionError::IoError(io::Error::from(io::ErrorKind::Interrupted));
        assert!(matches!(from_connection(err), RecordError::Interrupted));
    }

    #[test]
    fn test_other_io_maps_to_connection_lost() {
        // Arrange
        let err = ConnectionError::IoError(io::Error::from(io::ErrorKind::BrokenPipe));

        // Act
        let mapped = from_reply(ReplyError::ConnectionError(err));

        // Assert
        assert!(matches!(mapped, RecordError::ConnectionLost(_)));
    }

    #[test]
    fn test_exhausted_ids_map_to_protocol_error() {
        assert!(matches!(
            from_reply_or_id(ReplyOrIdError::IdsExhausted),
            RecordError::Protocol(_)
        ));
    }
}
