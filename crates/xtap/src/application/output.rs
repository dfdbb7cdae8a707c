//! Rendering of events as output lines for the `xtap` binary.

use serde_json::Value;
use xtap_core::InputEvent;

use crate::infrastructure::storage::config::{CaptureConfig, OutputFormat};

/// Renders `event` as one line without the trailing newline.
///
/// # Errors
///
/// Returns a `serde_json` error if JSON rendering fails.
pub fn render(event: &InputEvent, format: OutputFormat) -> serde_json::Result<String> {
    match format {
        OutputFormat::Text => Ok(event.to_string()),
        OutputFormat::Json => {
            let mut value = serde_json::to_value(event)?;
            // Derived key properties are not stored fields; add them for readers.
            if let (InputEvent::Key(key), Value::Object(map)) = (event, &mut value) {
                map.insert("name".to_string(), Value::from(key.name().into_owned()));
                map.insert("ord".to_string(), Value::from(key.ord()));
            }
            serde_json::to_string(&value)
        }
    }
}

/// Whether `event` passes the capture filter.
pub fn is_captured(event: &InputEvent, capture: &CaptureConfig) -> bool {
    match event {
        InputEvent::Key(_) => capture.keyboard,
        InputEvent::Mouse(mouse) if mouse.is_motion() => capture.mouse && capture.motion,
        InputEvent::Mouse(_) => capture.mouse,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use xtap_core::{KeyEvent, ModifierState, MouseEvent};

    fn shifted_a() -> InputEvent {
        InputEvent::Key(KeyEvent::new(
            0x41,
            true,
            ModifierState {
                shift_held: true,
                caps_held: false,
            },
        ))
    }

    #[test]
    fn test_text_output_uses_display() {
        let line = render(&shifted_a(), OutputFormat::Text).unwrap();
        assert_eq!(line, "key down A [shift]");
    }

    #[test]
    fn test_json_key_output_carries_name_and_ord() {
        // Act
        let line = render(&shifted_a(), OutputFormat::Json).unwrap();
        let value: Value = serde_json::from_str(&line).unwrap();

        // Assert
        assert_eq!(value["kind"], "key");
        assert_eq!(value["keysym"], 0x41);
        assert_eq!(value["name"], "A");
        assert_eq!(value["ord"], 0x41);
        assert_eq!(value["shift"], true);
        assert_eq!(value["caps"], false);
    }

    #[test]
    fn test_json_motion_output_has_null_down() {
        let line = render(&InputEvent::Mouse(MouseEvent::motion((3, 4))), OutputFormat::Json).unwrap();
        let value: Value = serde_json::from_str(&line).unwrap();

        assert_eq!(value["kind"], "mouse");
        assert_eq!(value["is_motion"], true);
        assert!(value["down"].is_null());
        assert_eq!(value["position"], serde_json::json!([3, 4]));
    }

    #[test]
    fn test_capture_filter() {
        // Arrange
        let motion = InputEvent::Mouse(MouseEvent::motion((0, 0)));
        let click = InputEvent::Mouse(MouseEvent::button(1, true, (0, 0)));
        let no_motion = CaptureConfig {
            motion: false,
            ..CaptureConfig::default()
        };
        let no_mouse = CaptureConfig {
            mouse: false,
            ..CaptureConfig::default()
        };

        // Assert
        assert!(!is_captured(&motion, &no_motion));
        assert!(is_captured(&click, &no_motion));
        assert!(!is_captured(&motion, &no_mouse));
        assert!(!is_captured(&click, &no_mouse));
        assert!(is_captured(&shifted_a(), &no_mouse));
    }
}
