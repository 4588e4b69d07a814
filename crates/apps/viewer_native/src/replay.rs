//! Headless replay of a recorded page session.
//!
//! A script is JSON lines, one step per line:
//!
//! ```text
//! {"type": "layer", "id": "SEC", "checked": true}
//! {"type": "airports", "text": "ksfo, kjfk"}
//! {"type": "ready_all", "flyto": true, "height": 4000}
//! {"type": "camera", "position": [1, 2, 3], "direction": [0, 0, -1], "up": [0, 1, 0]}
//! ```
//!
//! Blank lines and lines starting with `#` are skipped.

use foundation::math::Vec3;
use runtime::EventBus;
use serde::{Deserialize, Serialize};
use session::KeyValueStore;
use visibility::{
    CameraPose, RecordingControls, RecordingEngine, RenderEngine, TilesetExtras, ViewerEvent,
    VisibilityManager,
};

pub type NativeManager<S> = VisibilityManager<RecordingEngine, S, RecordingControls>;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Step {
    Layer {
        id: String,
        checked: bool,
    },
    Airports {
        text: String,
    },
    Camera {
        position: [f64; 3],
        direction: [f64; 3],
        up: [f64; 3],
    },
    /// Complete every pending tileset load.
    ReadyAll {
        #[serde(default)]
        flyto: bool,
        #[serde(default)]
        height: Option<f64>,
    },
}

pub fn parse_script(raw: &str) -> Result<Vec<Step>, String> {
    raw.lines()
        .enumerate()
        .filter(|(_, line)| {
            let line = line.trim();
            !line.is_empty() && !line.starts_with('#')
        })
        .map(|(i, line)| {
            serde_json::from_str::<Step>(line).map_err(|e| format!("line {}: {e}", i + 1))
        })
        .collect()
}

/// Feed `steps` through the event bus. Returns the number of events handled.
pub fn replay<S: KeyValueStore>(manager: &mut NativeManager<S>, steps: Vec<Step>) -> usize {
    let mut bus = EventBus::new();
    let mut handled = 0;
    for step in steps {
        match step {
            Step::Layer { id, checked } => {
                bus.post(ViewerEvent::LayerToggled { id, checked });
            }
            Step::Airports { text } => {
                bus.post(ViewerEvent::AirportsSubmitted { text });
            }
            Step::Camera {
                position,
                direction,
                up,
            } => {
                let pose = CameraPose {
                    position: Vec3::from(position),
                    direction: Vec3::from(direction),
                    up: Vec3::from(up),
                };
                // The engine moves first, then reports move-end.
                manager.engine_mut().set_camera_pose(pose);
                bus.post(ViewerEvent::CameraMoved { pose });
            }
            Step::ReadyAll { flyto, height } => {
                // Loads issued by earlier steps must exist before they can finish.
                handled += manager.run_events(&mut bus);
                let extras = TilesetExtras { flyto, height };
                for request in manager.registry().pending() {
                    bus.post(ViewerEvent::TilesetReady { request, extras });
                }
            }
        }
    }
    handled + manager.run_events(&mut bus)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub layers: Vec<String>,
    pub airports: Vec<String>,
    pub attached: Vec<String>,
    pub camera: CameraPose,
}

pub fn summarize<S: KeyValueStore>(manager: &NativeManager<S>) -> Summary {
    Summary {
        layers: manager.visible_layers(),
        airports: manager
            .visible_airports()
            .iter()
            .map(|a| a.to_string())
            .collect(),
        attached: manager
            .engine()
            .attached_urls()
            .into_iter()
            .map(str::to_string)
            .collect(),
        camera: manager.engine().camera_pose(),
    }
}

#[cfg(test)]
mod tests {
    use super::{NativeManager, Step, parse_script, replay, summarize};
    use foundation::math::Vec3;
    use pretty_assertions::assert_eq;
    use session::InMemoryStore;
    use visibility::{RecordingControls, RecordingEngine, Settings, VisibilityManager};

    fn manager() -> NativeManager<InMemoryStore> {
        let mut m = VisibilityManager::new(
            Settings::default(),
            RecordingEngine::new(),
            InMemoryStore::new(),
            RecordingControls::default(),
        );
        m.init();
        m.restore_state();
        m
    }

    #[test]
    fn parses_steps_and_skips_comments() {
        let script = r#"
# session
{"type": "layer", "id": "SEC", "checked": false}

{"type": "ready_all"}
"#;
        let steps = parse_script(script).unwrap();
        assert_eq!(
            steps,
            vec![
                Step::Layer {
                    id: "SEC".to_string(),
                    checked: false
                },
                Step::ReadyAll {
                    flyto: false,
                    height: None
                },
            ]
        );
    }

    #[test]
    fn reports_line_of_bad_step() {
        let err = parse_script("{\"type\": \"layer\", \"id\": \"SEC\", \"checked\": true}\n{\"type\": \"zoom\"}")
            .unwrap_err();
        assert!(err.starts_with("line 2:"), "{err}");
    }

    #[test]
    fn replay_applies_steps_in_order() {
        let mut m = manager();
        let steps = parse_script(
            r#"{"type": "airports", "text": "ksfo, kjfk"}
{"type": "ready_all", "flyto": true, "height": 3000}
{"type": "layer", "id": "5X", "checked": false}
{"type": "camera", "position": [1, 2, 3], "direction": [0, 0, -1], "up": [0, 1, 0]}"#,
        )
        .unwrap();
        // 1 submit + 5 readiness + 1 toggle + 1 camera
        assert_eq!(replay(&mut m, steps), 8);

        let summary = summarize(&m);
        assert_eq!(summary.airports, vec!["KJFK", "KSFO"]);
        assert_eq!(
            summary.layers,
            vec!["CLASS_B", "CLASS_C", "CLASS_D", "EARTH", "SEC", "TAC"]
        );
        assert_eq!(summary.attached.len(), 5);
        assert!(summary.attached.iter().all(|u| u.contains("airports-1x")));
        assert_eq!(summary.camera.position, Vec3::new(1.0, 2.0, 3.0));
        // The three class models and the first submitted airport fly; KJFK does not.
        assert_eq!(m.engine().fly_tos().len(), 4);
    }
}
