use streaming::Request;

use crate::engine::{CameraPose, TilesetExtras};

/// Page and engine callbacks the manager reacts to.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewerEvent {
    /// A `.layer` checkbox changed.
    LayerToggled { id: String, checked: bool },
    /// Enter pressed in the airport text field.
    AirportsSubmitted { text: String },
    /// The camera stopped moving.
    CameraMoved { pose: CameraPose },
    /// A tileset finished loading.
    TilesetReady {
        request: Request,
        extras: TilesetExtras,
    },
}
