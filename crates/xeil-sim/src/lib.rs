//! Game simulation: the focal point's motion, scanning, autopilot travel and
//! the per-tick frame handed to the presentation layer.
//!
//! Everything is driven through [`Simulation`]; the other modules are its
//! parts and are public for presentation layers and tests.

pub mod autopilot;
pub mod clock;
pub mod dossier_cache;
pub mod frame;
pub mod input;
pub mod motion;
pub mod scan;
pub mod simulation;
pub mod telemetry;
pub mod trail;

pub use autopilot::{Autopilot, AutopilotSession, Steering};
pub use clock::{Clock, ManualClock, SystemClock};
pub use dossier_cache::DossierCache;
pub use frame::{Frame, PlanetView, ScanEntry, ScanOverlay};
pub use input::{Direction, InputState, POINTER_DEAD_ZONE};
pub use motion::{FocalPoint, REFERENCE_ZOOM, zoom_scale};
pub use scan::{ScanEvent, ScanState, ScanTracker, nearest_candidate};
pub use simulation::{STAR_BLINK_INTERVAL_MS, Simulation};
pub use telemetry::{PIXELS_PER_KM, Telemetry};
pub use trail::{Trail, TrailMark};
