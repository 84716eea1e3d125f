// Web-side tuning constants for the background renderer and the scroll
// snap controller. Scene recipe constants live in `core/constants.rs`.

// Host page contract
pub const CANVAS_ID: &str = "canvas";
pub const PANEL_SELECTOR: &str = ".panel";
pub const PANELS_EXPORT_NAME: &str = "scrollTriggerPanels";

// Background renderer
pub const CANVAS_RESIZE_DEBOUNCE_MS: i32 = 100; // quiet period before resizing the surface

// Responsive mode
pub const MOBILE_BREAKPOINT_PX: f64 = 768.0; // widths at or below this are "mobile"
pub const SCROLL_RESIZE_THROTTLE_MS: i32 = 200;

// Scroll velocity sampling
pub const VELOCITY_SAMPLE_MIN_MS: f64 = 16.0; // ~one frame at 60 Hz
pub const FAST_SCROLL_VELOCITY: f64 = 2.0; // px per ms
pub const SCROLL_STOP_RESET_MS: i32 = 300; // idle time before the accumulator resets

// Edge clamping
pub const BOUNDARY_MARGIN_PX: f64 = 10.0;

// Snap heuristic (progress units, 0..1 over the whole page)
pub const SNAP_THRESHOLD: f64 = 0.35; // accumulated progress required before snapping
pub const SNAP_MIN_SECTION_CHANGE: f64 = 0.1; // snapped target must differ this much

// Snap animation
pub const SNAP_DURATION_MIN_SEC: f64 = 0.8;
pub const SNAP_DURATION_MAX_SEC: f64 = 1.5;
pub const SNAP_DELAY_SEC: f64 = 0.8;
pub const SNAP_EASE: &str = "power2.inOut";
