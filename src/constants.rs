pub const WINDOW_WIDTH: i32 = 1280;            // Demo window width
pub const WINDOW_HEIGHT: i32 = 240;            // Demo window height
pub const FPS: u32 = 60;                       // Frames per second
pub const FRAME_TIME: f32 = 1.0 / FPS as f32;  // Time per frame (seconds)

pub const DEFAULT_SPEED_PX_PER_SEC: f32 = 100.0; // Base strip speed (pixels/second)
pub const DEFAULT_SNAP_INCREMENT: f32 = 1.0;     // Percent rounding for authored positions

pub const SCROLL_FACTOR: f32 = 2.5;            // Base rate factor per velocity sample
pub const KICK_MULTIPLIER: f32 = 2.5;          // Kick rate = factor * multiplier
pub const SETTLE_DIVISOR: f32 = 2.5;           // Cruise rate = factor / divisor
pub const KICK_DURATION: f32 = 0.2;            // Ramp-up toward the kick rate (seconds)
pub const HOLD_DELAY: f32 = 0.3;               // Plateau at the kick rate (seconds)
pub const SETTLE_DURATION: f32 = 1.0;          // Decay back to cruise rate (seconds)
