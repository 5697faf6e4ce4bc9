pub mod geometry;
pub mod model;
pub mod spin;
pub mod theme;
pub mod view;

pub use geometry::{ArcPath, LabelPlacement, PathCommand, Point};
pub use model::{
    OptionId, OptionText, SharedWheel, SpinPhase, SpinState, ValidationError, WheelError,
    WheelOption, WheelStore,
};
pub use spin::{SpinError, SpinResult, calculate_spin};
pub use theme::{DEFAULT_PALETTE, LabelTone};
pub use view::{WheelSegment, render_svg};

pub const MIN_SPIN_MEMBERS: usize = 2;
pub const MAX_WHEEL_MEMBERS: usize = 12; // one per palette colour
pub const MAX_OPTION_CHARS: usize = 50;
pub const LABEL_MAX_CHARS: usize = 12; // longer labels get an ellipsis when drawn
pub const LABEL_RADIUS_FACTOR: f64 = 0.65;
// keeps the rounded landing angle inside a 12-way segment
pub const MAX_JITTER_FRACTION: f64 = 0.4;
