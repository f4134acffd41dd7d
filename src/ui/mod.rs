//! Page state that is independent of how it gets rendered.

pub mod scroll_spy;
pub mod stage_cycle;

pub use scroll_spy::{ScrollSpy, SectionBounds, section_for};
pub use stage_cycle::{StageCycle, StageTicker};
