//! reelplan-core: the storyboard interaction model.
//!
//! Everything in this crate is UI-independent: the storyboard data model and its
//! timeline queries, the concept disclosure set, the focus state machine, the
//! horizontal-scroll affordance, external clip resolution, and the plan
//! lifecycle that guards the single asynchronous load. The `reelplan` binary
//! drives these types from terminal events and draws them with ratatui.

pub mod clip;
pub mod diagnostics;
pub mod disclosure;
pub mod focus;
pub mod layout;
pub mod model;
pub mod payload;
pub mod plan;
pub mod scroll;
pub mod session;
pub mod timecode;

pub use clip::{ClipPresentation, EmbedReference, Presentation};
pub use disclosure::{ConceptDisclosureState, DisclosureKey};
pub use focus::FocusState;
pub use model::{ClipSource, Segment, SegmentId, Storyboard, Visual, VisualId, VisualKind};
pub use payload::PayloadError;
pub use plan::{CancelFlag, CompletionOutcome, LoadTicket, PlanPhase, PlanState};
pub use scroll::{ScrollAffordance, ScrollDirection, ScrollGeometry, ScrollOptions};
pub use session::{SessionMsg, StoryboardSession};
pub use timecode::{RangeSeparator, TimeCodeError, TimeRange};
