// src/extract/mod.rs
pub mod error;
pub mod export;
pub mod pipeline;
pub mod plot;
pub mod reduce;
pub mod response;
pub mod session;
pub mod signals;
pub mod stimulus;
pub mod table;
pub mod window;
pub use error::ExtractError;
pub use export::{write_binned_csv, ConditionSummary, ExtractionSummary};
pub use pipeline::{
    extract_natural_scenes, extract_natural_scenes_dff, extract_spontaneous,
    extract_static_gratings, SceneResponses,
};
pub use plot::{render_condition_responses_png, PlotStyle};
pub use reduce::{Binned, Segments, TrialShape};
pub use response::{condition_responses, per_cell_response, ConditionResponse};
pub use session::{InMemorySession, Session, SessionFile};
pub use signals::SessionSignals;
pub use stimulus::{GratingKey, GratingTrial, Interval, SceneTrial, Spontaneous, SCENE_WINDOW_SAMPLES};
pub use table::{ConditionTable, Extraction, SignalTables};
pub use window::TrialWindow;
