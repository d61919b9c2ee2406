/// Views: pure functions from session state to what the central panel shows.
///
/// ```text
///   AppState ──► route ──► Page::{UploadPrompt | LoadFailed | Home
///                                 | Explore | Model | Predict}
/// ```
///
/// `route` runs every frame. The regression fit is cached in [`AppState`] and
/// only recomputed when the dataset changes.

pub mod explore;
pub mod modeling;
pub mod predict;

use std::fmt;

use crate::error::{LoadError, ViewError};
use crate::state::AppState;

use explore::ExplorationReport;
use modeling::ModelReport;

// ---------------------------------------------------------------------------
// Menu selection
// ---------------------------------------------------------------------------

/// The four sidebar pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Selection {
    #[default]
    Home,
    Explore,
    Model,
    Predict,
}

impl Selection {
    pub const ALL: [Selection; 4] = [
        Selection::Home,
        Selection::Explore,
        Selection::Model,
        Selection::Predict,
    ];

    /// Sidebar label.
    pub fn label(self) -> &'static str {
        match self {
            Selection::Home => "Home",
            Selection::Explore => "Eksplorasi Data",
            Selection::Model => "Pemodelan",
            Selection::Predict => "Prediksi",
        }
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// Routed page
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum Page {
    /// No dataset yet, whatever the selection.
    UploadPrompt,
    /// The last upload could not be parsed; no view runs.
    LoadFailed(LoadError),
    Home,
    Explore(Box<ExplorationReport>),
    Model(Result<ModelReport, ViewError>),
    /// The form itself lives in the session state; the fit runs on submit.
    Predict,
}

/// Dispatch the current selection to its view.
pub fn route(state: &AppState) -> Page {
    if let Some(err) = &state.load_error {
        return Page::LoadFailed(err.clone());
    }
    let Some(dataset) = &state.dataset else {
        return Page::UploadPrompt;
    };
    match state.selection {
        Selection::Home => Page::Home,
        Selection::Explore => Page::Explore(Box::new(explore::explore(
            dataset,
            state.selected_column.as_deref(),
            state.config.head_rows,
        ))),
        Selection::Model => Page::Model(match state.model_report() {
            Some(report) => report.clone(),
            None => modeling::model(dataset, &state.config),
        }),
        Selection::Predict => Page::Predict,
    }
}
