//! View tags and their typed inputs.
//!
//! The route table never renders anything. It names a view with a closed
//! enum and hands the view layer whatever inputs were forwarded from the
//! path.

use std::collections::BTreeMap;
use std::fmt;
use serde::{Deserialize, Serialize};

use crate::routing::ResolveError;

/// One variant per view known to the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum View {
    /// Landing page.
    Home,
    /// Form for creating a new soil moisture request.
    CreateRequest,
    /// Listing of soil moisture records.
    RecordList,
    /// Form for editing an existing request, keyed by `id`.
    EditRequest,
}

impl View {
    pub fn as_str(&self) -> &'static str {
        match self {
            View::Home => "home",
            View::CreateRequest => "create-request",
            View::RecordList => "record-list",
            View::EditRequest => "edit-request",
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A view together with the inputs it is mounted with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "view", rename_all = "kebab-case")]
pub enum Screen {
    Home,
    CreateRequest,
    RecordList,
    EditRequest { id: String },
}

impl Screen {
    /// Build the screen for `view` from the forwarded props.
    pub fn from_props(view: View, props: &BTreeMap<String, String>) -> Result<Self, ResolveError> {
        let screen = match view {
            View::Home => Screen::Home,
            View::CreateRequest => Screen::CreateRequest,
            View::RecordList => Screen::RecordList,
            View::EditRequest => {
                let id = props.get("id").ok_or_else(|| ResolveError::MissingProp {
                    view,
                    name: "id".to_string(),
                })?;
                Screen::EditRequest { id: id.clone() }
            }
        };
        Ok(screen)
    }

    pub fn view(&self) -> View {
        match self {
            Screen::Home => View::Home,
            Screen::CreateRequest => View::CreateRequest,
            Screen::RecordList => View::RecordList,
            Screen::EditRequest { .. } => View::EditRequest,
        }
    }
}
