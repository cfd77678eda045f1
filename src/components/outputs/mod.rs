//! Output toggles and volume control for the player dropdown.
//!
//! The functions here turn server responses into view state and user intent
//! into API requests. The components in the submodules render that state and
//! send the requests.

mod attributes;
mod panel;
mod volume;

pub use attributes::OutputAttributesModal;
pub use panel::OutputsPanel;
pub use volume::{use_volume_refresh, VolumeControl, VolumeSignal};

use crate::api::{ApiError, ApiRequest, Method, OutputList};
use serde_json::json;
use std::collections::BTreeMap;

/// Plugin name of the placeholder output MPD creates when none is configured.
pub const DUMMY_PLUGIN: &str = "dummy";
const FALLBACK_OUTPUT_ICON: &str = "volume_up";
const DEFAULT_LIGATURE_KEY: &str = "default";

/// A rendered output toggle button.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputButton {
    pub id: u32,
    pub name: String,
    pub plugin: String,
    pub icon: String,
    pub title: String,
    pub settings_title: &'static str,
    pub attributes: BTreeMap<String, String>,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum OutputsPanelState {
    #[default]
    Loading,
    Error(String),
    Empty,
    Outputs(Vec<OutputButton>),
}

pub fn output_icon(plugin: &str, ligatures: &BTreeMap<String, String>) -> String {
    ligatures
        .get(plugin)
        .or_else(|| ligatures.get(DEFAULT_LIGATURE_KEY))
        .cloned()
        .unwrap_or_else(|| FALLBACK_OUTPUT_ICON.to_string())
}

pub fn parse_outputs(
    response: Result<OutputList, ApiError>,
    ligatures: &BTreeMap<String, String>,
) -> OutputsPanelState {
    let list = match response {
        Ok(list) => list,
        Err(err) => return OutputsPanelState::Error(err.to_string()),
    };
    if list.num_outputs == 0 {
        return OutputsPanelState::Empty;
    }

    let buttons = list
        .data
        .into_iter()
        .filter(|output| output.plugin != DUMMY_PLUGIN)
        .map(|output| OutputButton {
            icon: output_icon(&output.plugin, ligatures),
            title: format!("Plugin: {}", output.plugin),
            settings_title: if output.attributes.is_empty() {
                "Show attributes"
            } else {
                "Edit attributes"
            },
            active: output.is_enabled(),
            id: output.id,
            name: output.name,
            plugin: output.plugin,
            attributes: output.attributes,
        })
        .collect();

    OutputsPanelState::Outputs(buttons)
}

/// Request that switches the output to the opposite of its shown state.
pub fn toggle_output(button: &OutputButton) -> ApiRequest {
    ApiRequest::new(
        Method::PlayerOutputToggle,
        json!({
            "outputId": button.id,
            "state": if button.active { 0 } else { 1 },
        }),
    )
}

/// Flips the shown state right away; the server reply is not awaited and a
/// failed toggle is not rolled back.
pub fn flip_output(state: &mut OutputsPanelState, output_id: u32) {
    if let OutputsPanelState::Outputs(buttons) = state {
        if let Some(button) = buttons.iter_mut().find(|b| b.id == output_id) {
            button.active = !button.active;
        }
    }
}

pub fn set_output_attributes(output_id: u32, attributes: &BTreeMap<String, String>) -> ApiRequest {
    ApiRequest::new(
        Method::PlayerOutputAttributesSet,
        json!({
            "outputId": output_id,
            "attributes": attributes,
        }),
    )
}

/// CSS max-height for the output list so the dropup never extends above the
/// viewport. `anchor_y` is the viewport Y of the dropdown anchor.
pub fn dropup_max_height(list_height: f64, anchor_y: f64) -> String {
    if anchor_y < 0.0 {
        format!("{}px", (list_height + anchor_y).max(0.0).round())
    } else {
        "none".to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VolumeState {
    #[default]
    Unknown,
    Disabled,
    Enabled { volume: u8 },
}

impl VolumeState {
    pub fn icon(self) -> &'static str {
        match self {
            Self::Enabled { volume } => volume_icon(volume),
            Self::Unknown | Self::Disabled => "volume_off",
        }
    }

    /// Text of the percentage label next to the slider.
    pub fn label(self) -> String {
        match self {
            Self::Enabled { volume } => format!("{volume} %"),
            Self::Disabled => "Volumecontrol disabled".to_string(),
            Self::Unknown => String::new(),
        }
    }

    /// Text under the dropdown icon; cleared when volume control is disabled.
    pub fn menu_label(self) -> String {
        match self {
            Self::Enabled { volume } => format!("{volume}\u{2009}%"),
            Self::Unknown | Self::Disabled => String::new(),
        }
    }

    pub fn slider_visible(self) -> bool {
        matches!(self, Self::Enabled { .. })
    }

    pub fn slider_value(self) -> i32 {
        match self {
            Self::Enabled { volume } => i32::from(volume),
            Self::Unknown | Self::Disabled => -1,
        }
    }
}

/// The daemon reports -1 when the mixer has no volume control.
pub fn parse_volume(volume: i32) -> VolumeState {
    if volume < 0 {
        VolumeState::Disabled
    } else {
        VolumeState::Enabled {
            volume: volume.min(100) as u8,
        }
    }
}

pub fn volume_icon(volume: u8) -> &'static str {
    match volume {
        0 => "volume_off",
        1..=49 => "volume_down",
        _ => "volume_up",
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VolumeDirection {
    Up,
    Down,
}

pub fn volume_step(direction: VolumeDirection, step: u32) -> ApiRequest {
    let step = i64::from(step);
    let delta = match direction {
        VolumeDirection::Up => step,
        VolumeDirection::Down => -step,
    };
    ApiRequest::new(Method::PlayerVolumeChange, json!({ "volume": delta }))
}

pub fn set_volume(value: i32) -> ApiRequest {
    ApiRequest::new(Method::PlayerVolumeSet, json!({ "volume": value }))
}
