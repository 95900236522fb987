// Widget placement domain model
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// Widget kind selected by `componentType`.
///
/// Unknown kinds found in stored documents load as `Custom` so older or
/// foreign documents stay readable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WidgetKind {
    Chart,
    Table,
    Card,
    #[serde(other)]
    Custom,
}

impl WidgetKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Chart => "chart",
            Self::Table => "table",
            Self::Card => "card",
            Self::Custom => "custom",
        }
    }

    /// Default (w, h) for a freshly added widget of this kind
    pub fn default_size(&self) -> (u32, u32) {
        match self {
            Self::Card => (3, 2),
            Self::Chart | Self::Table | Self::Custom => (6, 4),
        }
    }
}

impl fmt::Display for WidgetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WidgetKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "chart" => Ok(Self::Chart),
            "table" => Ok(Self::Table),
            "card" | "metric" => Ok(Self::Card),
            "custom" => Ok(Self::Custom),
            other => Err(format!(
                "unknown widget kind '{}' (expected chart, table, card or custom)",
                other
            )),
        }
    }
}

/// One positioned, sized widget on a tab's grid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetPlacement {
    pub i: String,
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_w: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_h: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_w: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_h: Option<u32>,
    /// Locked placements ignore drag and resize
    #[serde(rename = "static", default, skip_serializing_if = "is_false")]
    pub locked: bool,
    pub component_type: WidgetKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component_props: Option<Map<String, Value>>,
}

fn is_false(value: &bool) -> bool {
    !*value
}

/// Geometry reported by the grid layout engine for one placement
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutPosition {
    pub i: String,
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

impl WidgetPlacement {
    /// New placement at the origin with the kind's default size and an empty property bag
    pub fn new(id: String, kind: WidgetKind) -> Self {
        let (w, h) = kind.default_size();
        Self {
            i: id,
            x: 0,
            y: 0,
            w,
            h,
            min_w: None,
            min_h: None,
            max_w: None,
            max_h: None,
            locked: false,
            component_type: kind,
            component_props: Some(Map::new()),
        }
    }

    /// Shorthand used by the template catalog
    pub fn at(id: &str, x: u32, y: u32, w: u32, h: u32, kind: WidgetKind) -> Self {
        Self {
            i: id.to_string(),
            x,
            y,
            w,
            h,
            min_w: None,
            min_h: None,
            max_w: None,
            max_h: None,
            locked: false,
            component_type: kind,
            component_props: None,
        }
    }

    /// Apply a reported geometry, keeping size within declared bounds.
    /// Returns false when the placement is locked and nothing changed.
    pub fn apply_geometry(&mut self, x: u32, y: u32, w: u32, h: u32) -> bool {
        if self.locked {
            return false;
        }
        self.x = x;
        self.y = y;
        self.w = clamp_dimension(w, self.min_w, self.max_w);
        self.h = clamp_dimension(h, self.min_h, self.max_h);
        true
    }
}

impl From<&LayoutPosition> for WidgetPlacement {
    /// Placement for a layout entry that matched no existing widget
    fn from(position: &LayoutPosition) -> Self {
        Self::at(
            &position.i,
            position.x,
            position.y,
            clamp_dimension(position.w, None, None),
            clamp_dimension(position.h, None, None),
            WidgetKind::Custom,
        )
    }
}

fn clamp_dimension(value: u32, min: Option<u32>, max: Option<u32>) -> u32 {
    let mut value = value.max(1);
    if let Some(min) = min {
        value = value.max(min);
    }
    if let Some(max) = max {
        value = value.min(max.max(1));
    }
    value
}
