//! Layout fields and directives.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardSize {
    Small,
    #[default]
    Medium,
    Large,
    Adaptive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GridColumns {
    #[default]
    #[serde(rename = "auto")]
    Auto,
    #[serde(rename = "2")]
    Two,
    #[serde(rename = "3")]
    Three,
    #[serde(rename = "4")]
    Four,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Custom,
    Alphabetical,
    Progress,
    Recent,
    Personalized,
}

/// The adaptable layout of the learning dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutPreferences {
    pub card_size: CardSize,
    pub grid_columns: GridColumns,
    pub sort_order: SortOrder,
    pub show_progress: bool,
    pub show_thumbnails: bool,
    pub compact_mode: bool,
    pub sidebar_collapsed: bool,
}

impl Default for LayoutPreferences {
    fn default() -> Self {
        Self {
            card_size: CardSize::Medium,
            grid_columns: GridColumns::Auto,
            sort_order: SortOrder::Custom,
            show_progress: true,
            show_thumbnails: true,
            compact_mode: false,
            sidebar_collapsed: false,
        }
    }
}

impl LayoutPreferences {
    pub fn apply(&mut self, directive: LayoutDirective) {
        match directive {
            LayoutDirective::CardSize(v) => self.card_size = v,
            LayoutDirective::GridColumns(v) => self.grid_columns = v,
            LayoutDirective::SortOrder(v) => self.sort_order = v,
            LayoutDirective::ShowProgress(v) => self.show_progress = v,
            LayoutDirective::ShowThumbnails(v) => self.show_thumbnails = v,
            LayoutDirective::CompactMode(v) => self.compact_mode = v,
            LayoutDirective::SidebarCollapsed(v) => self.sidebar_collapsed = v,
        }
    }

    /// Current value of a field as a directive.
    pub fn current(&self, field: LayoutField) -> LayoutDirective {
        match field {
            LayoutField::CardSize => LayoutDirective::CardSize(self.card_size),
            LayoutField::GridColumns => LayoutDirective::GridColumns(self.grid_columns),
            LayoutField::SortOrder => LayoutDirective::SortOrder(self.sort_order),
            LayoutField::ShowProgress => LayoutDirective::ShowProgress(self.show_progress),
            LayoutField::ShowThumbnails => LayoutDirective::ShowThumbnails(self.show_thumbnails),
            LayoutField::CompactMode => LayoutDirective::CompactMode(self.compact_mode),
            LayoutField::SidebarCollapsed => {
                LayoutDirective::SidebarCollapsed(self.sidebar_collapsed)
            }
        }
    }
}

/// Name of a single layout field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LayoutField {
    CardSize,
    GridColumns,
    SortOrder,
    ShowProgress,
    ShowThumbnails,
    CompactMode,
    SidebarCollapsed,
}

impl LayoutField {
    pub const ALL: [LayoutField; 7] = [
        LayoutField::CardSize,
        LayoutField::GridColumns,
        LayoutField::SortOrder,
        LayoutField::ShowProgress,
        LayoutField::ShowThumbnails,
        LayoutField::CompactMode,
        LayoutField::SidebarCollapsed,
    ];
}

impl fmt::Display for LayoutField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LayoutField::CardSize => "cardSize",
            LayoutField::GridColumns => "gridColumns",
            LayoutField::SortOrder => "sortOrder",
            LayoutField::ShowProgress => "showProgress",
            LayoutField::ShowThumbnails => "showThumbnails",
            LayoutField::CompactMode => "compactMode",
            LayoutField::SidebarCollapsed => "sidebarCollapsed",
        };
        write!(f, "{}", s)
    }
}

/// A value to set on one layout field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "camelCase")]
pub enum LayoutDirective {
    CardSize(CardSize),
    GridColumns(GridColumns),
    SortOrder(SortOrder),
    ShowProgress(bool),
    ShowThumbnails(bool),
    CompactMode(bool),
    SidebarCollapsed(bool),
}

impl LayoutDirective {
    pub fn field(&self) -> LayoutField {
        match self {
            LayoutDirective::CardSize(_) => LayoutField::CardSize,
            LayoutDirective::GridColumns(_) => LayoutField::GridColumns,
            LayoutDirective::SortOrder(_) => LayoutField::SortOrder,
            LayoutDirective::ShowProgress(_) => LayoutField::ShowProgress,
            LayoutDirective::ShowThumbnails(_) => LayoutField::ShowThumbnails,
            LayoutDirective::CompactMode(_) => LayoutField::CompactMode,
            LayoutDirective::SidebarCollapsed(_) => LayoutField::SidebarCollapsed,
        }
    }
}

/// Partial layout update from a user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct LayoutPatch {
    #[serde(default)]
    pub card_size: Option<CardSize>,
    #[serde(default)]
    pub grid_columns: Option<GridColumns>,
    #[serde(default)]
    pub sort_order: Option<SortOrder>,
    #[serde(default)]
    pub show_progress: Option<bool>,
    #[serde(default)]
    pub show_thumbnails: Option<bool>,
    #[serde(default)]
    pub compact_mode: Option<bool>,
    #[serde(default)]
    pub sidebar_collapsed: Option<bool>,
}

impl LayoutPatch {
    pub fn directives(&self) -> Vec<LayoutDirective> {
        [
            self.card_size.map(LayoutDirective::CardSize),
            self.grid_columns.map(LayoutDirective::GridColumns),
            self.sort_order.map(LayoutDirective::SortOrder),
            self.show_progress.map(LayoutDirective::ShowProgress),
            self.show_thumbnails.map(LayoutDirective::ShowThumbnails),
            self.compact_mode.map(LayoutDirective::CompactMode),
            self.sidebar_collapsed.map(LayoutDirective::SidebarCollapsed),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.directives().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_dashboard_defaults() {
        let layout = LayoutPreferences::default();
        assert_eq!(layout.card_size, CardSize::Medium);
        assert_eq!(layout.grid_columns, GridColumns::Auto);
        assert_eq!(layout.sort_order, SortOrder::Custom);
        assert!(layout.show_progress && layout.show_thumbnails);
        assert!(!layout.compact_mode && !layout.sidebar_collapsed);
    }

    #[test]
    fn apply_then_current_round_trips_every_field() {
        let mut layout = LayoutPreferences::default();
        let directives = [
            LayoutDirective::CardSize(CardSize::Large),
            LayoutDirective::GridColumns(GridColumns::Four),
            LayoutDirective::SortOrder(SortOrder::Personalized),
            LayoutDirective::ShowProgress(false),
            LayoutDirective::ShowThumbnails(false),
            LayoutDirective::CompactMode(true),
            LayoutDirective::SidebarCollapsed(true),
        ];
        for d in directives {
            layout.apply(d);
            assert_eq!(layout.current(d.field()), d);
        }
    }

    #[test]
    fn grid_columns_serialize_as_strings() {
        assert_eq!(serde_json::to_string(&GridColumns::Three).unwrap(), "\"3\"");
        assert_eq!(serde_json::from_str::<GridColumns>("\"auto\"").unwrap(), GridColumns::Auto);
    }

    #[test]
    fn directive_wire_form_is_field_and_value() {
        let json = serde_json::to_value(LayoutDirective::CardSize(CardSize::Small)).unwrap();
        assert_eq!(json, serde_json::json!({"field": "cardSize", "value": "small"}));
    }

    #[test]
    fn patch_lists_only_present_fields() {
        let patch: LayoutPatch =
            serde_json::from_str(r#"{"cardSize":"large","compactMode":true}"#).unwrap();
        assert_eq!(
            patch.directives(),
            vec![
                LayoutDirective::CardSize(CardSize::Large),
                LayoutDirective::CompactMode(true)
            ]
        );
        assert!(LayoutPatch::default().is_empty());
    }

    #[test]
    fn patch_rejects_unknown_fields() {
        assert!(serde_json::from_str::<LayoutPatch>(r#"{"fontSize":12}"#).is_err());
    }
}
