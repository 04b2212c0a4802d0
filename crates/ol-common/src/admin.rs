//! Admin edit form and list view description for layer records.
//!
//! Everything here is static data handed to whichever form renderer the CMS
//! uses. The only behaviour is building list rows, which needs the owning
//! map title from the repository.

use serde::Serialize;

use crate::{Layer, LayerField, LayerRepository, LayerResult, LayerType};

/// Sort applied to list views.
pub const DEFAULT_SORT: &str = "Title ASC";

/// Column headers of the list view, in display order.
pub const SUMMARY_FIELDS: [&str; 8] = [
    "Title",
    "ogc_name",
    "Type",
    "Enabled",
    "Visible",
    "Queryable",
    "ogc_transparent",
    "Map.Title",
];

/// Human labels overriding the column names.
pub const FIELD_LABELS: [(&str, &str); 5] = [
    ("Type", "OGC API"),
    ("ogc_name", "OGC Layer Name"),
    ("ogc_map", "Map-filename"),
    ("ogc_transparent", "Transparency"),
    ("Map.Title", "Map Name"),
];

/// Label for a list column or form field, falling back to the name itself.
pub fn field_label(name: &str) -> &str {
    FIELD_LABELS
        .iter()
        .find(|(field, _)| *field == name)
        .map_or(name, |(_, label)| *label)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FieldWidget {
    Text,
    Numeric,
    Checkbox,
    Dropdown { options: Vec<String> },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormField {
    pub name: &'static str,
    pub label: &'static str,
    pub widget: FieldWidget,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<&'static str>,
}

impl FormField {
    fn new(field: LayerField, label: &'static str, widget: FieldWidget) -> Self {
        Self {
            name: field.column(),
            label,
            widget,
            hint: None,
        }
    }

    fn hint(mut self, hint: &'static str) -> Self {
        self.hint = Some(hint);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormPanel {
    pub title: &'static str,
    pub fields: Vec<FormField>,
}

/// The layer edit form: a heading over three grouped panels.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormSchema {
    pub heading: &'static str,
    pub panels: Vec<FormPanel>,
}

impl FormSchema {
    pub fn layer_form() -> Self {
        let type_options = LayerType::DECLARED.iter().map(|t| t.to_string()).collect();

        Self {
            heading: "Layer Settings",
            panels: vec![
                FormPanel {
                    title: "URL Server Settings",
                    fields: vec![
                        FormField::new(LayerField::Url, "URL", FieldWidget::Text),
                        FormField::new(LayerField::OgcMap, "Map filename", FieldWidget::Text)
                            .hint("Optional: Path to UMN Mapserver Mapfile"),
                    ],
                },
                FormPanel {
                    title: "Display Settings",
                    fields: vec![
                        FormField::new(LayerField::DisplayPriority, "Draw Priority", FieldWidget::Numeric),
                        FormField::new(LayerField::Enabled, "Enabled", FieldWidget::Checkbox),
                        FormField::new(LayerField::Visible, "Visible", FieldWidget::Checkbox),
                        FormField::new(LayerField::Queryable, "Queryable", FieldWidget::Checkbox),
                    ],
                },
                FormPanel {
                    title: "OGC Settings",
                    fields: vec![
                        FormField::new(LayerField::OgcName, "Layer Name", FieldWidget::Text)
                            .hint("(as defined in GetCapabilities)"),
                        FormField::new(
                            LayerField::Type,
                            field_label("Type"),
                            FieldWidget::Dropdown { options: type_options },
                        ),
                        FormField::new(LayerField::OgcTransparent, "Transparency", FieldWidget::Checkbox),
                    ],
                },
            ],
        }
    }

    /// Every editable column, in form order.
    pub fn field_names(&self) -> Vec<&'static str> {
        self.panels
            .iter()
            .flat_map(|p| p.fields.iter().map(|f| f.name))
            .collect()
    }
}

/// One row of the layer list view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayerSummary {
    pub title: String,
    pub ogc_name: String,
    pub layer_type: String,
    pub enabled: bool,
    pub visible: bool,
    pub queryable: bool,
    pub ogc_transparent: bool,
    pub map_title: Option<String>,
}

impl LayerSummary {
    pub fn new(layer: &Layer, map_title: Option<String>) -> Self {
        Self {
            title: layer.title.clone(),
            ogc_name: layer.ogc_name.clone(),
            layer_type: layer.layer_type.to_string(),
            enabled: layer.enabled,
            visible: layer.visible,
            queryable: layer.queryable,
            ogc_transparent: layer.ogc_transparent,
            map_title,
        }
    }

    /// Cells in [`SUMMARY_FIELDS`] order.
    pub fn cells(&self) -> Vec<String> {
        vec![
            self.title.clone(),
            self.ogc_name.clone(),
            self.layer_type.clone(),
            self.enabled.to_string(),
            self.visible.to_string(),
            self.queryable.to_string(),
            self.ogc_transparent.to_string(),
            self.map_title.clone().unwrap_or_default(),
        ]
    }
}

/// List view rows for every stored layer, in default sort order.
pub async fn summary_rows(repo: &dyn LayerRepository) -> LayerResult<Vec<LayerSummary>> {
    let mut rows = Vec::new();
    for layer in repo.layers().await? {
        let map_title = match layer.map_id {
            Some(map_id) => Some(repo.map(map_id).await?.title),
            None => None,
        };
        rows.push(LayerSummary::new(&layer, map_title));
    }
    Ok(rows)
}
