//! Declarative UI tree handed to the remote renderer.
//!
//! Every node serializes to a JSON object tagged by `type`. The renderer
//! only knows the node types listed here, so nothing else may be emitted.

use serde::{Deserialize, Serialize};

use crate::action::Action;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum UiSpec {
    Page(Page),
    Card(Card),
    Alert(Alert),
    Row(Row),
    Button(Button),
    DataTable(DataTable),
    Async(AsyncNode),
    Modal(Modal),
    Text(Text),
    StatsGrid(StatsGrid),
    Conditional(Conditional),
}

impl UiSpec {
    /// The `type` tag this node serializes with.
    pub fn kind(&self) -> &'static str {
        match self {
            UiSpec::Page(_) => "Page",
            UiSpec::Card(_) => "Card",
            UiSpec::Alert(_) => "Alert",
            UiSpec::Row(_) => "Row",
            UiSpec::Button(_) => "Button",
            UiSpec::DataTable(_) => "DataTable",
            UiSpec::Async(_) => "Async",
            UiSpec::Modal(_) => "Modal",
            UiSpec::Text(_) => "Text",
            UiSpec::StatsGrid(_) => "StatsGrid",
            UiSpec::Conditional(_) => "Conditional",
        }
    }

    /// Direct child nodes, in order. Actions and row actions count.
    pub fn children(&self) -> Vec<&UiSpec> {
        match self {
            UiSpec::Page(p) => p.actions.iter().chain(p.children.iter()).collect(),
            UiSpec::Card(c) => c.children.iter().collect(),
            UiSpec::Row(r) => r.children.iter().collect(),
            UiSpec::DataTable(t) => t.row_actions.iter().collect(),
            UiSpec::Async(a) => vec![a.render.as_ref()],
            UiSpec::Modal(m) => m.children.iter().collect(),
            UiSpec::Conditional(c) => {
                let mut out = vec![c.then.as_ref()];
                if let Some(otherwise) = &c.otherwise {
                    out.push(otherwise.as_ref());
                }
                out
            }
            UiSpec::Alert(_) | UiSpec::Button(_) | UiSpec::Text(_) | UiSpec::StatsGrid(_) => {
                Vec::new()
            }
        }
    }

    /// Depth-first walk over this node and everything below it.
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a UiSpec)) {
        visit(self);
        for child in self.children() {
            child.walk(&mut *visit);
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Variants
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertVariant {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ButtonVariant {
    Primary,
    Secondary,
    Danger,
    Warning,
    Ghost,
}

impl ButtonVariant {
    /// Parse a configured colour name; unknown names fall back to secondary.
    pub fn from_name(name: &str) -> Self {
        match name {
            "primary" => ButtonVariant::Primary,
            "danger" => ButtonVariant::Danger,
            "warning" => ButtonVariant::Warning,
            "ghost" => ButtonVariant::Ghost,
            _ => ButtonVariant::Secondary,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub actions: Vec<UiSpec>,
    #[serde(default)]
    pub children: Vec<UiSpec>,
}

impl Page {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            actions: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn actions(mut self, actions: Vec<UiSpec>) -> Self {
        self.actions = actions;
        self
    }

    pub fn children(mut self, children: Vec<UiSpec>) -> Self {
        self.children = children;
        self
    }

    pub fn child(mut self, child: impl Into<UiSpec>) -> Self {
        self.children.push(child.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default)]
    pub children: Vec<UiSpec>,
}

impl Card {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            children: Vec::new(),
        }
    }

    pub fn child(mut self, child: impl Into<UiSpec>) -> Self {
        self.children.push(child.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Alert {
    pub variant: AlertVariant,
    pub title: String,
    pub message: String,
}

impl Alert {
    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            variant: AlertVariant::Error,
            title: title.into(),
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Row {
    #[serde(default)]
    pub children: Vec<UiSpec>,
}

impl Row {
    pub fn new(children: Vec<UiSpec>) -> Self {
        Self { children }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Button {
    pub label: String,
    pub variant: ButtonVariant,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    pub on_click: Action,
}

impl Button {
    pub fn new(label: impl Into<String>, variant: ButtonVariant, on_click: impl Into<Action>) -> Self {
        Self {
            label: label.into(),
            variant,
            icon: None,
            on_click: on_click.into(),
        }
    }

    pub fn icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnFormat {
    Text,
    Date,
    Datetime,
    Badge,
    Boolean,
    Roles,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    pub key: String,
    pub label: String,
    pub format: ColumnFormat,
    #[serde(default)]
    pub sortable: bool,
}

impl Column {
    pub fn new(key: impl Into<String>, label: impl Into<String>, format: ColumnFormat) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            format,
            sortable: false,
        }
    }

    pub fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataTable {
    pub endpoint: String,
    pub columns: Vec<Column>,
    pub page_size: u32,
    #[serde(default)]
    pub row_actions: Vec<UiSpec>,
    #[serde(default)]
    pub searchable: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub filters: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub empty_message: Option<String>,
}

impl DataTable {
    pub fn new(endpoint: impl Into<String>, columns: Vec<Column>, page_size: u32) -> Self {
        Self {
            endpoint: endpoint.into(),
            columns,
            page_size,
            row_actions: Vec::new(),
            searchable: false,
            filters: Vec::new(),
            empty_message: None,
        }
    }

    pub fn row_actions(mut self, actions: Vec<UiSpec>) -> Self {
        self.row_actions = actions;
        self
    }

    pub fn searchable(mut self, searchable: bool) -> Self {
        self.searchable = searchable;
        self
    }

    pub fn filters(mut self, filters: Vec<String>) -> Self {
        self.filters = filters;
        self
    }

    pub fn empty_message(mut self, message: impl Into<String>) -> Self {
        self.empty_message = Some(message.into());
        self
    }
}

/// Fetch `endpoint`, then render `render` with the response in scope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AsyncNode {
    pub endpoint: String,
    pub render: Box<UiSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loading: Option<String>,
    /// Seconds between refetches; absent means fetch once.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_interval: Option<u32>,
}

impl AsyncNode {
    pub fn new(endpoint: impl Into<String>, render: impl Into<UiSpec>) -> Self {
        Self {
            endpoint: endpoint.into(),
            render: Box::new(render.into()),
            loading: None,
            refresh_interval: None,
        }
    }

    /// Refetch every `seconds`; zero or negative keeps a single fetch.
    pub fn refresh_every(mut self, seconds: i64) -> Self {
        self.refresh_interval = u32::try_from(seconds).ok().filter(|s| *s > 0);
        self
    }

    pub fn loading(mut self, text: impl Into<String>) -> Self {
        self.loading = Some(text.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Modal {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub children: Vec<UiSpec>,
}

impl Modal {
    pub fn new(id: impl Into<String>, title: impl Into<String>, children: Vec<UiSpec>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            children,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextVariant {
    Body,
    Muted,
    Heading,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Text {
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant: Option<TextVariant>,
}

impl Text {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            variant: None,
        }
    }

    pub fn muted(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            variant: Some(TextVariant::Muted),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatItem {
    pub label: String,
    /// Literal value or a `{field}` reference into the enclosing `Async` data.
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

impl StatItem {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            icon: None,
        }
    }

    pub fn icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsGrid {
    pub stats: Vec<StatItem>,
}

/// Renderer-side branch on a field of the surrounding data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Conditional {
    pub condition: String,
    pub then: Box<UiSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub otherwise: Option<Box<UiSpec>>,
}

impl Conditional {
    pub fn new(condition: impl Into<String>, then: impl Into<UiSpec>) -> Self {
        Self {
            condition: condition.into(),
            then: Box::new(then.into()),
            otherwise: None,
        }
    }

    pub fn otherwise(mut self, node: impl Into<UiSpec>) -> Self {
        self.otherwise = Some(Box::new(node.into()));
        self
    }
}

macro_rules! impl_into_spec {
    ($($variant:ident => $t:ty),* $(,)?) => {
        $(
            impl From<$t> for UiSpec {
                fn from(value: $t) -> Self {
                    UiSpec::$variant(value)
                }
            }
        )*
    };
}

impl_into_spec!(
    Page => Page,
    Card => Card,
    Alert => Alert,
    Row => Row,
    Button => Button,
    DataTable => DataTable,
    Async => AsyncNode,
    Modal => Modal,
    Text => Text,
    StatsGrid => StatsGrid,
    Conditional => Conditional,
);
