//! Object and tool kinds.
//!
//! A pattern document is built from construction tools. Each tool has a
//! category, and the category decides how the tool is named and described
//! in the dependency tree. All of that per-category knowledge lives here
//! so that the tree index never has to look at tool categories itself.

use serde::{Deserialize, Serialize};

/// The construction tool that produced an object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolKind {
    BasePoint,
    EndLine,
    AlongLine,
    ShoulderPoint,
    Normal,
    Bisector,
    LineIntersect,
    Spline,
    CubicBezier,
    Arc,
    ArcWithLength,
    ParallelCurve,
    GraduatedCurve,
    SplinePath,
    CubicBezierPath,
    PointOfContact,
    Height,
    Triangle,
    PointOfIntersection,
    CutArc,
    CutSpline,
    CutSplinePath,
    LineIntersectAxis,
    CurveIntersectAxis,
    PointOfIntersectionArcs,
    PointOfIntersectionCircles,
    PointOfIntersectionCurves,
    PointFromCircleAndTangent,
    PointFromArcAndTangent,
    EllipticalArc,
    EllipticalArcWithLength,

    /// Line connecting two points.
    Line,

    // Operations
    TrueDarts,
    Rotation,
    FlippingByLine,
    FlippingByAxis,
    Move,

    /// Any tool without a dedicated label.
    Other,
}

impl ToolKind {
    /// Returns true for tools whose name is the name of the object they produce.
    pub fn is_geometric(&self) -> bool {
        !matches!(
            self,
            Self::Line
                | Self::TrueDarts
                | Self::Rotation
                | Self::FlippingByLine
                | Self::FlippingByAxis
                | Self::Move
                | Self::Other
        )
    }

    /// Label of an operation tool.
    pub fn operation_label(&self) -> Option<&'static str> {
        match self {
            Self::TrueDarts => Some("True darts"),
            Self::Rotation => Some("Rotation"),
            Self::FlippingByLine => Some("Flipping by line"),
            Self::FlippingByAxis => Some("Flipping by axis"),
            Self::Move => Some("Move"),
            _ => None,
        }
    }

    /// Human-readable description of the tool category.
    pub fn description(&self) -> Option<&'static str> {
        let text = match self {
            Self::BasePoint => "Base point",
            Self::EndLine => "Point at distance and angle",
            Self::AlongLine => "Point along line",
            Self::ShoulderPoint => "Shoulder point",
            Self::Normal => "Point along perpendicular",
            Self::Bisector => "Bisector",
            Self::LineIntersect => "Point at line intersection",
            Self::Spline | Self::CubicBezier => "Spline",
            Self::Arc => "Arc",
            Self::ArcWithLength | Self::EllipticalArcWithLength => {
                "Elliptical arc with given length"
            }
            Self::ParallelCurve => "Parallel curve",
            Self::GraduatedCurve => "Graduated curve",
            Self::SplinePath | Self::CubicBezierPath => "Spline path",
            Self::PointOfContact => "Point of intersection circle and segment",
            Self::Height => "Perpendicular point along line",
            Self::Triangle => {
                "Point located at the triangle's right-angled corner, lying along the axis"
            }
            Self::PointOfIntersection => "Point from X and Y of two other points",
            Self::CutArc => "Point segmenting an arc",
            Self::CutSpline => "Point segmenting a spline",
            Self::CutSplinePath => "Point segmenting a spline path",
            Self::LineIntersectAxis => "Point of intersection line and axis",
            Self::CurveIntersectAxis => "Point of intersection curve and axis",
            Self::PointOfIntersectionArcs => "Point of intersection arcs",
            Self::PointOfIntersectionCircles => "Point of intersection circles",
            Self::PointOfIntersectionCurves => "Point of intersection curves",
            Self::PointFromCircleAndTangent => "Point from circle and tangent",
            Self::PointFromArcAndTangent => "Point from arc and tangent",
            Self::EllipticalArc => "Elliptical arc",
            Self::Line => "Line connecting two points",
            Self::TrueDarts
            | Self::Rotation
            | Self::FlippingByLine
            | Self::FlippingByAxis
            | Self::Move
            | Self::Other => return None,
        };
        Some(text)
    }
}

/// What a vertex of the pattern document represents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ObjectKind {
    /// A finished pattern piece.
    Piece { name: String },

    /// A geometric object (point, curve, ...).
    Object {
        name: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        alias: Option<String>,
    },

    /// A construction tool.
    Tool {
        tool: ToolKind,
        /// Name of the object the tool produces.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        name: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        alias: Option<String>,
        /// End point names, for line tools.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        points: Option<[String; 2]>,
    },

    /// Internal modeling tool copied into a piece. Never shown directly.
    ModelingTool,

    /// Internal modeling object copied into a piece. Never shown directly.
    ModelingObject,
}

impl ObjectKind {
    /// Modeling vertices are replaced by the pieces that use them.
    pub fn is_modeling(&self) -> bool {
        matches!(self, Self::ModelingTool | Self::ModelingObject)
    }

    pub fn is_piece(&self) -> bool {
        matches!(self, Self::Piece { .. })
    }

    /// Resolves the display name, or `None` when the kind has nothing to offer.
    pub fn display_name(&self) -> Option<String> {
        match self {
            Self::Piece { name } => Some(name.clone()),
            Self::Object { name, alias } => Some(format_object_name(name, alias.as_deref())),
            Self::Tool {
                tool: ToolKind::Line,
                points: Some([first, second]),
                ..
            } => Some(format!("Line_{}_{}", first, second)),
            Self::Tool {
                tool,
                name: Some(name),
                alias,
                ..
            } if tool.is_geometric() => Some(format_object_name(name, alias.as_deref())),
            Self::Tool { tool, .. } => tool.operation_label().map(str::to_string),
            Self::ModelingTool | Self::ModelingObject => None,
        }
    }

    /// Resolves the tooltip; empty when the kind has no description.
    pub fn tooltip(&self) -> String {
        match self {
            Self::Piece { name } => format!("Piece '{}'", name),
            Self::Tool { tool, .. } => tool.description().unwrap_or_default().to_string(),
            _ => String::new(),
        }
    }
}

/// Formats an object name with its optional alias: `A1 (waist)`.
pub fn format_object_name(name: &str, alias: Option<&str>) -> String {
    match alias {
        Some(alias) if !alias.is_empty() => format!("{} ({})", name, alias),
        _ => name.to_string(),
    }
}
