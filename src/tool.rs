use serde::{Deserialize, Serialize};

/// Drawing modes offered by the palette, in palette order.
///
/// `Rectangle` is the safe default the controller falls back to on cancel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tool {
    #[default]
    Rectangle,
    Ellipse,
    Line,
    Text,
    Arrow,
    Pen,
    Cut,
}

impl Tool {
    pub const ALL: [Tool; 7] = [
        Tool::Rectangle,
        Tool::Ellipse,
        Tool::Line,
        Tool::Text,
        Tool::Arrow,
        Tool::Pen,
        Tool::Cut,
    ];

    /// Human readable name shown in the palette and in notices
    pub fn name(self) -> &'static str {
        match self {
            Tool::Rectangle => "Rectangle",
            Tool::Ellipse => "Circle",
            Tool::Line => "Line",
            Tool::Text => "Text",
            Tool::Arrow => "Arrow",
            Tool::Pen => "Pen",
            Tool::Cut => "Cut",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Tool::Rectangle => "▭",
            Tool::Ellipse => "◯",
            Tool::Line => "╱",
            Tool::Text => "T",
            Tool::Arrow => "➚",
            Tool::Pen => "✏",
            Tool::Cut => "✂",
        }
    }

    /// Tools whose gesture is a start point dragged to an end point
    pub fn is_two_point_shape(self) -> bool {
        matches!(
            self,
            Tool::Rectangle | Tool::Ellipse | Tool::Line | Tool::Arrow
        )
    }

    /// Lines, arrows and freehand strokes are drawn with round caps
    pub fn uses_round_caps(self) -> bool {
        matches!(self, Tool::Line | Tool::Arrow | Tool::Pen)
    }
}

impl std::fmt::Display for Tool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_box_and_segment_tools_are_two_point_shapes() {
        let two_point: Vec<Tool> = Tool::ALL
            .into_iter()
            .filter(|t| t.is_two_point_shape())
            .collect();
        assert_eq!(
            two_point,
            vec![Tool::Rectangle, Tool::Ellipse, Tool::Line, Tool::Arrow]
        );
    }

    #[test]
    fn test_ellipse_is_labelled_circle() {
        assert_eq!(Tool::Ellipse.to_string(), "Circle");
        assert_eq!(Tool::default(), Tool::Rectangle);
    }
}
