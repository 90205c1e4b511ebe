//! Modal state of wall editing.
//!
//! [`DrawMode`] is a pure transition table driven by [`ModeEvent`]s.
//! [`EditMode`] mirrors the editor-wide mode the wall tool listens to.

/// Editor-wide interaction mode, as set through the editor's edit-mode
/// notification.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum EditMode {
    #[default]
    Default,
    Edit,
    LinkConnect,
    LinkJoin,
    Text,
    Stamp,
    FormatPainter,
    DragDrop,
}

impl EditMode {
    /// Whether wall editing survives a switch into this mode.
    pub fn keeps_wall_tool(self) -> bool {
        matches!(self, Self::Default | Self::Edit | Self::LinkConnect | Self::LinkJoin)
    }
}

/// Modal state of the wall tool.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum DrawMode {
    #[default]
    Idle,
    AddingWalls,
    AddingCorner,
    SplittingWall,
}

/// Inputs that drive [`DrawMode`] transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeEvent {
    StartAddingWalls,
    /// A wall segment was released and the next one may start.
    DrawReleased,
    /// Drawing ended any other way.
    DrawEnded,
    StartAddCorner,
    StartSplitWall,
    /// A corner or split gesture finished, successfully or not.
    GestureCompleted,
    Cancel,
    EditModeChanged(EditMode),
}

impl DrawMode {
    /// Next mode after `event`. Events that do not apply leave the mode
    /// unchanged.
    pub fn next(self, event: ModeEvent) -> Self {
        match (self, event) {
            (_, ModeEvent::Cancel) => Self::Idle,
            (mode, ModeEvent::EditModeChanged(edit)) if edit.keeps_wall_tool() => mode,
            (_, ModeEvent::EditModeChanged(_)) => Self::Idle,
            (_, ModeEvent::StartAddingWalls) => Self::AddingWalls,
            (_, ModeEvent::StartAddCorner) => Self::AddingCorner,
            (_, ModeEvent::StartSplitWall) => Self::SplittingWall,
            (Self::AddingWalls, ModeEvent::DrawReleased) => Self::AddingWalls,
            (Self::AddingWalls, ModeEvent::DrawEnded) => Self::Idle,
            (Self::AddingCorner | Self::SplittingWall, ModeEvent::GestureCompleted) => Self::Idle,
            (mode, _) => mode,
        }
    }

    /// Whether a corner or split gesture is armed.
    pub fn is_gesture(self) -> bool {
        matches!(self, Self::AddingCorner | Self::SplittingWall)
    }
}
