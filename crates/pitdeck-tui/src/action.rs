/// Every state change flows through one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    Tick,
    Resize(u16, u16),
    ToggleHelp,
    /// Esc outside of text input: close a dialog or clear the status line.
    Dismiss,
    /// Enter or y outside of text input: accept a confirmation dialog.
    Confirm,

    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    GoTop,
    GoBottom,
    PageUp,
    PageDown,
    ScrollUp,
    ScrollDown,

    ClickAt(u16, u16),
    RightClickAt(u16, u16),
    /// Synthesized from two quick primary clicks on the same cell; the
    /// terminal itself never reports double clicks.
    DoubleClickAt(u16, u16),

    ToggleSelect,
    ToggleSelectAll,
    AddCard,
    RemoveCard,
    Save,
    PrintSelected,
    EditName,
    EditYear,

    /// A typed character while editing ('\x08' is the backspace sentinel).
    EditInput(char),
    EditCommit,
    EditCancel,
    CursorLeft,
    CursorRight,
    CursorHome,
    CursorEnd,
    DeleteForward,

    None,
}
