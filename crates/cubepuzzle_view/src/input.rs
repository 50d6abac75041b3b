use std::fmt;

/// Identity of a pointer (mouse, pen, or touch point).
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
pub struct PointerId(pub u32);
impl fmt::Display for PointerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "pointer #{}", self.0)
    }
}

/// Pointer button that started a press.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
pub enum PointerButton {
    /// Left mouse button, pen contact, or touch.
    #[default]
    Primary,
    /// Right mouse button.
    Secondary,
    /// Middle mouse button.
    Middle,
}

/// Key press delivered to the simulation.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct KeyPress {
    /// Character on the key.
    pub key: char,
    /// Whether a shift-like modifier is held.
    pub shift: bool,
    /// Whether keyboard focus is in a text-entry field, in which case the
    /// press is ignored.
    pub in_text_field: bool,
}
impl KeyPress {
    /// Constructs a key press with no modifiers.
    pub fn new(key: char) -> Self {
        Self {
            key,
            shift: false,
            in_text_field: false,
        }
    }
    /// Constructs a key press with shift held.
    pub fn shifted(key: char) -> Self {
        Self {
            shift: true,
            ..Self::new(key)
        }
    }
}
