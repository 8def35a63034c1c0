use crate::compositor::Compositor;
use crate::error::ControlError;

/// Trait for items that have basic display properties
pub trait DisplayItem {
    /// Get the unique identifier for this item
    fn id(&self) -> &str;

    /// Get the display name/title for this item
    fn name(&self) -> &str;

    /// Get the description/subtitle for this item
    fn description(&self) -> Option<&str>;

    /// Get the action label (e.g., "Switch", "Close")
    fn action_label(&self) -> &'static str;
}

/// Trait for items that have icons
pub trait IconProvider {
    /// Get the icon name from the freedesktop icon theme
    fn icon_name(&self) -> Option<&str> {
        None
    }
}

/// Trait for items that can be executed against a compositor
pub trait Executable {
    /// Execute this item's action
    fn execute(&self, compositor: &dyn Compositor) -> Result<(), ControlError>;
}
