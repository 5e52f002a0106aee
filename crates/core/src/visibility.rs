//! Per-viewer visibility rules for shapes.
//!
//! A viewer "owns" a shape when they are the DM or are listed among the
//! shape's owners. Non-owners lose the annotation text and every hidden
//! tracker or aura. A hidden name is replaced for everyone, owners and DM
//! included.

/// Shown in place of a shape name while `name_visible` is false.
pub const NAME_PLACEHOLDER: &str = "?";

/// The user a payload is being built for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Viewer {
    pub name: String,
    pub is_dm: bool,
}

impl Viewer {
    pub fn player(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_dm: false,
        }
    }

    pub fn dm(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_dm: true,
        }
    }

    /// DM privilege or membership in `owners` grants full visibility.
    pub fn owns<S: AsRef<str>>(&self, owners: &[S]) -> bool {
        self.is_dm || owners.iter().any(|owner| owner.as_ref() == self.name)
    }
}

/// Records carrying their own visibility flag (trackers, auras).
pub trait Visible {
    fn is_visible(&self) -> bool;
}

/// Keep everything for owners, only visible items for everyone else.
pub fn retain_visible<T: Visible>(mut items: Vec<T>, owned: bool) -> Vec<T> {
    if !owned {
        items.retain(T::is_visible);
    }
    items
}

/// The annotation text a viewer may see.
pub fn visible_annotation(annotation: &str, owned: bool) -> String {
    if owned {
        annotation.to_string()
    } else {
        String::new()
    }
}

/// The name shown to every viewer.
pub fn display_name(name: Option<&str>, name_visible: bool) -> Option<String> {
    if name_visible {
        name.map(str::to_string)
    } else {
        Some(NAME_PLACEHOLDER.to_string())
    }
}
