//! Cart notification badge.
//!
//! Pages ship one of two badge variants. Both sit behind
//! [`NotificationIndicator`]; the variant is picked from the element id the
//! page actually has.

use super::element_ids;

/// Something that can signal "the cart has items".
pub trait NotificationIndicator {
    /// Turn the indicator on or off.
    fn set_active(&mut self, active: bool);

    /// Whether the indicator is currently on.
    fn is_active(&self) -> bool;
}

/// Which badge markup a page uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BadgeVariant {
    /// `#cart-notification-badge`, shown via the `active` class.
    ClassToggle,
    /// `#cart-indicator`, shown via `display: inline-block`.
    DisplayToggle,
}

impl BadgeVariant {
    /// Pick the variant from the element ids present on a page.
    ///
    /// The class-toggle badge wins when both are present.
    pub fn detect<'a>(ids: impl IntoIterator<Item = &'a str>) -> Option<Self> {
        let mut found = None;
        for id in ids {
            match id {
                element_ids::CLASS_BADGE => return Some(Self::ClassToggle),
                element_ids::DISPLAY_BADGE => found = Some(Self::DisplayToggle),
                _ => {}
            }
        }
        found
    }

    /// Element id of this variant.
    #[must_use]
    pub const fn element_id(self) -> &'static str {
        match self {
            Self::ClassToggle => element_ids::CLASS_BADGE,
            Self::DisplayToggle => element_ids::DISPLAY_BADGE,
        }
    }
}

/// CSS `display` values the display-toggle badge switches between.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Display {
    #[default]
    None,
    InlineBlock,
}

impl Display {
    /// CSS value.
    #[must_use]
    pub const fn as_css(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::InlineBlock => "inline-block",
        }
    }
}

/// Badge element state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Badge {
    /// Whether the `active` class is present.
    ClassToggle { active_class: bool },
    /// Current `display` style.
    DisplayToggle { display: Display },
}

impl Badge {
    /// An inactive badge of the given variant.
    #[must_use]
    pub const fn inactive(variant: BadgeVariant) -> Self {
        match variant {
            BadgeVariant::ClassToggle => Self::ClassToggle {
                active_class: false,
            },
            BadgeVariant::DisplayToggle => Self::DisplayToggle {
                display: Display::None,
            },
        }
    }

    /// Variant of this badge.
    #[must_use]
    pub const fn variant(&self) -> BadgeVariant {
        match self {
            Self::ClassToggle { .. } => BadgeVariant::ClassToggle,
            Self::DisplayToggle { .. } => BadgeVariant::DisplayToggle,
        }
    }
}

impl NotificationIndicator for Badge {
    fn set_active(&mut self, active: bool) {
        match self {
            Self::ClassToggle { active_class } => *active_class = active,
            Self::DisplayToggle { display } => {
                *display = if active {
                    Display::InlineBlock
                } else {
                    Display::None
                };
            }
        }
    }

    fn is_active(&self) -> bool {
        match self {
            Self::ClassToggle { active_class } => *active_class,
            Self::DisplayToggle { display } => *display == Display::InlineBlock,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_prefers_class_badge() {
        let ids = [element_ids::DISPLAY_BADGE, element_ids::CLASS_BADGE];
        assert_eq!(BadgeVariant::detect(ids), Some(BadgeVariant::ClassToggle));
    }

    #[test]
    fn test_detect_display_badge() {
        let ids = [element_ids::CONTAINER, element_ids::DISPLAY_BADGE];
        assert_eq!(BadgeVariant::detect(ids), Some(BadgeVariant::DisplayToggle));
    }

    #[test]
    fn test_detect_none() {
        assert_eq!(BadgeVariant::detect([element_ids::CONTAINER]), None);
    }

    #[test]
    fn test_class_toggle() {
        let mut badge = Badge::inactive(BadgeVariant::ClassToggle);
        badge.set_active(true);
        assert_eq!(badge, Badge::ClassToggle { active_class: true });
        badge.set_active(false);
        assert!(!badge.is_active());
    }

    #[test]
    fn test_display_toggle() {
        let mut badge = Badge::inactive(BadgeVariant::DisplayToggle);
        badge.set_active(true);
        assert_eq!(
            badge,
            Badge::DisplayToggle {
                display: Display::InlineBlock
            }
        );
        badge.set_active(false);
        assert_eq!(
            badge,
            Badge::DisplayToggle {
                display: Display::None
            }
        );
    }
}
