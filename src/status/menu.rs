//! "More" menu of the status card: entries and open/closed state

use std::fmt;

use eframe::egui;

use crate::i18n::translate;

/// Entries of the contextual menu
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MenuAction {
    /// Open the position detail view
    ShowDetails,
    /// Create a geofence around the position
    CreateGeofence,
    /// Open in Google Maps
    GoogleMaps,
    /// Open in Apple Maps
    AppleMaps,
    /// Open Google Street View
    StreetView,
    /// Configure device sharing
    Share,
    /// Remove the device after confirmation
    Remove,
}

impl MenuAction {
    /// Translation key of the entry
    pub fn label_key(&self) -> &'static str {
        match self {
            MenuAction::ShowDetails => "sharedShowDetails",
            MenuAction::CreateGeofence => "sharedCreateGeofence",
            MenuAction::GoogleMaps => "linkGoogleMaps",
            MenuAction::AppleMaps => "linkAppleMaps",
            MenuAction::StreetView => "linkStreetView",
            MenuAction::Share => "deviceShare",
            MenuAction::Remove => "sharedRemove",
        }
    }

    /// True for entries that open an external link
    pub fn is_link(&self) -> bool {
        matches!(
            self,
            MenuAction::GoogleMaps | MenuAction::AppleMaps | MenuAction::StreetView
        )
    }
}

impl fmt::Display for MenuAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(translate(self.label_key()))
    }
}

/// Menu entries available to the current user
pub fn menu_actions(share_disabled: bool, temporary_user: bool, device_readonly: bool) -> Vec<MenuAction> {
    let mut actions = vec![
        MenuAction::ShowDetails,
        MenuAction::CreateGeofence,
        MenuAction::GoogleMaps,
        MenuAction::AppleMaps,
        MenuAction::StreetView,
    ];
    if !share_disabled && !temporary_user {
        actions.push(MenuAction::Share);
    }
    if !device_readonly {
        actions.push(MenuAction::Remove);
    }
    actions
}

/// Inputs that drive the menu state
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MenuEvent {
    /// The More button was clicked at this anchor
    Toggle(egui::Pos2),
    /// An entry was chosen
    Select,
    /// Click outside the menu or Escape
    Dismiss,
}

/// Open/closed state of the menu
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum MenuState {
    #[default]
    Closed,
    Open {
        /// Top-left corner of the popup
        anchor: egui::Pos2,
    },
}

impl MenuState {
    /// Single transition table for the menu
    pub fn transition(self, event: MenuEvent) -> MenuState {
        match (self, event) {
            (MenuState::Closed, MenuEvent::Toggle(anchor)) => MenuState::Open { anchor },
            (MenuState::Open { .. }, MenuEvent::Toggle(_)) => MenuState::Closed,
            (_, MenuEvent::Select | MenuEvent::Dismiss) => MenuState::Closed,
        }
    }

    /// Returns true if the popup should be drawn
    pub fn is_open(&self) -> bool {
        matches!(self, MenuState::Open { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transitions() {
        let anchor = egui::pos2(10.0, 20.0);
        let open = MenuState::Closed.transition(MenuEvent::Toggle(anchor));
        assert_eq!(open, MenuState::Open { anchor });
        assert!(open.is_open());

        assert_eq!(open.transition(MenuEvent::Select), MenuState::Closed);
        assert_eq!(open.transition(MenuEvent::Dismiss), MenuState::Closed);
        assert_eq!(open.transition(MenuEvent::Toggle(anchor)), MenuState::Closed);
        assert_eq!(MenuState::Closed.transition(MenuEvent::Dismiss), MenuState::Closed);
    }

    #[test]
    fn test_share_requires_enabled_sharing_and_full_user() {
        assert!(menu_actions(false, false, false).contains(&MenuAction::Share));
        assert!(!menu_actions(true, false, false).contains(&MenuAction::Share));
        assert!(!menu_actions(false, true, false).contains(&MenuAction::Share));
    }

    #[test]
    fn test_readonly_hides_remove() {
        assert!(menu_actions(false, false, false).contains(&MenuAction::Remove));
        assert!(!menu_actions(false, false, true).contains(&MenuAction::Remove));
    }

    #[test]
    fn test_base_entries_order() {
        let actions = menu_actions(true, true, true);
        assert_eq!(
            actions,
            vec![
                MenuAction::ShowDetails,
                MenuAction::CreateGeofence,
                MenuAction::GoogleMaps,
                MenuAction::AppleMaps,
                MenuAction::StreetView,
            ]
        );
        assert_eq!(MenuAction::StreetView.to_string(), "Street View");

        let links: Vec<_> = actions.into_iter().filter(MenuAction::is_link).collect();
        assert_eq!(links, vec![MenuAction::GoogleMaps, MenuAction::AppleMaps, MenuAction::StreetView]);
    }
}
