//! Text formatting for navigation, menu and route listings

use colored::Colorize;
use folio_core::{NavItem, TransitionState, ViewId};

/// Line printed when navigation starts
pub fn navigation_line(path: &str, view: &ViewId) -> String {
    format!("{} {}  [{}]", "→".bright_blue(), path.bold(), view)
}

/// Line printed when the overlay menu flips
pub fn menu_line(open: bool) -> String {
    if open {
        format!("{} menu open", "☰".magenta())
    } else {
        format!("{} menu closed", "☰".magenta())
    }
}

/// Short human form of a transition state
pub fn describe_state(state: &TransitionState) -> String {
    match state {
        TransitionState::Idle(view) => format!("idle({})", view),
        TransitionState::Exiting { from, to } => format!("exiting({} → {})", from, to),
        TransitionState::Entering { from, to } => format!("entering({} → {})", from, to),
    }
}

/// Navigation entries as aligned rows, the active one marked
pub fn nav_rows(items: &[NavItem]) -> Vec<String> {
    let width = items.iter().map(|i| i.path.len()).max().unwrap_or(0);
    items
        .iter()
        .map(|item| {
            let marker = if item.active {
                "●".green().to_string()
            } else {
                " ".to_string()
            };
            let label = if item.active {
                item.label.bold().to_string()
            } else {
                item.label.clone()
            };
            format!("{} {:<width$}  {:<12} {}", marker, item.path, item.view.as_str(), label)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_state() {
        let state = TransitionState::Exiting {
            from: ViewId::from("hero"),
            to: ViewId::from("about"),
        };
        assert_eq!(describe_state(&state), "exiting(hero → about)");
        assert_eq!(
            describe_state(&TransitionState::Idle(ViewId::from("hero"))),
            "idle(hero)"
        );
    }

    #[test]
    fn test_nav_rows_align() {
        colored::control::set_override(false);
        let items = vec![
            NavItem {
                path: "/".to_string(),
                label: "Home".to_string(),
                view: ViewId::from("hero"),
                active: true,
            },
            NavItem {
                path: "/about".to_string(),
                label: "About".to_string(),
                view: ViewId::from("about"),
                active: false,
            },
        ];
        let rows = nav_rows(&items);
        assert_eq!(rows[0], "● /       hero         Home");
        assert_eq!(rows[1], "  /about  about        About");
    }
}
