//! Screen selection state

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::DashboardError;

/// The six dashboard screens, in sidebar order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Screen {
    CommandCenter,
    UnitDashboard,
    ProjectMatrix,
    Financials,
    Execution,
    Closeout,
}

impl Screen {
    pub const ALL: [Screen; 6] = [
        Screen::CommandCenter,
        Screen::UnitDashboard,
        Screen::ProjectMatrix,
        Screen::Financials,
        Screen::Execution,
        Screen::Closeout,
    ];

    pub fn index(self) -> usize {
        Screen::ALL.iter().position(|s| *s == self).unwrap_or(0)
    }

    pub fn from_index(index: usize) -> Option<Screen> {
        Screen::ALL.get(index).copied()
    }

    pub fn next(self) -> Screen {
        Screen::ALL[(self.index() + 1) % Screen::ALL.len()]
    }

    pub fn previous(self) -> Screen {
        Screen::ALL[(self.index() + Screen::ALL.len() - 1) % Screen::ALL.len()]
    }

    pub fn title(self) -> &'static str {
        match self {
            Screen::CommandCenter => "CXO Command Center",
            Screen::UnitDashboard => "Outage Dashboard (Unit View)",
            Screen::ProjectMatrix => "The Projects Matrix",
            Screen::Financials => "Financial & Budget Master",
            Screen::Execution => "Execution & Critical Path",
            Screen::Closeout => "Closeout & Reconciliation",
        }
    }

    /// Identifier accepted on the command line
    pub fn slug(self) -> &'static str {
        match self {
            Screen::CommandCenter => "command-center",
            Screen::UnitDashboard => "unit-dashboard",
            Screen::ProjectMatrix => "project-matrix",
            Screen::Financials => "financials",
            Screen::Execution => "execution",
            Screen::Closeout => "closeout",
        }
    }

    /// Sidebar label, e.g. "1. CXO Command Center"
    pub fn label(self) -> String {
        format!("{}. {}", self.index() + 1, self.title())
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

impl FromStr for Screen {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('_', "-");
        if let Ok(n) = wanted.parse::<usize>() {
            if let Some(screen) = n.checked_sub(1).and_then(Screen::from_index) {
                return Ok(screen);
            }
        }
        Screen::ALL
            .into_iter()
            .find(|screen| screen.slug() == wanted)
            .ok_or_else(|| {
                let valid: Vec<_> = Screen::ALL.iter().map(|s| s.slug()).collect();
                DashboardError::invalid(format!(
                    "unknown screen '{}' (valid: 1-6, {})",
                    s,
                    valid.join(", ")
                ))
            })
    }
}

/// A change of the active screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub from: Screen,
    pub to: Screen,
}

/// Tracks the single active screen; there is no history
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Navigator {
    current: Screen,
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new(Screen::CommandCenter)
    }
}

impl Navigator {
    pub fn new(start: Screen) -> Self {
        Self { current: start }
    }

    pub fn current(&self) -> Screen {
        self.current
    }

    /// Makes `screen` active, returning the transition if the screen changed
    pub fn select(&mut self, screen: Screen) -> Option<Transition> {
        if screen == self.current {
            return None;
        }
        let transition = Transition {
            from: self.current,
            to: screen,
        };
        self.current = screen;
        Some(transition)
    }

    pub fn select_next(&mut self) -> Option<Transition> {
        self.select(self.current.next())
    }

    pub fn select_previous(&mut self) -> Option<Transition> {
        self.select(self.current.previous())
    }
}
