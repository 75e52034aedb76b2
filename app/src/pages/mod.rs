//! Page models behind the routing surface
//!
//! A page owns its state for the lifetime of one mount. Fetch failures are
//! handed back to the caller, which decides how to surface them.

pub mod dashboard;
pub mod heroes;
pub mod home;

pub use dashboard::Dashboard;
pub use heroes::{Hero, HeroService};
pub use home::{HomePage, HomeView, LanguageOption};

use serde::Serialize;

/// Pages that render from static content only
#[derive(Debug, Clone, Serialize)]
pub struct StaticPage {
    pub route: &'static str,
    pub title: &'static str,
}

pub const GAME: StaticPage = StaticPage { route: "/game", title: "Game" };
