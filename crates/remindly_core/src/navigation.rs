//! Launch, onboarding and home-screen routing decisions.
//!
//! # Responsibility
//! - Decide where the app lands based on the auth session.
//! - Drive the onboarding pager and its exits.
//! - Describe the home-screen reminder catalog and the gift-ideas tab.
//!
//! # Invariants
//! - A signed-in session always routes to the main tabs.
//! - Leaving onboarding without a session always routes to login.

use crate::model::category::Category;

/// Screen destinations known to core routing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Splash,
    Onboarding,
    Login,
    MainTabs,
    AddReminder(Category),
}

impl Route {
    pub fn path(self) -> &'static str {
        match self {
            Self::Splash => "/splash",
            Self::Onboarding => "/onboarding",
            Self::Login => "/(auth)/login",
            Self::MainTabs => "/(tabs)",
            Self::AddReminder(Category::Birthdays) => "/add-birthday",
            Self::AddReminder(Category::Anniversaries) => "/add-anniversary",
            Self::AddReminder(Category::HealthCheckups) => "/add-health-checkup",
            Self::AddReminder(Category::Vaccinations) => "/add-vaccination",
            Self::AddReminder(Category::MedicineReminders) => "/add-medicine",
        }
    }
}

/// Auth state reported by the external identity provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    SignedIn,
    SignedOut,
}

/// Where the app goes once the splash animation finishes.
pub fn launch_route(session: SessionState) -> Route {
    match session {
        SessionState::SignedIn => Route::MainTabs,
        SessionState::SignedOut => Route::Onboarding,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OnboardingSlide {
    pub title: &'static str,
    pub description: &'static str,
}

pub const ONBOARDING_SLIDES: [OnboardingSlide; 3] = [
    OnboardingSlide {
        title: "Never Miss Important Dates",
        description: "Keep track of birthdays, anniversaries, and special occasions.",
    },
    OnboardingSlide {
        title: "Smart Reminders",
        description: "Get timely notifications and never forget to celebrate.",
    },
    OnboardingSlide {
        title: "Gift Ideas & Templates",
        description: "Find perfect gift suggestions and ready-to-use message templates.",
    },
];

/// Result of an onboarding interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnboardingStep {
    Slide(usize),
    Leave(Route),
}

/// Onboarding pager state. Transitions return a new pager.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OnboardingPager {
    current: usize,
}

impl OnboardingPager {
    pub fn current(self) -> usize {
        self.current
    }

    pub fn slide(self) -> OnboardingSlide {
        ONBOARDING_SLIDES[self.current]
    }

    pub fn is_last(self) -> bool {
        self.current + 1 >= ONBOARDING_SLIDES.len()
    }

    /// Advances one slide, or leaves to login from the last slide.
    pub fn next(self) -> (Self, OnboardingStep) {
        if self.is_last() {
            return (self, OnboardingStep::Leave(Route::Login));
        }
        let advanced = Self {
            current: self.current + 1,
        };
        (advanced, OnboardingStep::Slide(advanced.current))
    }

    pub fn skip(self) -> OnboardingStep {
        OnboardingStep::Leave(Route::Login)
    }

    /// Reacts to an auth-state change observed while onboarding is visible.
    pub fn on_session_change(self, session: SessionState) -> OnboardingStep {
        match session {
            SessionState::SignedIn => OnboardingStep::Leave(Route::MainTabs),
            SessionState::SignedOut => OnboardingStep::Slide(self.current),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogEntry {
    pub icon: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub category: Category,
}

impl CatalogEntry {
    pub fn route(self) -> Route {
        Route::AddReminder(self.category)
    }
}

/// Home-screen reminder kinds, in display order.
pub fn reminder_catalog() -> [CatalogEntry; 5] {
    [
        CatalogEntry {
            icon: "🎂",
            title: "Birthday Reminder",
            description: "Never forget birthdays. Get templates to send wishes instantly.",
            category: Category::Birthdays,
        },
        CatalogEntry {
            icon: "💍",
            title: "Anniversary Reminder",
            description: "Track relationship milestones and send romantic surprises.",
            category: Category::Anniversaries,
        },
        CatalogEntry {
            icon: "🩺",
            title: "Health Check-up",
            description: "Stay ahead with scheduled health checkup alerts.",
            category: Category::HealthCheckups,
        },
        CatalogEntry {
            icon: "💉",
            title: "Vaccination Reminder",
            description: "Track vaccinations for family, kids, and pets.",
            category: Category::Vaccinations,
        },
        CatalogEntry {
            icon: "💊",
            title: "Medicine Reminder",
            description: "Get notified when it's time to take your medicines.",
            category: Category::MedicineReminders,
        },
    ]
}

/// One card on the gift-ideas tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GiftCategory {
    pub title: &'static str,
    pub ideas: &'static [&'static str],
}

/// Popular gift categories shown on the gifts tab, in display order.
pub fn gift_ideas() -> [GiftCategory; 3] {
    [
        GiftCategory {
            title: "Electronics",
            ideas: &["Smart watches", "Wireless earbuds", "Portable chargers"],
        },
        GiftCategory {
            title: "Fashion",
            ideas: &["Designer accessories", "Trendy clothing", "Luxury watches"],
        },
        GiftCategory {
            title: "Experiences",
            ideas: &["Concert tickets", "Spa packages", "Cooking classes"],
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::{
        gift_ideas, launch_route, reminder_catalog, OnboardingPager, OnboardingStep, Route,
        SessionState,
    };
    use crate::model::category::Category;

    #[test]
    fn launch_depends_on_session() {
        assert_eq!(launch_route(SessionState::SignedIn), Route::MainTabs);
        assert_eq!(launch_route(SessionState::SignedOut), Route::Onboarding);
    }

    #[test]
    fn pager_walks_slides_then_leaves_to_login() {
        let pager = OnboardingPager::default();
        let (pager, step) = pager.next();
        assert_eq!(step, OnboardingStep::Slide(1));
        let (pager, step) = pager.next();
        assert_eq!(step, OnboardingStep::Slide(2));
        assert!(pager.is_last());
        let (pager, step) = pager.next();
        assert_eq!(step, OnboardingStep::Leave(Route::Login));
        assert_eq!(pager.current(), 2);
    }

    #[test]
    fn skip_and_sign_in_leave_onboarding() {
        let pager = OnboardingPager::default();
        assert_eq!(pager.skip(), OnboardingStep::Leave(Route::Login));
        assert_eq!(
            pager.on_session_change(SessionState::SignedIn),
            OnboardingStep::Leave(Route::MainTabs)
        );
        assert_eq!(
            pager.on_session_change(SessionState::SignedOut),
            OnboardingStep::Slide(0)
        );
    }

    #[test]
    fn catalog_routes_to_every_form() {
        let paths = reminder_catalog()
            .iter()
            .map(|entry| entry.route().path())
            .collect::<Vec<_>>();
        assert_eq!(
            paths,
            [
                "/add-birthday",
                "/add-anniversary",
                "/add-health-checkup",
                "/add-vaccination",
                "/add-medicine",
            ]
        );
        assert_eq!(reminder_catalog()[4].category, Category::MedicineReminders);
    }

    #[test]
    fn gift_tab_lists_three_categories_of_three_ideas() {
        let gifts = gift_ideas();
        let titles = gifts.iter().map(|gift| gift.title).collect::<Vec<_>>();
        assert_eq!(titles, ["Electronics", "Fashion", "Experiences"]);
        assert!(gifts.iter().all(|gift| gift.ideas.len() == 3));
        assert_eq!(gifts[2].ideas[0], "Concert tickets");
    }
}
