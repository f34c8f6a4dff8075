use tracing::info;

/// Bottom navigation tabs, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tab {
    Home,
    Community,
    Therapist,
    SafeReport,
    Profile,
}

impl Tab {
    pub const ALL: [Tab; 5] = [
        Tab::Home,
        Tab::Community,
        Tab::Therapist,
        Tab::SafeReport,
        Tab::Profile,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Tab::Home => "Home",
            Tab::Community => "Community",
            Tab::Therapist => "AI Therapist",
            Tab::SafeReport => "Safe Report",
            Tab::Profile => "Profile",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Tab::Home => "home",
            Tab::Community => "people",
            Tab::Therapist => "chatbubbles",
            Tab::SafeReport => "shield",
            Tab::Profile => "person",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Login,
    CreateAccount,
    Tab(Tab),
    /// Chat modal opened from the community list.
    CommunityChat { community_id: String },
}

/// Stack router. The bottom of the stack is the root and is never popped.
#[derive(Debug, Clone)]
pub struct Router {
    stack: Vec<Route>,
}

impl Default for Router {
    fn default() -> Self {
        Self::new(Route::Login)
    }
}

impl Router {
    pub fn new(root: Route) -> Self {
        Self { stack: vec![root] }
    }

    pub fn current(&self) -> &Route {
        // The stack always holds the root.
        &self.stack[self.stack.len() - 1]
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn push(&mut self, route: Route) {
        info!("Navigate -> {:?}", route);
        self.stack.push(route);
    }

    /// Go back one screen. Returns the popped route, or `None` at the root.
    pub fn pop(&mut self) -> Option<Route> {
        if self.stack.len() == 1 {
            return None;
        }
        self.stack.pop()
    }

    /// Replace the whole stack, e.g. after login or logout.
    pub fn reset(&mut self, root: Route) {
        info!("Reset navigation -> {:?}", root);
        self.stack.clear();
        self.stack.push(root);
    }

    pub fn select_tab(&mut self, tab: Tab) {
        self.reset(Route::Tab(tab));
    }

    /// The tab the current screen belongs to, if any.
    pub fn active_tab(&self) -> Option<Tab> {
        self.stack.iter().rev().find_map(|r| match r {
            Route::Tab(tab) => Some(*tab),
            Route::CommunityChat { .. } => Some(Tab::Community),
            _ => None,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavItem {
    pub tab: Tab,
    pub active: bool,
}

/// The bar shared by every tab screen. Hidden on the auth screens.
pub struct BottomNav;

impl BottomNav {
    pub fn items(router: &Router) -> Vec<NavItem> {
        let active = router.active_tab();
        Tab::ALL
            .into_iter()
            .map(|tab| NavItem {
                tab,
                active: active == Some(tab),
            })
            .collect()
    }

    pub fn visible(router: &Router) -> bool {
        router.active_tab().is_some()
    }
}
