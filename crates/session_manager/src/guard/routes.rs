//! Route table

/// Screen groups the guard reasons about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RouteGroup {
    /// Login and registration
    Unauthenticated,
    /// Bottom tabs shown to a signed-in user
    Tabs,
    /// Stacked detail screens
    Screens,
    /// The landing page
    Root,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Welcome,
    Login,
    Register,
    Home,
    Workouts,
    Profile,
    Exercise,
    Sets,
}

impl Route {
    /// Where a signed-in user lands.
    pub const AUTHENTICATED_HOME: Route = Route::Home;
    /// Where a signed-out user is sent.
    pub const LOGIN: Route = Route::Login;

    pub const ALL: [Route; 8] = [
        Route::Welcome,
        Route::Login,
        Route::Register,
        Route::Home,
        Route::Workouts,
        Route::Profile,
        Route::Exercise,
        Route::Sets,
    ];

    pub fn group(&self) -> RouteGroup {
        match self {
            Route::Login | Route::Register => RouteGroup::Unauthenticated,
            Route::Home | Route::Workouts | Route::Profile => RouteGroup::Tabs,
            Route::Exercise | Route::Sets => RouteGroup::Screens,
            Route::Welcome => RouteGroup::Root,
        }
    }

    pub fn is_unauthenticated(&self) -> bool {
        self.group() == RouteGroup::Unauthenticated
    }

    pub fn path(&self) -> &'static str {
        match self {
            Route::Welcome => "/",
            Route::Login => "/Login",
            Route::Register => "/Register",
            Route::Home => "/Home",
            Route::Workouts => "/Workout",
            Route::Profile => "/Profile",
            Route::Exercise => "/screens/Exercise",
            Route::Sets => "/screens/Sets",
        }
    }

    pub fn from_path(path: &str) -> Option<Route> {
        Route::ALL
            .into_iter()
            .find(|route| route.path().eq_ignore_ascii_case(path))
    }
}
