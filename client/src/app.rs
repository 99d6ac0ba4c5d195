//! Root application component with routing and context providers.
//!
//! SYSTEM CONTEXT
//! ==============
//! `App` builds the one `AuthContext` and `ApiGateway` for the page and
//! provides them, plus reactive mirrors of the session and its hydration
//! phase, to every route. Rehydration from cookies and `localStorage` runs
//! in an effect, so it only happens in the browser after SSR markup has been
//! hydrated.

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Redirect, Route, Router, Routes},
};

use crate::components::protected_route::ProtectedRoute;
use crate::config::ClientConfig;
use crate::net::gateway::ApiGateway;
use crate::pages::{dashboard::DashboardPage, login::LoginPage, register::RegisterPage, verify::VerifyPage};
use crate::session::AuthContext;
use crate::state::session::{Hydration, Session};

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let auth = AuthContext::browser(ClientConfig::from_build_env());
    let gateway = ApiGateway::browser(auth.clone());

    let session = RwSignal::new(auth.container().snapshot());
    let hydration = RwSignal::new(auth.container().hydration());
    let subscription = auth.container().subscribe(move |next: &Session, phase: Hydration| {
        session.set(next.clone());
        hydration.set(phase);
    });
    let container = auth.container().clone();
    on_cleanup(move || container.unsubscribe(subscription));

    provide_context(auth.clone());
    provide_context(gateway);
    provide_context(session);
    provide_context(hydration);

    Effect::new(move || auth.rehydrate());

    view! {
        <Stylesheet id="leptos" href="/pkg/wanderwise.css"/>
        <Title text="WanderWise"/>

        <Router>
            <Routes fallback=|| "Page not found.".into_view()>
                <Route path=(StaticSegment("auth"), StaticSegment("login")) view=LoginPage/>
                <Route path=(StaticSegment("auth"), StaticSegment("register")) view=RegisterPage/>
                <Route path=StaticSegment("verify") view=VerifyPage/>
                <Route
                    path=StaticSegment("dashboard")
                    view=|| view! { <ProtectedRoute><DashboardPage/></ProtectedRoute> }
                />
                <Route path=StaticSegment("") view=|| view! { <Redirect path="/dashboard"/> }/>
            </Routes>
        </Router>
    }
}
