//! Gate that renders its children only for a signed-in user.
//!
//! SYSTEM CONTEXT
//! ==============
//! Wraps protected routes. On entry, and whenever the session or hydration
//! phase changes, it asks the reconciler for the current answer and folds it
//! through `session::guard`. While rehydration is still running it shows a
//! loading indicator instead of bouncing a signed-in user to login.
//!
//! The redirect latch is the gateway's own, so a 401 that the gateway has
//! already turned into a navigation does not produce a second one here.

use leptos::prelude::*;
use leptos::tachys::view::any_view::IntoAny;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::net::gateway::ApiGateway;
use crate::session::AuthContext;
use crate::session::guard::{self, GuardState};
use crate::state::session::{Hydration, Session};

#[component]
pub fn ProtectedRoute(children: ChildrenFn) -> impl IntoView {
    let auth = expect_context::<AuthContext>();
    let session = expect_context::<RwSignal<Session>>();
    let hydration = expect_context::<RwSignal<Hydration>>();
    let navigate = use_navigate();

    let state = RwSignal::new(GuardState::Pending);
    // Entering a protected route starts a new redirect cycle.
    let latch = expect_context::<ApiGateway>().latch().clone();
    latch.rearm();
    let login = auth.config().login_path.clone();

    Effect::new(move || {
        session.track();
        let current = guard::evaluate(hydration.get(), || auth.resolve());
        state.set(current);
        if guard::should_redirect(&latch, current) {
            navigate(&login, NavigateOptions { replace: true, ..NavigateOptions::default() });
        }
    });

    move || match state.get() {
        GuardState::Pending => view! {
            <div class="route-loading" aria-busy="true">
                <span class="route-loading__spinner"></span>
            </div>
        }
        .into_any(),
        GuardState::Authenticated => children().into_any(),
        GuardState::Unauthenticated => ().into_any(),
    }
}
