//! Root application component with routing and logging setup.

use leptos::prelude::*;
use leptos_meta::{Title, provide_meta_context};
use leptos_router::{
    ParamSegment, StaticSegment,
    components::{Route, Router, Routes},
};

use crate::pages::game::GamePage;

/// Root application component.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    view! {
        <Title text="Wheel"/>

        <Router>
            <Routes fallback=|| "Page not found.".into_view()>
                <Route
                    path=(StaticSegment("game"), ParamSegment("room"), ParamSegment("team"))
                    view=|| view! { <GamePage read_only=false/> }
                />
                <Route
                    path=(StaticSegment("spectate"), ParamSegment("room"), ParamSegment("team"))
                    view=|| view! { <GamePage read_only=true/> }
                />
            </Routes>
        </Router>
    }
}
