//! Zoom in / zoom out / reset buttons for the wheel view.

use leptos::prelude::*;

use crate::state::game::{GameState, ViewRequest};

#[component]
pub fn ZoomControls() -> impl IntoView {
    let game = expect_context::<RwSignal<GameState>>();
    let request = move |req: ViewRequest| game.update(|g| g.request_view(req));

    view! {
        <div class="zoom-controls">
            <button
                class="zoom-controls__btn"
                title="Zoom in"
                disabled=move || !game.with(|g| g.can_zoom_in)
                on:click=move |_| request(ViewRequest::ZoomIn)
            >
                "+"
            </button>
            <span class="zoom-controls__level">{move || game.with(GameState::zoom_percent)}</span>
            <button
                class="zoom-controls__btn"
                title="Zoom out"
                disabled=move || !game.with(|g| g.can_zoom_out)
                on:click=move |_| request(ViewRequest::ZoomOut)
            >
                "-"
            </button>
            <button class="zoom-controls__btn" title="Reset view" on:click=move |_| request(ViewRequest::Reset)>
                "Reset"
            </button>
        </div>
    }
}
