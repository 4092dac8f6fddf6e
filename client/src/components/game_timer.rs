//! Countdown display driven by the room's timer state.

use leptos::prelude::*;

use crate::state::game::GameState;

#[component]
pub fn GameTimer() -> impl IntoView {
    let game = expect_context::<RwSignal<GameState>>();
    let label = move || game.with(GameState::timer_label);
    let expired = move || game.with(GameState::time_expired);
    let paused = move || game.with(|g| g.clock.is_some_and(|c| c.is_paused()));

    view! {
        <div class="game-timer" class:game-timer--expired=expired class:game-timer--paused=paused>
            <span class="game-timer__value">{label}</span>
            <Show when=paused>
                <span class="game-timer__note">"Paused"</span>
            </Show>
            <Show when=expired>
                <span class="game-timer__note">"Time is up"</span>
            </Show>
        </div>
    }
}
