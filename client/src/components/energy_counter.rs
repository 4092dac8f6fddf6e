//! Remaining-energy readout.

use leptos::prelude::*;

use crate::state::game::GameState;

#[component]
pub fn EnergyCounter() -> impl IntoView {
    let game = expect_context::<RwSignal<GameState>>();
    let balance = move || game.with(|g| g.balance);
    let depleted = move || balance() == 0;

    view! {
        <div class="energy-counter" class:energy-counter--empty=depleted>
            <span class="energy-counter__label">"Energy"</span>
            <span class="energy-counter__value">{balance}</span>
        </div>
    }
}
