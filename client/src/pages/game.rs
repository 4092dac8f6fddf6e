//! Game page: one team's wheel board plus energy, timer, and zoom chrome.
//!
//! SYSTEM CONTEXT
//! ==============
//! Mounted at `/game/:room/:team` for players and `/spectate/:room/:team` for
//! read-only observers. The page polls room metadata for the timer and
//! circumstance; the board itself is loaded by `WheelHost`.

#[cfg(test)]
#[path = "game_test.rs"]
mod game_test;

use leptos::prelude::*;
use leptos_router::hooks::use_params_map;
use wheel::sync::TeamRef;

use crate::components::energy_counter::EnergyCounter;
use crate::components::game_timer::GameTimer;
use crate::components::wheel_host::WheelHost;
use crate::components::zoom_controls::ZoomControls;
use crate::state::game::GameState;

/// Team reference from route params; blank segments count as missing.
pub fn team_from_params(room: Option<String>, team: Option<String>) -> Option<TeamRef> {
    let room = room.map(|r| r.trim().to_owned()).filter(|r| !r.is_empty())?;
    let team = team.map(|t| t.trim().to_owned()).filter(|t| !t.is_empty())?;
    Some(TeamRef::new(room, team))
}

/// Page heading: team name, plus a spectator marker for read-only views.
pub fn page_title(team: &TeamRef, read_only: bool) -> String {
    if read_only {
        format!("{} (spectating)", team.team_name)
    } else {
        team.team_name.clone()
    }
}

#[component]
pub fn GamePage(read_only: bool) -> impl IntoView {
    let params = use_params_map();
    let team = Memo::new(move |_| params.with(|p| team_from_params(p.get("room"), p.get("team"))));
    let initial = team.get_untracked();
    let game = RwSignal::new(
        initial
            .clone()
            .map(|t| GameState::for_team(t, read_only))
            .unwrap_or_default(),
    );
    provide_context(game);

    // Route changes keep this component mounted; start a fresh state per team.
    let last_team = RwSignal::new(initial);
    Effect::new(move || {
        let next = team.get();
        if next == last_team.get_untracked() {
            return;
        }
        if let Some(t) = next.clone() {
            game.set(GameState::for_team(t, read_only));
        }
        last_team.set(next);
    });

    #[cfg(feature = "csr")]
    {
        use std::sync::Arc;
        use std::sync::atomic::{AtomicBool, Ordering};
        use std::time::Duration;

        use wheel::consts::POLL_INTERVAL_MS;

        use crate::net::api::{HttpStore, fetch_room};
        use crate::state::game::clock_from_room;
        use crate::util::time::{now_ms, parse_iso_ms};

        let poll_alive = Arc::new(AtomicBool::new(true));

        let tick_alive = poll_alive.clone();
        leptos::task::spawn_local(async move {
            loop {
                if !tick_alive.load(Ordering::Relaxed) {
                    break;
                }
                game.update(|g| g.now_ms = now_ms());
                gloo_timers::future::sleep(Duration::from_secs(1)).await;
            }
        });

        let room_alive = poll_alive.clone();
        leptos::task::spawn_local(async move {
            let store = HttpStore::default();
            loop {
                if !room_alive.load(Ordering::Relaxed) {
                    break;
                }
                if let Some(team) = team.get_untracked() {
                    match fetch_room(&store, &team.room_code).await {
                        Ok(room) if room_alive.load(Ordering::Relaxed) => {
                            let clock = clock_from_room(&room, parse_iso_ms);
                            game.update(|g| {
                                g.clock = Some(clock);
                                g.now_ms = now_ms();
                                g.room = Some(room);
                            });
                        }
                        Ok(_) => break,
                        Err(e) => log::warn!("room fetch failed for {:?}: {e}", team.room_code),
                    }
                }
                gloo_timers::future::sleep(Duration::from_millis(POLL_INTERVAL_MS)).await;
            }
        });

        on_cleanup(move || poll_alive.store(false, Ordering::Relaxed));
    }

    let title = move || team.get().map(|t| page_title(&t, read_only)).unwrap_or_default();
    let circumstance = move || game.with(|g| g.circumstance().cloned());

    view! {
        <div class="game-page" class:game-page--spectating=read_only>
            <header class="game-page__header">
                <h1 class="game-page__title">{title}</h1>
                <EnergyCounter/>
                <GameTimer/>
                <ZoomControls/>
            </header>
            {move || {
                circumstance()
                    .map(|c| {
                        view! {
                            <section class="game-page__circumstance">
                                <h2>{c.title}</h2>
                                <p>{c.description}</p>
                            </section>
                        }
                    })
            }}
            {move || match team.get() {
                Some(team) => view! { <WheelHost team=team read_only=read_only/> }.into_any(),
                None => view! { <p class="game-page__error">"Missing room or team in the address."</p> }.into_any(),
            }}
        </div>
    }
}
