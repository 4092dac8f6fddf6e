//! Bridge component between Leptos state and the imperative `EngineCore`.
//!
//! ARCHITECTURE
//! ============
//! The engine owns board, economy, rotation, and camera state and renders the
//! board as one SVG string. This host feeds it DOM pointer events, mirrors its
//! output into signals, and hands its push actions to the sync adapter on a
//! local task. Store acknowledgements flow back through `apply_energy_ack`.

use leptos::prelude::*;

use crate::state::game::{GameState, LoadStatus};
use wheel::camera::Camera;
use wheel::sync::TeamRef;

#[cfg(feature = "csr")]
use std::cell::{Cell, RefCell};
#[cfg(feature = "csr")]
use std::rc::Rc;
#[cfg(feature = "csr")]
use std::time::Duration;

#[cfg(feature = "csr")]
use wheel::config::EngineConfig;
#[cfg(feature = "csr")]
use wheel::engine::{Action, EngineCore};
#[cfg(feature = "csr")]
use wheel::input::{Button, TileRef};
#[cfg(feature = "csr")]
use wheel::sync::{Liveness, SyncAdapter, poll_loop};

#[cfg(feature = "csr")]
use crate::net::api::HttpStore;
#[cfg(feature = "csr")]
use crate::state::game::ViewRequest;
#[cfg(feature = "csr")]
use crate::util::pointer::{element_center, pointer_point, tile_at_target};
#[cfg(feature = "csr")]
use crate::util::time::now_ms;

/// Engine plus the signals its output is mirrored into.
#[cfg(feature = "csr")]
#[derive(Clone)]
struct Bridge {
    engine: Rc<RefCell<EngineCore>>,
    adapter: Rc<SyncAdapter<HttpStore>>,
    svg: RwSignal<String>,
    transform: RwSignal<String>,
    cursor: RwSignal<String>,
    game: RwSignal<GameState>,
}

#[cfg(feature = "csr")]
impl Bridge {
    fn render(&self) {
        let engine = self.engine.borrow();
        self.svg.set(engine.render_svg());
        self.transform.set(engine.camera().css_transform());
        self.game.update(|g| g.sync_from_engine(&engine));
    }

    /// Apply engine actions: local effects now, pushes on a spawned task.
    fn run(&self, actions: Vec<Action>) {
        let mut render = false;
        let mut pushes = Vec::new();
        for action in actions {
            match action {
                Action::RenderNeeded => render = true,
                Action::SetCursor(cursor) => self.cursor.set(cursor),
                push @ (Action::PushBoard(_) | Action::PushEnergyDelta { .. }) => pushes.push(push),
            }
        }
        if render {
            self.render();
        }
        if pushes.is_empty() {
            return;
        }
        let bridge = self.clone();
        leptos::task::spawn_local(async move {
            let acks = bridge.adapter.dispatch_all(&pushes).await;
            if acks.is_empty() {
                return;
            }
            let mut follow_up = Vec::new();
            for ack in acks {
                follow_up.extend(bridge.engine.borrow_mut().apply_energy_ack(ack.seq, ack.balance));
            }
            bridge.run(follow_up);
        });
    }

    fn load(&self, board: wheel::board::BoardConfig, balance: u32) {
        let actions = self.engine.borrow_mut().load_snapshot(board, balance);
        self.run(actions);
    }

    /// Measure the transformed board itself; the viewport also holds the
    /// status and tooltip rows, which shift its center.
    fn sync_layout(&self, board: &NodeRef<leptos::html::Div>) {
        if let Some(el) = board.get_untracked() {
            self.engine.borrow_mut().set_rendered_center(element_center(&el));
        }
    }
}

/// Interactive wheel board for one team.
///
/// Editable views load once and push every change; read-only views poll the
/// store on the configured interval.
#[component]
pub fn WheelHost(team: TeamRef, read_only: bool) -> impl IntoView {
    let game = expect_context::<RwSignal<GameState>>();
    let viewport_ref = NodeRef::<leptos::html::Div>::new();
    let board_ref = NodeRef::<leptos::html::Div>::new();
    let svg = RwSignal::new(String::new());
    let transform = RwSignal::new(Camera::default().css_transform());
    let cursor = RwSignal::new("default".to_owned());

    #[cfg(feature = "csr")]
    let bridge = {
        let config = EngineConfig::default();
        let poll_ms = config.poll_interval_ms;
        let liveness = Liveness::new();
        let bridge = Bridge {
            engine: Rc::new(RefCell::new(EngineCore::new(config, read_only))),
            adapter: Rc::new(SyncAdapter::new(HttpStore::default(), team.clone(), liveness.clone())),
            svg,
            transform,
            cursor,
            game,
        };

        let loader = bridge.clone();
        leptos::task::spawn_local(async move {
            match loader.adapter.fetch_snapshot().await {
                Ok(snapshot) if loader.adapter.liveness().is_alive() => {
                    loader.load(snapshot.board, snapshot.balance);
                    loader.game.update(|g| g.status = LoadStatus::Ready);
                }
                Ok(_) => return,
                Err(e) => {
                    log::warn!("initial board load failed for {:?}: {e}", loader.adapter.team().team_name);
                    loader.game.update(|g| g.status = LoadStatus::Failed(e.to_string()));
                }
            }
            if !loader.engine.borrow().read_only {
                return;
            }
            gloo_timers::future::sleep(Duration::from_millis(poll_ms)).await;
            let poller = loader.clone();
            poll_loop(
                &loader.adapter,
                || gloo_timers::future::sleep(Duration::from_millis(poll_ms)),
                move |snapshot| {
                    poller.load(snapshot.board, snapshot.balance);
                    poller.game.update(|g| g.status = LoadStatus::Ready);
                },
            )
            .await;
        });
        on_cleanup(move || liveness.kill());
        bridge
    };
    #[cfg(not(feature = "csr"))]
    {
        let _ = (&team, read_only, game);
    }

    #[cfg(feature = "csr")]
    {
        let bridge = bridge.clone();
        let expired = Memo::new(move |_| game.with(GameState::time_expired));
        Effect::new(move || {
            let expired = expired.get();
            bridge.engine.borrow_mut().set_time_expired(expired);
        });
    }

    #[cfg(feature = "csr")]
    {
        let bridge = bridge.clone();
        let last_seq = Cell::new(0_u64);
        Effect::new(move || {
            let (seq, request) = game.with(|g| (g.view_request_seq, g.view_request));
            if seq == last_seq.get() {
                return;
            }
            last_seq.set(seq);
            let Some(request) = request else {
                return;
            };
            let actions = {
                let mut engine = bridge.engine.borrow_mut();
                match request {
                    ViewRequest::ZoomIn => engine.zoom_in(),
                    ViewRequest::ZoomOut => engine.zoom_out(),
                    ViewRequest::Reset => engine.reset_view(),
                }
            };
            bridge.run(actions);
        });
    }

    // Pointer capture retargets the trailing click at the viewport, so the
    // tile is resolved from the press when the target carries no tile.
    #[cfg(feature = "csr")]
    let pressed_tile = Rc::new(Cell::new(None::<TileRef>));

    let on_pointer_down = {
        #[cfg(feature = "csr")]
        {
            let bridge = bridge.clone();
            let pressed_tile = Rc::clone(&pressed_tile);
            move |ev: leptos::ev::PointerEvent| {
                let Some(button) = Button::from_dom(ev.button()) else {
                    return;
                };
                if button == Button::Secondary {
                    ev.prevent_default();
                }
                if let Some(el) = viewport_ref.get_untracked() {
                    if let Err(e) = el.set_pointer_capture(ev.pointer_id()) {
                        log::debug!("pointer capture unavailable: {e:?}");
                    }
                }
                bridge.sync_layout(&board_ref);
                let tile = tile_at_target(&ev);
                pressed_tile.set(tile);
                let actions = bridge.engine.borrow_mut().on_pointer_down(pointer_point(&ev), button, tile);
                bridge.game.update(|g| g.tooltip = None);
                bridge.run(actions);
            }
        }
        #[cfg(not(feature = "csr"))]
        {
            move |_ev: leptos::ev::PointerEvent| {}
        }
    };

    let on_pointer_move = {
        #[cfg(feature = "csr")]
        {
            let bridge = bridge.clone();
            move |ev: leptos::ev::PointerEvent| {
                let actions = bridge.engine.borrow_mut().on_pointer_move(pointer_point(&ev));
                bridge.run(actions);
            }
        }
        #[cfg(not(feature = "csr"))]
        {
            move |_ev: leptos::ev::PointerEvent| {}
        }
    };

    let on_pointer_up = {
        #[cfg(feature = "csr")]
        {
            let bridge = bridge.clone();
            move |_ev: leptos::ev::PointerEvent| {
                let actions = bridge.engine.borrow_mut().on_pointer_up(now_ms());
                bridge.run(actions);
            }
        }
        #[cfg(not(feature = "csr"))]
        {
            move |_ev: leptos::ev::PointerEvent| {}
        }
    };

    let on_click = {
        #[cfg(feature = "csr")]
        {
            let bridge = bridge.clone();
            let pressed_tile = Rc::clone(&pressed_tile);
            move |ev: leptos::ev::MouseEvent| {
                if ev.button() != 0 {
                    return;
                }
                let pressed = pressed_tile.take();
                let Some(tile) = tile_at_target(&ev).or(pressed) else {
                    return;
                };
                let actions = bridge.engine.borrow_mut().on_tile_click(tile, now_ms());
                bridge.run(actions);
            }
        }
        #[cfg(not(feature = "csr"))]
        {
            move |_ev: leptos::ev::MouseEvent| {}
        }
    };

    let on_pointer_over = {
        #[cfg(feature = "csr")]
        {
            let bridge = bridge.clone();
            move |ev: leptos::ev::PointerEvent| {
                let tooltip = tile_at_target(&ev).and_then(|tile| bridge.engine.borrow().tooltip(tile));
                bridge.game.update(|g| g.tooltip = tooltip);
            }
        }
        #[cfg(not(feature = "csr"))]
        {
            move |_ev: leptos::ev::PointerEvent| {}
        }
    };

    let on_pointer_leave = move |_ev: leptos::ev::PointerEvent| {
        game.update(|g| g.tooltip = None);
    };

    let on_context_menu = move |ev: leptos::ev::MouseEvent| ev.prevent_default();

    let viewport_style = move || format!("cursor: {};", cursor.get());
    let board_style = move || format!("transform: {}; transform-origin: center center;", transform.get());
    let loading = move || game.with(|g| g.status == LoadStatus::Loading);
    let failure = move || match game.with(|g| g.status.clone()) {
        LoadStatus::Failed(message) => Some(message),
        _ => None,
    };

    view! {
        <div
            class="wheel-viewport"
            node_ref=viewport_ref
            style=viewport_style
            on:pointerdown=on_pointer_down
            on:pointermove=on_pointer_move
            on:pointerup=on_pointer_up.clone()
            on:pointercancel=on_pointer_up
            on:pointerover=on_pointer_over
            on:pointerleave=on_pointer_leave
            on:click=on_click
            on:contextmenu=on_context_menu
        >
            <div class="wheel-board" node_ref=board_ref style=board_style inner_html=move || svg.get()></div>
            <Show when=loading>
                <div class="wheel-viewport__status">"Loading board..."</div>
            </Show>
            {move || failure().map(|message| view! { <div class="wheel-viewport__status wheel-viewport__status--error">{message}</div> })}
            {move || game.with(|g| g.tooltip.clone()).map(|text| view! { <div class="wheel-tooltip">{text}</div> })}
        </div>
    }
}
