//! End-to-end tests of the mutate-then-refresh loop.
//!
//! Most tests run the editor against the in-memory stub backend on an
//! ephemeral port and assert on the stub's request log. The ordering and
//! decode tests use small hand-built Axum routers instead.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use axum::Router;
use axum::extract::State;
use axum::routing::{get, post};
use hexcrawl_editor::cli::Session;
use hexcrawl_editor::config::DEFAULT_SPAWN_TABLE;
use hexcrawl_editor::forms::{
    ArmorForm, EncounterForm, FactionForm, RouteForm, RumorTemplateForm, SimulateForm, WeaponForm,
    WoundForm,
};
use hexcrawl_editor::{
    EditorConfig, EditorController, EditorError, EditorState, RefreshOutcome, Transport,
};
use hexcrawl_stub::{AppState, RecordedRequest, spawn_on};
use hexcrawl_types::{EditorMode, Endpoint, HexCoord};
use serde_json::{Value, json};
use tokio::net::TcpListener;
use tokio::sync::{Mutex, Notify};

async fn start_stub() -> (Arc<AppState>, EditorController) {
    let state = Arc::new(AppState::new());
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let (addr, _handle) = spawn_on(listener, Arc::clone(&state)).unwrap();
    let controller = EditorController::new(Transport::new(&format!("http://{addr}")), DEFAULT_SPAWN_TABLE);
    (state, controller)
}

async fn serve(router: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move { axum::serve(listener, router).await });
    addr
}

fn calls(log: &[RecordedRequest]) -> Vec<(Endpoint, Value)> {
    log.iter().map(|r| (r.endpoint, r.body.clone())).collect()
}

fn paint_state(terrain: &str) -> EditorState {
    let mut state = EditorState::from_config(&EditorConfig::default());
    state.set_terrain(terrain);
    state
}

#[tokio::test]
async fn paint_click_sends_one_mutation_then_one_refresh() {
    let (stub, controller) = start_stub().await;
    let state = paint_state("forest");

    let report = controller.on_hex(&state, HexCoord::new(2, 3)).await.unwrap();

    assert_eq!(report.endpoint, Endpoint::Paint);
    assert!(report.refresh.is_applied());
    assert_eq!(
        calls(&stub.requests().await),
        vec![
            (Endpoint::Paint, json!({"q": 2, "r": 3, "terrain": "forest"})),
            (Endpoint::World, Value::Null),
        ]
    );

    let view = controller.view().current().await.unwrap();
    let cell = view.cell(HexCoord::new(2, 3)).unwrap();
    assert_eq!(cell.terrain, "forest");
    assert_eq!(cell.class, "hex forest");
    assert_eq!(view.cell(HexCoord::new(3, 2)).unwrap().terrain, "plains");
}

#[tokio::test]
async fn site_click_uses_site_kind_selector() {
    let (stub, controller) = start_stub().await;
    let mut state = paint_state("forest");
    state.set_mode(EditorMode::Site);
    state.set_site_kind("village");

    let report = controller.on_hex(&state, HexCoord::new(4, 5)).await.unwrap();

    assert_eq!(report.ack().id.as_deref(), Some("site_1"));
    assert_eq!(
        calls(&stub.requests().await)[0],
        (Endpoint::Site, json!({"q": 4, "r": 5, "kind": "village"}))
    );
    let view = controller.view().current().await.unwrap();
    assert!(view.status.contains("sites=1"));
}

#[tokio::test]
async fn spawn_click_always_uses_configured_table() {
    let (stub, controller) = start_stub().await;
    let mut state = paint_state("swamp");
    state.set_mode(EditorMode::Spawn);
    state.set_site_kind("anything");

    controller.on_hex(&state, HexCoord::new(0, 0)).await.unwrap();

    assert_eq!(
        calls(&stub.requests().await)[0],
        (Endpoint::Spawner, json!({"q": 0, "r": 0, "table": "wilds_basic"}))
    );
    assert_eq!(stub.world.read().await.spawners[0].table, "wilds_basic");
}

#[tokio::test]
async fn route_form_sends_coerced_numbers() {
    let (stub, controller) = start_stub().await;

    controller.save_route(&RouteForm::new("1", "1", "2", "1")).await.unwrap();

    assert_eq!(
        calls(&stub.requests().await)[0],
        (Endpoint::Route, json!({"q1": 1, "r1": 1, "q2": 2, "r2": 1}))
    );
    let view = controller.view().current().await.unwrap();
    assert!(view.status.contains("routes=1"));
}

#[tokio::test]
async fn simulate_forwards_days_verbatim_and_tick_advances() {
    let (stub, controller) = start_stub().await;

    let report = controller.simulate_days(&SimulateForm::new("5")).await.unwrap();

    assert_eq!(
        calls(&stub.requests().await)[0],
        (Endpoint::Simulate, json!({"days": "5"}))
    );
    assert_eq!(report.ack().tick, Some(43_200));
    assert_eq!(report.refresh, RefreshOutcome::Applied { generation: 1, tick: 43_200 });
    assert_eq!(controller.view().tick().await, 43_200);
    assert!(controller.view().current().await.unwrap().status.starts_with("tick=43200"));
}

#[tokio::test]
async fn refused_mutation_still_refreshes_unchanged_snapshot() {
    let (stub, controller) = start_stub().await;
    controller.refresh().await.unwrap();
    let before = controller.view().current().await.unwrap();

    // The backend answers 400 with a JSON body. The editor does not treat
    // that as a failure: it refreshes and shows the same world.
    let report = controller.save_encounter(&EncounterForm::new("abc")).await.unwrap();

    assert_eq!(report.response["status"], 400);
    assert!(report.ack().error.is_some());
    assert!(!report.ack().ok);
    assert_eq!(report.refresh, RefreshOutcome::Applied { generation: 2, tick: 0 });

    let endpoints: Vec<Endpoint> = stub.requests().await.iter().map(|r| r.endpoint).collect();
    assert_eq!(endpoints, vec![Endpoint::World, Endpoint::Encounter, Endpoint::World]);
    assert_eq!(controller.view().current().await.unwrap(), before);
}

#[tokio::test]
async fn unknown_identifier_is_reported_in_reply_only() {
    let (_stub, controller) = start_stub().await;

    let report = controller
        .save_weapon(&WeaponForm::new("4").with_weapon("trebuchet"))
        .await
        .unwrap();

    assert_eq!(report.response["status"], 404);
    assert!(report.refresh.is_applied());
}

#[tokio::test]
async fn every_content_form_uses_default_identifiers() {
    let (stub, controller) = start_stub().await;

    controller.save_encounter(&EncounterForm::new("5")).await.unwrap();
    controller.save_rumor_template(&RumorTemplateForm::new("300", "6")).await.unwrap();
    controller.save_weapon(&WeaponForm::new("7")).await.unwrap();
    controller.save_armor(&ArmorForm::new("9")).await.unwrap();
    controller.save_wound(&WoundForm::new("-2", "-1")).await.unwrap();
    controller.save_faction(&FactionForm::new("Riverbend")).await.unwrap();
    controller.play().await.unwrap();

    let log = calls(&stub.requests().await);
    let expected = vec![
        (Endpoint::Encounter, json!({"id": "wilds_basic", "first_weight": "5"})),
        (Endpoint::World, Value::Null),
        (Endpoint::RumorTemplate, json!({"id": "raid_rumor", "ttl_ticks": "300", "max_hops": "6"})),
        (Endpoint::World, Value::Null),
        (Endpoint::Weapon, json!({"id": "spear", "penetration": "7"})),
        (Endpoint::World, Value::Null),
        (
            Endpoint::Armor,
            json!({"armor_id": "mail", "damage_type": "pierce", "arc": "front", "value": "9"}),
        ),
        (Endpoint::World, Value::Null),
        (Endpoint::Wound, json!({"id": "slash", "mobility_delta": "-2", "dexterity_delta": "-1"})),
        (Endpoint::World, Value::Null),
        (Endpoint::Faction, json!({"id": "settlers", "settlement": "Riverbend"})),
        (Endpoint::World, Value::Null),
        (Endpoint::Play, json!({})),
        (Endpoint::World, Value::Null),
    ];
    assert_eq!(log, expected);

    let content = stub.content.read().await;
    assert_eq!(content.encounter_tables["wilds_basic"].entries[0].weight, 5);
    assert_eq!(content.armors["mail"].thresholds["pierce"].front, 9);
    assert_eq!(content.wound_types["slash"].mobility_delta, -2);
    drop(content);

    let view = controller.view().current().await.unwrap();
    assert!(view.status.contains("rumors=1"));
    assert_eq!(controller.view().tick().await, 6);
}

#[tokio::test]
async fn refresh_is_idempotent() {
    let (stub, controller) = start_stub().await;

    controller.refresh().await.unwrap();
    let first = controller.view().current().await.unwrap();
    controller.refresh().await.unwrap();
    let second = controller.view().current().await.unwrap();

    assert_eq!(first, second);
    assert_eq!(stub.requests().await.len(), 2);
    assert_eq!(controller.view().committed_generation().await, 2);
}

#[tokio::test]
async fn unreachable_backend_leaves_view_empty() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let controller = EditorController::new(Transport::new(&format!("http://{addr}")), DEFAULT_SPAWN_TABLE);
    let err = controller.play().await.unwrap_err();

    assert!(matches!(err, EditorError::Transport(_)));
    assert!(controller.view().current().await.is_none());
}

/// World endpoint whose first call blocks until released.
#[derive(Default)]
struct Gate {
    calls: AtomicU64,
    entered: Notify,
    release: Notify,
}

async fn gated_world(State(gate): State<Arc<Gate>>) -> axum::Json<Value> {
    let call = gate.calls.fetch_add(1, Ordering::SeqCst);
    if call == 0 {
        gate.entered.notify_one();
        gate.release.notified().await;
    }
    let tag = if call == 0 { "old" } else { "new" };
    axum::Json(json!({
        "tick": call.saturating_add(1),
        "terrain": [{"q": 0, "r": 0, "t": tag}],
    }))
}

#[tokio::test]
async fn slower_older_refresh_is_discarded() {
    let gate = Arc::new(Gate::default());
    let router = Router::new()
        .route(Endpoint::World.path(), get(gated_world))
        .with_state(Arc::clone(&gate));
    let addr = serve(router).await;
    let controller = EditorController::new(Transport::new(&format!("http://{addr}")), DEFAULT_SPAWN_TABLE);

    let older = tokio::spawn({
        let controller = controller.clone();
        async move { controller.refresh().await }
    });
    gate.entered.notified().await;

    let newer = controller.refresh().await.unwrap();
    assert_eq!(newer, RefreshOutcome::Applied { generation: 2, tick: 2 });

    gate.release.notify_one();
    let older = older.await.unwrap().unwrap();
    assert_eq!(older, RefreshOutcome::Stale { generation: 1, superseded_by: 2 });

    let view = controller.view().current().await.unwrap();
    assert_eq!(view.cell(HexCoord::new(0, 0)).unwrap().terrain, "new");
    assert_eq!(controller.view().tick().await, 2);
}

async fn flaky_world(State(calls): State<Arc<AtomicU64>>) -> axum::response::Response {
    use axum::response::IntoResponse;

    if calls.fetch_add(1, Ordering::SeqCst) == 0 {
        axum::Json(json!({"tick": 9, "terrain": [{"q": 1, "r": 1, "t": "hills"}]})).into_response()
    } else {
        "<html>oops</html>".into_response()
    }
}

#[tokio::test]
async fn undecodable_snapshot_keeps_previous_view() {
    let router = Router::new()
        .route(Endpoint::World.path(), get(flaky_world))
        .with_state(Arc::new(AtomicU64::new(0)));
    let addr = serve(router).await;
    let controller = EditorController::new(Transport::new(&format!("http://{addr}")), DEFAULT_SPAWN_TABLE);

    controller.refresh().await.unwrap();
    let before = controller.view().current().await.unwrap();

    let err = controller.refresh().await.unwrap_err();
    assert!(matches!(err, EditorError::Decode(_)));
    assert_eq!(controller.view().current().await.unwrap(), before);
    assert_eq!(controller.view().tick().await, 9);
}

#[tokio::test]
async fn session_runs_commands_with_state_at_read_time() {
    let (stub, controller) = start_stub().await;
    let mut session = Session::new(Arc::new(controller), EditorState::from_config(&EditorConfig::default()));

    let input = b"mode spawn\nclick 3 4\nterrain forest\nmode paint\nclick 0 0\nbogus\nquit\nclick 9 9\n";
    session.run(&input[..]).await.unwrap();

    assert_eq!(session.state().mode, EditorMode::Paint);
    assert_eq!(session.state().selections.terrain, "forest");

    let log = calls(&stub.requests().await);
    assert!(log.contains(&(Endpoint::Spawner, json!({"q": 3, "r": 4, "table": "wilds_basic"}))));
    assert!(log.contains(&(Endpoint::Paint, json!({"q": 0, "r": 0, "terrain": "forest"}))));
    let refreshes = log.iter().filter(|(e, _)| *e == Endpoint::World).count();
    assert_eq!(refreshes, 2);
    assert_eq!(log.len(), 4);
}

/// Backend that keeps route points exactly as posted, like the real one.
#[derive(Default)]
struct VerbatimRoutes {
    routes: Mutex<Vec<Value>>,
}

async fn verbatim_route(State(backend): State<Arc<VerbatimRoutes>>, axum::Json(body): axum::Json<Value>) -> axum::Json<Value> {
    let mut routes = backend.routes.lock().await;
    let id = format!("patrol_{}", routes.len().saturating_add(1));
    routes.push(json!({
        "id": id,
        "points": [[body["q1"], body["r1"]], [body["q2"], body["r2"]]],
    }));
    axum::Json(json!({"ok": true, "id": id}))
}

async fn verbatim_world(State(backend): State<Arc<VerbatimRoutes>>) -> axum::Json<Value> {
    let routes = backend.routes.lock().await.clone();
    axum::Json(json!({
        "tick": 3,
        "terrain": [{"q": 0, "r": 0, "t": "plains"}],
        "routes": routes,
        "regional_unrest": {"west": 2, "east": 1},
    }))
}

async fn start_verbatim() -> (Arc<VerbatimRoutes>, EditorController) {
    let backend = Arc::new(VerbatimRoutes::default());
    let router = Router::new()
        .route(Endpoint::World.path(), get(verbatim_world))
        .route(Endpoint::Route.path(), post(verbatim_route))
        .with_state(Arc::clone(&backend));
    let addr = serve(router).await;
    let controller = EditorController::new(Transport::new(&format!("http://{addr}")), DEFAULT_SPAWN_TABLE);
    (backend, controller)
}

#[tokio::test]
async fn unvalidated_route_text_is_sent_and_view_keeps_refreshing() {
    let (backend, controller) = start_verbatim().await;

    let report = controller.save_route(&RouteForm::new("", "1", "2", "x")).await.unwrap();
    assert!(report.refresh.is_applied());
    assert_eq!(
        backend.routes.lock().await[0]["points"],
        json!([[0, 1], [2, null]])
    );

    let report = controller.save_route(&RouteForm::new("1.5", "1", " 3 ", "-0")).await.unwrap();
    assert!(report.refresh.is_applied());

    let view = controller.view().current().await.unwrap();
    assert!(view.status.contains("routes=2\n"));
    assert!(view.status.ends_with(r#"unrest={"west":2,"east":1}"#));

    // A further refresh over the stored values still renders.
    assert!(controller.refresh().await.unwrap().is_applied());
    assert_eq!(controller.view().committed_generation().await, 3);
}

async fn loose_world() -> axum::Json<Value> {
    axum::Json(json!({
        "tick": 11,
        "terrain": [{"q": 0, "r": 0, "t": "forest"}],
        "sites": [{"id": "site_1", "kind": "ruin", "q": "0", "r": 0}],
        "routes": [{"id": "patrol_1", "points": [[null, 1], [1.5, 1]]}],
        "rumors": [{"text": "not a plain string"}],
    }))
}

#[tokio::test]
async fn loosely_typed_collections_still_render() {
    let router = Router::new().route(Endpoint::World.path(), get(loose_world));
    let addr = serve(router).await;
    let controller = EditorController::new(Transport::new(&format!("http://{addr}")), DEFAULT_SPAWN_TABLE);

    let outcome = controller.refresh().await.unwrap();

    assert_eq!(outcome, RefreshOutcome::Applied { generation: 1, tick: 11 });
    let view = controller.view().current().await.unwrap();
    assert_eq!(view.cell(HexCoord::new(0, 0)).unwrap().terrain, "forest");
    assert!(view.status.contains("sites=1\nspawners=0\nroutes=1\nrumors=1\n"));
}

#[tokio::test]
async fn form_submission_runs_inside_spawned_task() {
    let (stub, controller) = start_stub().await;

    let task = tokio::spawn(async move {
        controller.submit(&RouteForm::new("1", "1", "2", "1")).await
    });
    let report = task.await.unwrap().unwrap();

    assert_eq!(report.endpoint, Endpoint::Route);
    assert_eq!(stub.requests().await.len(), 2);
}

async fn structured_refusal() -> (axum::http::StatusCode, axum::Json<Value>) {
    (
        axum::http::StatusCode::UNPROCESSABLE_ENTITY,
        axum::Json(json!({"error": {"field": "terrain", "reason": "unknown tag"}})),
    )
}

#[tokio::test]
async fn structured_error_body_is_a_refusal() {
    let router = Router::new()
        .route(Endpoint::Paint.path(), post(structured_refusal))
        .route(Endpoint::World.path(), get(loose_world));
    let addr = serve(router).await;
    let controller = EditorController::new(Transport::new(&format!("http://{addr}")), DEFAULT_SPAWN_TABLE);

    let report = controller.on_hex(&paint_state("lava"), HexCoord::new(0, 0)).await.unwrap();

    let ack = report.ack();
    assert!(ack.is_refusal());
    assert!(ack.error.unwrap().contains("unknown tag"));
    assert!(report.refresh.is_applied());
}
