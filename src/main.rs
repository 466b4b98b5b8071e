//! Hooded Walker native entry point
//!
//! The playable build is the wasm module (`trunk serve`); natively this
//! runs a scripted walk headless and reports how far it got.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use hooded_walker::sim::{FootId, PointerIntent, TickInput, WalkerState, tick};
    use hooded_walker::{Settings, Tuning};

    env_logger::init();

    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(1);
    let tuning = std::env::var("WALKER_TUNING")
        .map(|json| Tuning::from_json_or(&json, Tuning::default()))
        .unwrap_or_default();
    log::info!("Hooded Walker (native) starting, seed {}", seed);

    let mut state = WalkerState::new(seed, tuning, Settings::load());
    let dt = 1.0 / 60.0;
    let stride = state.tuning.leg_length * 0.9;

    // Leapfrog the trailing foot past the leading one until something gives
    for step in 0..200 {
        if !state.is_alive() {
            break;
        }
        let (back, front) = if state.left.pos.x <= state.right.pos.x {
            (FootId::Left, FootId::Right)
        } else {
            (FootId::Right, FootId::Left)
        };
        let lock = state.tuning.lock_column;
        let from = state.camera.world_to_screen_x(state.foot(back).pos.x, lock);
        let to = state.camera.world_to_screen_x(state.foot(front).pos.x + stride, lock);
        let input = TickInput {
            intents: vec![
                PointerIntent::Down { x: from, y: state.foot(back).pos.y },
                PointerIntent::Move { x: to },
                PointerIntent::Up,
            ],
        };
        tick(&mut state, &input, dt);
        for _ in 0..20 {
            tick(&mut state, &TickInput::default(), dt);
        }
        log::debug!("step {}: {:.1}m", step, state.body.distance);
    }

    let status = state.status();
    println!("{} after {:.1}m", status.text(), status.distance);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is web::wasm_start, this is just to satisfy the compiler
}
