use std::sync::Arc;

use log::Level;
use serde_json::{json, Value};
use tokio::sync::mpsc;

use redux_track::trackers::{channel_tracker, log_tracker};
use redux_track::{
    init_tracking, next_fn, Action, MiddlewareChain, TrackedEvent, Tracker, TrackingConfig,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    println!("Redux Track Example");
    println!("===================");

    let (tx, mut rx) = mpsc::unbounded_channel::<TrackedEvent>();

    // Analytics consumer, runs independently of the dispatch chain
    let consumer = tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            println!(
                "analytics <- {} {} at {}",
                event.action_type,
                Value::Object(event.payload),
                event.timestamp
            );
        }
    });

    let mut chain: MiddlewareChain<(), Action> = MiddlewareChain::new();
    chain.add(Arc::new(init_tracking(TrackingConfig {
        log_invocations: true,
        ..Default::default()
    })));

    let mut dispatched = 0;
    let state = Arc::new(std::sync::Mutex::new(0i64));
    let reducer_state = state.clone();
    let dispatch = chain.apply(
        &(),
        next_fn(move |action: Action| {
            let mut counter = reducer_state
                .lock()
                .map_err(|e| redux_track::Error::Dispatch(e.to_string()))?;
            match action.action_type() {
                "counter.increment" => {
                    *counter += action.get("by").and_then(Value::as_i64).unwrap_or(1)
                }
                "counter.reset" => *counter = 0,
                _ => {}
            }
            Ok(action)
        }),
    );

    let actions = vec![
        Action::new("counter.increment")
            .field("by", 2)
            .track(channel_tracker(tx.clone())),
        Action::new("counter.increment").field("by", 5).track(vec![
            log_tracker(Level::Info),
            channel_tracker(tx.clone()),
        ]),
        Action::new("counter.reset").track(Tracker::observe(|action_type, payload| {
            println!("inline tracker saw {} with {} field(s)", action_type, payload.len());
        })),
        Action::try_from(json!({ "type": "counter.increment", "source": "json" }))?,
    ];

    for action in actions {
        println!("Dispatching: {}", action.to_value());
        let out = dispatch(action)?;
        dispatched += 1;
        println!("Forwarded: {} (dispatch #{})", out.action_type(), dispatched);
    }

    println!("Final counter: {}", *state.lock().map_err(|e| e.to_string())?);

    // Close every sender so the consumer drains and exits
    drop(tx);
    consumer.await?;

    Ok(())
}
