//! Binds a per-request logger into a context and logs from nested calls.
//!
//! Run with `RUST_LOG=debug` to see the debug lines.

use std::time::Duration;

use ctxlog::{Attr, Context, Level, LoggingConfig};

async fn load_user(ctx: &Context, id: u64) {
    let ctx = ctx.with_logger(ctxlog::with_group(ctx, "db"));
    ctxlog::debug(&ctx, "querying user", &[Attr::uint("id", id)]);
    tokio::time::sleep(Duration::from_millis(20)).await;
    ctxlog::info_ctx(&ctx, "user loaded", &[Attr::duration("took", Duration::from_millis(20))]);
}

async fn handle_request(ctx: Context, user: u64) {
    let request_id = uuid::Uuid::new_v4().to_string();
    let ctx = ctx.with_logger(ctxlog::with(&ctx, &[Attr::string("request_id", request_id)]));

    ctxlog::info(&ctx, "request started", &[]);
    load_user(&ctx, user).await;

    // Housekeeping that should never log.
    let quiet = ctx.with_logger(None);
    ctxlog::warn(&quiet, "never shown", &[]);

    ctxlog::log(&ctx, Level(2), "request finished", &[Attr::bool("ok", true)]);
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    ctxlog::observability::init_logging(&LoggingConfig {
        filter: "debug".to_string(),
        default_level: Level::DEBUG,
        ..LoggingConfig::default()
    })?;

    let (root, cancel) = Context::background().with_cancel();
    let tasks: Vec<_> = (1..=3)
        .map(|user| tokio::spawn(handle_request(root.clone(), user)))
        .collect();
    for task in tasks {
        task.await?;
    }

    let slow = root.with_timeout(Duration::from_millis(10));
    let reason = slow.done().await;
    ctxlog::warn_ctx(&slow, "gave up waiting", &[Attr::string("reason", reason.to_string())]);

    cancel.cancel();
    ctxlog::error_ctx(&root, "shutting down", &[]);

    ctxlog::disable_default_logger();
    ctxlog::info(&Context::background(), "dropped: default logger disabled", &[]);
    Ok(())
}
