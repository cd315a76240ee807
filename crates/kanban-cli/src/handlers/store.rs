use crate::cli::StoreAction;
use crate::context::CliContext;
use crate::output;
use serde_json::json;

pub async fn handle(ctx: &CliContext, action: StoreAction) -> anyhow::Result<()> {
    let path = ctx.slot_path();
    match action {
        StoreAction::Info => {
            output::output_success(json!({
                "path": path.display().to_string(),
                "exists": path.exists(),
            }));
        }
        StoreAction::Reset => {
            ctx.reset_slot().await;
            tracing::info!("Cleared local slot at {}", path.display());
            output::output_success(json!({ "cleared": path.display().to_string() }));
        }
    }
    Ok(())
}
