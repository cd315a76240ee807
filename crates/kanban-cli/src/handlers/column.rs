use crate::cli::ColumnAction;
use crate::context::CliContext;
use crate::handlers::dashboard::failure;
use crate::output;

pub async fn handle(ctx: &CliContext, action: ColumnAction) -> anyhow::Result<()> {
    match action {
        ColumnAction::List { dashboard } => match ctx.open(&dashboard).await {
            Ok(state) => output::output_list(state.columns),
            Err(e) => output::output_error(&e),
        },
        ColumnAction::Create { dashboard, title } => {
            if let Err(e) = ctx.open(&dashboard).await {
                output::output_error(&e);
            }
            match ctx.store.create_column(&title).await {
                Some(column) => output::output_success(&column),
                None => output::output_error(&failure(ctx)),
            }
        }
        ColumnAction::Reorder { dashboard, ids } => {
            if let Err(e) = ctx.open(&dashboard).await {
                output::output_error(&e);
            }
            let Some(sync) = ctx.store.reorder_columns(&ids) else {
                output::output_error(&failure(ctx));
            };
            if let Err(e) = sync.settled().await {
                output::output_error(&e.to_string());
            }
            output::output_list(ctx.store.snapshot().columns);
        }
    }
    Ok(())
}
