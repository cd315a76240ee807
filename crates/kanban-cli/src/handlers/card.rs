use crate::cli::{CardAction, CardMoveArgs, CardUpdateArgs};
use crate::context::CliContext;
use crate::handlers::dashboard::failure;
use crate::output;
use crate::handlers::field_update;
use kanban_domain::CardUpdate;

pub async fn handle(ctx: &CliContext, action: CardAction) -> anyhow::Result<()> {
    match action {
        CardAction::Create {
            dashboard,
            column,
            title,
        } => {
            if let Err(e) = ctx.open(&dashboard).await {
                output::output_error(&e);
            }
            match ctx.store.create_card(&column, &title).await {
                Some(card) => output::output_success(&card),
                None => output::output_error(&failure(ctx)),
            }
        }
        CardAction::Update(args) => {
            if let Err(e) = ctx.open(&args.dashboard).await {
                output::output_error(&e);
            }
            let updates = build_card_update(&args);
            match ctx.store.update_card(&args.column, &args.id, &updates).await {
                Some(card) => output::output_success(&card),
                None => output::output_error(&failure(ctx)),
            }
        }
        CardAction::Move(args) => handle_move(ctx, args).await,
    }
    Ok(())
}

async fn handle_move(ctx: &CliContext, args: CardMoveArgs) {
    if let Err(e) = ctx.open(&args.dashboard).await {
        output::output_error(&e);
    }
    let Some(sync) = ctx
        .store
        .move_card(&args.from, &args.to, args.from_index, args.to_index)
    else {
        output::output_error(&failure(ctx));
    };
    if let Err(e) = sync.settled().await {
        output::output_error(&e.to_string());
    }

    let state = ctx.store.snapshot();
    match state.column(&args.to) {
        Some(column) => output::output_success(column),
        None => output::output_error(&format!("Column not found: {}", args.to)),
    }
}

fn build_card_update(args: &CardUpdateArgs) -> CardUpdate {
    CardUpdate {
        title: args.title.clone(),
        description: field_update(args.description.clone(), args.clear_description),
        due_date: field_update(args.due_date, args.clear_due_date),
        ..Default::default()
    }
}
