use crate::cli::{DashboardAction, DashboardUpdateArgs};
use crate::context::CliContext;
use crate::handlers::field_update;
use crate::output;
use kanban_domain::DashboardUpdate;
use serde_json::json;

pub async fn handle(ctx: &CliContext, action: DashboardAction) -> anyhow::Result<()> {
    match action {
        DashboardAction::List => {
            ctx.store.load_dashboards().await;
            match ctx.settled_state() {
                Ok(state) => output::output_list(state.dashboards),
                Err(e) => output::output_error(&e),
            }
        }
        DashboardAction::Create { title } => match ctx.store.create_dashboard(&title).await {
            Some(dashboard) => output::output_success(&dashboard),
            None => output::output_error(&failure(ctx)),
        },
        DashboardAction::Show { id } => match ctx.open(&id).await {
            Ok(state) => output::output_success(json!({
                "dashboard": state.current_dashboard,
                "columns": state.columns,
            })),
            Err(e) => output::output_error(&e),
        },
        DashboardAction::Update(args) => {
            let updates = build_dashboard_update(&args);
            match ctx.store.update_dashboard(&args.id, &updates).await {
                Some(dashboard) => output::output_success(&dashboard),
                None => output::output_error(&failure(ctx)),
            }
        }
    }
    Ok(())
}

pub(crate) fn failure(ctx: &CliContext) -> String {
    ctx.settled_state()
        .err()
        .unwrap_or_else(|| "Operation produced no result".to_string())
}

fn build_dashboard_update(args: &DashboardUpdateArgs) -> DashboardUpdate {
    DashboardUpdate {
        title: args.title.clone(),
        description: field_update(args.description.clone(), args.clear_description),
        background: field_update(args.background.clone(), args.clear_background),
        is_public: field_update(args.public, false),
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kanban_domain::{DashboardId, FieldUpdate};

    fn args() -> DashboardUpdateArgs {
        DashboardUpdateArgs {
            id: DashboardId::new("d"),
            title: None,
            description: None,
            clear_description: false,
            background: None,
            clear_background: false,
            public: None,
        }
    }

    #[test]
    fn test_untouched_flags_are_no_change() {
        let updates = build_dashboard_update(&args());
        assert_eq!(updates, DashboardUpdate::default());
    }

    #[test]
    fn test_clear_flag_clears() {
        let updates = build_dashboard_update(&DashboardUpdateArgs {
            clear_description: true,
            public: Some(true),
            ..args()
        });
        assert_eq!(updates.description, FieldUpdate::Clear);
        assert_eq!(updates.is_public, FieldUpdate::Set(true));
    }
}
