//! `/operations`: stock movements; created, never edited or deleted

use anyhow::anyhow;
use cartridge_client::ListResource;
use cartridge_client::listing::{OperationFilter, Operations};
use shared::models::{Operation, OperationRequest};
use shared::util::non_blank;

use super::{PageView, mutate_and_show, print_details, print_items, show_page};
use crate::app::App;
use crate::cli::OperationsCommand;
use crate::render;

const CREATE_FAILED: &str = "Ошибка создания операции";
const NOT_FOUND: &str = "Операция не найдена";

impl PageView for Operations {
    const TITLE: &'static str = "Операции";
    const HEADERS: &'static [&'static str] =
        &["Дата", "Тип", "Картридж", "Кол-во", "Объект", "Исполнитель"];

    fn row(op: &Operation) -> Vec<String> {
        vec![
            render::datetime(op.operation_date),
            op.operation_type.label().to_string(),
            cartridge_label(op),
            op.count.to_string(),
            render::opt(op.location_name.as_deref()),
            render::opt(op.performed_by_name.as_deref()),
        ]
    }

    fn details(op: &Operation) -> Vec<(&'static str, String)> {
        vec![
            ("ID", op.id.clone()),
            ("Дата", render::datetime(op.operation_date)),
            ("Тип", op.operation_type.label().to_string()),
            ("Картридж", cartridge_label(op)),
            ("Количество", op.count.to_string()),
            ("Объект", render::opt(op.location_name.as_deref())),
            ("Исполнитель", render::opt(op.performed_by_name.as_deref())),
            ("Примечание", render::opt(op.notes.as_deref())),
        ]
    }
}

/// Model and serial when known, the id otherwise
fn cartridge_label(op: &Operation) -> String {
    match (op.cartridge_model.as_deref(), op.cartridge_serial_number.as_deref()) {
        (Some(model), Some(serial)) if !serial.is_empty() => format!("{} ({})", model, serial),
        (Some(model), _) => model.to_string(),
        _ => op.cartridge_id.clone(),
    }
}

fn load_failed(e: cartridge_client::ClientError) -> anyhow::Error {
    anyhow!(e.user_message(Operations::LOAD_FAILED))
}

pub async fn run(app: &App, cmd: OperationsCommand) -> anyhow::Result<()> {
    match cmd {
        OperationsCommand::List {
            page,
            operation_type,
            cartridge,
            location,
            from,
            to,
            server_filter,
        } => {
            let filter = OperationFilter {
                operation_type,
                cartridge_id: cartridge,
                location_id: location,
                start_date: from,
                end_date: to,
            };
            if !server_filter && (filter.start_date.is_some() || filter.end_date.is_some()) {
                tracing::warn!("date filters apply only with --server-filter");
            }
            show_page::<Operations>(app, page.page, filter, server_filter).await
        }
        OperationsCommand::Show { id } => {
            let op = app
                .api
                .operations()
                .get(&id)
                .await
                .map_err(|e| anyhow!(e.user_message(NOT_FOUND)))?;
            print_details::<Operations>(&op);
            Ok(())
        }
        OperationsCommand::Create {
            operation_type,
            cartridge,
            count,
            location,
            notes,
            page,
        } => {
            if count < 1 {
                anyhow::bail!("Количество должно быть не меньше 1");
            }
            let req = OperationRequest {
                operation_type,
                count,
                cartridge_id: cartridge,
                location_id: non_blank(location),
                notes: non_blank(notes),
            };
            let created = mutate_and_show::<Operations, _, _, _>(app, page.page, CREATE_FAILED, |api| {
                async move { api.operations().create(&req).await }
            })
            .await?;
            tracing::info!(id = %created.id, kind = %created.operation_type, "operation recorded");
            Ok(())
        }
        OperationsCommand::ByCartridge { cartridge_id } => {
            let items = app
                .api
                .operations()
                .by_cartridge(&cartridge_id)
                .await
                .map_err(load_failed)?;
            print_items::<Operations>(&items);
            Ok(())
        }
        OperationsCommand::ByLocation { location_id } => {
            let items = app
                .api
                .operations()
                .by_location(&location_id)
                .await
                .map_err(load_failed)?;
            print_items::<Operations>(&items);
            Ok(())
        }
        OperationsCommand::ByType { operation_type } => {
            let items = app
                .api
                .operations()
                .by_type(operation_type)
                .await
                .map_err(load_failed)?;
            println!("{}: {}", Operations::TITLE, operation_type.label());
            print_items::<Operations>(&items);
            Ok(())
        }
        OperationsCommand::ByUser { user_id } => {
            let items = app
                .api
                .operations()
                .by_user(&user_id)
                .await
                .map_err(load_failed)?;
            print_items::<Operations>(&items);
            Ok(())
        }
        OperationsCommand::ByDate { from, to } => {
            let items = app
                .api
                .operations()
                .by_date(&from, &to)
                .await
                .map_err(load_failed)?;
            println!("{}: {} .. {}", Operations::TITLE, from, to);
            print_items::<Operations>(&items);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn operation(extra: serde_json::Value) -> Operation {
        let mut base = serde_json::json!({
            "id": "o1", "type": "ISSUE", "count": 2, "cartridgeId": "c1"
        });
        if let (Some(base), Some(extra)) = (base.as_object_mut(), extra.as_object()) {
            base.extend(extra.clone());
        }
        serde_json::from_value(base).unwrap()
    }

    #[test]
    fn test_cartridge_label_fallbacks() {
        let op = operation(serde_json::json!({}));
        assert_eq!(cartridge_label(&op), "c1");

        let op = operation(serde_json::json!({ "cartridgeModel": "HP 85A" }));
        assert_eq!(cartridge_label(&op), "HP 85A");

        let op = operation(serde_json::json!({
            "cartridgeModel": "HP 85A", "cartridgeSerialNumber": "SN-7"
        }));
        assert_eq!(cartridge_label(&op), "HP 85A (SN-7)");
    }
}
