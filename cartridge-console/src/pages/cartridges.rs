//! `/cartridges`

use anyhow::anyhow;
use cartridge_client::ListResource;
use cartridge_client::listing::{CartridgeFilter, Cartridges};
use shared::models::{Cartridge, CartridgeRequest};

use super::{PageView, confirm_delete, mutate_and_show, print_details, print_items, show_page};
use crate::app::App;
use crate::cli::{CartridgeFields, CartridgesCommand};
use crate::render;

const SAVE_FAILED: &str = "Ошибка сохранения картриджа";
const NOT_FOUND: &str = "Картридж не найден";

impl PageView for Cartridges {
    const TITLE: &'static str = "Картриджи";
    const HEADERS: &'static [&'static str] = &["ID", "Модель", "Серийный номер", "Статус", "Объект"];

    fn row(c: &Cartridge) -> Vec<String> {
        vec![
            c.id.clone(),
            c.model.clone(),
            render::opt(c.serial_number.as_deref()),
            c.status.label().to_string(),
            render::opt(c.current_location_name.as_deref()),
        ]
    }

    fn details(c: &Cartridge) -> Vec<(&'static str, String)> {
        let color = match c.color() {
            Some(color) => color.label().to_string(),
            None => render::opt(c.color.as_deref()),
        };
        vec![
            ("ID", c.id.clone()),
            ("Модель", c.model.clone()),
            ("Производитель", render::opt(c.brand.as_deref())),
            ("Артикул", render::opt(c.part_number.as_deref())),
            ("Серийный номер", render::opt(c.serial_number.as_deref())),
            ("Цвет", color),
            ("Ресурс, стр.", render::opt(c.resource_pages.map(|p| p.to_string()).as_deref())),
            ("Статус", c.status.label().to_string()),
            ("Объект", render::opt(c.current_location_name.as_deref())),
            ("Совместимые принтеры", render::opt(c.compatible_printers.as_deref())),
            ("Описание", render::opt(c.description.as_deref())),
            ("Создан", render::datetime(c.created_at)),
            ("Изменён", render::datetime(c.updated_at)),
        ]
    }
}

/// Overlay the flags that were given onto `req`
fn apply(fields: CartridgeFields, req: &mut CartridgeRequest) {
    if fields.serial_number.is_some() {
        req.serial_number = fields.serial_number;
    }
    if fields.resource_pages.is_some() {
        req.resource_pages = fields.resource_pages;
    }
    if fields.description.is_some() {
        req.description = fields.description;
    }
    if fields.location.is_some() {
        req.current_location_id = fields.location;
    }
    if fields.brand.is_some() {
        req.brand = fields.brand;
    }
    if fields.part_number.is_some() {
        req.part_number = fields.part_number;
    }
    if fields.color.is_some() {
        req.color = fields.color;
    }
    if fields.compatible_printers.is_some() {
        req.compatible_printers = fields.compatible_printers;
    }
}

async fn fetch(app: &App, id: &str) -> anyhow::Result<Cartridge> {
    app.api
        .cartridges()
        .get(id)
        .await
        .map_err(|e| anyhow!(e.user_message(NOT_FOUND)))
}

pub async fn run(app: &App, cmd: CartridgesCommand) -> anyhow::Result<()> {
    match cmd {
        CartridgesCommand::List {
            page,
            model,
            serial_number,
            status,
            server_filter,
        } => {
            let filter = CartridgeFilter {
                model,
                serial_number,
                status,
            };
            show_page::<Cartridges>(app, page.page, filter, server_filter).await
        }
        CartridgesCommand::Show { id } => {
            print_details::<Cartridges>(&fetch(app, &id).await?);
            Ok(())
        }
        CartridgesCommand::Serial { serial_number } => {
            let cartridge = app
                .api
                .cartridges()
                .by_serial(&serial_number)
                .await
                .map_err(|e| anyhow!(e.user_message(NOT_FOUND)))?;
            print_details::<Cartridges>(&cartridge);
            Ok(())
        }
        CartridgesCommand::Create {
            model,
            status,
            fields,
            page,
        } => {
            if model.trim().is_empty() {
                anyhow::bail!("Модель обязательна");
            }
            let mut req = CartridgeRequest::new(model.trim(), status);
            apply(fields, &mut req);
            let created = mutate_and_show::<Cartridges, _, _, _>(app, page.page, SAVE_FAILED, |api| {
                async move { api.cartridges().create(&req).await }
            })
            .await?;
            tracing::info!(id = %created.id, model = %created.model, "cartridge created");
            Ok(())
        }
        CartridgesCommand::Update {
            id,
            model,
            status,
            fields,
            page,
        } => {
            let mut req = fetch(app, &id).await?.to_request();
            if let Some(model) = model {
                req.model = model;
            }
            if let Some(status) = status {
                req.status = status;
            }
            apply(fields, &mut req);
            mutate_and_show::<Cartridges, _, _, _>(app, page.page, SAVE_FAILED, |api| {
                async move { api.cartridges().update(&id, &req).await }
            })
            .await?;
            Ok(())
        }
        CartridgesCommand::Delete { id, confirm, page } => {
            let cartridge = fetch(app, &id).await?;
            confirm_delete::<Cartridges>(app, cartridge, confirm.yes, page.page, None).await
        }
        CartridgesCommand::ByStatus { status } => {
            let items = app
                .api
                .cartridges()
                .by_status(status)
                .await
                .map_err(|e| anyhow!(e.user_message(Cartridges::LOAD_FAILED)))?;
            println!("{}: {}", Cartridges::TITLE, status.label());
            print_items::<Cartridges>(&items);
            Ok(())
        }
        CartridgesCommand::ByLocation { location_id } => {
            let items = app
                .api
                .cartridges()
                .by_location(&location_id)
                .await
                .map_err(|e| anyhow!(e.user_message(Cartridges::LOAD_FAILED)))?;
            print_items::<Cartridges>(&items);
            Ok(())
        }
    }
}
