//! `/locations`

use anyhow::anyhow;
use cartridge_client::ListResource;
use cartridge_client::listing::{LocationFilter, Locations};
use shared::models::{Location, LocationRequest};

use super::{PageView, confirm_delete, mutate_and_show, print_details, print_items, show_page};
use crate::app::App;
use crate::cli::{LocationFields, LocationsCommand};
use crate::render;

const CREATE_FAILED: &str = "Ошибка создания объекта";
const UPDATE_FAILED: &str = "Ошибка обновления объекта";
const NOT_FOUND: &str = "Объект не найден";

/// Printed under the warning when a delete is refused
pub const BLOCKED_HINT: &str =
    "Для удаления объекта сначала переместите или удалите все картриджи, находящиеся на этом объекте.";

impl PageView for Locations {
    const TITLE: &'static str = "Объекты";
    const HEADERS: &'static [&'static str] = &["ID", "Название", "Адрес", "Кабинет", "Картриджей", "Активен"];

    fn row(l: &Location) -> Vec<String> {
        vec![
            l.id.clone(),
            l.name.clone(),
            l.address.clone(),
            render::opt(l.cabinet.as_deref()),
            l.cartridge_count.to_string(),
            render::yes_no(l.active),
        ]
    }

    fn details(l: &Location) -> Vec<(&'static str, String)> {
        vec![
            ("ID", l.id.clone()),
            ("Название", l.name.clone()),
            ("Адрес", l.address.clone()),
            ("Кабинет", render::opt(l.cabinet.as_deref())),
            ("Контактное лицо", render::opt(l.contact_person.as_deref())),
            ("Телефон", render::opt(l.contact_phone.as_deref())),
            ("Описание", render::opt(l.description.as_deref())),
            ("Картриджей", l.cartridge_count.to_string()),
            ("Активен", render::yes_no(l.active)),
        ]
    }
}

fn apply(fields: LocationFields, req: &mut LocationRequest) {
    if fields.cabinet.is_some() {
        req.cabinet = fields.cabinet;
    }
    if fields.contact_person.is_some() {
        req.contact_person = fields.contact_person;
    }
    if fields.contact_phone.is_some() {
        req.contact_phone = fields.contact_phone;
    }
    if fields.description.is_some() {
        req.description = fields.description;
    }
}

fn require(value: &str, what: &str) -> anyhow::Result<()> {
    if value.trim().is_empty() {
        anyhow::bail!("Поле «{}» обязательно", what);
    }
    Ok(())
}

async fn fetch(app: &App, id: &str) -> anyhow::Result<Location> {
    app.api
        .locations()
        .get(id)
        .await
        .map_err(|e| anyhow!(e.user_message(NOT_FOUND)))
}

pub async fn run(app: &App, cmd: LocationsCommand) -> anyhow::Result<()> {
    match cmd {
        LocationsCommand::List {
            page,
            name,
            address,
            server_filter,
        } => {
            let filter = LocationFilter { name, address };
            show_page::<Locations>(app, page.page, filter, server_filter).await
        }
        LocationsCommand::Show { id } => {
            print_details::<Locations>(&fetch(app, &id).await?);
            Ok(())
        }
        LocationsCommand::Create {
            name,
            address,
            fields,
            page,
        } => {
            require(&name, "Название")?;
            require(&address, "Адрес")?;
            let mut req = LocationRequest::new(name.trim(), address.trim());
            apply(fields, &mut req);
            let created = mutate_and_show::<Locations, _, _, _>(app, page.page, CREATE_FAILED, |api| {
                async move { api.locations().create(&req).await }
            })
            .await?;
            tracing::info!(id = %created.id, name = %created.name, "location created");
            Ok(())
        }
        LocationsCommand::Update {
            id,
            name,
            address,
            fields,
            page,
        } => {
            let mut req = fetch(app, &id).await?.to_request();
            if let Some(name) = name {
                require(&name, "Название")?;
                req.name = name;
            }
            if let Some(address) = address {
                require(&address, "Адрес")?;
                req.address = address;
            }
            apply(fields, &mut req);
            mutate_and_show::<Locations, _, _, _>(app, page.page, UPDATE_FAILED, |api| {
                async move { api.locations().update(&id, &req).await }
            })
            .await?;
            Ok(())
        }
        LocationsCommand::Delete { id, confirm, page } => {
            let location = fetch(app, &id).await?;
            if location.cartridge_count > 0 && !confirm.yes {
                println!("На объекте числится картриджей: {}", location.cartridge_count);
                println!("{}", BLOCKED_HINT);
            }
            confirm_delete::<Locations>(app, location, confirm.yes, page.page, Some(BLOCKED_HINT)).await
        }
        LocationsCommand::Activate { id, page } => set_active(app, id, true, page.page).await,
        LocationsCommand::Deactivate { id, page } => set_active(app, id, false, page.page).await,
        LocationsCommand::Active => {
            let items = app
                .api
                .locations()
                .active()
                .await
                .map_err(|e| anyhow!(e.user_message(Locations::LOAD_FAILED)))?;
            println!("Активные объекты");
            print_items::<Locations>(&items);
            Ok(())
        }
    }
}

async fn set_active(app: &App, id: String, active: bool, page: u32) -> anyhow::Result<()> {
    mutate_and_show::<Locations, _, _, _>(app, page, UPDATE_FAILED, |api| async move {
        api.locations().set_active(&id, active).await
    })
    .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_keeps_untouched_fields() {
        let mut req = LocationRequest::new("Склад", "ул. Мира, 5");
        req.cabinet = Some("101".into());

        let fields = LocationFields {
            contact_person: Some("Иванов И.И.".into()),
            ..LocationFields::default()
        };
        apply(fields, &mut req);

        assert_eq!(req.cabinet.as_deref(), Some("101"));
        assert_eq!(req.contact_person.as_deref(), Some("Иванов И.И."));
        assert_eq!(req.name, "Склад");
    }

    #[test]
    fn test_require_rejects_blank() {
        assert!(require("Склад", "Название").is_ok());
        let err = require("  ", "Адрес").unwrap_err();
        assert_eq!(err.to_string(), "Поле «Адрес» обязательно");
    }
}
