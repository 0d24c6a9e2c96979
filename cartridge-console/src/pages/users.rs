//! `/users`

use anyhow::anyhow;
use cartridge_client::listing::{UserFilter, Users};
use shared::models::{CreateUserRequest, UpdateUserRequest, User};

use super::{PageView, confirm_delete, mutate_and_show, print_details, show_page};
use crate::app::App;
use crate::cli::UsersCommand;
use crate::render;

const SAVE_FAILED: &str = "Ошибка при сохранении пользователя";
const CHECK_FAILED: &str = "Ошибка проверки логина";
const NOT_FOUND: &str = "Пользователь не найден";

impl PageView for Users {
    const TITLE: &'static str = "Пользователи";
    const HEADERS: &'static [&'static str] = &["ID", "Логин", "ФИО", "Роль", "Активен"];

    fn row(user: &User) -> Vec<String> {
        vec![
            user.id.clone(),
            user.username.clone(),
            user.full_name.clone(),
            user.role.label().to_string(),
            render::yes_no(user.enabled),
        ]
    }

    fn details(user: &User) -> Vec<(&'static str, String)> {
        vec![
            ("ID", user.id.clone()),
            ("Логин", user.username.clone()),
            ("ФИО", user.full_name.clone()),
            ("Роль", user.role.label().to_string()),
            ("Активен", render::yes_no(user.enabled)),
        ]
    }
}

async fn fetch(app: &App, id: &str) -> anyhow::Result<User> {
    app.api
        .users()
        .get(id)
        .await
        .map_err(|e| anyhow!(e.user_message(NOT_FOUND)))
}

pub async fn run(app: &App, cmd: UsersCommand) -> anyhow::Result<()> {
    match cmd {
        UsersCommand::List { page, query, role } => {
            show_page::<Users>(app, page.page, UserFilter { query, role }, false).await
        }
        UsersCommand::Show { id } => {
            print_details::<Users>(&fetch(app, &id).await?);
            Ok(())
        }
        UsersCommand::Create {
            username,
            password,
            full_name,
            role,
            page,
        } => {
            let req = CreateUserRequest {
                username,
                password,
                full_name,
                role,
            };
            let user = mutate_and_show::<Users, _, _, _>(app, page.page, SAVE_FAILED, |api| {
                async move { api.users().create(&req).await }
            })
            .await?;
            tracing::info!(id = %user.id, username = %user.username, "user created");
            Ok(())
        }
        UsersCommand::Update {
            id,
            full_name,
            role,
            enabled,
            page,
        } => {
            let req = UpdateUserRequest {
                full_name,
                role,
                enabled,
                password: None,
            };
            if req.is_empty() {
                anyhow::bail!("Нечего обновлять: укажите --full-name, --role или --enabled");
            }
            mutate_and_show::<Users, _, _, _>(app, page.page, SAVE_FAILED, |api| async move {
                api.users().update(&id, &req).await
            })
            .await?;
            Ok(())
        }
        UsersCommand::Delete { id, confirm, page } => {
            let user = fetch(app, &id).await?;
            confirm_delete::<Users>(app, user, confirm.yes, page.page, None).await
        }
        UsersCommand::Enable { id, page } => set_enabled(app, id, true, page.page).await,
        UsersCommand::Disable { id, page } => set_enabled(app, id, false, page.page).await,
        UsersCommand::Password { id, new_password } => {
            if new_password.is_empty() {
                anyhow::bail!("Пароль не может быть пустым");
            }
            app.api
                .users()
                .change_password(&id, &new_password)
                .await
                .map_err(|e| anyhow!(e.user_message(SAVE_FAILED)))?;
            println!("Пароль изменён");
            Ok(())
        }
        UsersCommand::Exists { username } => {
            let exists = app
                .api
                .users()
                .exists(&username)
                .await
                .map_err(|e| anyhow!(e.user_message(CHECK_FAILED)))?;
            if exists {
                println!("Логин {} занят", username);
            } else {
                println!("Логин {} свободен", username);
            }
            Ok(())
        }
    }
}

async fn set_enabled(app: &App, id: String, enabled: bool, page: u32) -> anyhow::Result<()> {
    mutate_and_show::<Users, _, _, _>(app, page, SAVE_FAILED, |api| async move {
        api.users().set_enabled(&id, enabled).await
    })
    .await
}
