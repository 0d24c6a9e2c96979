//! `/login` and `/register`

use std::io::{self, BufRead, Write};

use anyhow::anyhow;
use cartridge_client::auth::{LOGIN_FAILED, REGISTER_FAILED};
use shared::client::RegisterRequest;

use crate::app::App;
use crate::cli::RegisterArgs;

fn prompt_password() -> anyhow::Result<String> {
    eprint!("Пароль: ");
    io::stderr().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

pub async fn login(
    app: &App,
    username: &str,
    password: Option<String>,
    remember: bool,
) -> anyhow::Result<()> {
    let password = match password {
        Some(p) => p,
        None => prompt_password()?,
    };
    if username.trim().is_empty() || password.is_empty() {
        anyhow::bail!("Введите имя пользователя и пароль");
    }

    let target = app
        .auth
        .login(username.trim(), &password, remember)
        .await
        .map_err(|e| anyhow!(e.user_message(LOGIN_FAILED)))?;

    println!("Вход выполнен: {}", username.trim());
    println!("Переход: {}", target);
    Ok(())
}

pub async fn register(app: &App, args: RegisterArgs) -> anyhow::Result<()> {
    let req = RegisterRequest {
        username: args.username,
        password: args.password,
        full_name: args.full_name,
        role: args.role,
    };
    app.auth
        .register(&req)
        .await
        .map_err(|e| anyhow!(e.user_message(REGISTER_FAILED)))?;

    println!("Пользователь {} зарегистрирован. Выполните вход.", req.username);
    Ok(())
}

pub fn logout(app: &App) -> anyhow::Result<()> {
    app.auth.logout()?;
    println!("Сессия завершена");
    Ok(())
}
