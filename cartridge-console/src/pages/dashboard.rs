//! `/dashboard`: stock counts per status

use anyhow::anyhow;

use crate::app::App;
use crate::render::Table;

const LOAD_FAILED: &str = "Ошибка загрузки статистики";

pub async fn show(app: &App) -> anyhow::Result<()> {
    let counts = app
        .api
        .dashboard()
        .status_counts()
        .await
        .map_err(|e| anyhow!(e.user_message(LOAD_FAILED)))?;

    let mut table = Table::new(&["Статус", "Количество"]);
    for (status, count) in &counts.counts {
        table.push(vec![status.label().to_string(), count.to_string()]);
    }
    table.push(vec!["Всего".to_string(), counts.total().to_string()]);

    println!("Панель управления");
    if let Some(role) = app.session.role() {
        println!("Роль: {}", shared::models::role_label(&role));
    }
    println!("{}", table.render());
    Ok(())
}
